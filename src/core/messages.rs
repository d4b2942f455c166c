//! User-facing messages for failure kinds.
//!
//! The presentation layer uses `field` to decide which form input to flag and
//! `text` as the message shown next to it.

use crate::core::kinds::ErrorKind;

/// A message bound to a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Form field the message belongs to
    pub field: &'static str,
    /// Text shown to the user
    pub text: &'static str,
}

/// Looks up the message for `kind`. Passing kinds have none.
#[must_use]
pub const fn message_for(kind: ErrorKind) -> Option<ErrorMessage> {
    let (field, text) = match kind {
        ErrorKind::Success | ErrorKind::CheckOk => return None,
        ErrorKind::Duplicate => ("codeError", "This employee code is already registered."),
        ErrorKind::HalfSize => (
            "passwordError",
            "Passwords may only contain half-width letters and digits.",
        ),
        ErrorKind::RangeCheck => (
            "passwordError",
            "Passwords must be between 8 and 16 characters.",
        ),
        ErrorKind::DateCheck => (
            "reportDateError",
            "A report for this date has already been registered.",
        ),
        ErrorKind::LoginCheck => ("deleteError", "You cannot delete your own account."),
        ErrorKind::NotFound => ("notFoundError", "The requested record does not exist."),
    };
    Some(ErrorMessage { field, text })
}
