//! Result codes returned by the services.
//!
//! A service call that fails a business rule still returns `Ok`, carrying one of
//! these kinds, so the presentation layer can pick a message and re-render the
//! form. Only store or hashing failures travel as [`crate::errors::Error`].

use serde::Serialize;

/// Outcome of a service operation or of a sub-check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The operation completed and was persisted
    Success,
    /// A sub-check (password policy) passed; never returned by a service operation
    CheckOk,
    /// The employee code is already registered
    Duplicate,
    /// The password contains characters outside half-width alphanumerics
    HalfSize,
    /// The password length is outside 8..=16
    RangeCheck,
    /// The employee already has a live report on that date
    DateCheck,
    /// The acting employee tried to delete themselves
    LoginCheck,
    /// The record to act on does not exist (for employee updates, or is soft deleted)
    NotFound,
}
