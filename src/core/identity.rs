//! The authenticated employee on whose behalf a request runs.

use crate::entities::{Role, employee};
use serde::Serialize;

/// Identity of the signed-in employee for the lifetime of one request.
///
/// Mutating operations that need an actor take `&Identity`, so a request
/// without one cannot reach them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Employee code
    pub code: String,
    /// Display name
    pub name: String,
    /// Access level
    pub role: Role,
}

impl Identity {
    /// Builds an identity from a stored employee.
    #[must_use]
    pub fn from_employee(employee: &employee::Model) -> Self {
        Self {
            code: employee.code.clone(),
            name: employee.name.clone(),
            role: employee.role,
        }
    }

    /// True for administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
