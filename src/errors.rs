//! Unified error types for fatal failures.
//!
//! Business rule violations are not errors here: they come back as an
//! [`ErrorKind`](crate::core::kinds::ErrorKind) result code so the caller can
//! branch and re-render a form. This type only carries failures the caller
//! cannot recover from within the request (store, config, hashing).

use thiserror::Error;

/// Fatal error for the daily report backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the persistence store, including constraint
    /// violations the services did not pre-check.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The password hasher rejected its input.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Hasher message
        message: String,
    },
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
