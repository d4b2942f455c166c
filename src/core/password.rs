//! Password policy and hashing.
//!
//! The policy is two stateless checks run in a fixed order: character set first,
//! then length. Passing passwords are hashed with Argon2 before they are stored.

use crate::{core::kinds::ErrorKind, errors::Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use regex::Regex;
use std::sync::LazyLock;

/// Shortest accepted password.
pub const MIN_LENGTH: usize = 8;
/// Longest accepted password.
pub const MAX_LENGTH: usize = 16;

#[allow(clippy::unwrap_used)]
static HALF_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[A-Za-z0-9]+$").unwrap());

/// Returns true when `password` is made only of half-width ASCII letters and digits.
#[must_use]
pub fn is_half_size(password: &str) -> bool {
    HALF_SIZE.is_match(password)
}

/// Returns true when `password` is between [`MIN_LENGTH`] and [`MAX_LENGTH`] characters.
#[must_use]
pub fn is_in_range(password: &str) -> bool {
    (MIN_LENGTH..=MAX_LENGTH).contains(&password.chars().count())
}

/// Runs the password policy.
///
/// Returns `HalfSize` or `RangeCheck` for the first failing rule, `CheckOk` otherwise.
#[must_use]
pub fn check(password: &str) -> ErrorKind {
    if !is_half_size(password) {
        return ErrorKind::HalfSize;
    }
    if !is_in_range(password) {
        return ErrorKind::RangeCheck;
    }
    ErrorKind::CheckOk
}

/// Hashes `password` with Argon2 and a fresh random salt.
///
/// # Errors
/// Returns an error if the hasher rejects the input.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC string. A malformed hash never verifies.
#[must_use]
pub fn verify(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
