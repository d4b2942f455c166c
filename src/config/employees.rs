//! Seed roster loading from config.toml
//!
//! The employees listed here are registered on boot when their code is not yet
//! in the database. This is how the first administrator gets an account.

use crate::entities::Role;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Employees to seed
    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
}

/// Configuration for a single seeded employee
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeConfig {
    /// Employee code
    pub code: String,
    /// Display name
    pub name: String,
    /// Initial plaintext password; must satisfy the password policy
    pub password: String,
    /// `"ADMIN"` or `"GENERAL"`
    pub role: Role,
}

/// Loads the seed roster from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or a role is not `ADMIN`/`GENERAL`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}
