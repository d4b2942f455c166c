//! Process settings read from the environment (after `.env` is loaded).

use super::database;

/// Default path of the seed roster file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Settings the binary needs before it can open the store.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SeaORM connection string
    pub database_url: String,
    /// Path to the TOML seed roster
    pub config_path: String,
}

impl Settings {
    /// Reads `DATABASE_URL` and `CONFIG_PATH`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: database::get_database_url(),
            config_path: std::env::var("CONFIG_PATH")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        }
    }
}
