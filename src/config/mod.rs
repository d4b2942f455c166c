/// Database configuration and connection management
pub mod database;

/// Seed roster loading from config.toml
pub mod employees;

/// Environment-derived process settings
pub mod settings;
