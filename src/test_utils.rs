//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and creating rows with
//! sensible defaults.

use crate::{
    core::identity::Identity,
    entities::{Role, employee},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts an employee directly and returns their identity.
///
/// Skips the service so tests that only need an owner do not pay for Argon2.
/// The stored password is not a valid hash, so these employees cannot sign in.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    code: &str,
    role: Role,
) -> Result<Identity> {
    let now = chrono::Utc::now().naive_utc();
    let employee = employee::ActiveModel {
        code: Set(code.to_string()),
        name: Set(format!("Test {code}")),
        password: Set("not-a-hash".to_string()),
        role: Set(role),
        delete_flg: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(Identity::from_employee(&employee))
}

/// Shorthand for a calendar date in tests.
///
/// # Panics
/// Panics on an impossible date.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
