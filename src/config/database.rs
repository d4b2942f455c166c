//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. The one piece SeaORM cannot derive is the partial unique index that
//! backs the one-live-report-per-day rule, which is issued as raw SQL.

use crate::entities::{Employee, Report};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/daily_report.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
///
/// The URL is kept out of the span since it may carry credentials.
#[instrument(skip(database_url))]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables if they do not already exist.
///
/// Besides the entity tables this also creates
/// `idx_reports_live_employee_date`, a partial unique index over
/// `(employee_code, report_date)` for rows that are not soft deleted. The
/// services pre-check the same rule; the index is what the store enforces if two
/// writers race.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut employee_table = schema.create_table_from_entity(Employee);
    let mut report_table = schema.create_table_from_entity(Report);

    employee_table.if_not_exists();
    report_table.if_not_exists();

    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&report_table)).await?;

    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_reports_live_employee_date
            ON reports(employee_code, report_date)
            WHERE delete_flg = 0;",
    )
    .await?;

    info!("Database tables ensured");
    Ok(())
}
