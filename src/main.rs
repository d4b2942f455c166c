use daily_report::{
    config::{database, employees, settings::Settings},
    core::{EmployeeService, ReportService},
    errors::Result,
    seed,
};
use dotenvy::dotenv;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    let settings = Settings::from_env();
    info!(config_path = %settings.config_path, "Settings loaded");

    // 3. Open the store and make sure the schema exists
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let reports = ReportService::new(db.clone());
    let employees_service = EmployeeService::new(db, reports);

    // 4. Seed the roster so there is someone to sign in as
    if Path::new(&settings.config_path).exists() {
        let config = employees::load_config(&settings.config_path)
            .inspect_err(|e| error!("Failed to load seed roster: {}", e))?;
        seed::seed_employees(&employees_service, &config).await?;
    } else {
        warn!(path = %settings.config_path, "No seed roster found; skipping");
    }

    let roster = employees_service.find_active().await?;
    info!(active_employees = roster.len(), "Daily report backend ready");

    Ok(())
}
