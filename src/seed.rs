//! Boot-time seeding of the employee roster from config.toml.

use crate::{
    config::employees::Config,
    core::{EmployeeForm, EmployeeService, ErrorKind, ReportCascade},
    errors::{Error, Result},
};
use tracing::{debug, info, instrument};

/// Registers every configured employee whose code is not yet stored.
///
/// Seeding goes through [`EmployeeService::save`], so the password policy
/// applies. A configured employee the service rejects is a configuration error.
/// Returns how many employees were created.
#[instrument(skip_all, fields(configured = config.employees.len()))]
pub async fn seed_employees<R: ReportCascade>(
    service: &EmployeeService<R>,
    config: &Config,
) -> Result<usize> {
    let mut created = 0;
    for entry in &config.employees {
        if service.find_by_code(&entry.code).await?.is_some() {
            debug!(code = %entry.code, "Employee already present. Skipping.");
            continue;
        }

        let form = EmployeeForm {
            code: entry.code.clone(),
            name: entry.name.clone(),
            password: entry.password.clone(),
            role: entry.role,
        };
        match service.save(form).await? {
            ErrorKind::Success => created += 1,
            kind => {
                return Err(Error::Config {
                    message: format!("Seed employee {} rejected: {kind:?}", entry.code),
                });
            }
        }
    }

    info!(created, "Employee roster seeded");
    Ok(created)
}
