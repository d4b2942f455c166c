//! Employee business logic - Handles the roster that administrators maintain.
//!
//! Registering and editing an employee runs the password policy from
//! [`crate::core::password`]; only hashed passwords reach the store. Retiring an
//! employee is a soft delete that cascades to their reports through the
//! [`ReportCascade`] handle the service holds.

use crate::{
    core::{
        identity::Identity,
        kinds::ErrorKind,
        password,
        report::{ReportCascade, ReportService},
    },
    entities::{Employee, Role, employee},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Fields an administrator submits when registering or editing an employee.
#[derive(Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    /// Employee code; ignored on update
    pub code: String,
    /// Display name
    pub name: String,
    /// Plaintext password; empty on update means "keep the current one"
    pub password: String,
    /// Access level
    pub role: Role,
}

impl std::fmt::Debug for EmployeeForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeForm")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Service over the employee store.
#[derive(Clone, Debug)]
pub struct EmployeeService<R = ReportService> {
    db: DatabaseConnection,
    reports: R,
}

impl<R: ReportCascade> EmployeeService<R> {
    /// Creates a service backed by `db` that cascades deletes through `reports`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, reports: R) -> Self {
        Self { db, reports }
    }

    /// Registers a new employee.
    ///
    /// The password policy runs first, then the code is checked against every
    /// stored employee, retired ones included. Returns `Success` or the first
    /// failing kind; nothing is written on failure.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A database query, the insert, or the commit fails
    /// - The password hasher rejects the password
    #[instrument(skip(self, form), fields(code = %form.code))]
    pub async fn save(&self, form: EmployeeForm) -> Result<ErrorKind> {
        let check = password::check(&form.password);
        if check != ErrorKind::CheckOk {
            warn!(?check, "Employee rejected: password policy");
            return Ok(check);
        }

        let txn = self.db.begin().await?;

        if Employee::find_by_id(form.code.as_str()).one(&txn).await?.is_some() {
            warn!("Employee rejected: code already registered");
            return Ok(ErrorKind::Duplicate);
        }

        let now = chrono::Utc::now().naive_utc();
        let employee = employee::ActiveModel {
            code: Set(form.code),
            name: Set(form.name),
            password: Set(password::hash(&form.password)?),
            role: Set(form.role),
            delete_flg: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        employee.insert(&txn).await?;

        txn.commit().await?;
        info!("Employee saved");
        Ok(ErrorKind::Success)
    }

    /// Edits the employee identified by `code`.
    ///
    /// An empty password keeps the stored hash without re-running the policy.
    /// The code and `created_at` are never changed. A missing or retired
    /// employee yields `NotFound`, so update never brings one back.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A database query, the update, or the commit fails
    /// - The password hasher rejects a new password
    #[instrument(skip(self, form))]
    pub async fn update(&self, form: EmployeeForm, code: &str) -> Result<ErrorKind> {
        let txn = self.db.begin().await?;

        let Some(original) = Employee::find_by_id(code).one(&txn).await? else {
            warn!("Employee update rejected: not found");
            return Ok(ErrorKind::NotFound);
        };
        if original.delete_flg {
            warn!("Employee update rejected: employee is deleted");
            return Ok(ErrorKind::NotFound);
        }

        let hashed = if form.password.is_empty() {
            original.password.clone()
        } else {
            let check = password::check(&form.password);
            if check != ErrorKind::CheckOk {
                warn!(?check, "Employee update rejected: password policy");
                return Ok(check);
            }
            password::hash(&form.password)?
        };

        let mut employee: employee::ActiveModel = original.into();
        employee.name = Set(form.name);
        employee.role = Set(form.role);
        employee.password = Set(hashed);
        employee.delete_flg = Set(false);
        employee.updated_at = Set(chrono::Utc::now().naive_utc());
        employee.update(&txn).await?;

        txn.commit().await?;
        info!("Employee updated");
        Ok(ErrorKind::Success)
    }

    /// Retires employee `code` and soft-deletes every report they own.
    ///
    /// Returns `LoginCheck` if `identity` is that employee, `NotFound` if the
    /// code is unknown. The employee and the cascade commit together.
    ///
    /// # Errors
    /// Returns an error if a database query, a cascaded report update, or the
    /// commit fails. Nothing is persisted in that case.
    #[instrument(skip(self, identity), fields(actor = %identity.code))]
    pub async fn delete(&self, code: &str, identity: &Identity) -> Result<ErrorKind> {
        if code == identity.code {
            warn!("Employee delete rejected: self deletion");
            return Ok(ErrorKind::LoginCheck);
        }

        let txn = self.db.begin().await?;

        let Some(existing) = Employee::find_by_id(code).one(&txn).await? else {
            warn!("Employee delete rejected: not found");
            return Ok(ErrorKind::NotFound);
        };

        let mut employee: employee::ActiveModel = existing.into();
        employee.delete_flg = Set(true);
        employee.updated_at = Set(chrono::Utc::now().naive_utc());
        employee.update(&txn).await?;

        let reports = self.reports.reports_for_employee(&txn, code).await?;
        let cascaded = reports.len();
        for report in reports {
            self.reports.soft_delete(&txn, report.id).await?;
        }

        txn.commit().await?;
        info!(cascaded, "Employee deleted");
        Ok(ErrorKind::Success)
    }

    /// Every employee, retired ones included, ordered by code.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_all(&self) -> Result<Vec<employee::Model>> {
        Employee::find()
            .order_by_asc(employee::Column::Code)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Employees that are not retired, ordered by code.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_active(&self) -> Result<Vec<employee::Model>> {
        Employee::find()
            .filter(employee::Column::DeleteFlg.eq(false))
            .order_by_asc(employee::Column::Code)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Looks an employee up by code, retired ones included.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<employee::Model>> {
        debug!(code, "Looking up employee");
        Employee::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Resolves a sign-in attempt to an [`Identity`].
    ///
    /// Returns `None` for an unknown code, a retired employee, or a wrong
    /// password; the three cases are not told apart.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(self, raw_password))]
    pub async fn authenticate(&self, code: &str, raw_password: &str) -> Result<Option<Identity>> {
        let identity = self
            .find_by_code(code)
            .await?
            .filter(|e| !e.delete_flg && password::verify(raw_password, &e.password))
            .map(|e| Identity::from_employee(&e));

        if identity.is_none() {
            warn!("Sign-in rejected");
        }
        Ok(identity)
    }
}
