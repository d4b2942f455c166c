//! Report business logic - Handles daily report creation, editing, and removal.
//!
//! Reports are owned by the employee who files them. The central rule is that an
//! employee holds at most one live report per calendar day; `save`, a
//! date-changing `update`, and an `update` that revives a deleted report all
//! check it inside the same transaction as the write.
//! Deletion is soft: the row stays, with `delete_flg` set.

use crate::{
    core::{identity::Identity, kinds::ErrorKind},
    entities::{Report, Role, report},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Fields an employee submits when filing or editing a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportForm {
    /// Day the report covers
    pub report_date: NaiveDate,
    /// Short headline
    pub title: String,
    /// Body text
    pub content: String,
}

/// The report operations the employee cascade depends on.
///
/// `EmployeeService` holds one of these so that retiring an employee can
/// soft-delete their reports inside its own transaction, and so tests can swap
/// in a fake.
#[allow(async_fn_in_trait)]
pub trait ReportCascade {
    /// Every report owned by `employee_code`, deleted ones included.
    async fn reports_for_employee<C>(
        &self,
        conn: &C,
        employee_code: &str,
    ) -> Result<Vec<report::Model>>
    where
        C: ConnectionTrait;

    /// Soft-deletes one report; `NotFound` if the id is unknown.
    async fn soft_delete<C>(&self, conn: &C, report_id: i64) -> Result<ErrorKind>
    where
        C: ConnectionTrait;
}

/// Every report owned by `employee_code`, oldest id first.
pub async fn find_by_employee_in<C>(conn: &C, employee_code: &str) -> Result<Vec<report::Model>>
where
    C: ConnectionTrait,
{
    Report::find()
        .filter(report::Column::EmployeeCode.eq(employee_code))
        .order_by_asc(report::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Live (non-deleted) reports owned by `employee_code`.
pub async fn find_active_by_employee_in<C>(
    conn: &C,
    employee_code: &str,
) -> Result<Vec<report::Model>>
where
    C: ConnectionTrait,
{
    Report::find()
        .filter(report::Column::EmployeeCode.eq(employee_code))
        .filter(report::Column::DeleteFlg.eq(false))
        .order_by_asc(report::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Whether `employee_code` already has a live report on `date`.
///
/// `except` leaves one report out of the comparison, so an edited report never
/// collides with itself.
pub async fn has_date_conflict<C>(
    conn: &C,
    employee_code: &str,
    date: NaiveDate,
    except: Option<i64>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let reports = find_active_by_employee_in(conn, employee_code).await?;
    Ok(reports
        .iter()
        .any(|r| r.report_date == date && Some(r.id) != except))
}

/// Marks a report as deleted and refreshes its `updated_at`.
///
/// Returns `NotFound` when no report has this id.
pub async fn soft_delete_in<C>(conn: &C, report_id: i64) -> Result<ErrorKind>
where
    C: ConnectionTrait,
{
    let Some(existing) = Report::find_by_id(report_id).one(conn).await? else {
        return Ok(ErrorKind::NotFound);
    };

    let mut report: report::ActiveModel = existing.into();
    report.delete_flg = Set(true);
    report.updated_at = Set(chrono::Utc::now().naive_utc());
    report.update(conn).await?;

    Ok(ErrorKind::Success)
}

/// Service over the report store.
#[derive(Clone, Debug)]
pub struct ReportService {
    db: DatabaseConnection,
}

impl ReportService {
    /// Creates a service backed by `db`.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new report owned by `identity`.
    ///
    /// Any owner the caller had in mind is ignored; the acting employee always
    /// owns what they file. Returns `DateCheck` without writing if the employee
    /// already has a live report on that date.
    ///
    /// # Errors
    /// Returns an error if a database query, the insert, or the commit fails.
    #[instrument(skip(self, form, identity), fields(actor = %identity.code, date = %form.report_date))]
    pub async fn save(&self, form: ReportForm, identity: &Identity) -> Result<ErrorKind> {
        let txn = self.db.begin().await?;

        if has_date_conflict(&txn, &identity.code, form.report_date, None).await? {
            warn!("Report rejected: date already used");
            return Ok(ErrorKind::DateCheck);
        }

        let now = chrono::Utc::now().naive_utc();
        let report = report::ActiveModel {
            report_date: Set(form.report_date),
            title: Set(form.title),
            content: Set(form.content),
            employee_code: Set(identity.code.clone()),
            delete_flg: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = report.insert(&txn).await?;

        txn.commit().await?;
        info!(report_id = saved.id, "Report saved");
        Ok(ErrorKind::Success)
    }

    /// Edits the date, title, and content of report `id`.
    ///
    /// Owner and creation time always stay those of the stored report, and the
    /// report comes out live even if it had been soft deleted. The date rule is
    /// re-checked when the date changes or when a deleted report is revived;
    /// otherwise it is skipped. A missing report yields `NotFound`.
    ///
    /// # Errors
    /// Returns an error if a database query or the commit fails.
    #[instrument(skip(self, form, identity), fields(actor = %identity.code))]
    pub async fn update(&self, id: i64, form: ReportForm, identity: &Identity) -> Result<ErrorKind> {
        let txn = self.db.begin().await?;

        let Some(original) = Report::find_by_id(id).one(&txn).await? else {
            warn!("Report update rejected: not found");
            return Ok(ErrorKind::NotFound);
        };
        if (original.delete_flg || form.report_date != original.report_date)
            && has_date_conflict(&txn, &original.employee_code, form.report_date, Some(id)).await?
        {
            warn!("Report update rejected: date already used");
            return Ok(ErrorKind::DateCheck);
        }

        let mut report: report::ActiveModel = original.into();
        report.report_date = Set(form.report_date);
        report.title = Set(form.title);
        report.content = Set(form.content);
        report.delete_flg = Set(false);
        report.updated_at = Set(chrono::Utc::now().naive_utc());
        report.update(&txn).await?;

        txn.commit().await?;
        info!("Report updated");
        Ok(ErrorKind::Success)
    }

    /// Soft-deletes report `id`; `NotFound` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the lookup, the update, or the commit fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<ErrorKind> {
        let txn = self.db.begin().await?;
        let kind = soft_delete_in(&txn, id).await?;
        if kind != ErrorKind::Success {
            warn!("Report delete rejected: not found");
            return Ok(kind);
        }
        txn.commit().await?;
        info!("Report deleted");
        Ok(kind)
    }

    /// Every report, deleted ones included.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_all(&self) -> Result<Vec<report::Model>> {
        Report::find()
            .order_by_asc(report::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Looks a report up by id.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<report::Model>> {
        debug!(report_id = id, "Looking up report");
        Report::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Every report owned by `employee_code`, deleted ones included.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_by_employee(&self, employee_code: &str) -> Result<Vec<report::Model>> {
        find_by_employee_in(&self.db, employee_code).await
    }

    /// Live reports owned by `employee_code`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_active_by_employee(
        &self,
        employee_code: &str,
    ) -> Result<Vec<report::Model>> {
        find_active_by_employee_in(&self.db, employee_code).await
    }

    /// The reports `identity` is allowed to list: all of them for an
    /// administrator, only their own otherwise.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(self, identity), fields(actor = %identity.code))]
    pub async fn get_reports_for_current_user(
        &self,
        identity: &Identity,
    ) -> Result<Vec<report::Model>> {
        match identity.role {
            Role::Admin => self.find_all().await,
            Role::General => self.find_by_employee(&identity.code).await,
        }
    }
}

impl ReportCascade for ReportService {
    async fn reports_for_employee<C>(
        &self,
        conn: &C,
        employee_code: &str,
    ) -> Result<Vec<report::Model>>
    where
        C: ConnectionTrait,
    {
        find_by_employee_in(conn, employee_code).await
    }

    async fn soft_delete<C>(&self, conn: &C, report_id: i64) -> Result<ErrorKind>
    where
        C: ConnectionTrait,
    {
        soft_delete_in(conn, report_id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn form(date: NaiveDate) -> ReportForm {
        ReportForm {
            report_date: date,
            title: "Daily report".to_string(),
            content: "Worked on the thing".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_report_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        let result = service.save(form(date(2024, 1, 10)), &taro).await?;
        assert_eq!(result, ErrorKind::Success);

        let reports = service.find_by_employee("E001").await?;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].employee_code, "E001");
        assert_eq!(reports[0].report_date, date(2024, 1, 10));
        assert!(!reports[0].delete_flg);
        assert_eq!(reports[0].created_at, reports[0].updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_same_date_twice_is_date_check() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        assert_eq!(
            service.save(form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::Success
        );
        assert_eq!(
            service.save(form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::DateCheck
        );

        // Nothing was written by the rejected save
        assert_eq!(service.find_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_same_date_for_different_employees_is_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let hanako = create_test_employee(&db, "E002", Role::General).await?;
        let service = ReportService::new(db.clone());

        assert_eq!(
            service.save(form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::Success
        );
        assert_eq!(
            service.save(form(date(2024, 1, 10)), &hanako).await?,
            ErrorKind::Success
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_report_frees_its_date() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let first = service.find_by_employee("E001").await?[0].id;
        assert_eq!(service.delete(first).await?, ErrorKind::Success);

        assert_eq!(
            service.save(form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::Success
        );
        assert_eq!(service.find_by_employee("E001").await?.len(), 2);
        assert_eq!(service.find_active_by_employee("E001").await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_to_used_date_is_date_check() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        service.save(form(date(2024, 1, 11)), &taro).await?;
        let second = service.find_by_employee("E001").await?[1].clone();

        let mut edit = form(date(2024, 1, 10));
        edit.title = "Changed".to_string();
        assert_eq!(
            service.update(second.id, edit, &taro).await?,
            ErrorKind::DateCheck
        );

        let unchanged = service.find_by_id(second.id).await?.unwrap();
        assert_eq!(unchanged, second);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_date_change_skips_date_check() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let original = service.find_by_employee("E001").await?[0].clone();

        let mut edit = form(date(2024, 1, 10));
        edit.content = "Rewritten".to_string();
        assert_eq!(
            service.update(original.id, edit, &taro).await?,
            ErrorKind::Success
        );

        let updated = service.find_by_id(original.id).await?.unwrap();
        assert_eq!(updated.content, "Rewritten");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.employee_code, "E001");
        assert!(updated.updated_at >= original.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_original_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let admin = create_test_employee(&db, "A001", Role::Admin).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let original = service.find_by_employee("E001").await?[0].clone();

        // An admin moves the report to a new date; ownership must not follow the editor
        assert_eq!(
            service.update(original.id, form(date(2024, 1, 12)), &admin).await?,
            ErrorKind::Success
        );

        let updated = service.find_by_id(original.id).await?.unwrap();
        assert_eq!(updated.employee_code, "E001");
        assert_eq!(updated.report_date, date(2024, 1, 12));
        assert!(service.find_by_employee("A001").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_report_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        assert_eq!(
            service.update(999, form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::NotFound
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_revives_deleted_report() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let id = service.find_by_employee("E001").await?[0].id;
        service.delete(id).await?;

        let mut edit = form(date(2024, 1, 10));
        edit.title = "Back again".to_string();
        assert_eq!(service.update(id, edit, &taro).await?, ErrorKind::Success);

        let revived = service.find_by_id(id).await?.unwrap();
        assert!(!revived.delete_flg);
        assert_eq!(revived.title, "Back again");
        assert_eq!(service.find_active_by_employee("E001").await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_revive_onto_used_date_is_date_check() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let old_id = service.find_by_employee("E001").await?[0].id;
        service.delete(old_id).await?;
        // A new live report takes the freed date
        service.save(form(date(2024, 1, 10)), &taro).await?;

        // Same date as before, but the live report now owns it
        assert_eq!(
            service.update(old_id, form(date(2024, 1, 10)), &taro).await?,
            ErrorKind::DateCheck
        );
        assert!(service.find_by_id(old_id).await?.unwrap().delete_flg);
        assert_eq!(service.find_active_by_employee("E001").await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_report_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        let original = service.find_by_employee("E001").await?[0].clone();

        assert_eq!(service.delete(original.id).await?, ErrorKind::Success);

        let deleted = service.find_by_id(original.id).await?.unwrap();
        assert!(deleted.delete_flg);
        assert!(deleted.updated_at >= original.updated_at);
        // Soft delete keeps the row listed
        assert_eq!(service.find_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_report_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let service = ReportService::new(db);

        assert_eq!(service.delete(999).await?, ErrorKind::NotFound);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        let service = ReportService::new(db);

        assert!(service.find_by_id(42).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_reports_for_current_user_by_role() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_employee(&db, "A001", Role::Admin).await?;
        let taro = create_test_employee(&db, "E001", Role::General).await?;
        let hanako = create_test_employee(&db, "E002", Role::General).await?;
        let service = ReportService::new(db.clone());

        service.save(form(date(2024, 1, 10)), &taro).await?;
        service.save(form(date(2024, 1, 11)), &taro).await?;
        service.save(form(date(2024, 1, 10)), &hanako).await?;

        let for_admin = service.get_reports_for_current_user(&admin).await?;
        assert_eq!(for_admin, service.find_all().await?);
        assert_eq!(for_admin.len(), 3);

        let for_taro = service.get_reports_for_current_user(&taro).await?;
        assert_eq!(for_taro.len(), 2);
        assert!(for_taro.iter().all(|r| r.employee_code == "E001"));

        let for_hanako = service.get_reports_for_current_user(&hanako).await?;
        assert_eq!(for_hanako.len(), 1);
        assert_eq!(for_hanako[0].employee_code, "E002");

        Ok(())
    }

    #[tokio::test]
    async fn test_store_index_backs_date_rule() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "E001", Role::General).await?;

        let now = chrono::Utc::now().naive_utc();
        let row = || report::ActiveModel {
            report_date: Set(date(2024, 1, 10)),
            title: Set("t".to_string()),
            content: Set("c".to_string()),
            employee_code: Set("E001".to_string()),
            delete_flg: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        row().insert(&db).await?;
        // Bypassing the service pre-check hits the partial unique index
        assert!(row().insert(&db).await.is_err());

        Ok(())
    }
}
