//! Employee entity - Represents a member of staff who can sign in and file reports.
//!
//! Employees are keyed by their `code`, which is chosen by an administrator and
//! never changes afterwards. Rows are soft deleted so that historical reports
//! keep a valid owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access level of an employee
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Manages the roster and sees every report
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Sees and edits only their own reports
    #[sea_orm(string_value = "GENERAL")]
    General,
}

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Employee code, the immutable identifier (e.g., `"E001"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    /// Display name
    pub name: String,
    /// Argon2 PHC string; plaintext never reaches this column
    #[serde(skip_serializing)]
    pub password: String,
    /// Access level
    pub role: Role,
    /// Soft delete flag - if true, the employee is retired but kept for history
    pub delete_flg: bool,
    /// When the employee was registered
    pub created_at: DateTime,
    /// When the employee was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee files many reports
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
