//! Report entity - One employee's daily activity report.
//!
//! A report covers a single calendar day. An employee may hold at most one
//! live (non-deleted) report per `report_date`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar day the report covers
    pub report_date: Date,
    /// Short headline
    pub title: String,
    /// Free-form body
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Code of the employee who owns the report
    pub employee_code: String,
    /// Soft delete flag
    pub delete_flg: bool,
    /// When the report was created
    pub created_at: DateTime,
    /// When the report was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Report and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each report belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeCode",
        to = "super::employee::Column::Code"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
