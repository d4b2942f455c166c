//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee;
pub mod report;

// Re-export specific types to avoid conflicts
pub use employee::{Entity as Employee, Model as EmployeeModel, Role};
pub use report::{Entity as Report, Model as ReportModel};
