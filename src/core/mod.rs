//! Core business logic - framework-agnostic employee and report services.

/// Employee roster service
pub mod employee;
/// Identity of the signed-in employee
pub mod identity;
/// Result-code vocabulary shared by the services
pub mod kinds;
/// Error-kind to user message table
pub mod messages;
/// Password policy and hashing
pub mod password;
/// Daily report service
pub mod report;

pub use employee::{EmployeeForm, EmployeeService};
pub use identity::Identity;
pub use kinds::ErrorKind;
pub use report::{ReportCascade, ReportForm, ReportService};
