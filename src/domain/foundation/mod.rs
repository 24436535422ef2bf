//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod language;

pub use errors::{DomainError, ErrorCode};
pub use ids::{EmployeeId, InterviewId, OrgId, ProcessId, ReferenceId, RoleId};
pub use language::{Language, TechnicalLevel};
