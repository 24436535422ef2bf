//! Directory Service Port - employee and role lookups.
//!
//! Used only by the provenance resolver. Lookups may fail at any point;
//! the resolver swallows failures and returns whatever it has resolved so
//! far, so this port's errors never surface past a match verdict.

use async_trait::async_trait;

use crate::domain::foundation::{EmployeeId, RoleId};

/// Port for read-only directory lookups.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetches an employee record.
    async fn get_employee(
        &self,
        id: EmployeeId,
        creds: &DirectoryCredentials,
    ) -> Result<EmployeeRecord, DirectoryError>;

    /// Fetches a role's display name.
    async fn get_role(
        &self,
        id: RoleId,
        creds: &DirectoryCredentials,
    ) -> Result<RoleRecord, DirectoryError>;
}

/// Credentials for the directory collaborator. When the caller has none,
/// provenance resolution degrades to a partial result rather than failing.
#[derive(Debug, Clone)]
pub struct DirectoryCredentials {
    pub tenant: String,
    pub token: String,
}

/// An employee as the directory reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub full_name: String,
    /// Role ids in directory order. Only the first is ever resolved.
    pub role_ids: Vec<RoleId>,
}

/// A role as the directory reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub id: RoleId,
    pub display_name: String,
}

/// Directory lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("employee {0} not found in directory")]
    EmployeeNotFound(EmployeeId),

    #[error("role {0} not found in directory")]
    RoleNotFound(RoleId),

    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("directory rejected credentials")]
    Unauthorized,
}
