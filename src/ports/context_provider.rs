//! Context Provider Port - hands the core its interview context snapshot.
//!
//! The snapshot is assembled and cached by an external collaborator; the
//! core treats it as opaque, read-only input. A fetch failure is fatal
//! when starting an interview and degrades to "no context" on later turns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, OrgId};
use crate::domain::matching::CatalogEntry;

/// Port for fetching the interview context snapshot.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Fetches the snapshot for one employee within one organization.
    async fn get_context(
        &self,
        employee_id: EmployeeId,
        org_id: OrgId,
        auth_token: &str,
    ) -> Result<InterviewContextSnapshot, ContextError>;
}

/// Everything the core knows about the interviewee and their organization
/// at the start of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewContextSnapshot {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub role_names: Vec<String>,
    pub org_id: OrgId,
    pub organization_name: String,
    /// The organization's known-process catalog, read-only.
    pub catalog: Vec<CatalogEntry>,
    pub history: HistorySummary,
}

/// Short summary of the employee's interview history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_interviews: u32,
    pub completed_interviews: u32,
    /// Up to 5 topics from prior interviews, most recent first.
    pub recent_topics: Vec<String>,
}

/// Maximum prior topics rendered into a prompt.
pub const MAX_RECENT_TOPICS: usize = 5;

/// Context fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error("context provider unavailable: {0}")]
    Unavailable(String),

    #[error("not authorized to read context for org {0}")]
    Unauthorized(OrgId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_summary_defaults_to_first_interview() {
        let history = HistorySummary::default();
        assert_eq!(history.total_interviews, 0);
        assert!(history.recent_topics.is_empty());
    }

    #[test]
    fn context_error_displays_employee_id() {
        let id = EmployeeId::new();
        let err = ContextError::EmployeeNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
