//! Reference Store Port - persisted process references and interviews.
//!
//! A process reference records that one interview talked about one
//! catalogued process. The earliest reference for a process identifies the
//! first reporter; writes are idempotent on `(interview_id, process_id)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, InterviewId, ProcessId, ReferenceId};

/// Port for process-reference and interview lookups and writes.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Returns the reference with the earliest creation timestamp for a
    /// process, or `None` when the process was never referenced.
    ///
    /// Contract: implementations MUST break timestamp ties by ascending
    /// `ReferenceId` so resolution is deterministic across storage engines.
    async fn find_earliest_reference(
        &self,
        process_id: ProcessId,
    ) -> Result<Option<ProcessReference>, ReferenceStoreError>;

    /// Fetches the interview a reference belongs to.
    async fn get_interview(
        &self,
        id: InterviewId,
    ) -> Result<Option<InterviewRecord>, ReferenceStoreError>;

    /// Records that an interview referenced a process.
    ///
    /// A second write for the same `(interview_id, process_id)` pair is a
    /// no-op reported as [`SaveOutcome::AlreadyExists`], never an error.
    async fn save_process_reference(
        &self,
        interview_id: InterviewId,
        process_id: ProcessId,
        is_new: bool,
        confidence: f32,
    ) -> Result<SaveOutcome, ReferenceStoreError>;
}

/// One persisted process reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReference {
    pub id: ReferenceId,
    pub interview_id: InterviewId,
    pub process_id: ProcessId,
    pub is_new: bool,
    pub confidence: f32,
    pub created_at: DateTime<Utc>,
}

/// Minimal interview record for provenance resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: InterviewId,
    pub employee_id: EmployeeId,
}

/// Outcome of an idempotent reference write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new reference row was created.
    Created(ReferenceId),
    /// The `(interview_id, process_id)` pair already existed.
    AlreadyExists,
}

/// Reference store errors.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceStoreError {
    #[error("reference store unavailable: {0}")]
    Unavailable(String),

    #[error("reference store query failed: {0}")]
    Query(String),
}
