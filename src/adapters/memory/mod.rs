//! In-memory adapters for the read/write ports.
//!
//! Back the full interview flow in tests and the demo binary without any
//! external service. All of them are `Mutex`-guarded maps; none of this
//! is meant to survive a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{EmployeeId, InterviewId, OrgId, ProcessId, ReferenceId, RoleId};
use crate::domain::interview::ConversationTurn;
use crate::ports::{
    ContextError, ContextProvider, DirectoryCredentials, DirectoryError, DirectoryService,
    EmployeeRecord, InterviewContextSnapshot, InterviewRecord, ProcessReference, ReferenceStore,
    ReferenceStoreError, RoleRecord, SaveOutcome, TurnStore, TurnStoreError,
};

/// In-memory [`ReferenceStore`].
#[derive(Debug, Default)]
pub struct InMemoryReferenceStore {
    references: Mutex<Vec<ProcessReference>>,
    interviews: Mutex<HashMap<InterviewId, InterviewRecord>>,
}

impl InMemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an interview so provenance lookups can find its owner.
    pub fn insert_interview(&self, id: InterviewId, employee_id: EmployeeId) {
        self.interviews
            .lock()
            .unwrap()
            .insert(id, InterviewRecord { id, employee_id });
    }

    /// Inserts a reference with an explicit id and timestamp. Test hook
    /// for exercising the earliest-reference tie-break.
    pub fn insert_reference_at(
        &self,
        id: ReferenceId,
        interview_id: InterviewId,
        process_id: ProcessId,
        created_at: DateTime<Utc>,
    ) {
        self.references.lock().unwrap().push(ProcessReference {
            id,
            interview_id,
            process_id,
            is_new: false,
            confidence: 1.0,
            created_at,
        });
    }

    /// All stored references, for assertions.
    pub fn references(&self) -> Vec<ProcessReference> {
        self.references.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReferenceStore for InMemoryReferenceStore {
    async fn find_earliest_reference(
        &self,
        process_id: ProcessId,
    ) -> Result<Option<ProcessReference>, ReferenceStoreError> {
        let references = self.references.lock().unwrap();
        Ok(references
            .iter()
            .filter(|r| r.process_id == process_id)
            // Timestamp first, then reference id: the contract's
            // deterministic tie-break.
            .min_by_key(|r| (r.created_at, r.id))
            .cloned())
    }

    async fn get_interview(
        &self,
        id: InterviewId,
    ) -> Result<Option<InterviewRecord>, ReferenceStoreError> {
        Ok(self.interviews.lock().unwrap().get(&id).cloned())
    }

    async fn save_process_reference(
        &self,
        interview_id: InterviewId,
        process_id: ProcessId,
        is_new: bool,
        confidence: f32,
    ) -> Result<SaveOutcome, ReferenceStoreError> {
        let mut references = self.references.lock().unwrap();
        if references
            .iter()
            .any(|r| r.interview_id == interview_id && r.process_id == process_id)
        {
            return Ok(SaveOutcome::AlreadyExists);
        }

        let id = ReferenceId::new();
        references.push(ProcessReference {
            id,
            interview_id,
            process_id,
            is_new,
            confidence,
            created_at: Utc::now(),
        });
        Ok(SaveOutcome::Created(id))
    }
}

/// In-memory [`DirectoryService`].
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: Mutex<HashMap<EmployeeId, EmployeeRecord>>,
    roles: Mutex<HashMap<RoleId, RoleRecord>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_employee(&self, record: EmployeeRecord) {
        self.employees.lock().unwrap().insert(record.id, record);
    }

    pub fn insert_role(&self, record: RoleRecord) {
        self.roles.lock().unwrap().insert(record.id, record);
    }
}

#[async_trait]
impl DirectoryService for InMemoryDirectory {
    async fn get_employee(
        &self,
        id: EmployeeId,
        _creds: &DirectoryCredentials,
    ) -> Result<EmployeeRecord, DirectoryError> {
        self.employees
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::EmployeeNotFound(id))
    }

    async fn get_role(
        &self,
        id: RoleId,
        _creds: &DirectoryCredentials,
    ) -> Result<RoleRecord, DirectoryError> {
        self.roles
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::RoleNotFound(id))
    }
}

/// In-memory [`TurnStore`].
#[derive(Debug, Default)]
pub struct InMemoryTurnStore {
    turns: Mutex<HashMap<InterviewId, Vec<ConversationTurn>>>,
    fail_writes: Mutex<bool>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail. Test hook for the outbound
    /// queue's delivery-failure logging.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    /// Turns persisted for one interview, in write order.
    pub fn saved_turns(&self, interview_id: InterviewId) -> Vec<ConversationTurn> {
        self.turns
            .lock()
            .unwrap()
            .get(&interview_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    async fn save_turn(
        &self,
        interview_id: InterviewId,
        turn: &ConversationTurn,
    ) -> Result<(), TurnStoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(TurnStoreError::Write("writes disabled".to_string()));
        }
        self.turns
            .lock()
            .unwrap()
            .entry(interview_id)
            .or_default()
            .push(turn.clone());
        Ok(())
    }
}

/// [`ContextProvider`] that serves a fixed snapshot, or fails on demand.
#[derive(Debug, Default)]
pub struct StaticContextProvider {
    snapshot: Mutex<Option<InterviewContextSnapshot>>,
}

impl StaticContextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the given snapshot to every caller.
    pub fn with_snapshot(snapshot: InterviewContextSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    /// Drops the snapshot so subsequent fetches fail.
    pub fn clear(&self) {
        *self.snapshot.lock().unwrap() = None;
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn get_context(
        &self,
        _employee_id: EmployeeId,
        _org_id: OrgId,
        _auth_token: &str,
    ) -> Result<InterviewContextSnapshot, ContextError> {
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ContextError::Unavailable("no snapshot configured".to_string()))
    }
}
