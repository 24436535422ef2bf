//! Provenance resolution: who first reported a matched process.
//!
//! Four sequential, dependent lookups: earliest reference → owning
//! interview → employee → first role. Each later step is optional; any
//! lookup failure is swallowed and whatever was resolved so far is
//! returned. Provenance must never abort an interview.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::ProcessId;
use crate::domain::matching::Provenance;
use crate::ports::{DirectoryCredentials, DirectoryService, ReferenceStore};

/// Resolves the first reporter of a catalogued process.
pub struct ProvenanceResolver {
    references: Arc<dyn ReferenceStore>,
    directory: Arc<dyn DirectoryService>,
}

impl ProvenanceResolver {
    pub fn new(references: Arc<dyn ReferenceStore>, directory: Arc<dyn DirectoryService>) -> Self {
        Self {
            references,
            directory,
        }
    }

    /// Finds the employee whose interview first referenced `process_id`.
    ///
    /// Returns `None` only when the process has no reference at all or the
    /// owning interview cannot be found. Missing directory credentials or
    /// failed directory lookups produce a partial [`Provenance`] instead.
    pub async fn resolve_reporter(
        &self,
        process_id: ProcessId,
        creds: Option<&DirectoryCredentials>,
    ) -> Option<Provenance> {
        let reference = match self.references.find_earliest_reference(process_id).await {
            Ok(Some(reference)) => reference,
            Ok(None) => return None,
            Err(err) => {
                debug!(%process_id, error = %err, "earliest-reference lookup failed");
                return None;
            }
        };

        let interview = match self.references.get_interview(reference.interview_id).await {
            Ok(Some(interview)) => interview,
            Ok(None) => {
                debug!(
                    interview_id = %reference.interview_id,
                    "reference points at a missing interview"
                );
                return None;
            }
            Err(err) => {
                debug!(interview_id = %reference.interview_id, error = %err, "interview lookup failed");
                return None;
            }
        };

        let mut provenance = Provenance {
            employee_id: interview.employee_id,
            employee_name: None,
            employee_role: None,
        };

        let Some(creds) = creds else {
            // No directory credentials: partial result, never an error.
            return Some(provenance);
        };

        let employee = match self.directory.get_employee(interview.employee_id, creds).await {
            Ok(employee) => employee,
            Err(err) => {
                debug!(employee_id = %interview.employee_id, error = %err, "employee lookup failed");
                return Some(provenance);
            }
        };
        provenance.employee_name = Some(employee.full_name);

        // Only the first role is resolved; additional roles are ignored by design.
        if let Some(&role_id) = employee.role_ids.first() {
            match self.directory.get_role(role_id, creds).await {
                Ok(role) => provenance.employee_role = Some(role.display_name),
                Err(err) => {
                    debug!(%role_id, error = %err, "role lookup failed");
                }
            }
        }

        Some(provenance)
    }
}
