//! Catalog entries and match verdicts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, ProcessId};

/// Maximum number of catalog candidates handed to the semantic matcher.
pub const CATALOG_CANDIDATE_CAP: usize = 20;

/// One already-known business process, supplied read-only by the context
/// provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProcessId,
    pub name: String,
    pub type_label: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Sorts by `updated_at` descending and truncates to the candidate cap.
///
/// The matcher only ever sees the result of this; callers may hand in an
/// arbitrarily large catalog.
pub fn prepare_candidates(mut catalog: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    catalog.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    catalog.truncate(CATALOG_CANDIDATE_CAP);
    catalog
}

/// Identity of the employee whose earlier interview first referenced a
/// process. Name and role may be missing when the directory was not
/// reachable or credentials were absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub employee_id: EmployeeId,
    pub employee_name: Option<String>,
    pub employee_role: Option<String>,
}

/// Structured outcome of semantic matching for one user turn.
///
/// Created fresh per turn and never persisted as-is; the caller decides
/// whether to record a process reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub is_match: bool,
    /// Resolved catalog id. May be `None` even when `is_match` is true if
    /// the model returned a name not present in the supplied catalog.
    pub matched_entry_id: Option<ProcessId>,
    /// Name exactly as the model reported it.
    pub matched_name: Option<String>,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f32,
    pub reasoning: String,
    pub clarifying_questions: Vec<String>,
    pub provenance: Option<Provenance>,
}

impl MatchVerdict {
    /// Fail-safe no-match verdict used on timeout, parse failure, or an
    /// empty catalog.
    pub fn no_match(reasoning: impl Into<String>) -> Self {
        Self {
            is_match: false,
            matched_entry_id: None,
            matched_name: None,
            confidence: 0.0,
            reasoning: reasoning.into(),
            clarifying_questions: Vec::new(),
            provenance: None,
        }
    }

    /// Clamps a model-reported confidence into `[0.0, 1.0]`.
    ///
    /// NaN collapses to 0.0. The model's self-reported number is bounded,
    /// not re-derived.
    pub fn clamp_confidence(raw: f32) -> f32 {
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        }
    }
}
