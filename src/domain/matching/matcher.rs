//! Semantic process matching.
//!
//! Given a free-text description of what an interviewee does, decides
//! whether it refers to an already-catalogued process. The generative
//! capability makes the semantic judgment; everything around it is policy:
//! a short-circuit for empty catalogs, a bounded execution time, tolerant
//! output parsing that can never fail the turn, exact name-to-id
//! resolution, and provenance attachment.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::foundation::Language;
use crate::domain::matching::{
    prepare_candidates, CatalogEntry, MatchVerdict, ProvenanceResolver,
};
use crate::ports::{DirectoryCredentials, TextGenerator};

/// Default budget for one semantic matching call.
pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(4);

/// Raw JSON shape the model is instructed to answer in.
///
/// Every field is defaulted so a partially well-formed answer still
/// parses; only a structurally broken payload triggers the fail-safe.
#[derive(Debug, Deserialize)]
struct RawMatchResponse {
    #[serde(default)]
    is_match: bool,
    #[serde(default)]
    matched_process_name: Option<String>,
    #[serde(default)]
    confidence_score: f32,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    suggested_clarifying_questions: Vec<String>,
}

/// Semantic process matcher.
pub struct ProcessMatcher {
    generator: Arc<dyn TextGenerator>,
    provenance: ProvenanceResolver,
    timeout: Duration,
}

impl ProcessMatcher {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        provenance: ProvenanceResolver,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            provenance,
            timeout,
        }
    }

    /// Matches `description` against the organization's catalog.
    ///
    /// Never returns an error: timeouts, generation failures, and
    /// unparsable output all degrade to a fail-safe no-match verdict.
    pub async fn match_description(
        &self,
        description: &str,
        catalog: Vec<CatalogEntry>,
        language: Language,
        directory_creds: Option<&DirectoryCredentials>,
    ) -> MatchVerdict {
        let candidates = prepare_candidates(catalog);
        if candidates.is_empty() {
            return MatchVerdict::no_match(empty_catalog_reasoning(language));
        }

        let system_prompt = matching_system_prompt(language);
        let user_prompt = matching_user_prompt(description, &candidates);

        let raw = match tokio::time::timeout(
            self.timeout,
            self.generator.generate(&system_prompt, &user_prompt),
        )
        .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                warn!(error = %err, "matching generation failed");
                return MatchVerdict::no_match(format!("generation failed: {}", err));
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "matching timed out");
                return MatchVerdict::no_match("timed out");
            }
        };

        let parsed: RawMatchResponse = match extract_json_object(&raw)
            .and_then(|json| serde_json::from_str(json).ok())
        {
            Some(parsed) => parsed,
            None => {
                debug!(raw_len = raw.len(), "matching output was not parsable");
                return MatchVerdict::no_match("parse failed");
            }
        };

        let matched_entry_id = parsed.matched_process_name.as_deref().and_then(|name| {
            // Exact case-insensitive equality against the supplied catalog
            // only; no fuzzy resolution. Unicode lowering, not ASCII:
            // catalog names carry accented characters in es/pt.
            let wanted = name.to_lowercase();
            candidates
                .iter()
                .find(|entry| entry.name.to_lowercase() == wanted)
                .map(|entry| entry.id)
        });

        let mut verdict = MatchVerdict {
            is_match: parsed.is_match,
            matched_entry_id,
            matched_name: parsed.matched_process_name,
            confidence: MatchVerdict::clamp_confidence(parsed.confidence_score),
            reasoning: parsed.reasoning,
            clarifying_questions: parsed.suggested_clarifying_questions,
            provenance: None,
        };

        if let Some(process_id) = verdict.matched_entry_id {
            verdict.provenance = self
                .provenance
                .resolve_reporter(process_id, directory_creds)
                .await;
        }

        verdict
    }
}

/// Locates the outermost `{...}` span in a possibly fenced, possibly
/// chatty model answer.
fn extract_json_object(raw: &str) -> Option<&str> {
    let stripped = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&stripped[start..=end])
}

fn empty_catalog_reasoning(language: Language) -> &'static str {
    match language {
        Language::Es => "No hay procesos registrados para comparar.",
        Language::En => "There are no known processes to compare against.",
        Language::Pt => "Não há processos registrados para comparar.",
    }
}

fn matching_system_prompt(language: Language) -> String {
    format!(
        "You are a business-process analyst. Decide whether a free-text \
         description refers to one of the candidate processes listed by the \
         user. The description is written in {}; candidates may mix languages.\n\
         \n\
         Calibration examples:\n\
         - Description \"Proceso de Aprobación de Compras\" with candidate \
         \"Proceso de Aprobación de Compras\": is_match true, confidence 0.98 \
         (exact name).\n\
         - Description \"I check supplier bills and sign off on payments\" with \
         candidate \"Invoice Approval\": is_match true, confidence 0.85 \
         (paraphrase of the same work).\n\
         - Description \"Inventory management process\" with candidate \
         \"Purchase Approval\": is_match false, confidence 0.1 (different \
         business activity).\n\
         \n\
         Answer with a single JSON object and nothing else:\n\
         {{\"is_match\": bool, \"matched_process_name\": string or null, \
         \"confidence_score\": number between 0 and 1, \"reasoning\": string, \
         \"suggested_clarifying_questions\": [string]}}\n\
         matched_process_name must be copied verbatim from the candidate list \
         when is_match is true.",
        language.display_name()
    )
}

fn matching_user_prompt(description: &str, candidates: &[CatalogEntry]) -> String {
    let mut prompt = String::from("Candidate processes:\n");
    for (i, entry) in candidates.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            entry.name,
            entry.type_label
        ));
    }
    prompt.push_str("\nDescription to evaluate:\n");
    prompt.push_str(description);
    prompt
}
