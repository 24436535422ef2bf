//! Lexical mention gate.
//!
//! Deliberately high-recall, low-precision: its only job is to keep the
//! expensive semantic matcher from running on turns that obviously do not
//! talk about a process. The keyword table spans all three supported
//! languages at once, because interviewees code-switch mid-sentence.

use once_cell::sync::Lazy;

/// Process nouns, management verbs, and temporal/routine markers across
/// Spanish, English, and Portuguese. Matched as lower-cased substrings.
static PROCESS_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Process nouns — es
        "proceso",
        "procedimiento",
        "trámite",
        "tramite",
        "tarea",
        "flujo",
        "aprobación",
        "aprobacion",
        "solicitud",
        "factura",
        "reporte",
        "revisión",
        "revision",
        // Process nouns — en
        "process",
        "procedure",
        "workflow",
        "task",
        "approval",
        "request",
        "invoice",
        "report",
        "review",
        "checklist",
        // Process nouns — pt
        "processo",
        "procedimento",
        "tarefa",
        "fluxo",
        "aprovação",
        "aprovacao",
        "solicitação",
        "solicitacao",
        "relatório",
        "relatorio",
        // Management verbs — es
        "gestiono",
        "administro",
        "coordino",
        "superviso",
        "apruebo",
        "reviso",
        "registro",
        "envío",
        "envio",
        // Management verbs — en
        "i manage",
        "i handle",
        "i coordinate",
        "i supervise",
        "i approve",
        "i submit",
        "i file",
        // Management verbs — pt
        "gerencio",
        "coordeno",
        "supervisiono",
        "aprovo",
        "reviso",
        "envio",
        // Temporal / routine markers — es
        "cada día",
        "cada dia",
        "todos los días",
        "todos los dias",
        "semanalmente",
        "mensualmente",
        "cada semana",
        "cada mes",
        "rutina",
        // Temporal / routine markers — en
        "every day",
        "daily",
        "weekly",
        "monthly",
        "every week",
        "every month",
        "routine",
        // Temporal / routine markers — pt
        "todo dia",
        "todos os dias",
        "semanalmente",
        "mensalmente",
        "toda semana",
        "todo mês",
        "todo mes",
        "rotina",
    ]
});

/// Returns true when `text` looks like it might describe a process.
///
/// Blank or shorter-than-3-character input never fires. No semantic
/// understanding is attempted here.
pub fn mentions_process(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < 3 {
        return false;
    }

    let lowered = trimmed.to_lowercase();
    PROCESS_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
