//! Demo binary: runs one interview on stdin/stdout.
//!
//! Uses the OpenAI-compatible generator from configuration and in-memory
//! adapters for everything else, seeded with a small demo catalog.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use process_compass::adapters::ai::{OpenAiGenerator, OpenAiGeneratorConfig};
use process_compass::adapters::memory::{
    InMemoryDirectory, InMemoryReferenceStore, InMemoryTurnStore, StaticContextProvider,
};
use process_compass::adapters::outbound::{spawn_drain_worker, SideEffectQueue};
use process_compass::application::{
    ContinueInterviewCommand, ContinueInterviewHandler, FallbackIdentity, StartInterviewCommand,
    StartInterviewHandler,
};
use process_compass::config::AppConfig;
use process_compass::domain::foundation::{EmployeeId, Language, OrgId, ProcessId, TechnicalLevel};
use process_compass::domain::interview::TurnController;
use process_compass::domain::matching::{CatalogEntry, ProcessMatcher, ProvenanceResolver};
use process_compass::ports::{HistorySummary, InterviewContextSnapshot};

fn demo_snapshot(employee_id: EmployeeId, org_id: OrgId) -> InterviewContextSnapshot {
    InterviewContextSnapshot {
        employee_id,
        employee_name: "Ana Pérez".to_string(),
        role_names: vec!["Compras".to_string()],
        org_id,
        organization_name: "Demo S.A.".to_string(),
        catalog: vec![
            CatalogEntry {
                id: ProcessId::new(),
                name: "Proceso de Aprobación de Compras".to_string(),
                type_label: "core".to_string(),
                is_active: true,
                updated_at: Utc::now(),
            },
            CatalogEntry {
                id: ProcessId::new(),
                name: "Conciliación Bancaria Mensual".to_string(),
                type_label: "support".to_string(),
                is_active: true,
                updated_at: Utc::now(),
            },
        ],
        history: HistorySummary::default(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = config
        .generation
        .api_key
        .clone()
        .ok_or("generation API key missing after validation")?;
    let generator = Arc::new(OpenAiGenerator::new(
        OpenAiGeneratorConfig::new(api_key)
            .with_model(config.generation.model.clone())
            .with_base_url(config.generation.base_url.clone())
            .with_timeout(config.generation.timeout()),
    ));

    let references = Arc::new(InMemoryReferenceStore::new());
    let turns = Arc::new(InMemoryTurnStore::new());
    let directory = Arc::new(InMemoryDirectory::new());

    let provenance = ProvenanceResolver::new(references.clone(), directory);
    let matcher = Arc::new(ProcessMatcher::new(
        generator.clone(),
        provenance,
        config.interview.matcher_timeout(),
    ));
    let controller = Arc::new(TurnController::new(
        generator,
        matcher,
        config.interview.completion_policy(),
    ));

    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let context_provider = Arc::new(StaticContextProvider::with_snapshot(demo_snapshot(
        employee_id,
        org_id,
    )));

    let (effects, rx) = SideEffectQueue::bounded(64);
    let worker = spawn_drain_worker(rx, turns, references.clone());

    let start_handler = StartInterviewHandler::new(
        context_provider.clone(),
        controller.clone(),
        effects.clone(),
    );
    let continue_handler =
        ContinueInterviewHandler::new(context_provider, controller, effects.clone());

    let started = start_handler
        .handle(StartInterviewCommand {
            employee_id,
            org_id,
            auth_token: "demo-token".to_string(),
            language: Language::Es,
            technical_level: TechnicalLevel::NonTechnical,
        })
        .await?;

    references.insert_interview(started.interview_id, employee_id);

    let mut state = started.state;
    println!("\n[{}] {}", started.turn_number, started.question);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let answer = line?;
        if answer.trim().is_empty() {
            print!("> ");
            io::stdout().flush()?;
            continue;
        }

        let outcome = continue_handler
            .handle(
                &mut state,
                ContinueInterviewCommand {
                    user_text: answer,
                    auth_token: "demo-token".to_string(),
                    tenant: "demo".to_string(),
                    fallback_identity: FallbackIdentity {
                        employee_name: "Ana Pérez".to_string(),
                        role_name: "Compras".to_string(),
                        organization: "Demo S.A.".to_string(),
                    },
                },
            )
            .await?;

        for verdict in &outcome.matches {
            if let Some(name) = &verdict.matched_name {
                println!(
                    "  (matched known process: {} — confidence {:.2})",
                    name, verdict.confidence
                );
            }
        }

        println!("\n[{}] {}", outcome.turn_number + 1, outcome.question);
        if outcome.is_final {
            break;
        }
        print!("> ");
        io::stdout().flush()?;
    }

    // Dropping all queue handles lets the worker drain and exit.
    drop(start_handler);
    drop(continue_handler);
    drop(effects);
    worker.await?;

    Ok(())
}
