//! Integration tests for the full interview flow.
//!
//! These tests exercise the end-to-end path:
//! 1. StartInterview fetches context and emits the opening question
//! 2. ContinueInterview gates, matches, assembles prompts, and generates
//! 3. The completion policy closes the interview deterministically
//! 4. The outbound queue persists turns and process references
//!
//! Uses the in-memory adapters and the mock generator throughout.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use process_compass::adapters::ai::MockTextGenerator;
use process_compass::adapters::memory::{
    InMemoryDirectory, InMemoryReferenceStore, InMemoryTurnStore, StaticContextProvider,
};
use process_compass::adapters::outbound::{spawn_drain_worker, SideEffect, SideEffectQueue};
use process_compass::application::{
    ContinueInterviewCommand, ContinueInterviewError, ContinueInterviewHandler, FallbackIdentity,
    StartInterviewCommand, StartInterviewHandler,
};
use process_compass::domain::foundation::{
    EmployeeId, InterviewId, Language, OrgId, ProcessId, ReferenceId, RoleId, TechnicalLevel,
};
use process_compass::domain::interview::{
    CompletionMode, CompletionPolicy, CompletionReason, TurnController, TurnRole,
};
use process_compass::domain::matching::{
    CatalogEntry, ProcessMatcher, ProvenanceResolver, DEFAULT_MATCH_TIMEOUT,
};
use process_compass::domain::prompts::closing_message;
use process_compass::ports::{
    EmployeeRecord, HistorySummary, InterviewContextSnapshot, RoleRecord,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    generator: Arc<MockTextGenerator>,
    references: Arc<InMemoryReferenceStore>,
    turns: Arc<InMemoryTurnStore>,
    directory: Arc<InMemoryDirectory>,
    start: StartInterviewHandler,
    continue_: ContinueInterviewHandler,
    rx: mpsc::Receiver<SideEffect>,
}

impl Harness {
    fn new(
        generator: MockTextGenerator,
        snapshot: InterviewContextSnapshot,
        policy: CompletionPolicy,
    ) -> Self {
        let generator = Arc::new(generator);
        let references = Arc::new(InMemoryReferenceStore::new());
        let turns = Arc::new(InMemoryTurnStore::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let context_provider = Arc::new(StaticContextProvider::with_snapshot(snapshot));

        let provenance = ProvenanceResolver::new(references.clone(), directory.clone());
        let matcher = Arc::new(ProcessMatcher::new(
            generator.clone(),
            provenance,
            DEFAULT_MATCH_TIMEOUT,
        ));
        let controller = Arc::new(TurnController::new(generator.clone(), matcher, policy));

        let (effects, rx) = SideEffectQueue::bounded(64);
        let start = StartInterviewHandler::new(
            context_provider.clone(),
            controller.clone(),
            effects.clone(),
        );
        let continue_ = ContinueInterviewHandler::new(context_provider, controller, effects);

        Self {
            generator,
            references,
            turns,
            directory,
            start,
            continue_,
            rx,
        }
    }

    /// Drops every queue sender and drains all pending side effects into
    /// the in-memory stores.
    async fn drain(self) -> (Arc<InMemoryTurnStore>, Arc<InMemoryReferenceStore>) {
        let Harness {
            start,
            continue_,
            rx,
            turns,
            references,
            ..
        } = self;
        drop(start);
        drop(continue_);

        spawn_drain_worker(rx, turns.clone(), references.clone())
            .await
            .expect("drain worker panicked");
        (turns, references)
    }
}

fn entry(id: ProcessId, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        type_label: "core".to_string(),
        is_active: true,
        updated_at: Utc::now(),
    }
}

fn snapshot(
    employee_id: EmployeeId,
    org_id: OrgId,
    catalog: Vec<CatalogEntry>,
) -> InterviewContextSnapshot {
    InterviewContextSnapshot {
        employee_id,
        employee_name: "Ana Pérez".to_string(),
        role_names: vec!["Compras".to_string()],
        org_id,
        organization_name: "Acme".to_string(),
        catalog,
        history: HistorySummary::default(),
    }
}

fn start_command(
    employee_id: EmployeeId,
    org_id: OrgId,
    language: Language,
) -> StartInterviewCommand {
    StartInterviewCommand {
        employee_id,
        org_id,
        auth_token: "token".to_string(),
        language,
        technical_level: TechnicalLevel::NonTechnical,
    }
}

fn continue_command(user_text: &str) -> ContinueInterviewCommand {
    ContinueInterviewCommand {
        user_text: user_text.to_string(),
        auth_token: "token".to_string(),
        tenant: "acme".to_string(),
        fallback_identity: FallbackIdentity {
            employee_name: "Ana Pérez".to_string(),
            role_name: "Compras".to_string(),
            organization: "Acme".to_string(),
        },
    }
}

fn match_json(name: &str, confidence: f32) -> String {
    format!(
        r#"{{"is_match": true, "matched_process_name": "{}", "confidence_score": {}, "reasoning": "description covers the catalog entry"}}"#,
        name, confidence
    )
}

// =============================================================================
// End-to-end flows
// =============================================================================

#[tokio::test]
async fn full_interview_with_match_persists_turns_and_reference() {
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let process_id = ProcessId::new();

    let generator = MockTextGenerator::new()
        .with_response("¿A qué te dedicas cada día?")
        // Turn 1: gate fires, matcher first, then the question.
        .with_response(match_json("Proceso de Aprobación de Compras", 0.93))
        .with_response("¿Quién aprueba por encima de tu límite?")
        // Turn 2: no gate keyword, just the question.
        .with_response("¿Algo más que agregar?");

    let harness = Harness::new(
        generator,
        snapshot(
            employee_id,
            org_id,
            vec![entry(process_id, "Proceso de Aprobación de Compras")],
        ),
        CompletionPolicy::default(),
    );

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::Es))
        .await
        .unwrap();
    assert_eq!(started.turn_number, 1);
    let mut state = started.state;

    // The interviewee describes the purchase approval process.
    let outcome = harness
        .continue_
        .handle(
            &mut state,
            continue_command("Yo me encargo del proceso de aprobación de compras de la empresa"),
        )
        .await
        .unwrap();
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].matched_entry_id, Some(process_id));
    assert!(outcome.matches[0].confidence >= 0.9);
    assert!(!outcome.is_final);

    // Then asks to finish.
    let outcome = harness
        .continue_
        .handle(&mut state, continue_command("Eso es todo, quiero terminar"))
        .await
        .unwrap();
    assert!(outcome.is_final);
    assert_eq!(
        outcome.completion_reason,
        Some(CompletionReason::UserRequested)
    );
    assert_eq!(outcome.question, closing_message(Language::Es));

    let (turns, references) = harness.drain().await;

    // Opening turn + two user turns + two assistant turns, gapless.
    let saved = turns.saved_turns(state.interview_id);
    assert_eq!(saved.len(), 5);
    let sequences: Vec<u32> = saved.iter().map(|t| t.sequence_number).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
    assert_eq!(saved[0].role, TurnRole::Assistant);
    assert_eq!(saved[1].role, TurnRole::User);

    let saved_refs = references.references();
    assert_eq!(saved_refs.len(), 1);
    assert_eq!(saved_refs[0].process_id, process_id);
    assert!(!saved_refs[0].is_new);
}

#[tokio::test]
async fn unrelated_descriptions_do_not_match() {
    // Catalog holds inventory management; the interviewee describes
    // purchasing. The model says no-match and nothing is saved.
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let process_id = ProcessId::new();

    let generator = MockTextGenerator::new()
        .with_response("What do you do?")
        .with_response(
            r#"{"is_match": false, "confidence_score": 0.1, "reasoning": "purchasing is not inventory management"}"#,
        )
        .with_response("Tell me more about purchasing");

    let harness = Harness::new(
        generator,
        snapshot(
            employee_id,
            org_id,
            vec![entry(process_id, "Inventory Management")],
        ),
        CompletionPolicy::default(),
    );

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::En))
        .await
        .unwrap();
    let mut state = started.state;

    let outcome = harness
        .continue_
        .handle(
            &mut state,
            continue_command("I handle the purchase approval workflow for new vendors"),
        )
        .await
        .unwrap();
    assert!(outcome.matches.is_empty());

    let (_, references) = harness.drain().await;
    assert!(references.references().is_empty());
}

#[tokio::test]
async fn mention_gate_keeps_matcher_idle_on_small_talk() {
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();

    let generator = MockTextGenerator::new()
        .with_response("What do you do?")
        .with_response("How is your day going?");

    let harness = Harness::new(
        generator,
        snapshot(
            employee_id,
            org_id,
            vec![entry(ProcessId::new(), "Payroll")],
        ),
        CompletionPolicy::default(),
    );

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::En))
        .await
        .unwrap();
    let mut state = started.state;

    harness
        .continue_
        .handle(&mut state, continue_command("the weather is lovely today"))
        .await
        .unwrap();

    // One call for the opening question, one for the follow-up. A matcher
    // invocation would make it three.
    assert_eq!(harness.generator.call_count(), 2);
}

#[tokio::test]
async fn provenance_disclosure_reaches_the_next_prompt() {
    // An earlier interview by Luis referenced the process; Ana's match
    // must surface "previously reported by Luis" in her next prompt.
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let process_id = ProcessId::new();

    let luis_id = EmployeeId::new();
    let role_id = RoleId::new();
    let earlier_interview = InterviewId::new();

    let generator = MockTextGenerator::new()
        .with_response("¿Qué haces?")
        .with_response(match_json("Proceso de Aprobación de Compras", 0.9))
        .with_response("¿Coincide tu versión con la de Luis?");

    let harness = Harness::new(
        generator,
        snapshot(
            employee_id,
            org_id,
            vec![entry(process_id, "Proceso de Aprobación de Compras")],
        ),
        CompletionPolicy::default(),
    );

    harness.directory.insert_role(RoleRecord {
        id: role_id,
        display_name: "Contador".to_string(),
    });
    harness.directory.insert_employee(EmployeeRecord {
        id: luis_id,
        full_name: "Luis Gómez".to_string(),
        role_ids: vec![role_id],
    });
    harness
        .references
        .insert_interview(earlier_interview, luis_id);
    harness.references.insert_reference_at(
        ReferenceId::new(),
        earlier_interview,
        process_id,
        Utc::now() - chrono::Duration::days(3),
    );

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::Es))
        .await
        .unwrap();
    let mut state = started.state;

    let outcome = harness
        .continue_
        .handle(
            &mut state,
            continue_command("Superviso el proceso de aprobación de compras"),
        )
        .await
        .unwrap();

    let provenance = outcome.matches[0].provenance.as_ref().unwrap();
    assert_eq!(provenance.employee_id, luis_id);
    assert_eq!(provenance.employee_name.as_deref(), Some("Luis Gómez"));
    assert_eq!(provenance.employee_role.as_deref(), Some("Contador"));

    // The question-generation call (the last one) carried the disclosure.
    let calls = harness.generator.recorded_calls();
    let question_prompt = &calls.last().unwrap().system_prompt;
    assert!(question_prompt.contains("previously reported by Luis Gómez (Contador)"));
    assert!(question_prompt.contains("agrees with or differs from"));
}

#[tokio::test]
async fn safety_limit_closes_a_rambling_interview() {
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let policy = CompletionPolicy {
        mode: CompletionMode::Dynamic,
        max_questions_safety_limit: 3,
        ..Default::default()
    };

    // The mock falls back to "Mock question?" once the queue is empty.
    let generator = MockTextGenerator::new();
    let harness = Harness::new(generator, snapshot(employee_id, org_id, vec![]), policy);

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::En))
        .await
        .unwrap();
    let mut state = started.state;

    let mut last = None;
    for i in 0..3 {
        let outcome = harness
            .continue_
            .handle(&mut state, continue_command(&format!("more detail {}", i)))
            .await
            .unwrap();
        last = Some(outcome);
    }

    let last = last.unwrap();
    assert!(last.is_final);
    assert_eq!(last.completion_reason, Some(CompletionReason::SafetyLimit));
    assert_eq!(last.question, closing_message(Language::En));
    assert!(state.is_completed());

    // A further turn is rejected outright.
    let err = harness
        .continue_
        .handle(&mut state, continue_command("one more thing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ContinueInterviewError::InterviewCompleted));
}

#[tokio::test]
async fn repeated_match_saves_one_reference() {
    let employee_id = EmployeeId::new();
    let org_id = OrgId::new();
    let process_id = ProcessId::new();

    let generator = MockTextGenerator::new()
        .with_response("What do you do?")
        .with_response(match_json("Payroll", 0.9))
        .with_response("How often do you run payroll?")
        .with_response(match_json("Payroll", 0.95))
        .with_response("Who signs off on it?");

    let harness = Harness::new(
        generator,
        snapshot(employee_id, org_id, vec![entry(process_id, "Payroll")]),
        CompletionPolicy::default(),
    );

    let started = harness
        .start
        .handle(start_command(employee_id, org_id, Language::En))
        .await
        .unwrap();
    let mut state = started.state;

    harness
        .continue_
        .handle(&mut state, continue_command("I run the payroll process"))
        .await
        .unwrap();
    harness
        .continue_
        .handle(
            &mut state,
            continue_command("The payroll process runs twice a month"),
        )
        .await
        .unwrap();

    let (_, references) = harness.drain().await;

    // The second save hits the idempotency guard.
    assert_eq!(references.references().len(), 1);
}

#[tokio::test]
async fn matcher_timeout_degrades_to_no_match() {
    // The matcher call is slower than its budget; the verdict degrades to
    // a fail-safe no-match instead of erroring.
    let generator = Arc::new(
        MockTextGenerator::new()
            .with_response(match_json("Payroll", 0.9))
            .with_delay(std::time::Duration::from_millis(50)),
    );

    let provenance = ProvenanceResolver::new(
        Arc::new(InMemoryReferenceStore::new()),
        Arc::new(InMemoryDirectory::new()),
    );
    let matcher = ProcessMatcher::new(
        generator,
        provenance,
        std::time::Duration::from_millis(5),
    );

    let verdict = matcher
        .match_description(
            "I run the payroll process",
            vec![entry(ProcessId::new(), "Payroll")],
            Language::En,
            None,
        )
        .await;

    assert!(!verdict.is_match);
    assert!(verdict.reasoning.contains("timed out"));
}
