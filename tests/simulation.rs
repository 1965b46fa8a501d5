use std::path::Path;

use tempfile::TempDir;

use scrumsim::config::EngineType;
use scrumsim::conversation::Conversation;
use scrumsim::dispatch::Policy;
use scrumsim::engine::{Engine, EngineResult, GenerationRequest, MockEngine};
use scrumsim::executor::{RunError, RunOutcome, TurnExecutor};
use scrumsim::flowchart::FlowchartRenderer;
use scrumsim::log::RoleLogger;
use scrumsim::planning;
use scrumsim::report;
use scrumsim::role::{Role, EXPERTS};
use scrumsim::transcript;

const REQUEST: &str = "Build a web-based mobile app for a bookstore with \
                       browsing, purchases, order tracking, reviews, and \
                       recommendations.";

fn completed_run() -> (Conversation, usize) {
    let engine = MockEngine::new();
    let policy = Policy::standard();
    let mut executor = TurnExecutor::new(&engine, &policy);
    let mut conversation = Conversation::new(REQUEST);
    let outcome = executor.run(&mut conversation).expect("run failed");
    assert_eq!(outcome, RunOutcome::Completed);
    (conversation, executor.turns_taken())
}

#[test]
fn full_run_terminates_with_all_estimates() {
    let (conversation, _) = completed_run();

    assert!(conversation.done());
    assert!(conversation.summary().is_some());

    for expert in EXPERTS {
        assert!(
            conversation.estimates().contains_key(&expert),
            "missing estimate for {}",
            expert
        );
    }
    // The product owner contributes too; the customer and the scrum master
    // never do.
    assert!(conversation.estimates().contains_key(&Role::ProductOwner));
    assert!(!conversation.estimates().contains_key(&Role::Customer));
    assert!(!conversation.estimates().contains_key(&Role::ScrumMaster));
    assert_eq!(conversation.estimates().len(), EXPERTS.len() + 1);
}

#[test]
fn full_run_turn_and_history_accounting() {
    let (conversation, turns) = completed_run();

    // Product owner, then ten expert round trips through the scrum master,
    // then the closing summary turn.
    assert_eq!(turns, 22);

    // Seeded request + one message per turn + ten hand-over briefs + the
    // final summary request.
    assert_eq!(conversation.history().len(), 1 + turns + EXPERTS.len() + 1);

    // The history starts with the seed and ends with the coordinator's
    // summary, which is also the recorded summary.
    assert_eq!(conversation.history()[0].origin, Role::Customer);
    let last = conversation.last_message().unwrap();
    assert_eq!(last.origin, Role::ScrumMaster);
    assert_eq!(conversation.summary(), Some(last.body.as_str()));
}

#[test]
fn repeated_runs_are_identical() {
    let (first, first_turns) = completed_run();
    let (second, second_turns) = completed_run();

    assert_eq!(first_turns, second_turns);
    assert_eq!(first.history().len(), second.history().len());
    assert_eq!(first.summary(), second.summary());

    let first_origins: Vec<Role> = first.history().iter().map(|m| m.origin).collect();
    let second_origins: Vec<Role> = second.history().iter().map(|m| m.origin).collect();
    assert_eq!(first_origins, second_origins);
}

#[test]
fn experts_speak_in_roster_order() {
    let engine = MockEngine::new();
    let policy = Policy::standard();
    let mut executor = TurnExecutor::new(&engine, &policy);
    let mut conversation = Conversation::new(REQUEST);

    let mut expert_turns = Vec::new();
    while !conversation.done() {
        let record = executor.step(&mut conversation).expect("step failed");
        if record.role.is_expert() {
            expert_turns.push(record.role);
        }
    }

    assert_eq!(expert_turns, EXPERTS.to_vec());
}

/// Engine that fails once a given turn is reached.
struct FailAtTurn {
    fail_at: usize,
    inner: MockEngine,
}

impl Engine for FailAtTurn {
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        if request.turn == self.fail_at {
            EngineResult::failure("upstream unavailable", 1)
        } else {
            self.inner.generate(request)
        }
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Mock
    }
}

#[test]
fn generation_failure_keeps_partial_state_inspectable() {
    let engine = FailAtTurn {
        fail_at: 5,
        inner: MockEngine::new(),
    };
    let policy = Policy::standard();
    let mut executor = TurnExecutor::new(&engine, &policy);
    let mut conversation = Conversation::new(REQUEST);

    let err = executor.run(&mut conversation).unwrap_err();
    match err {
        RunError::Generation { role, turn, ref error } => {
            assert_eq!(turn, 5);
            assert_eq!(role, Role::SolutionArchitect);
            assert!(error.contains("upstream unavailable"));
        }
        ref other => panic!("unexpected error: {}", other),
    }

    // Turns 1-4 happened: product owner, scrum master, designer, scrum
    // master. The designer's estimate survived the failure.
    assert!(!conversation.done());
    assert!(conversation.estimates().contains_key(&Role::UiUxDesigner));
    assert!(!conversation.estimates().contains_key(&Role::SolutionArchitect));
    let estimates_text = report::format_estimates(&conversation);
    assert!(estimates_text.contains("UI/UX Designer"));
}

#[test]
fn run_writes_transcript_and_logs() {
    let tmp = TempDir::new().unwrap();
    let transcript_path = tmp.path().join("transcript.md");
    let log_dir = tmp.path().join("loop");

    let engine = MockEngine::new();
    let policy = Policy::standard();
    let mut executor = TurnExecutor::new(&engine, &policy);
    let mut conversation = Conversation::new(REQUEST);

    transcript::write_boot_banner(&transcript_path, REQUEST).unwrap();

    let mut turns = 0;
    while !conversation.done() {
        let record = executor.step(&mut conversation).expect("step failed");
        transcript::write_entry(&transcript_path, record.role.display_name(), &record.body)
            .unwrap();
        RoleLogger::new(&log_dir, record.role)
            .log(&format!("Turn {}", record.turn))
            .unwrap();
        turns += 1;
    }

    assert_eq!(transcript::count_entries(&transcript_path).unwrap(), turns);

    let po_entries = transcript::entries_from(&transcript_path, "Product Owner").unwrap();
    assert_eq!(po_entries.len(), 1);

    // One log file per role that spoke.
    assert!(log_dir.join("role-product_owner.log").exists());
    assert!(log_dir.join("role-scrum_master.log").exists());
    assert!(log_dir.join("role-ecommerce_specialist.log").exists());
    assert!(!log_dir.join("role-customer.log").exists());
}

#[test]
fn plan_pipeline_produces_full_report() {
    let engine = MockEngine::new();
    let plan = planning::run_plan(&engine, REQUEST).expect("plan failed");

    assert_eq!(plan.stories.len(), 2);
    for story in &plan.stories {
        assert!(!story.criteria.is_empty());
    }
    assert_eq!(plan.tasks.len(), 17);
    assert!(planning::total_effort(&plan.tasks) > 0);

    let text = report::format_plan(&plan);
    assert!(text.contains("User Stories:"));
    assert!(text.contains("Sprint 1 Tasks:"));
    assert!(text.contains("Summary: 2 User Stories, 17 Tasks"));
}

#[test]
fn custom_policy_without_coordinator_ends_at_chain_end() {
    // Route straight down the chain with no closing summary step.
    let engine = MockEngine::new();
    let policy = Policy::new(
        vec![(
            Role::ProductOwner,
            scrumsim::dispatch::Route {
                to: Role::EcommerceSpecialist,
                then: None,
            },
        )],
        Vec::new(),
        None,
    );
    let mut executor = TurnExecutor::new(&engine, &policy);
    let mut conversation = Conversation::new(REQUEST);

    let outcome = executor.run(&mut conversation).expect("run failed");

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(conversation.done());
    assert!(conversation.summary().is_none());
    // One product-owner turn, then the chain ended directly.
    assert_eq!(conversation.history().len(), 2);
}

#[test]
fn flowchart_renders_from_policy_edges() {
    let policy = Policy::standard();
    let edges = scrumsim::flowchart::workflow_edges(&policy);

    let dot = scrumsim::flowchart::DotRenderer.render(&edges);
    let tmp = TempDir::new().unwrap();
    let dot_path = tmp.path().join("workflow.dot");
    std::fs::write(&dot_path, &dot).unwrap();
    assert!(Path::new(&dot_path).exists());

    let written = std::fs::read_to_string(&dot_path).unwrap();
    assert!(written.starts_with("digraph"));
    assert!(written.contains("ecommerce_specialist"));
}
