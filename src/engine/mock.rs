use rand::Rng;

use crate::config::EngineType;
use crate::dispatch::SUMMARY_REQUEST;
use crate::role::Role;

use super::{Engine, EngineResult, GenerationRequest, RequestKind};

/// Roles that receive generated sprint tasks, with the descriptions used
/// for the two canned stories.
const TASK_ROLES: &[(Role, &str, &str)] = &[
    (Role::UiUxDesigner, "Design browsing UI", "Design checkout UI"),
    (Role::SolutionArchitect, "Define catalog API", "Define payment API"),
    (Role::Developer, "Code browsing feature", "Code payment integration"),
    (Role::QaEngineer, "Test browsing functionality", "Test payment security"),
    (Role::TechnicalWriter, "Write browsing guide", "Write payment guide"),
    (Role::DevopsEngineer, "Set up cloud hosting", "Set up payment gateway"),
    (Role::SecurityEngineer, "Secure catalog API", "Secure payment API"),
    (Role::EcommerceSpecialist, "Optimize search flow", "Optimize checkout flow"),
];

/// Mock engine for tests.
///
/// Deterministic routing behavior without network calls: output is canned
/// per [`RequestKind`] (and per role for turns), with only the task effort
/// hours randomized inside fixed per-role ranges.
pub struct MockEngine;

impl MockEngine {
    /// Create a new mock engine.
    pub fn new() -> Self {
        Self
    }

    fn turn_response(request: &GenerationRequest<'_>) -> String {
        let role = request.role;
        match role {
            Role::ScrumMaster => {
                let closing = request
                    .history
                    .last()
                    .map(|m| m.body == SUMMARY_REQUEST)
                    .unwrap_or(false);
                if closing {
                    "Final project summary: every specialist has delivered an \
                     estimate. Sequencing design, implementation, testing, and \
                     hardening gives a total timeline of 12 weeks.\n\
                     Estimated Days Required:\n\
                     - 4 ceremonies / 1 ceremony per day = 4 days"
                        .to_string()
                } else {
                    format!(
                        "Noted on turn {}. Handing the work to the next specialist.\n\
                         Estimated Days Required:\n\
                         - 4 ceremonies / 1 ceremony per day = 4 days",
                        request.turn
                    )
                }
            }
            Role::Customer => "I would like the product described in my request.".to_string(),
            _ => format!(
                "{} deliverables for this sprint are scoped (turn {}).\n\
                 Estimated Weeks Required:\n\
                 - 6 items / 2 per week = 3 weeks",
                role.display_name(),
                request.turn
            ),
        }
    }

    fn stories_response() -> String {
        "- US-001 | High | 5 | As a customer, I want to browse books by category so I can find books easily.\n\
         - US-002 | High | 8 | As a customer, I want to purchase books online so I can pay securely.\n"
            .to_string()
    }

    fn criteria_response() -> String {
        "US-001: Genre filters; Search under 2s\n\
         US-002: Secure gateway; Card support\n"
            .to_string()
    }

    fn tasks_response() -> String {
        let mut rng = rand::thread_rng();
        let mut lines = String::new();
        let mut task_num = 1;

        for (story_idx, story_id) in ["US-001", "US-002"].iter().enumerate() {
            for (role, first_desc, second_desc) in TASK_ROLES {
                let effort: u32 = match role {
                    Role::TechnicalWriter => rng.gen_range(1..=4),
                    Role::UiUxDesigner | Role::DevopsEngineer => rng.gen_range(3..=8),
                    _ => rng.gen_range(4..=10),
                };
                let desc = if story_idx == 0 { first_desc } else { second_desc };
                lines.push_str(&format!(
                    "- TASK-{:03} | {} | {} | {}h | {}\n",
                    task_num,
                    story_id,
                    role.as_str(),
                    effort,
                    desc
                ));
                task_num += 1;
            }
        }

        let effort: u32 = rng.gen_range(2..=4);
        lines.push_str(&format!(
            "- TASK-{:03} | N/A | {} | {}h | Plan Sprint 1 tasks\n",
            task_num,
            Role::ScrumMaster.as_str(),
            effort
        ));
        lines
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MockEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let output = match request.kind {
            RequestKind::Turn => Self::turn_response(request),
            RequestKind::Stories => Self::stories_response(),
            RequestKind::Criteria => Self::criteria_response(),
            RequestKind::Tasks => Self::tasks_response(),
        };
        EngineResult::success(output)
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Mock
    }
}
