//! Sequential plan generation.
//!
//! Chains three generation stages over a growing message list, so each
//! stage sees the previous stage's output: user stories, acceptance
//! criteria, and sprint tasks with per-role effort hours. Works with any
//! engine (claude, codex, mock).

mod stories;
mod tasks;

pub use stories::{apply_criteria, parse_criteria, parse_stories, UserStory};
pub use tasks::{parse_tasks, tasks_for_story, total_effort, SprintTask};

use crate::conversation::Message;
use crate::engine::Engine;
use crate::role::Role;

/// The output of a full planning run.
#[derive(Debug)]
pub struct ScrumPlan {
    /// User stories with merged acceptance criteria.
    pub stories: Vec<UserStory>,
    /// Sprint tasks across all roles.
    pub tasks: Vec<SprintTask>,
}

/// Run the full planning pipeline for a customer request.
///
/// Stage failures surface immediately; no stage output is silently
/// discarded or re-requested.
pub fn run_plan(engine: &dyn Engine, customer_request: &str) -> Result<ScrumPlan, String> {
    let mut history = vec![Message::new(Role::Customer, customer_request)];

    let (mut plan_stories, raw) = stories::request_stories(engine, customer_request, &history)?;
    history.push(Message::new(Role::UiUxDesigner, raw));

    let (criteria, raw) = stories::request_criteria(engine, &history)?;
    apply_criteria(&mut plan_stories, &criteria);
    history.push(Message::new(Role::QaEngineer, raw));

    let (plan_tasks, _raw) = tasks::request_tasks(engine, &history)?;

    Ok(ScrumPlan {
        stories: plan_stories,
        tasks: plan_tasks,
    })
}
