//! Formatting for run results and plans.
//!
//! Pure string builders so the output is testable; `main` decides where
//! it goes.

use std::time::Duration;

use crate::conversation::Conversation;
use crate::executor::RunOutcome;
use crate::planning::{total_effort, ScrumPlan};
use crate::role::ALL;

/// Format the collected estimates, one row per contributing role, in
/// registry order. Only the first line of each estimate is shown.
pub fn format_estimates(conversation: &Conversation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Collected estimates ({}):\n",
        conversation.estimates().len()
    ));
    for role in ALL {
        if let Some(estimate) = conversation.estimates().get(&role) {
            let first_line = estimate.lines().next().unwrap_or("").trim();
            out.push_str(&format!("  {}: {}\n", role.display_name(), first_line));
        }
    }
    out
}

/// Format the end-of-run banner.
pub fn format_run_summary(
    conversation: &Conversation,
    outcome: RunOutcome,
    turns: usize,
) -> String {
    let status = match outcome {
        RunOutcome::Completed => "completed",
        RunOutcome::Interrupted => "interrupted",
        RunOutcome::TurnLimit => "stopped at turn limit",
    };

    let mut out = String::new();
    out.push_str(&format!("Simulation {} after {} turn(s).\n", status, turns));
    out.push_str(&format!(
        "History entries: {}\n",
        conversation.history().len()
    ));
    out.push_str(&format_estimates(conversation));

    match conversation.summary() {
        Some(summary) => {
            out.push_str("\nFinal project summary:\n");
            out.push_str(summary.trim_end());
            out.push('\n');
        }
        None => out.push_str("\nNo final summary was produced.\n"),
    }
    out
}

/// Format a generated plan: stories with criteria, then sprint tasks.
pub fn format_plan(plan: &ScrumPlan) -> String {
    let mut out = String::new();

    out.push_str("User Stories:\n");
    for story in &plan.stories {
        out.push_str(&format!("- {}: {}\n", story.id, story.story));
        out.push_str(&format!("  Priority: {}\n", story.priority));
        out.push_str(&format!("  Story Points: {}\n", story.points));
        if !story.criteria.is_empty() {
            out.push_str("  Acceptance Criteria:\n");
            for criterion in &story.criteria {
                out.push_str(&format!("    * {}\n", criterion));
            }
        }
    }

    out.push_str("\nSprint 1 Tasks:\n");
    for task in &plan.tasks {
        out.push_str(&format!("- {}: {}\n", task.id, task.description));
        out.push_str(&format!("  Story ID: {}\n", task.story_id));
        out.push_str(&format!("  Role: {}\n", task.role.display_name()));
        out.push_str(&format!("  Effort: {} hours\n", task.effort_hours));
    }

    out.push_str(&format!(
        "\nSummary: {} User Stories, {} Tasks for Sprint 1 ({} hours total)\n",
        plan.stories.len(),
        plan.tasks.len(),
        total_effort(&plan.tasks)
    ));
    out
}

/// Format a duration in human-readable form.
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
