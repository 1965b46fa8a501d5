use crate::conversation::Message;
use crate::engine::{Engine, GenerationRequest, RequestKind};
use crate::role::Role;

/// Stage prompt for sprint task generation.
const TASK_PROMPT: &str =
    "Generate Sprint 1 tasks for all roles based on the user stories above.";

/// A sprint task assigned to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintTask {
    /// Unique task ID, e.g. `TASK-001`.
    pub id: String,
    /// Story this task belongs to; `N/A` for cross-cutting work.
    pub story_id: String,
    /// Responsible role.
    pub role: Role,
    /// Estimated effort in hours.
    pub effort_hours: u32,
    /// The task description.
    pub description: String,
}

/// Request sprint tasks from the engine and parse them.
pub(super) fn request_tasks(
    engine: &dyn Engine,
    history: &[Message],
) -> Result<(Vec<SprintTask>, String), String> {
    let request = GenerationRequest {
        role: Role::ScrumMaster,
        kind: RequestKind::Tasks,
        instructions: TASK_PROMPT.to_string(),
        history,
        turn: 0,
    };
    let result = engine.generate(&request);
    if !result.success {
        return Err(result
            .error
            .unwrap_or_else(|| "task generation failed".to_string()));
    }

    let tasks = parse_tasks(&result.output)?;
    Ok((tasks, result.output))
}

/// Parse sprint tasks from the line format
/// `- TASK-001 | <story id> | <role slug> | <effort>h | <description>`.
///
/// Lines that do not match the shape are skipped; an unknown role slug or
/// a malformed effort is an error, since dropping it would silently lose
/// planned work.
pub fn parse_tasks(text: &str) -> Result<Vec<SprintTask>, String> {
    let mut tasks = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let rest = match line.strip_prefix("- ") {
            Some(rest) => rest,
            None => continue,
        };
        let fields: Vec<&str> = rest.split(" | ").collect();
        if fields.len() != 5 {
            continue;
        }

        let role = Role::parse(fields[2].trim())
            .ok_or_else(|| format!("unknown role in task line: {}", line))?;
        let effort_hours: u32 = fields[3]
            .trim()
            .trim_end_matches('h')
            .parse()
            .map_err(|_| format!("invalid effort in task line: {}", line))?;

        tasks.push(SprintTask {
            id: fields[0].trim().to_string(),
            story_id: fields[1].trim().to_string(),
            role,
            effort_hours,
            description: fields[4].trim().to_string(),
        });
    }

    if tasks.is_empty() {
        Err("no sprint tasks found in response".to_string())
    } else {
        Ok(tasks)
    }
}

/// Total effort across all tasks, in hours.
pub fn total_effort(tasks: &[SprintTask]) -> u32 {
    tasks.iter().map(|t| t.effort_hours).sum()
}

/// Tasks belonging to one story.
pub fn tasks_for_story<'a>(tasks: &'a [SprintTask], story_id: &str) -> Vec<&'a SprintTask> {
    tasks.iter().filter(|t| t.story_id == story_id).collect()
}
