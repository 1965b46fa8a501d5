use std::collections::HashMap;

use crate::conversation::Message;
use crate::engine::{Engine, GenerationRequest, RequestKind};
use crate::prompt;
use crate::role::Role;

/// Stage prompt for user story generation.
const STORY_PROMPT: &str = "Generate Scrum user stories for: {{request}}";

/// Stage prompt for acceptance criteria.
const CRITERIA_PROMPT: &str = "Add acceptance criteria to the user stories above.";

/// A user story with optional merged acceptance criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStory {
    /// Unique story ID, e.g. `US-001`.
    pub id: String,
    /// Priority label, e.g. `High`.
    pub priority: String,
    /// Story points.
    pub points: u32,
    /// The story text.
    pub story: String,
    /// Acceptance criteria, merged in after the criteria stage.
    pub criteria: Vec<String>,
}

/// Request user stories from the engine and parse them.
///
/// Returns the parsed stories together with the raw response so the
/// caller can feed it to the next stage.
pub(super) fn request_stories(
    engine: &dyn Engine,
    customer_request: &str,
    history: &[Message],
) -> Result<(Vec<UserStory>, String), String> {
    let mut vars = HashMap::new();
    vars.insert("request", customer_request.to_string());
    let instructions = prompt::render(STORY_PROMPT, &vars);

    let request = GenerationRequest {
        role: Role::UiUxDesigner,
        kind: RequestKind::Stories,
        instructions,
        history,
        turn: 0,
    };
    let result = engine.generate(&request);
    if !result.success {
        return Err(result
            .error
            .unwrap_or_else(|| "story generation failed".to_string()));
    }

    let stories = parse_stories(&result.output)?;
    Ok((stories, result.output))
}

/// Request acceptance criteria for the stories already in the history.
pub(super) fn request_criteria(
    engine: &dyn Engine,
    history: &[Message],
) -> Result<(Vec<(String, Vec<String>)>, String), String> {
    let request = GenerationRequest {
        role: Role::QaEngineer,
        kind: RequestKind::Criteria,
        instructions: CRITERIA_PROMPT.to_string(),
        history,
        turn: 0,
    };
    let result = engine.generate(&request);
    if !result.success {
        return Err(result
            .error
            .unwrap_or_else(|| "criteria generation failed".to_string()));
    }

    let criteria = parse_criteria(&result.output);
    Ok((criteria, result.output))
}

/// Parse user stories from the line format
/// `- US-001 | <priority> | <points> | <story>`.
///
/// Lines that do not match the format are skipped; a response with no
/// matching lines is an error.
pub fn parse_stories(text: &str) -> Result<Vec<UserStory>, String> {
    let mut stories = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let rest = match line.strip_prefix("- ") {
            Some(rest) => rest,
            None => continue,
        };
        let fields: Vec<&str> = rest.split(" | ").collect();
        if fields.len() != 4 {
            continue;
        }
        let points: u32 = fields[2]
            .trim()
            .parse()
            .map_err(|_| format!("invalid story points in line: {}", line))?;
        stories.push(UserStory {
            id: fields[0].trim().to_string(),
            priority: fields[1].trim().to_string(),
            points,
            story: fields[3].trim().to_string(),
            criteria: Vec::new(),
        });
    }

    if stories.is_empty() {
        Err("no user stories found in response".to_string())
    } else {
        Ok(stories)
    }
}

/// Parse acceptance criteria from the line format
/// `US-001: <criterion>; <criterion>`.
pub fn parse_criteria(text: &str) -> Vec<(String, Vec<String>)> {
    let mut criteria = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let (id, rest) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        let id = id.trim();
        if !id.starts_with("US-") {
            continue;
        }
        let items: Vec<String> = rest
            .split(';')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if !items.is_empty() {
            criteria.push((id.to_string(), items));
        }
    }

    criteria
}

/// Merge parsed criteria into their stories by ID. Criteria for unknown
/// story IDs are ignored; stories without criteria keep an empty list.
pub fn apply_criteria(stories: &mut [UserStory], criteria: &[(String, Vec<String>)]) {
    for (id, items) in criteria {
        if let Some(story) = stories.iter_mut().find(|s| &s.id == id) {
            story.criteria = items.clone();
        }
    }
}
