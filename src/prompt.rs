//! Instruction overrides and template rendering.
//!
//! Role instruction profiles are built in; a `prompts/` directory can
//! override them per role (`prompts/<role slug>.md`). Templates use
//! `{{variable}}` placeholders.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::role::Role;

/// Default prompts directory relative to the working directory.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Prompts directory, probed once per process.
static PROMPTS_DIR: Lazy<Option<PathBuf>> = Lazy::new(find_prompts_dir);

/// Find the prompts directory.
///
/// Looks in the following order:
/// 1. SCRUMSIM_PROMPTS_DIR environment variable
/// 2. ./prompts (relative to current directory)
/// 3. Alongside the executable
fn find_prompts_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SCRUMSIM_PROMPTS_DIR") {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Some(path);
        }
    }

    let cwd_prompts = PathBuf::from(DEFAULT_PROMPTS_DIR);
    if cwd_prompts.is_dir() {
        return Some(cwd_prompts);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let exe_prompts = exe_dir.join(DEFAULT_PROMPTS_DIR);
            if exe_prompts.is_dir() {
                return Some(exe_prompts);
            }
        }
    }

    None
}

/// Load an override file from the prompts directory, if present.
pub fn load_override(name: &str) -> Option<String> {
    let prompts_dir = PROMPTS_DIR.as_ref()?;
    let path = prompts_dir.join(format!("{}.md", name));
    fs::read_to_string(&path).ok()
}

/// Instruction profile for a role: the override file when one exists,
/// the built-in text otherwise.
pub fn instructions_for(role: Role) -> String {
    load_override(role.as_str()).unwrap_or_else(|| role.instructions().to_string())
}

/// Render a template with variable substitution.
///
/// Variables are specified as `{{variable_name}}` in the template.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use scrumsim::prompt::render;
///
/// let mut vars = HashMap::new();
/// vars.insert("request", "a bookstore app".to_string());
/// assert_eq!(
///     render("Plan {{request}} now", &vars),
///     "Plan a bookstore app now"
/// );
/// ```
pub fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        let template = "Hello {{name}}!";
        let mut vars = HashMap::new();
        vars.insert("name", "World".to_string());

        assert_eq!(render(template, &vars), "Hello World!");
    }

    #[test]
    fn test_render_multiple_vars() {
        let template = "{{role}} estimates {{weeks}} weeks";
        let mut vars = HashMap::new();
        vars.insert("role", "QA Engineer".to_string());
        vars.insert("weeks", "3".to_string());

        assert_eq!(render(template, &vars), "QA Engineer estimates 3 weeks");
    }

    #[test]
    fn test_render_missing_var() {
        let template = "Hello {{name}} and {{other}}!";
        let mut vars = HashMap::new();
        vars.insert("name", "World".to_string());

        assert_eq!(render(template, &vars), "Hello World and {{other}}!");
    }

    #[test]
    fn test_instructions_for_falls_back_to_builtin() {
        // Without a prompts dir the built-in text is returned verbatim.
        let text = instructions_for(Role::QaEngineer);
        assert!(text.contains("Test Cases") || text.contains("Tests features"));
    }
}
