use std::process::Command;

use crate::config::EngineType;

use super::util::{render_prompt, resolve_cli_path, run_cli};
use super::{Engine, EngineResult, GenerationRequest};

/// Codex CLI engine.
pub struct CodexEngine {
    /// Path to codex CLI binary.
    cli_path: String,
    /// Timeout in seconds (0 = no timeout).
    timeout_secs: u64,
}

impl CodexEngine {
    /// Create a new Codex engine with default timeout.
    /// Resolves the full path to codex using `which` for better portability.
    pub fn new() -> Self {
        let cli_path = resolve_cli_path("codex").unwrap_or_else(|| "codex".to_string());
        Self {
            cli_path,
            timeout_secs: 0,
        }
    }

    /// Create with custom CLI path.
    pub fn with_path(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
            timeout_secs: 0,
        }
    }

    /// Create with timeout.
    pub fn with_timeout(timeout_secs: u64) -> Self {
        let cli_path = resolve_cli_path("codex").unwrap_or_else(|| "codex".to_string());
        Self {
            cli_path,
            timeout_secs,
        }
    }
}

impl Default for CodexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for CodexEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let prompt = render_prompt(request);

        // Codex uses the "exec" subcommand with stdin for prompts.
        let mut cmd = Command::new(&self.cli_path);
        cmd.arg("exec").arg("-");

        let label = request.role.display_name();
        run_cli(cmd, &prompt, label, self.timeout_secs)
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Codex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codex_engine_type() {
        let engine = CodexEngine::new();
        assert_eq!(engine.engine_type(), EngineType::Codex);
    }

    #[test]
    fn test_codex_engine_with_timeout() {
        let engine = CodexEngine::with_timeout(1800);
        assert_eq!(engine.timeout_secs, 1800);
        assert_eq!(engine.engine_type(), EngineType::Codex);
    }

    #[test]
    fn test_codex_engine_with_path() {
        let engine = CodexEngine::with_path("/usr/local/bin/codex");
        assert_eq!(engine.cli_path, "/usr/local/bin/codex");
    }
}
