use std::process::Command;

use crate::config::EngineType;

use super::util::{render_prompt, resolve_cli_path, run_cli};
use super::{Engine, EngineResult, GenerationRequest};

/// Claude CLI engine.
pub struct ClaudeEngine {
    /// Path to claude CLI binary.
    cli_path: String,
    /// Timeout in seconds (0 = no timeout).
    timeout_secs: u64,
}

impl ClaudeEngine {
    /// Create a new Claude engine with default timeout.
    /// Resolves the full path to claude using `which` for better portability.
    pub fn new() -> Self {
        let cli_path = resolve_cli_path("claude").unwrap_or_else(|| "claude".to_string());
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
        let cli_path = resolve_cli_path("claude").unwrap_or_else(|| "claude".to_string());
        Self {
            cli_path,
            timeout_secs,
        }
    }
}

impl Default for ClaudeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClaudeEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let prompt = render_prompt(request);

        // Prompt goes over stdin to avoid E2BIG when histories get long.
        let mut cmd = Command::new(&self.cli_path);
        cmd.arg("--print").arg("-p").arg("-");

        let label = request.role.display_name();
        run_cli(cmd, &prompt, label, self.timeout_secs)
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Claude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;
    use crate::engine::RequestKind;
    use crate::role::Role;

    #[test]
    fn test_claude_engine_type() {
        let engine = ClaudeEngine::new();
        assert_eq!(engine.engine_type(), EngineType::Claude);
    }

    #[test]
    fn test_claude_engine_with_timeout() {
        let engine = ClaudeEngine::with_timeout(1800);
        assert_eq!(engine.timeout_secs, 1800);
        assert_eq!(engine.engine_type(), EngineType::Claude);
    }

    #[cfg(unix)]
    #[test]
    fn test_claude_engine_runs_cli() {
        use std::fs::{self, File};
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        use tempfile::TempDir;

        let _guard = crate::shutdown::test_lock();
        crate::shutdown::reset();

        let temp = TempDir::new().expect("temp dir");
        let script_path = temp.path().join("fake-claude.sh");
        let mut file = File::create(&script_path).expect("create script");
        writeln!(file, "#!/bin/sh").expect("write shebang");
        // Echo the prompt back so the test can check it arrived on stdin.
        writeln!(file, "cat").expect("write cat");
        drop(file);

        let mut perms = fs::metadata(&script_path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).expect("chmod");

        let engine = ClaudeEngine::with_path(script_path.to_string_lossy().to_string());
        let history = vec![Message::new(Role::Customer, "Build a bookstore app")];
        let request = GenerationRequest {
            role: Role::ProductOwner,
            kind: RequestKind::Turn,
            instructions: Role::ProductOwner.instructions().to_string(),
            history: &history,
            turn: 1,
        };

        let result = engine.generate(&request);
        assert!(result.success, "engine failed: {:?}", result);
        assert!(result.output.contains("Build a bookstore app"));
        assert!(result.output.contains("Respond as the Product Owner"));
    }
}
