//! Engine abstraction for text generation.
//!
//! Supports multiple backends:
//! - `claude`: Claude CLI
//! - `codex`: Codex CLI
//! - `mock`: deterministic mock for tests (no network)
//!
//! Requests carry an explicit [`RequestKind`] tag so test doubles switch
//! on a typed value instead of sniffing the prompt text.

use std::sync::Arc;

use crate::config::EngineType;
use crate::conversation::Message;
use crate::role::Role;

mod claude;
mod codex;
mod mock;
mod util;

pub use claude::ClaudeEngine;
pub use codex::CodexEngine;
pub use mock::MockEngine;
pub use util::render_prompt;

/// What kind of output a generation request expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A free-form conversation turn.
    Turn,
    /// User stories for the planning pipeline.
    Stories,
    /// Acceptance criteria for previously generated stories.
    Criteria,
    /// Sprint tasks for all roles.
    Tasks,
}

/// One generation request: who speaks, what kind of output, and the
/// conversation so far.
#[derive(Debug)]
pub struct GenerationRequest<'a> {
    /// Role whose voice the response should take.
    pub role: Role,
    /// Typed request tag.
    pub kind: RequestKind,
    /// Instruction profile (system prompt) for the role or pipeline stage.
    pub instructions: String,
    /// Prior turns, oldest first.
    pub history: &'a [Message],
    /// 1-indexed turn number, 0 for pipeline stages.
    pub turn: usize,
}

/// Result of engine execution.
#[derive(Debug)]
pub struct EngineResult {
    /// Whether execution succeeded.
    pub success: bool,
    /// Generated text (stdout for CLI engines, canned text for the mock).
    pub output: String,
    /// Error message if failed.
    pub error: Option<String>,
    /// Exit code (0 for mock success).
    pub exit_code: i32,
}

impl EngineResult {
    /// Create a successful result.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
            exit_code: 0,
        }
    }

    /// Create a failed result.
    pub fn failure(error: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
            exit_code,
        }
    }
}

/// Engine trait for text-generation backends.
pub trait Engine: Send + Sync {
    /// Generate text for one request. Blocking; a single attempt.
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult;

    /// Get the engine type.
    fn engine_type(&self) -> EngineType;
}

/// Create an engine from config.
/// Returns Arc for sharing between the run loop and reporting.
pub fn create_engine(engine_type: EngineType, timeout_secs: u64) -> Arc<dyn Engine> {
    match engine_type {
        EngineType::Claude => Arc::new(ClaudeEngine::with_timeout(timeout_secs)),
        EngineType::Codex => Arc::new(CodexEngine::with_timeout(timeout_secs)),
        EngineType::Mock => Arc::new(MockEngine::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_result_success() {
        let result = EngineResult::success("output");
        assert!(result.success);
        assert_eq!(result.output, "output");
        assert!(result.error.is_none());
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn test_engine_result_failure() {
        let result = EngineResult::failure("error message", 1);
        assert!(!result.success);
        assert!(result.output.is_empty());
        assert_eq!(result.error, Some("error message".to_string()));
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn test_create_engine_mock() {
        let engine = create_engine(EngineType::Mock, 0);
        assert_eq!(engine.engine_type(), EngineType::Mock);
    }

    #[test]
    fn test_create_engine_claude() {
        let engine = create_engine(EngineType::Claude, 600);
        assert_eq!(engine.engine_type(), EngineType::Claude);
    }

    #[test]
    fn test_create_engine_codex() {
        let engine = create_engine(EngineType::Codex, 600);
        assert_eq!(engine.engine_type(), EngineType::Codex);
    }
}
