use std::path::Path;

use super::cli::CliArgs;
use super::{env, toml};

/// Engine type for text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineType {
    /// Claude CLI engine.
    #[default]
    Claude,
    /// Codex CLI engine.
    Codex,
    /// Deterministic mock engine for tests (no network).
    Mock,
}

impl EngineType {
    /// Parse engine type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "claude" => Some(Self::Claude),
            "codex" => Some(Self::Codex),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::Mock => "mock",
        }
    }
}

/// Default per-turn generation timeout in seconds (10 minutes).
pub const DEFAULT_TURN_TIMEOUT_SECS: u64 = 600;

/// Default customer request when none is given.
pub const DEFAULT_REQUEST: &str =
    "I want to build a web-based mobile app for our bookstore where customers \
     can browse books by genre, read previews, purchase books online, track \
     their shipments, review books, and get personalized reading \
     recommendations.";

/// Scrumsim configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The customer request driving the run.
    pub customer_request: String,
    /// Engine type for text generation.
    pub engine_type: EngineType,
    /// Force the mock engine regardless of `engine_type`.
    pub engine_mock_mode: bool,
    /// Per-turn generation timeout in seconds (0 = no timeout).
    pub turn_timeout_secs: u64,
    /// Maximum turns to run (0 = unbounded).
    pub max_turns: usize,
    /// Path to the transcript file.
    pub files_transcript: String,
    /// Path to the per-role log directory.
    pub files_log_dir: String,
    /// Path for the workflow diagram DOT file.
    pub files_flowchart: String,
    /// Skip flowchart output after a run.
    pub no_flowchart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            customer_request: DEFAULT_REQUEST.to_string(),
            engine_type: EngineType::Claude,
            engine_mock_mode: false,
            turn_timeout_secs: DEFAULT_TURN_TIMEOUT_SECS,
            max_turns: 0,
            files_transcript: ".scrumsim/transcript.md".to_string(),
            files_log_dir: ".scrumsim/loop".to_string(),
            files_flowchart: ".scrumsim/workflow.dot".to_string(),
            no_flowchart: false,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    pub fn load(cli_args: &CliArgs) -> Self {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            if let Ok(file_config) = Self::load_from_file(path) {
                config.merge_from(&file_config);
            }
        } else if Path::new("scrumsim.toml").exists() {
            if let Ok(file_config) = Self::load_from_file("scrumsim.toml") {
                config.merge_from(&file_config);
            }
        }

        config.apply_env();
        config.apply_cli(cli_args);

        // Mock mode overrides the engine type.
        if config.engine_mock_mode {
            config.engine_type = EngineType::Mock;
        }

        config
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub(super) fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    /// Apply environment variables.
    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref request) = args.request_arg {
            self.customer_request = request.clone();
        }
        if let Some(ref engine) = args.engine {
            if let Some(engine_type) = EngineType::parse(engine) {
                self.engine_type = engine_type;
            }
        }
        if args.mock {
            self.engine_mock_mode = true;
        }
        if let Some(n) = args.turn_timeout {
            self.turn_timeout_secs = n;
        }
        if let Some(n) = args.max_turns {
            self.max_turns = n;
        }
        if let Some(ref path) = args.transcript_file {
            self.files_transcript = path.clone();
        }
        if let Some(ref path) = args.log_dir {
            self.files_log_dir = path.clone();
        }
        if let Some(ref path) = args.flowchart_file {
            self.files_flowchart = path.clone();
        }
        if args.no_flowchart {
            self.no_flowchart = true;
        }
    }

    /// Merge values from another config (for file-based config).
    fn merge_from(&mut self, other: &Self) {
        self.customer_request = other.customer_request.clone();
        self.engine_type = other.engine_type;
        self.engine_mock_mode = other.engine_mock_mode;
        self.turn_timeout_secs = other.turn_timeout_secs;
        self.max_turns = other.max_turns;
        self.files_transcript = other.files_transcript.clone();
        self.files_log_dir = other.files_log_dir.clone();
        self.files_flowchart = other.files_flowchart.clone();
    }

    /// Generate default scrumsim.toml content.
    pub fn default_toml() -> String {
        format!(
            r#"# Scrumsim configuration

[engine]
type = "claude"
mock_mode = false

[turns]
timeout = {}  # seconds per generation call (10 minutes)
max = 0       # 0 = unbounded

[files]
transcript = ".scrumsim/transcript.md"
log_dir = ".scrumsim/loop"
flowchart = ".scrumsim/workflow.dot"
"#,
            DEFAULT_TURN_TIMEOUT_SECS
        )
    }

    /// Get the effective engine type (considering mock_mode).
    pub fn effective_engine(&self) -> EngineType {
        if self.engine_mock_mode {
            EngineType::Mock
        } else {
            self.engine_type
        }
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
