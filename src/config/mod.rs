//! Layered configuration.
//!
//! Precedence: CLI args > environment variables > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs, Command};
pub use types::{Config, ConfigError, EngineType, DEFAULT_TURN_TIMEOUT_SECS};
