use std::env;

use super::types::{Config, EngineType};

pub(super) fn apply_env(config: &mut Config) {
    if let Ok(val) = env::var("SCRUMSIM_CUSTOMER_REQUEST") {
        if !val.is_empty() {
            config.customer_request = val;
        }
    }
    if let Ok(val) = env::var("SCRUMSIM_ENGINE_TYPE") {
        if let Some(engine) = EngineType::parse(&val) {
            config.engine_type = engine;
        }
    }
    if let Ok(val) = env::var("SCRUMSIM_ENGINE_MOCK_MODE") {
        config.engine_mock_mode = val == "true" || val == "1";
    }
    if let Ok(val) = env::var("SCRUMSIM_TURN_TIMEOUT") {
        if let Ok(n) = val.parse() {
            config.turn_timeout_secs = n;
        }
    }
    if let Ok(val) = env::var("SCRUMSIM_MAX_TURNS") {
        if let Ok(n) = val.parse() {
            config.max_turns = n;
        }
    }
    if let Ok(val) = env::var("SCRUMSIM_FILES_TRANSCRIPT") {
        config.files_transcript = val;
    }
    if let Ok(val) = env::var("SCRUMSIM_FILES_LOG_DIR") {
        config.files_log_dir = val;
    }
    if let Ok(val) = env::var("SCRUMSIM_FILES_FLOWCHART") {
        config.files_flowchart = val;
    }
}
