use std::fs;
use std::path::Path;

use super::types::{Config, ConfigError, EngineType};

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
    Config::parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        // Handle section headers like [engine]
        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].to_string();
            continue;
        }

        if let Some((key, value)) = parse_toml_line(line) {
            let full_key = if current_section.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", current_section, key)
            };

            match full_key.as_str() {
                "engine.type" => {
                    let engine_str = value.trim_matches('"');
                    config.engine_type = EngineType::parse(engine_str).ok_or_else(|| {
                        ConfigError::Parse(format!("invalid engine.type: {}", engine_str))
                    })?;
                }
                "engine.mock_mode" => {
                    config.engine_mock_mode = value == "true";
                }
                "turns.timeout" => {
                    config.turn_timeout_secs = value
                        .parse()
                        .map_err(|_| ConfigError::Parse(format!("invalid turns.timeout: {}", value)))?;
                }
                "turns.max" => {
                    config.max_turns = value
                        .parse()
                        .map_err(|_| ConfigError::Parse(format!("invalid turns.max: {}", value)))?;
                }
                "files.transcript" => {
                    config.files_transcript = value.trim_matches('"').to_string();
                }
                "files.log_dir" => {
                    config.files_log_dir = value.trim_matches('"').to_string();
                }
                "files.flowchart" => {
                    config.files_flowchart = value.trim_matches('"').to_string();
                }
                "run.request" => {
                    config.customer_request = value.trim_matches('"').to_string();
                }
                _ => {} // Ignore unknown keys
            }
        }
    }

    Ok(config)
}

/// Strip a trailing comment, respecting quoted values.
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse a TOML line into key-value pair.
fn parse_toml_line(line: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = line.splitn(2, '=').collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].trim(), parts[1].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[engine]
type = "mock"
mock_mode = true

[turns]
timeout = 120
max = 40

[files]
transcript = "out/transcript.md"
log_dir = "out/loop"
flowchart = "out/workflow.dot"

[run]
request = "Build a kiosk"
"#;
        let config = parse_toml(content).unwrap();
        assert_eq!(config.engine_type, EngineType::Mock);
        assert!(config.engine_mock_mode);
        assert_eq!(config.turn_timeout_secs, 120);
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.files_transcript, "out/transcript.md");
        assert_eq!(config.files_log_dir, "out/loop");
        assert_eq!(config.files_flowchart, "out/workflow.dot");
        assert_eq!(config.customer_request, "Build a kiosk");
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let content = "[turns]\nmax = 12\n";
        let config = parse_toml(content).unwrap();
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.engine_type, EngineType::Claude);
        assert_eq!(config.files_transcript, ".scrumsim/transcript.md");
    }

    #[test]
    fn test_parse_invalid_engine_type() {
        let content = "[engine]\ntype = \"gpt\"\n";
        assert!(parse_toml(content).is_err());
    }

    #[test]
    fn test_parse_invalid_number() {
        let content = "[turns]\ntimeout = soon\n";
        assert!(parse_toml(content).is_err());
    }

    #[test]
    fn test_parse_unknown_keys_ignored() {
        let content = "[other]\nkey = \"value\"\n";
        let config = parse_toml(content).unwrap();
        assert_eq!(config.engine_type, EngineType::Claude);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let content = "# comment\n\n[turns]\nmax = 7  # trailing comment\n";
        let config = parse_toml(content).unwrap();
        assert_eq!(config.max_turns, 7);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = load_from_file("/nonexistent/scrumsim.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
