//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored output for role names, status messages, and
//! transcript headers.

use crate::role::{Role, ALL};

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    // Standard colors
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";

    // Bright colors (for more variety)
    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_BLUE: &str = "\x1b[94m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

use codes::*;

/// Colors for role names - deterministic based on the role's registry slot.
const ROLE_COLORS: &[&str] = &[
    CYAN,
    MAGENTA,
    YELLOW,
    BLUE,
    BRIGHT_CYAN,
    BRIGHT_MAGENTA,
    BRIGHT_YELLOW,
    BRIGHT_BLUE,
    GREEN,
    BRIGHT_GREEN,
];

/// Get a deterministic color for a role.
pub fn role_color(role: Role) -> &'static str {
    let index = ALL.iter().position(|&r| r == role).unwrap_or(0);
    ROLE_COLORS[index % ROLE_COLORS.len()]
}

/// Color a role name deterministically, bracketed for the console.
pub fn speaker(role: Role) -> String {
    format!("{}{}[{}]{}", BOLD, role_color(role), role.display_name(), RESET)
}

/// Color an announcement line (bold green).
pub fn announce(text: &str) -> String {
    format!("{}{}{}{}", BOLD, GREEN, text, RESET)
}

/// Color a timestamp (dim).
pub fn timestamp(ts: &str) -> String {
    format!("{}{}{}", DIM, ts, RESET)
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", RED, text, RESET)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", YELLOW, text, RESET)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    format!("{}{}{}", CYAN, text, RESET)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Color a number/count (bright cyan).
pub fn number(n: impl std::fmt::Display) -> String {
    format!("{}{}{}", BRIGHT_CYAN, n, RESET)
}

/// Colorize a transcript header line: "### timestamp | speaker".
/// Lines that are not headers are returned as-is.
pub fn header_line(line: &str) -> String {
    match crate::transcript::parse_header(line) {
        Some((ts, speaker_name)) => {
            let colored_speaker = match ALL.iter().copied().find(|r| r.display_name() == speaker_name) {
                Some(role) => speaker(role),
                None => format!("{}{}{}", BOLD, speaker_name, RESET),
            };
            format!("### {} | {}", timestamp(ts), colored_speaker)
        }
        None => line.to_string(),
    }
}

/// Emoji constants for consistent usage
pub mod emoji {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const HOURGLASS: &str = "⏳";
    pub const TASK: &str = "📋";
    pub const SPARKLES: &str = "✨";
    pub const CLOCK: &str = "🕐";
    pub const STOP: &str = "🛑";
    pub const CHART: &str = "📊";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_color_deterministic() {
        assert_eq!(role_color(Role::QaEngineer), role_color(Role::QaEngineer));
        assert_eq!(role_color(Role::Customer), role_color(Role::Customer));
    }

    #[test]
    fn test_role_color_varies() {
        // Adjacent registry slots get different colors.
        assert_ne!(role_color(Role::Customer), role_color(Role::ProductOwner));
        assert_ne!(role_color(Role::ProductOwner), role_color(Role::ScrumMaster));
    }

    #[test]
    fn test_speaker_bracketed() {
        let colored = speaker(Role::ProductOwner);
        assert!(colored.contains("[Product Owner]"));
        assert!(colored.contains(RESET));
    }

    #[test]
    fn test_announce_green_bold() {
        let text = announce("Simulation complete");
        assert!(text.contains(GREEN));
        assert!(text.contains(BOLD));
        assert!(text.contains(RESET));
    }

    #[test]
    fn test_timestamp_dim() {
        let text = timestamp("12:34:56");
        assert!(text.contains(DIM));
        assert!(text.contains(RESET));
    }

    #[test]
    fn test_header_line_colored() {
        let line = "### 2026-08-07 10:00:00 | Product Owner";
        let colored = header_line(line);
        assert!(colored.contains(DIM), "timestamp should be dim");
        assert!(colored.contains("Product Owner"));
        assert!(colored.contains(RESET));
    }

    #[test]
    fn test_header_line_unknown_speaker() {
        let line = "### 2026-08-07 10:00:00 | Narrator";
        let colored = header_line(line);
        assert!(colored.contains("Narrator"));
    }

    #[test]
    fn test_header_line_passthrough() {
        let line = "plain body text";
        assert_eq!(header_line(line), line);
    }
}
