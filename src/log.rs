//! Per-role logging with rotation.
//!
//! Provides file-based logging for roles with automatic rotation when
//! log files exceed a configurable line limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::role::Role;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// A logger for a specific role.
pub struct RoleLogger {
    /// Path to the log file.
    pub path: PathBuf,
    /// Maximum lines before rotation.
    pub max_lines: usize,
    /// The role this logger belongs to.
    pub role: Role,
}

impl RoleLogger {
    /// Create a new role logger.
    pub fn new(log_dir: &Path, role: Role) -> Self {
        Self {
            path: log_file_path(log_dir, role),
            max_lines: DEFAULT_MAX_LINES,
            role,
        }
    }

    /// Create a logger with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Write a log entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | <Role> | <message>`
    pub fn log(&self, message: &str) -> io::Result<()> {
        self.ensure_dir()?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} | {} | {}\n", timestamp, self.role.display_name(), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        self.rotate_if_needed()?;

        Ok(())
    }

    /// Write a separator for a new run.
    pub fn log_run_start(&self) -> io::Result<()> {
        self.ensure_dir()?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = format!(
            "\n======================================================================\n\
             === {} - Run started at {} ===\n\
             ======================================================================\n\n",
            self.role.display_name(),
            timestamp
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(separator.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Ensure the log directory exists.
    fn ensure_dir(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Check and rotate log if it exceeds max lines.
    fn rotate_if_needed(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let line_count = count_lines(&self.path)?;
        if line_count <= self.max_lines {
            return Ok(());
        }

        rotate_log(&self.path)
    }

    /// Get the current line count of the log file.
    pub fn line_count(&self) -> io::Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        count_lines(&self.path)
    }

    /// Read the last N lines from the log file.
    pub fn read_recent(&self, n: usize) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let start = all_lines.len().saturating_sub(n);
        Ok(all_lines[start..].to_vec())
    }
}

/// Get the log file path for a role.
pub fn log_file_path(log_dir: &Path, role: Role) -> PathBuf {
    log_dir.join(format!("role-{}.log", role.as_str()))
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(reader.lines().count())
}

/// Rotate a log file.
///
/// Creates a timestamped backup and clears the original file.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("log"),
        timestamp
    );
    let backup_path = path.with_file_name(backup_name);

    fs::rename(path, &backup_path)?;
    File::create(path)?;

    Ok(())
}

/// Rotate all log files in a directory that exceed the max line count.
pub fn rotate_logs_in_dir(log_dir: &Path, max_lines: usize) -> io::Result<()> {
    if !log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("log") {
            let line_count = count_lines(&path)?;
            if line_count > max_lines {
                rotate_log(&path)?;
            }
        }
    }

    Ok(())
}
