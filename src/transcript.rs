//! Transcript file writer and reader.
//!
//! Every turn is appended to the transcript as a timestamped block:
//!
//! ```text
//! ### YYYY-MM-DD HH:MM:SS | <Role>
//!
//! <body>
//! ```

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Marker prefix for entry header lines.
const HEADER_PREFIX: &str = "### ";

/// Format an entry header line.
pub fn format_header(timestamp: &str, speaker: &str) -> String {
    format!("{}{} | {}", HEADER_PREFIX, timestamp, speaker)
}

/// Append one turn to the transcript.
pub fn write_entry<P: AsRef<Path>>(path: P, speaker: &str, body: &str) -> io::Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", format_header(&timestamp, speaker))?;
    writeln!(file)?;
    writeln!(file, "{}", body.trim_end())?;
    writeln!(file)
}

/// Clear the transcript and write the boot banner.
pub fn write_boot_banner<P: AsRef<Path>>(path: P, request: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "# Scrum simulation transcript")?;
    writeln!(file)?;
    writeln!(file, "Started {} for request:", timestamp)?;
    writeln!(file)?;
    writeln!(file, "> {}", request)?;
    writeln!(file)
}

/// Parse an entry header line into (timestamp, speaker).
///
/// # Examples
/// ```
/// use scrumsim::transcript::parse_header;
/// let parsed = parse_header("### 2026-08-07 10:00:00 | Product Owner");
/// assert_eq!(parsed, Some(("2026-08-07 10:00:00", "Product Owner")));
/// assert_eq!(parse_header("plain body text"), None);
/// ```
pub fn parse_header(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(HEADER_PREFIX)?;
    let (timestamp, speaker) = rest.split_once(" | ")?;
    Some((timestamp, speaker))
}

/// Count entries in a transcript file.
pub fn count_entries<P: AsRef<Path>>(path: P) -> io::Result<usize> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut count = 0;
    for line in reader.lines() {
        if parse_header(&line?).is_some() {
            count += 1;
        }
    }
    Ok(count)
}

/// Read all entries from a specific speaker.
pub fn entries_from<P: AsRef<Path>>(path: P, speaker: &str) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut current: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some((_, line_speaker)) = parse_header(&line) {
            if let Some(body) = current.take() {
                entries.push(body.trim().to_string());
            }
            if line_speaker == speaker {
                current = Some(String::new());
            }
        } else if let Some(body) = current.as_mut() {
            body.push_str(&line);
            body.push('\n');
        }
    }
    if let Some(body) = current.take() {
        entries.push(body.trim().to_string());
    }

    Ok(entries)
}
