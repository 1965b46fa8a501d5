use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::shutdown;

use super::{EngineResult, GenerationRequest, RequestKind};

/// Interval for "still waiting" log messages (5 minutes).
pub(super) const WAIT_LOG_INTERVAL_SECS: u64 = 300;

/// Resolve the full path to a CLI binary using `which`.
/// Returns None if the binary is not found.
pub(super) fn resolve_cli_path(name: &str) -> Option<String> {
    let output = Command::new("which").arg(name).output().ok()?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(path);
        }
    }
    None
}

/// Render a generation request into a single prompt string.
///
/// Layout: instruction profile, the conversation so far, then a closing
/// directive that names the responding role and, for pipeline stages, the
/// exact line format the parser expects.
pub fn render_prompt(request: &GenerationRequest<'_>) -> String {
    let mut prompt = String::new();
    prompt.push_str(&request.instructions);
    prompt.push_str("\n\nConversation so far:\n");
    for message in request.history {
        prompt.push_str(message.origin.display_name());
        prompt.push_str(": ");
        prompt.push_str(&message.body);
        prompt.push_str("\n\n");
    }
    prompt.push_str(&closing_directive(request));
    prompt
}

fn closing_directive(request: &GenerationRequest<'_>) -> String {
    match request.kind {
        RequestKind::Turn => format!(
            "Respond as the {}, keeping the required estimate format.",
            request.role.display_name()
        ),
        RequestKind::Stories => "Return one user story per line, exactly in this format:\n\
             - US-001 | <priority> | <story points> | <story text>"
            .to_string(),
        RequestKind::Criteria => "Return acceptance criteria, one story per line, exactly in this \
             format:\n\
             US-001: <criterion>; <criterion>"
            .to_string(),
        RequestKind::Tasks => "Return one sprint task per line, exactly in this format:\n\
             - TASK-001 | <story id> | <role slug> | <effort>h | <description>"
            .to_string(),
    }
}

/// Spawn a CLI subprocess, feed it the prompt over stdin, and wait for it
/// with shutdown and timeout handling.
///
/// Output is drained on reader threads so a chatty child never blocks on a
/// full pipe. The child is killed on shutdown or timeout.
pub(super) fn run_cli(
    mut cmd: Command,
    prompt: &str,
    label: &str,
    timeout_secs: u64,
) -> EngineResult {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => return EngineResult::failure(format!("failed to spawn {}: {}", label, e), 1),
    };
    let pid = child.id();

    // Write prompt to stdin
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(prompt.as_bytes());
    }

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let stdout_handle = thread::spawn(move || drain_lines(stdout));
    let stderr_handle = thread::spawn(move || drain_lines(stderr));

    let start = std::time::Instant::now();
    let log_interval = Duration::from_secs(WAIT_LOG_INTERVAL_SECS);
    let mut next_log = log_interval;
    let timeout = if timeout_secs > 0 {
        Some(Duration::from_secs(timeout_secs))
    } else {
        None
    };

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout_output = stdout_handle.join().unwrap_or_default();
                let stderr_output = stderr_handle.join().unwrap_or_default();
                let exit_code = status.code().unwrap_or(1);
                let _ = child.wait();

                return if status.success() {
                    EngineResult::success(stdout_output)
                } else {
                    EngineResult::failure(stderr_output, exit_code)
                };
            }
            Ok(None) => {
                let elapsed = start.elapsed();

                if shutdown::requested() {
                    reap(&mut child, stdout_handle, stderr_handle);
                    return EngineResult::failure("Shutdown requested", 130);
                }

                if let Some(timeout_duration) = timeout {
                    if elapsed >= timeout_duration {
                        reap(&mut child, stdout_handle, stderr_handle);
                        let mins = elapsed.as_secs() / 60;
                        return EngineResult::failure(
                            format!("{} timed out after {} minutes (pid {})", label, mins, pid),
                            124,
                        );
                    }
                }

                if elapsed >= next_log {
                    let mins = elapsed.as_secs() / 60;
                    eprintln!(
                        "[{}] Still generating... ({} min elapsed, pid {})",
                        label, mins, pid
                    );
                    next_log += log_interval;
                }
                thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                let _ = child.wait();
                return EngineResult::failure(format!("failed to wait for {}: {}", label, e), 1);
            }
        }
    }
}

fn drain_lines(pipe: Option<impl std::io::Read>) -> String {
    let mut output = String::new();
    if let Some(pipe) = pipe {
        let reader = BufReader::new(pipe);
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    output.push_str(&line);
                    output.push('\n');
                }
                Err(_) => break,
            }
        }
    }
    output
}

fn reap(
    child: &mut Child,
    stdout_handle: thread::JoinHandle<String>,
    stderr_handle: thread::JoinHandle<String>,
) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = stdout_handle.join();
    let _ = stderr_handle.join();
}
