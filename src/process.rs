//! External tool runner with captured output and a bounded wait.
//!
//! Every checker that shells out (shell syntax check, snippet compiler,
//! document lint, capability probes) goes through [`run_tool`]. A tool that
//! does not exit within its timeout is killed and reported as timed out.

use crate::error::{Result, WfcheckError};
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long output readers may outlive the tool's own deadline. A grandchild
/// that inherited the pipes can keep them open after the tool is killed.
const READER_GRACE: Duration = Duration::from_millis(500);

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code (None if killed or terminated by a signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Whether the process was killed because it exceeded its timeout.
    pub timed_out: bool,
}

impl ToolOutput {
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Trimmed stderr, falling back to trimmed stdout when stderr is empty.
    pub fn detail(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Run `program args...`, optionally feeding `stdin`, and wait at most `timeout`.
///
/// # Returns
///
/// * `Ok(ToolOutput)` - The process ran (successfully or not, or timed out)
/// * `Err(WfcheckError::Io)` - The process could not be started
pub fn run_tool(
    program: &str,
    args: &[String],
    stdin: Option<&str>,
    timeout: Duration,
) -> Result<ToolOutput> {
    debug!(program, ?args, "running external tool");
    let deadline = Instant::now() + timeout + READER_GRACE;

    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WfcheckError::Io(format!("failed to execute {}: {}", program, e)))?;

    // Writer and readers run on their own threads so a chatty tool cannot
    // fill a pipe and stall while we poll for exit.
    let writer = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => {
            let input = input.to_string();
            Some(thread::spawn(move || {
                let _ = pipe.write_all(input.as_bytes());
            }))
        }
        _ => None,
    };
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout)?;

    if let Some(writer) = writer {
        let _ = writer.join();
    }

    Ok(ToolOutput {
        exit_code,
        stdout: stdout.map(|rx| collect_reader(rx, deadline)).unwrap_or_default(),
        stderr: stderr.map(|rx| collect_reader(rx, deadline)).unwrap_or_default(),
        timed_out,
    })
}

/// Whether `program [leading...] --version` runs and exits 0.
pub fn probe(program: &str, leading: &[String], timeout: Duration) -> bool {
    let mut args = leading.to_vec();
    args.push("--version".to_string());
    match run_tool(program, &args, None, timeout) {
        Ok(output) => output.is_success(),
        Err(e) => {
            debug!(program, error = %e, "capability probe failed");
            false
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Take a reader's output, giving up at `deadline`. An abandoned reader
/// thread finishes once the last holder of the pipe exits.
fn collect_reader(rx: Receiver<String>, deadline: Instant) -> String {
    let wait = deadline.saturating_duration_since(Instant::now());
    rx.recv_timeout(wait).unwrap_or_else(|_| {
        debug!("tool output pipe still open after deadline; dropping output");
        String::new()
    })
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(10);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(WfcheckError::Io(format!(
                    "failed to check process status: {}",
                    e
                )));
            }
        }
    }
}
