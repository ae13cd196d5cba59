//! Subprocess execution.
//!
//! Every external command packmule runs (package managers, sensors tooling,
//! service managers) goes through [`run`]. Commands are spawned directly
//! with an argv, never through a shell, so arguments survive verbatim and
//! nothing depends on the caller's shell environment.

use crate::error::{PackmuleError, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal or timeout).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed after exceeding its timeout.
    pub timed_out: bool,
}

impl CommandOutput {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a command killed on timeout.
    pub fn timed_out(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: true,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Kill the command after this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Render a program and arguments for error messages and logs.
pub fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command, capturing its output.
pub fn run(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandOutput> {
    let start = Instant::now();
    let rendered = render_command(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    // Children never read our stdin.
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|_| PackmuleError::CommandFailed {
        command: rendered.clone(),
        code: None,
    })?;

    // Reader threads keep the pipes drained so a kill on timeout can't
    // deadlock against a full pipe.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let stdout_handle = thread::spawn(move || {
        let mut output = String::new();
        if let Some(stdout) = stdout {
            let reader = BufReader::new(stdout);
            for line in reader.lines().map_while(std::result::Result::ok) {
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    });

    let stderr_handle = thread::spawn(move || {
        let mut output = String::new();
        if let Some(stderr) = stderr {
            let reader = BufReader::new(stderr);
            for line in reader.lines().map_while(std::result::Result::ok) {
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    });

    let (status, timed_out) = wait_with_timeout(&mut child, options.timeout, &rendered)?;

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    if timed_out {
        return Ok(CommandOutput::timed_out(
            stdout_output,
            stderr_output,
            duration,
        ));
    }

    match status {
        Some(status) if status.success() => {
            Ok(CommandOutput::success(stdout_output, stderr_output, duration))
        }
        Some(status) => Ok(CommandOutput::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        )),
        None => Ok(CommandOutput::failure(
            None,
            stdout_output,
            stderr_output,
            duration,
        )),
    }
}

/// Execute a command and return success/failure.
pub fn run_check(program: &str, args: &[&str]) -> bool {
    run(program, args, &CommandOptions::default())
        .map(|r| r.success)
        .unwrap_or(false)
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
    command: &str,
) -> Result<(Option<ExitStatus>, bool)> {
    let Some(timeout) = timeout else {
        let status = child.wait().map_err(|_| PackmuleError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?;
        return Ok((Some(status), false));
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((Some(status), false)),
            Ok(None) => {
                if Instant::now() >= deadline {
                    child.kill().ok();
                    child.wait().ok();
                    return Ok((None, true));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(_) => {
                return Err(PackmuleError::CommandFailed {
                    command: command.to_string(),
                    code: None,
                })
            }
        }
    }
}
