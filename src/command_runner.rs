//! Sanctioned command execution
//!
//! This module is the only place external commands are spawned. Every
//! child goes through here so that:
//!
//! - it runs in its own process group (see `process_guard`)
//! - its PID is registered for cleanup if the installer is interrupted
//! - its outcome is reported uniformly as a `CommandOutput`

use crate::process_guard::{ChildRegistry, CommandProcessGroup};
use anyhow::{Context, Result};
use log::info;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

/// Output from an external command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Check that the command succeeded and return an error if not.
    pub fn ensure_success(&self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let code = self.exit_code.unwrap_or(-1);
            anyhow::bail!(
                "{} failed (exit code {}): {}",
                context,
                code,
                self.stderr.trim()
            )
        }
    }
}

/// Execute a command with stdout and stderr captured.
pub fn run_captured(cmd: &mut Command, what: &str) -> Result<CommandOutput> {
    info!("run_captured: {} ({:?})", what, cmd.get_program());

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .in_new_process_group();

    let child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn {}", what))?;
    let pid = child.id();
    register_child(pid);

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed waiting for {}", what));
    unregister_child(pid);
    let output = output?;

    Ok(finish(what, output))
}

/// Execute a command, echoing its stdout line by line as it arrives.
///
/// Used for long-running children (the release build) where the user
/// should see progress in real time. Stderr is captured and surfaced on
/// failure.
pub fn run_streaming(cmd: &mut Command, what: &str) -> Result<CommandOutput> {
    info!("run_streaming: {} ({:?})", what, cmd.get_program());

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .in_new_process_group();

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn {}", what))?;
    let pid = child.id();
    register_child(pid);

    let mut streamed = String::new();
    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(std::result::Result::ok) {
            println!("{}", line);
            streamed.push_str(&line);
            streamed.push('\n');
        }
    }

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed waiting for {}", what));
    unregister_child(pid);
    let output = output?;

    let mut result = finish(what, output);
    result.stdout = streamed;
    Ok(result)
}

fn register_child(pid: u32) {
    let registry = ChildRegistry::global();
    let mut guard = registry.lock().expect("ChildRegistry mutex poisoned");
    guard.register(pid);
}

fn unregister_child(pid: u32) {
    let registry = ChildRegistry::global();
    let mut guard = registry.lock().expect("ChildRegistry mutex poisoned");
    guard.unregister(pid);
}

fn finish(what: &str, output: std::process::Output) -> CommandOutput {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code();

    if output.status.success() {
        info!("{} executed successfully", what);
    } else {
        info!("{} failed with exit code {}", what, exit_code.unwrap_or(-1));
    }

    CommandOutput {
        stdout,
        stderr,
        exit_code,
        success: output.status.success(),
    }
}
