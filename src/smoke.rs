//! Post-install smoke test
//!
//! Invokes the installed binary with `--help` and reports the real exit
//! status. A failing probe fails the install; masking it would leave the
//! user with a broken binary on PATH and a green checkmark.

use crate::command_runner::run_captured;
use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Result of invoking the installed binary.
#[derive(Debug, Clone)]
pub struct SmokeTestResult {
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the probe exited successfully.
    pub success: bool,
}

/// Run `<binary> --help` and report its true exit status.
///
/// A spawn failure (missing or non-executable file) is an error; a clean
/// spawn with a non-zero exit is a `SmokeTestResult` with
/// `success == false`.
pub fn run_smoke_test(binary: &Path) -> Result<SmokeTestResult> {
    let mut cmd = Command::new(binary);
    cmd.arg("--help");

    let output = run_captured(&mut cmd, "installed binary --help")?;

    Ok(SmokeTestResult {
        exit_code: output.exit_code,
        success: output.success,
    })
}
