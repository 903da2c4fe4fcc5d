//! Pre-flight sanity checks for the runtime environment
//!
//! Verifies the system before the installer makes any changes:
//! - Required tools are present on PATH
//! - A home directory can be resolved
//! - Warns when running as root (the install target is per-user)
//!
//! If a required check fails, install aborts with a clear message before
//! touching the filesystem.

use crate::command_runner::run_captured;
use std::path::PathBuf;
use std::process::Command;

/// Result of environment verification
#[derive(Debug)]
pub struct SanityCheckResult {
    pub missing_binaries: Vec<String>,
    pub home_dir: Option<PathBuf>,
    pub running_as_root: bool,
}

impl SanityCheckResult {
    /// Returns true if all hard requirements passed.
    ///
    /// Running as root is a warning, not a failure: installing into
    /// root's own `~/.local/bin` is unusual but legitimate.
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty() && self.home_dir.is_some()
    }

    /// Human-readable summary of every failed requirement
    pub fn describe_failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        for binary in &self.missing_binaries {
            failures.push(format!("required tool not found on PATH: {}", binary));
        }
        if self.home_dir.is_none() {
            failures.push("could not resolve a home directory".to_string());
        }
        failures
    }
}

/// Tools the installer shells out to
const REQUIRED_BINARIES: &[&str] = &[
    "cargo", // release build
];

/// Optional tools (warn if missing but don't fail)
const OPTIONAL_BINARIES: &[&str] = &[
    "rustc", // cargo drives it, but its absence usually signals a broken toolchain
];

/// Check if a binary is available in PATH
fn binary_exists(name: &str) -> bool {
    let mut cmd = Command::new("which");
    cmd.arg(name);
    run_captured(&mut cmd, "which")
        .map(|output| output.success)
        .unwrap_or(false)
}

/// Check if running as root (EUID 0)
fn is_running_as_root() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Perform all sanity checks and return the result
pub fn verify_environment() -> SanityCheckResult {
    let mut missing = Vec::new();

    for binary in REQUIRED_BINARIES {
        if !binary_exists(binary) {
            missing.push((*binary).to_string());
        }
    }

    for binary in OPTIONAL_BINARIES {
        if !binary_exists(binary) {
            log::debug!("Optional binary not found: {}", binary);
        }
    }

    SanityCheckResult {
        missing_binaries: missing,
        home_dir: dirs::home_dir(),
        running_as_root: is_running_as_root(),
    }
}
