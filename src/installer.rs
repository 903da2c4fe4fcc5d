//! Installation orchestration
//!
//! Runs the four install steps in order, fail-fast:
//!
//! 1. build the release binary if absent
//! 2. copy it into the bin directory
//! 3. make the bin directory reachable from PATH
//! 4. smoke-test the installed binary
//!
//! Also hosts the uninstall and doctor entry points, which share the same
//! path resolution.

use crate::bin_install::{self, UninstallOutcome};
use crate::config_file::SetupConfig;
use crate::path_env::{self, PathPatchOutcome};
use crate::release_build;
use crate::sanity;
use crate::smoke::{self, SmokeTestResult};
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::path::PathBuf;

/// What an install run did, for reporting and tests.
#[derive(Debug)]
pub struct InstallReport {
    /// Whether a release build was invoked (false when the artifact was reused).
    pub built: bool,
    /// Where the binary was installed.
    pub installed_to: PathBuf,
    /// What happened to PATH, or None when `--no-modify-path` was set.
    pub path_outcome: Option<PathPatchOutcome>,
    /// Smoke test result, or None when skipped.
    pub smoke: Option<SmokeTestResult>,
}

/// Installer instance
pub struct Installer {
    config: SetupConfig,
    force_build: bool,
    dry_run: bool,
}

impl Installer {
    /// Create a new installer instance
    pub fn new(config: SetupConfig, force_build: bool, dry_run: bool) -> Self {
        Self {
            config,
            force_build,
            dry_run,
        }
    }

    /// Run the full installation sequence.
    pub fn run(&self) -> Result<InstallReport> {
        self.config.validate()?;

        let check = sanity::verify_environment();
        if !check.is_ok() {
            for failure in check.describe_failures() {
                eprintln!("✗ {}", failure);
            }
            anyhow::bail!("environment verification failed");
        }
        if check.running_as_root {
            warn!("Running as root; the binary will land in root's home, not yours");
            println!("⚠ Running as root: installing into root's local bin directory");
        }
        let home = check
            .home_dir
            .context("could not resolve a home directory")?;

        let bin_dir = self
            .config
            .bin_dir
            .clone()
            .unwrap_or_else(|| home.join(".local").join("bin"));

        if self.dry_run {
            println!("Dry-run: no files will be changed");
        }

        // Step 1: build if missing
        let will_build = self.force_build
            || !release_build::artifact_present(&self.config.project_root, &self.config.binary_name);
        if will_build {
            println!("🔨 Building {} (release)...", self.config.binary_name);
        } else {
            println!("✓ Release binary already built");
        }
        let artifact = release_build::ensure_release_binary(
            &self.config.project_root,
            &self.config.binary_name,
            self.force_build,
            self.dry_run,
        )?;
        if will_build && !self.dry_run {
            println!("✓ Build complete");
        }

        // Step 2: copy into the bin directory
        let installed_to = bin_install::install_binary(
            &artifact,
            &bin_dir,
            &self.config.binary_name,
            self.dry_run,
        )?;
        println!(
            "✓ Installed {} to {}",
            self.config.binary_name,
            installed_to.display()
        );

        // Step 3: PATH patch
        let path_outcome = if self.config.modify_path {
            let outcome = path_env::ensure_path_export(
                &bin_dir,
                &home,
                self.config.shell,
                env::var_os("PATH").as_deref(),
                self.dry_run,
            )?;
            println!("✓ PATH: {}", outcome);
            if !outcome.path_is_covered() {
                println!(
                    "  Add {} to your PATH manually to run {} by name",
                    bin_dir.display(),
                    self.config.binary_name
                );
            }
            Some(outcome)
        } else {
            info!("PATH modification disabled");
            println!("✓ PATH: left unchanged (--no-modify-path)");
            None
        };

        // Step 4: smoke test
        let smoke = if self.config.smoke_test && !self.dry_run {
            let result = smoke::run_smoke_test(&installed_to)?;
            if !result.success {
                anyhow::bail!(
                    "installed binary failed its smoke test (exit code {})",
                    result.exit_code.unwrap_or(-1)
                );
            }
            println!("✓ Smoke test passed ({} --help)", self.config.binary_name);
            Some(result)
        } else {
            info!("Smoke test skipped");
            None
        };

        let built = will_build && !self.dry_run;
        Ok(InstallReport {
            built,
            installed_to,
            path_outcome,
            smoke,
        })
    }
}

/// Remove the installed binary.
///
/// The PATH export line, if one was ever written, stays in the
/// run-control file: deleting lines from a user's shell configuration is
/// riskier than leaving a harmless export behind.
pub fn uninstall(bin_dir: Option<PathBuf>, binary_name: &str, dry_run: bool) -> Result<()> {
    let home = dirs::home_dir().context("could not resolve a home directory")?;
    let bin_dir = bin_dir.unwrap_or_else(|| home.join(".local").join("bin"));

    let outcome = bin_install::remove_binary(&bin_dir, binary_name, dry_run)?;
    println!("✓ {}", outcome);

    if matches!(outcome, UninstallOutcome::Removed(_)) {
        println!("  Any PATH export added during install was left in place");
    }
    Ok(())
}

/// Print an environment report without changing anything.
pub fn run_doctor(config: &SetupConfig) -> Result<()> {
    let check = sanity::verify_environment();

    for binary in &check.missing_binaries {
        println!("✗ required tool missing: {}", binary);
    }
    if check.missing_binaries.is_empty() {
        println!("✓ required tools present (cargo)");
    }

    match &check.home_dir {
        Some(home) => {
            println!("✓ home directory: {}", home.display());

            let bin_dir = config
                .bin_dir
                .clone()
                .unwrap_or_else(|| home.join(".local").join("bin"));
            let on_path = path_env::dir_on_path(&bin_dir, env::var_os("PATH").as_deref());
            if on_path {
                println!("✓ {} is on PATH", bin_dir.display());
            } else {
                println!("✗ {} is not on PATH", bin_dir.display());
            }

            match config.shell.or_else(path_env::detect_shell) {
                Some(shell) => {
                    let rc = shell.rc_path(home);
                    if rc.is_file() {
                        println!("✓ shell: {} ({})", shell, rc.display());
                    } else {
                        println!("✗ shell: {} but {} does not exist", shell, rc.display());
                    }
                }
                None => println!("✗ shell not recognized (no bash/zsh markers)"),
            }

            let artifact_ready =
                release_build::artifact_present(&config.project_root, &config.binary_name);
            if artifact_ready {
                println!("✓ release binary already built");
            } else {
                println!("- release binary not built yet (install will build it)");
            }
        }
        None => println!("✗ could not resolve a home directory"),
    }

    if check.running_as_root {
        println!("⚠ running as root");
    }

    if check.is_ok() {
        Ok(())
    } else {
        anyhow::bail!("environment has problems, see report above")
    }
}
