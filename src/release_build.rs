//! Release build step
//!
//! Produces the release binary if it is not already there. The build is
//! skipped when `target/release/<name>` exists, so repeated installs are
//! cheap; `force` rebuilds unconditionally.

use crate::command_runner::run_streaming;
use anyhow::Result;
use log::info;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable overriding the cargo executable.
///
/// Lets wrappers and tests substitute the build tool without touching
/// PATH.
pub const CARGO_ENV_OVERRIDE: &str = "NICOTINE_SETUP_CARGO";

/// Expected location of the release artifact for a project
pub fn release_artifact(project_root: &Path, binary_name: &str) -> PathBuf {
    project_root.join("target").join("release").join(binary_name)
}

/// Resolve the cargo executable, honoring the override variable
fn cargo_executable() -> PathBuf {
    env::var_os(CARGO_ENV_OVERRIDE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cargo"))
}

/// Ensure the release binary exists, building it when absent.
///
/// Returns the artifact path. In dry-run mode the build is skipped and
/// the (possibly absent) artifact path is returned so later steps can
/// keep previewing.
pub fn ensure_release_binary(
    project_root: &Path,
    binary_name: &str,
    force: bool,
    dry_run: bool,
) -> Result<PathBuf> {
    let artifact = release_artifact(project_root, binary_name);

    if artifact.is_file() && !force {
        info!("Release binary already present at {}", artifact.display());
        return Ok(artifact);
    }

    if dry_run {
        info!(
            "dry-run: would run `cargo build --release` in {}",
            project_root.display()
        );
        return Ok(artifact);
    }

    let cargo = cargo_executable();
    info!(
        "Building release binary with {:?} in {}",
        cargo,
        project_root.display()
    );

    let mut cmd = Command::new(&cargo);
    cmd.arg("build").arg("--release").current_dir(project_root);

    let output = run_streaming(&mut cmd, "cargo build --release")?;
    output.ensure_success("cargo build --release")?;

    if !artifact.is_file() {
        anyhow::bail!(
            "build succeeded but {} was not produced; does the project define a `{}` binary?",
            artifact.display(),
            binary_name
        );
    }

    Ok(artifact)
}

/// Probe variant for reporting: does the artifact already exist?
pub fn artifact_present(project_root: &Path, binary_name: &str) -> bool {
    release_artifact(project_root, binary_name).is_file()
}
