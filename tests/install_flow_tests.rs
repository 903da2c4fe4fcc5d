//! Tests for the installation flow
//!
//! These tests verify the step functions end-to-end against temporary
//! directories:
//! - build-if-missing behavior (including the skip when already built)
//! - binary copy, overwrite, and permissions
//! - smoke test honesty
//! - uninstall

#![cfg(unix)]

use nicotine_setup::bin_install::{install_binary, remove_binary, UninstallOutcome};
use nicotine_setup::release_build::{
    ensure_release_binary, release_artifact, CARGO_ENV_OVERRIDE,
};
use nicotine_setup::smoke::run_smoke_test;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_executable(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// A fake cargo that records its invocation and produces the artifact,
/// so build behavior is observable without a real toolchain.
fn write_stub_cargo(dir: &Path, invocation_log: &Path) -> PathBuf {
    let stub = dir.join("stub-cargo");
    write_executable(
        &stub,
        &format!(
            "#!/bin/sh\n\
             echo \"$@\" >> {log}\n\
             mkdir -p target/release\n\
             printf '#!/bin/sh\\nexit 0\\n' > target/release/nicotine\n\
             chmod 755 target/release/nicotine\n",
            log = invocation_log.display()
        ),
    );
    stub
}

// =============================================================================
// Build Step Tests
// =============================================================================

#[test]
fn test_build_runs_when_artifact_missing_and_skips_when_present() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    fs::create_dir_all(&project).unwrap();
    let log = root.path().join("invocations.log");
    let stub = write_stub_cargo(root.path(), &log);

    // set_var is process-global; this test owns CARGO_ENV_OVERRIDE
    unsafe { std::env::set_var(CARGO_ENV_OVERRIDE, &stub) };

    // First run: artifact absent, the build tool must be invoked
    let artifact = ensure_release_binary(&project, "nicotine", false, false).unwrap();
    assert_eq!(artifact, release_artifact(&project, "nicotine"));
    assert!(artifact.is_file(), "stub build should produce the artifact");
    let invocations = fs::read_to_string(&log).unwrap();
    assert_eq!(invocations.lines().count(), 1);
    assert!(invocations.contains("build --release"));

    // Second run: artifact present, no further invocation
    let artifact = ensure_release_binary(&project, "nicotine", false, false).unwrap();
    assert!(artifact.is_file());
    let invocations = fs::read_to_string(&log).unwrap();
    assert_eq!(
        invocations.lines().count(),
        1,
        "build must be skipped when the artifact exists"
    );

    // Force: rebuilds even though the artifact exists
    let _ = ensure_release_binary(&project, "nicotine", true, false).unwrap();
    let invocations = fs::read_to_string(&log).unwrap();
    assert_eq!(invocations.lines().count(), 2);

    unsafe { std::env::remove_var(CARGO_ENV_OVERRIDE) };
}

// =============================================================================
// Copy Step Tests
// =============================================================================

#[test]
fn test_install_places_executable_binary() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\nexit 0\n");
    let bin_dir = root.path().join("home/.local/bin");

    let installed = install_binary(&source, &bin_dir, "nicotine", false).unwrap();

    assert!(installed.is_file());
    let mode = fs::metadata(&installed).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o755);
}

#[test]
fn test_install_twice_is_idempotent() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\nexit 0\n");
    let bin_dir = root.path().join("home/.local/bin");

    let first = install_binary(&source, &bin_dir, "nicotine", false).unwrap();
    let second = install_binary(&source, &bin_dir, "nicotine", false).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn test_install_overwrites_stale_copy_unconditionally() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\necho v2\n");
    let bin_dir = root.path().join("home/.local/bin");
    fs::create_dir_all(&bin_dir).unwrap();
    fs::write(bin_dir.join("nicotine"), "#!/bin/sh\necho v1\n").unwrap();

    let installed = install_binary(&source, &bin_dir, "nicotine", false).unwrap();
    let contents = fs::read_to_string(&installed).unwrap();
    assert!(contents.contains("v2"));
}

// =============================================================================
// Smoke Test Step Tests
// =============================================================================

#[test]
fn test_full_flow_with_failing_binary_reports_failure() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\nexit 7\n");
    let bin_dir = root.path().join("home/.local/bin");

    let installed = install_binary(&source, &bin_dir, "nicotine", false).unwrap();
    let result = run_smoke_test(&installed).unwrap();

    assert!(!result.success, "a failing --help must not be reported as success");
    assert_eq!(result.exit_code, Some(7));
}

#[test]
fn test_full_flow_with_working_binary_passes_smoke_test() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\necho 'nicotine 1.0'\nexit 0\n");
    let bin_dir = root.path().join("home/.local/bin");

    let installed = install_binary(&source, &bin_dir, "nicotine", false).unwrap();
    let result = run_smoke_test(&installed).unwrap();

    assert!(result.success);
    assert_eq!(result.exit_code, Some(0));
}

// =============================================================================
// Uninstall Tests
// =============================================================================

#[test]
fn test_uninstall_removes_installed_binary() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\nexit 0\n");
    let bin_dir = root.path().join("home/.local/bin");

    let installed = install_binary(&source, &bin_dir, "nicotine", false).unwrap();
    assert!(installed.is_file());

    let outcome = remove_binary(&bin_dir, "nicotine", false).unwrap();
    assert!(matches!(outcome, UninstallOutcome::Removed(_)));
    assert!(!installed.exists());

    // A second uninstall reports there is nothing to do
    let outcome = remove_binary(&bin_dir, "nicotine", false).unwrap();
    assert!(matches!(outcome, UninstallOutcome::NotInstalled(_)));
}

// =============================================================================
// Dry-Run Tests
// =============================================================================

#[test]
fn test_dry_run_flow_touches_nothing() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    fs::create_dir_all(&project).unwrap();
    let source = root.path().join("nicotine");
    write_executable(&source, "#!/bin/sh\nexit 0\n");
    let bin_dir = root.path().join("home/.local/bin");

    // Build preview: no target/ directory appears
    let artifact = ensure_release_binary(&project, "nicotine", false, true).unwrap();
    assert!(!artifact.exists());
    assert!(!project.join("target").exists());

    // Copy preview: no bin directory appears
    let dest = install_binary(&source, &bin_dir, "nicotine", true).unwrap();
    assert!(!dest.exists());
    assert!(!bin_dir.exists());
}
