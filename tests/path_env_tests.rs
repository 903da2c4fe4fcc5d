//! Tests for PATH patching and run-control file handling
//!
//! Acceptance properties:
//! - running the patch twice leaves exactly one export block
//! - a bin directory already on PATH means no run-control file is touched
//! - a missing run-control file is reported, not created

use nicotine_setup::path_env::{ensure_path_export, export_line, PathPatchOutcome};
use nicotine_setup::types::Shell;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fake_home() -> (TempDir, std::path::PathBuf) {
    let home = TempDir::new().unwrap();
    let bin_dir = home.path().join(".local/bin");
    (home, bin_dir)
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_append_once_then_detect_existing() {
    let (home, bin_dir) = fake_home();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, "# my shell setup\nalias ll='ls -l'\n").unwrap();

    let first = ensure_path_export(&bin_dir, home.path(), Some(Shell::Bash), None, false).unwrap();
    assert_eq!(
        first,
        PathPatchOutcome::Appended {
            rc_file: rc.clone()
        }
    );

    let second = ensure_path_export(&bin_dir, home.path(), Some(Shell::Bash), None, false).unwrap();
    assert_eq!(
        second,
        PathPatchOutcome::ExportPresent {
            rc_file: rc.clone()
        }
    );

    let contents = fs::read_to_string(&rc).unwrap();
    let line = export_line(&bin_dir, home.path());
    assert_eq!(
        count_occurrences(&contents, &line),
        1,
        "two runs must leave exactly one export block"
    );
    // Pre-existing content is untouched
    assert!(contents.starts_with("# my shell setup\n"));
}

#[test]
fn test_already_on_path_leaves_rc_untouched() {
    let (home, bin_dir) = fake_home();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, "# my shell setup\n").unwrap();

    let path_var: OsString =
        std::env::join_paths([Path::new("/usr/bin"), bin_dir.as_path()]).unwrap();

    let outcome = ensure_path_export(
        &bin_dir,
        home.path(),
        Some(Shell::Bash),
        Some(path_var.as_os_str()),
        false,
    )
    .unwrap();

    assert_eq!(outcome, PathPatchOutcome::AlreadyOnPath);
    assert_eq!(fs::read_to_string(&rc).unwrap(), "# my shell setup\n");
}

#[test]
fn test_missing_rc_file_is_reported_not_created() {
    let (home, bin_dir) = fake_home();
    let rc = home.path().join(".bashrc");

    let outcome =
        ensure_path_export(&bin_dir, home.path(), Some(Shell::Bash), None, false).unwrap();

    assert_eq!(outcome, PathPatchOutcome::NoRcFile { rc_file: rc.clone() });
    assert!(!rc.exists(), "the patch step must not create run-control files");
}

#[test]
fn test_shell_override_selects_zshrc() {
    let (home, bin_dir) = fake_home();
    fs::write(home.path().join(".bashrc"), "# bash\n").unwrap();
    fs::write(home.path().join(".zshrc"), "# zsh\n").unwrap();

    let outcome =
        ensure_path_export(&bin_dir, home.path(), Some(Shell::Zsh), None, false).unwrap();

    assert_eq!(
        outcome,
        PathPatchOutcome::Appended {
            rc_file: home.path().join(".zshrc")
        }
    );
    // Only the selected shell's file was modified
    assert_eq!(
        fs::read_to_string(home.path().join(".bashrc")).unwrap(),
        "# bash\n"
    );
    let zshrc = fs::read_to_string(home.path().join(".zshrc")).unwrap();
    assert!(zshrc.contains(&export_line(&bin_dir, home.path())));
}

#[test]
fn test_dry_run_previews_without_writing() {
    let (home, bin_dir) = fake_home();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, "# my shell setup\n").unwrap();

    let outcome =
        ensure_path_export(&bin_dir, home.path(), Some(Shell::Bash), None, true).unwrap();

    assert_eq!(outcome, PathPatchOutcome::SkippedDryRun { rc_file: rc.clone() });
    assert_eq!(fs::read_to_string(&rc).unwrap(), "# my shell setup\n");
}

#[test]
fn test_append_handles_file_without_trailing_newline() {
    let (home, bin_dir) = fake_home();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, "alias ll='ls -l'").unwrap();

    ensure_path_export(&bin_dir, home.path(), Some(Shell::Bash), None, false).unwrap();

    let contents = fs::read_to_string(&rc).unwrap();
    // The alias line and the marker must not have merged
    assert!(contents.contains("alias ll='ls -l'\n"));
    assert!(contents.contains(&export_line(&bin_dir, home.path())));
}

#[test]
fn test_export_line_uses_home_relative_form() {
    let (home, bin_dir) = fake_home();
    let line = export_line(&bin_dir, home.path());
    assert_eq!(line, "export PATH=\"$HOME/.local/bin:$PATH\"");
}
