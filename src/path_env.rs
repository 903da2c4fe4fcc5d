//! PATH inspection and run-control file patching
//!
//! Implements the "make the binary reachable" half of the install:
//! decide whether the bin directory is already on PATH, figure out which
//! interactive shell the user runs, and append an export line to its
//! run-control file exactly once.
//!
//! The append guard is a substring search for the export line, not a
//! shell parser. That keeps the check symmetric with what gets written:
//! if the line is present in any form we wrote it before.

use crate::error::Result;
use crate::types::Shell;
use log::{debug, info};
use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Comment written above the export line so readers know where it came from
const MARKER_COMMENT: &str = "# Added by nicotine-setup";

/// Outcome of the PATH patch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPatchOutcome {
    /// The bin directory is already a PATH component; nothing touched.
    AlreadyOnPath,
    /// The export line was appended to the run-control file.
    Appended { rc_file: PathBuf },
    /// The run-control file already contains the export line.
    ExportPresent { rc_file: PathBuf },
    /// The shell was identified but its run-control file does not exist.
    NoRcFile { rc_file: PathBuf },
    /// No supported shell could be identified from the environment.
    UnknownShell,
    /// Dry-run: the export line would have been appended.
    SkippedDryRun { rc_file: PathBuf },
}

impl PathPatchOutcome {
    /// Whether the binary will be reachable from a fresh interactive shell
    pub fn path_is_covered(&self) -> bool {
        matches!(
            self,
            Self::AlreadyOnPath | Self::Appended { .. } | Self::ExportPresent { .. }
        )
    }
}

impl fmt::Display for PathPatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyOnPath => write!(f, "already on PATH"),
            Self::Appended { rc_file } => {
                write!(f, "added PATH export to {}", rc_file.display())
            }
            Self::ExportPresent { rc_file } => {
                write!(f, "PATH export already in {}", rc_file.display())
            }
            Self::NoRcFile { rc_file } => {
                write!(f, "{} does not exist, PATH not updated", rc_file.display())
            }
            Self::UnknownShell => write!(f, "shell not recognized, PATH not updated"),
            Self::SkippedDryRun { rc_file } => {
                write!(f, "dry-run: would add PATH export to {}", rc_file.display())
            }
        }
    }
}

/// Check whether `dir` is a component of a PATH-style variable.
///
/// Components are compared as paths, so `/home/x/.local/bin` and
/// `/home/x/.local/bin/` match while `/home/x/.local/binoculars` does not.
pub fn dir_on_path(dir: &Path, path_var: Option<&OsStr>) -> bool {
    let Some(path_var) = path_var else {
        return false;
    };
    // Comparing components normalizes trailing separators in PATH entries
    env::split_paths(path_var).any(|component| component.components().eq(dir.components()))
}

/// Detect the user's interactive shell.
///
/// Shell version markers win (they identify the shell actually running
/// this process); the `SHELL` variable's basename is the fallback for
/// environments where the installer runs from a different parent.
pub fn detect_shell() -> Option<Shell> {
    for shell in Shell::iter() {
        if env::var_os(shell.env_marker()).is_some_and(|v| !v.is_empty()) {
            debug!("Detected shell {} via {}", shell, shell.env_marker());
            return Some(shell);
        }
    }

    let shell_var = env::var_os("SHELL")?;
    let basename = Path::new(&shell_var).file_name()?.to_str()?;
    let parsed = basename.parse::<Shell>().ok();
    if let Some(shell) = parsed {
        debug!("Detected shell {} via SHELL={}", shell, basename);
    }
    parsed
}

/// Build the export line for a bin directory.
///
/// Directories under the home directory are written relative to `$HOME`
/// so the line survives a home move; anything else is written verbatim.
pub fn export_line(bin_dir: &Path, home: &Path) -> String {
    match bin_dir.strip_prefix(home) {
        Ok(rest) => format!("export PATH=\"$HOME/{}:$PATH\"", rest.display()),
        Err(_) => format!("export PATH=\"{}:$PATH\"", bin_dir.display()),
    }
}

/// Ensure the bin directory will be on PATH in future interactive shells.
///
/// Appends `MARKER_COMMENT` plus the export line to the shell's
/// run-control file unless the directory is already on PATH or the line
/// is already present. Returns what happened; only the `Appended` outcome
/// means the file was modified.
pub fn ensure_path_export(
    bin_dir: &Path,
    home: &Path,
    shell_override: Option<Shell>,
    path_var: Option<&OsStr>,
    dry_run: bool,
) -> Result<PathPatchOutcome> {
    if dir_on_path(bin_dir, path_var) {
        info!("{} already on PATH, leaving run-control files alone", bin_dir.display());
        return Ok(PathPatchOutcome::AlreadyOnPath);
    }

    let Some(shell) = shell_override.or_else(detect_shell) else {
        return Ok(PathPatchOutcome::UnknownShell);
    };

    let rc_file = shell.rc_path(home);
    if !rc_file.is_file() {
        return Ok(PathPatchOutcome::NoRcFile { rc_file });
    }

    let line = export_line(bin_dir, home);
    let contents = fs::read_to_string(&rc_file)?;
    if contents.contains(line.as_str()) {
        return Ok(PathPatchOutcome::ExportPresent { rc_file });
    }

    if dry_run {
        info!("dry-run: would append {:?} to {}", line, rc_file.display());
        return Ok(PathPatchOutcome::SkippedDryRun { rc_file });
    }

    let mut file = OpenOptions::new().append(true).open(&rc_file)?;
    if !contents.is_empty() && !contents.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{}", MARKER_COMMENT)?;
    writeln!(file, "{}", line)?;

    info!("Appended PATH export to {}", rc_file.display());
    Ok(PathPatchOutcome::Appended { rc_file })
}
