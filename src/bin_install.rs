//! Binary installation step
//!
//! Copies the release artifact into the bin directory and marks it
//! executable. Functions take every path as a parameter so tests can
//! drive them against temporary directories.

use crate::error::{Result, SetupError};
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of an uninstall attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The binary was found and removed.
    Removed(PathBuf),
    /// Nothing was installed at the expected location.
    NotInstalled(PathBuf),
}

impl fmt::Display for UninstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed(path) => write!(f, "removed {}", path.display()),
            Self::NotInstalled(path) => {
                write!(f, "nothing installed at {}", path.display())
            }
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Two paths naming the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Install `source` into `bin_dir` as `binary_name`, overwriting any
/// previous copy. The destination directory is created if needed and the
/// installed file is marked 0o755.
pub fn install_binary(
    source: &Path,
    bin_dir: &Path,
    binary_name: &str,
    dry_run: bool,
) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(SetupError::install(format!(
            "source binary {} does not exist",
            source.display()
        )));
    }

    let dest = bin_dir.join(binary_name);

    if dry_run {
        info!(
            "dry-run: would copy {} to {}",
            source.display(),
            dest.display()
        );
        return Ok(dest);
    }

    fs::create_dir_all(bin_dir)?;

    // Copying a file onto itself truncates it; installing from an
    // already-installed location is a no-op instead
    if same_file(source, &dest) {
        info!("{} is already the installed copy", dest.display());
    } else {
        fs::copy(source, &dest)?;
        info!("Copied {} to {}", source.display(), dest.display());
    }

    set_mode(&dest, 0o755)?;
    Ok(dest)
}

/// Remove the installed binary if present.
pub fn remove_binary(bin_dir: &Path, binary_name: &str, dry_run: bool) -> Result<UninstallOutcome> {
    let installed = bin_dir.join(binary_name);

    if !installed.is_file() {
        return Ok(UninstallOutcome::NotInstalled(installed));
    }

    if dry_run {
        info!("dry-run: would remove {}", installed.display());
        return Ok(UninstallOutcome::Removed(installed));
    }

    fs::remove_file(&installed)?;
    info!("Removed {}", installed.display());
    Ok(UninstallOutcome::Removed(installed))
}
