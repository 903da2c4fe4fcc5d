//! Setup configuration handling for saving and loading installer settings.
//!
//! A `SetupConfig` captures everything the installer needs to run
//! non-interactively. CLI flags overlay file values, so a saved file acts
//! as a baseline rather than a lock.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Shell;

/// Installer configuration that can be saved/loaded as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Name of the binary to build and install
    pub binary_name: String,

    /// Directory containing Cargo.toml and target/
    pub project_root: PathBuf,

    /// Installation directory; None means ~/.local/bin
    pub bin_dir: Option<PathBuf>,

    /// Whether to append a PATH export to the shell run-control file
    pub modify_path: bool,

    /// Shell override; None means detect from environment markers
    pub shell: Option<Shell>,

    /// Whether to run the post-install smoke test
    pub smoke_test: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            binary_name: "nicotine".to_string(),
            project_root: PathBuf::from("."),
            bin_dir: None,
            modify_path: true,
            shell: None,
            smoke_test: true,
        }
    }
}

impl SetupConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: SetupConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration file {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.binary_name.is_empty() {
            anyhow::bail!("binary_name must not be empty");
        }

        // A binary name with a separator would escape the bin directory on copy
        if self.binary_name.contains('/') || self.binary_name.contains('\\') {
            anyhow::bail!(
                "binary_name must be a bare file name, got {:?}",
                self.binary_name
            );
        }

        if self.project_root.as_os_str().is_empty() {
            anyhow::bail!("project_root must not be empty");
        }

        if let Some(ref dir) = self.bin_dir {
            if dir.as_os_str().is_empty() {
                anyhow::bail!("bin_dir, when set, must not be empty");
            }
        }

        Ok(())
    }
}
