use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Self-contained on purpose: build.rs includes this file to generate the
// man page and shell completions, so nothing here may reference other
// crate modules.

/// nicotine-setup - installer for the nicotine multibox helper
#[derive(Parser)]
#[command(name = "nicotine-setup")]
#[command(about = "Builds (if needed) and installs the nicotine binary into your local bin directory")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: show what would be done without making changes.
    ///
    /// In this mode, mutating operations (build, copy, run-control file
    /// append) are skipped and logged. Read-only inspections (artifact
    /// presence, PATH scan, shell detection) still execute so the preview
    /// is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build (if needed), copy the binary, and update PATH
    Install {
        /// Installation directory (default: ~/.local/bin)
        #[arg(short, long)]
        bin_dir: Option<PathBuf>,

        /// Project root containing Cargo.toml and target/ (default: .)
        #[arg(short, long)]
        project_root: Option<PathBuf>,

        /// Rebuild even if the release binary already exists
        #[arg(long)]
        force_build: bool,

        /// Do not touch any shell run-control file
        #[arg(long)]
        no_modify_path: bool,

        /// Shell whose run-control file receives the PATH export (bash or zsh)
        #[arg(short, long)]
        shell: Option<String>,

        /// Skip the post-install smoke test
        #[arg(long)]
        no_smoke_test: bool,

        /// Path to a saved setup configuration file (flags override its values)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Save the effective configuration to a file before installing
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
    /// Remove the installed binary
    Uninstall {
        /// Installation directory the binary was copied into (default: ~/.local/bin)
        #[arg(short, long)]
        bin_dir: Option<PathBuf>,
    },
    /// Report on the environment: required tools, PATH, detected shell
    Doctor,
    /// Validate a setup configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
