//! nicotine-setup library
//!
//! Core functionality for the nicotine installer: release build
//! management, binary installation, PATH patching, and the post-install
//! smoke test.

pub mod bin_install;
pub mod cli;
pub mod command_runner;
pub mod config_file;
pub mod error;
pub mod installer;
pub mod path_env;
pub mod process_guard;
pub mod release_build;
pub mod sanity;
pub mod smoke;
pub mod types;

// Re-export main types for convenience
pub use bin_install::{install_binary, remove_binary, UninstallOutcome};
pub use command_runner::{run_captured, run_streaming, CommandOutput};
pub use config_file::SetupConfig;
pub use error::{Result, SetupError};
pub use installer::{InstallReport, Installer};
pub use path_env::{detect_shell, dir_on_path, ensure_path_export, export_line, PathPatchOutcome};
pub use process_guard::{ChildRegistry, CommandProcessGroup};
pub use release_build::{ensure_release_binary, release_artifact, CARGO_ENV_OVERRIDE};
pub use sanity::{verify_environment, SanityCheckResult};
pub use smoke::{run_smoke_test, SmokeTestResult};
pub use types::Shell;
