//! Type-safe configuration types for nicotine-setup
//!
//! Replaces stringly-typed values with proper Rust enums that provide
//! compile-time validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};

/// Interactive shell whose run-control file receives the PATH export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    #[strum(serialize = "bash")]
    Bash,
    #[strum(serialize = "zsh")]
    Zsh,
}

impl Shell {
    /// Environment variable set by this shell in interactive sessions
    pub fn env_marker(&self) -> &'static str {
        match self {
            Self::Bash => "BASH_VERSION",
            Self::Zsh => "ZSH_VERSION",
        }
    }

    /// Run-control file name relative to the home directory
    pub fn rc_file_name(&self) -> &'static str {
        match self {
            Self::Bash => ".bashrc",
            Self::Zsh => ".zshrc",
        }
    }

    /// Absolute path of the run-control file for a given home directory
    pub fn rc_path(&self, home: &Path) -> PathBuf {
        home.join(self.rc_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_shell_parse_and_display() {
        assert_eq!(Shell::from_str("bash").unwrap(), Shell::Bash);
        assert_eq!(Shell::from_str("zsh").unwrap(), Shell::Zsh);
        assert_eq!(Shell::Bash.to_string(), "bash");
        assert_eq!(Shell::Zsh.to_string(), "zsh");
    }

    #[test]
    fn test_shell_rejects_unknown() {
        assert!(Shell::from_str("fish").is_err());
        assert!(Shell::from_str("").is_err());
    }

    #[test]
    fn test_shell_rc_path() {
        let home = Path::new("/home/pilot");
        assert_eq!(
            Shell::Bash.rc_path(home),
            PathBuf::from("/home/pilot/.bashrc")
        );
        assert_eq!(Shell::Zsh.rc_path(home), PathBuf::from("/home/pilot/.zshrc"));
    }

    #[test]
    fn test_shell_env_markers() {
        assert_eq!(Shell::Bash.env_marker(), "BASH_VERSION");
        assert_eq!(Shell::Zsh.env_marker(), "ZSH_VERSION");
    }
}
