//! Error handling for nicotine-setup
//!
//! Centralized error types using thiserror. All library errors should use
//! these types for consistency; orchestration layers wrap them in anyhow
//! with added context.

use thiserror::Error;

/// Main error type for nicotine-setup
#[derive(Error, Debug)]
pub enum SetupError {
    /// IO errors (file operations, process spawning)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Release build errors (cargo invocation, missing artifact)
    #[error("Build error: {0}")]
    Build(String),

    /// Binary installation errors (copy, permissions)
    #[error("Install error: {0}")]
    Install(String),

    /// PATH / run-control file update errors
    #[error("PATH update error: {0}")]
    PathUpdate(String),

    /// Validation errors (user input, config values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (loading, parsing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for nicotine-setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

// Convenient error constructors
impl SetupError {
    /// Create a build error
    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    /// Create an install error
    pub fn install(msg: impl Into<String>) -> Self {
        Self::Install(msg.into())
    }

    /// Create a PATH update error
    pub fn path_update(msg: impl Into<String>) -> Self {
        Self::PathUpdate(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
