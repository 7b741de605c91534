//! Charm error types
//!
//! Validation failures are deliberately separate from the rest: handlers
//! report them as a Blocked unit status instead of failing the hook.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CharmError {
    /// Operator-supplied configuration failed a check
    #[error("{0}")]
    Validation(String),

    /// A Juju hook tool could not be run or exited nonzero
    #[error("hook tool '{tool}' failed: {message}")]
    HookTool { tool: String, message: String },

    /// Required Juju environment variable is missing
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CharmError {
    pub fn validation(message: impl Into<String>) -> Self {
        CharmError::Validation(message.into())
    }
}

/// Result type alias for charm operations
pub type Result<T> = std::result::Result<T, CharmError>;
