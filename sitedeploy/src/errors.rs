//! Error types for sitedeploy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for a deployment attempt
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("missing required files: {}", .missing.join(", "))]
    PrerequisiteMissing { missing: Vec<String> },

    #[error("site root {path} is not an existing directory")]
    SiteRootMissing { path: String },

    #[error("unknown platform '{platform}'; supported platforms: {supported}")]
    UnknownPlatform { platform: String, supported: String },

    #[error("{tool} not found. Install with: {install_hint}")]
    ToolNotFound { tool: String, install_hint: String },

    #[error("`{command}` failed with exit code {}: {output}", display_code(.code))]
    ToolExitedNonZero {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("`{command}` did not finish: {reason}")]
    ToolTimedOut { command: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Machine-readable failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PrerequisiteMissing,
    UnknownPlatform,
    ToolNotFound,
    ToolExitedNonZero,
    ToolTimedOut,
    Io,
    Config,
}

impl DeployError {
    /// Classify the error
    pub fn kind(&self) -> FailureKind {
        match self {
            DeployError::PrerequisiteMissing { .. } => FailureKind::PrerequisiteMissing,
            DeployError::UnknownPlatform { .. } => FailureKind::UnknownPlatform,
            DeployError::ToolNotFound { .. } => FailureKind::ToolNotFound,
            DeployError::ToolExitedNonZero { .. } => FailureKind::ToolExitedNonZero,
            DeployError::ToolTimedOut { .. } => FailureKind::ToolTimedOut,
            DeployError::IoError(_) => FailureKind::Io,
            DeployError::SiteRootMissing { .. }
            | DeployError::JsonError(_)
            | DeployError::ConfigError(_) => FailureKind::Config,
        }
    }

    /// Human-readable diagnostic for the user.
    ///
    /// A failed tool reports its own captured output verbatim; everything
    /// else uses the error message.
    pub fn diagnostic(&self) -> String {
        match self {
            DeployError::ToolExitedNonZero { output, .. } => output.clone(),
            other => other.to_string(),
        }
    }
}
