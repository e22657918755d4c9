//! Deployment models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DeployError, FailureKind};

/// A supported publishing platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// GitHub Pages via `git push`
    Github,

    /// Vercel CLI
    Vercel,

    /// Netlify CLI
    Netlify,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Github, Platform::Vercel, Platform::Netlify];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Github => "github",
            Platform::Vercel => "vercel",
            Platform::Netlify => "netlify",
        }
    }

    /// Display name used in log messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Github => "GitHub Pages",
            Platform::Vercel => "Vercel",
            Platform::Netlify => "Netlify",
        }
    }

    /// Comma-separated list of supported identifiers
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(Platform::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(Platform::Github),
            "vercel" => Ok(Platform::Vercel),
            "netlify" => Ok(Platform::Netlify),
            _ => Err(DeployError::UnknownPlatform {
                platform: s.to_string(),
                supported: Platform::supported(),
            }),
        }
    }
}

/// One deployment request, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Raw platform identifier; resolved by the deployer
    pub platform: String,
}

impl DeploymentRequest {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }
}

/// Terminal result of one deployment attempt
#[derive(Debug)]
pub enum DeploymentOutcome {
    Succeeded {
        platform: Platform,
        /// Informational tool output, e.g. the published URL
        detail: Option<String>,
    },
    Failed(DeployError),
}

impl DeploymentOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DeploymentOutcome::Succeeded { .. })
    }

    /// Failure diagnostic; `None` on success
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            DeploymentOutcome::Succeeded { .. } => None,
            DeploymentOutcome::Failed(err) => Some(err.diagnostic()),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            DeploymentOutcome::Succeeded { detail, .. } => detail.as_deref(),
            DeploymentOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DeployError> {
        match self {
            DeploymentOutcome::Succeeded { .. } => None,
            DeploymentOutcome::Failed(err) => Some(err),
        }
    }

    /// Process exit code: 0 on success, 1 on any failure
    pub fn exit_code(&self) -> u8 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

/// Serializable summary of an outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub succeeded: bool,

    /// Platform identifier as requested
    pub platform: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub finished_at: DateTime<Utc>,
}

impl OutcomeReport {
    pub fn new(request: &DeploymentRequest, outcome: &DeploymentOutcome) -> Self {
        Self {
            succeeded: outcome.succeeded(),
            platform: request.platform.clone(),
            failure_kind: outcome.error().map(DeployError::kind),
            diagnostic: outcome.diagnostic(),
            detail: outcome.detail().map(String::from),
            finished_at: Utc::now(),
        }
    }
}
