//! Settings file management

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Deployment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Paths, relative to the site root, that must exist before deploying
    #[serde(default = "default_required_artifacts")]
    pub required_artifacts: Vec<String>,

    /// Per-command timeout in seconds; no timeout when absent
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,

    /// GitHub Pages configuration
    #[serde(default)]
    pub github: GitPagesSettings,

    /// Vercel CLI configuration
    #[serde(default = "HostedCliSettings::vercel")]
    pub vercel: HostedCliSettings,

    /// Netlify CLI configuration
    #[serde(default = "HostedCliSettings::netlify")]
    pub netlify: HostedCliSettings,
}

fn default_required_artifacts() -> Vec<String> {
    ["index.html", "styles.css", "script.js", "logo.png"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            required_artifacts: default_required_artifacts(),
            command_timeout_secs: None,
            github: GitPagesSettings::default(),
            vercel: HostedCliSettings::vercel(),
            netlify: HostedCliSettings::netlify(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DeployError> {
        let file = File::new(path.as_ref());
        if !file.exists().await {
            return Err(DeployError::ConfigError(format!(
                "settings file not found: {}",
                path.as_ref().display()
            )));
        }
        file.read_json().await
    }

    /// Per-command timeout, if configured. Zero disables it.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// GitHub Pages (git push) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitPagesSettings {
    /// Git executable
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Remote to push to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Local branch that holds the site
    #[serde(default = "default_source_branch")]
    pub source_branch: String,

    /// Remote branch served by Pages; overwritten on every deploy
    #[serde(default = "default_publish_branch")]
    pub publish_branch: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_source_branch() -> String {
    "main".to_string()
}

fn default_publish_branch() -> String {
    "gh-pages".to_string()
}

fn default_commit_message() -> String {
    "Deploy website".to_string()
}

impl Default for GitPagesSettings {
    fn default() -> Self {
        Self {
            git_binary: default_git_binary(),
            remote: default_remote(),
            source_branch: default_source_branch(),
            publish_branch: default_publish_branch(),
            commit_message: default_commit_message(),
        }
    }
}

/// Hosting CLI settings (Vercel, Netlify)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedCliSettings {
    /// CLI executable
    pub binary: String,

    /// Shown when the executable cannot be found
    pub install_hint: String,

    /// Arguments for the availability check
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,

    /// Arguments for the production deploy
    pub deploy_args: Vec<String>,
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

impl HostedCliSettings {
    pub fn vercel() -> Self {
        Self {
            binary: "vercel".to_string(),
            install_hint: "npm i -g vercel".to_string(),
            version_args: default_version_args(),
            deploy_args: vec!["--prod".to_string()],
        }
    }

    pub fn netlify() -> Self {
        Self {
            binary: "netlify".to_string(),
            install_hint: "npm i -g netlify-cli".to_string(),
            version_args: default_version_args(),
            deploy_args: vec![
                "deploy".to_string(),
                "--prod".to_string(),
                "--dir=.".to_string(),
            ],
        }
    }
}
