//! Command line and application options

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::logs::{LogLevel, LogOptions};
use crate::models::deployment::DeploymentRequest;
use crate::storage::settings::Settings;

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Deploy the static website to GitHub Pages, Vercel or Netlify
#[derive(Debug, Clone, Parser)]
#[command(name = "sitedeploy", version, long_version = LONG_VERSION)]
pub struct CliArgs {
    /// Deployment platform: github, vercel or netlify
    #[arg(long, env = "DEPLOY_PLATFORM", default_value = "github")]
    pub platform: String,

    /// Site root; every command runs here
    #[arg(long, env = "DEPLOY_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// JSON settings file
    #[arg(long, env = "DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Kill any external command running longer than this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Keep logs off stdout; the final summary is still printed
    #[arg(long, short)]
    pub quiet: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Write a JSON outcome report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Resolved application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub request: DeploymentRequest,

    pub root: PathBuf,

    /// Settings file merged with command line overrides
    pub settings: Settings,

    pub report_path: Option<PathBuf>,

    pub log: LogOptions,
}

impl AppOptions {
    /// Load the settings file (if any) and apply command line overrides
    pub async fn resolve(args: CliArgs) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Settings::load(path)
                .await
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(secs) = args.timeout_secs {
            settings.command_timeout_secs = Some(secs);
        }
        if let Some(level) = args.log_level {
            settings.log_level = level;
        }

        let log = LogOptions {
            log_level: settings.log_level,
            stdout: !args.quiet,
            json_format: args.json_logs,
            log_dir: args.log_dir,
        };

        Ok(Self {
            request: DeploymentRequest::new(args.platform),
            root: args.root,
            settings,
            report_path: args.report,
            log,
        })
    }
}
