//! Deployment orchestration

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tracing::{error, info};

use crate::deploy::backend::BackendFactory;
use crate::deploy::prereqs::check_prerequisites;
use crate::deploy::runner::{CommandRunner, ProcessRunner};
use crate::errors::DeployError;
use crate::models::deployment::{DeploymentOutcome, DeploymentRequest, Platform};
use crate::storage::settings::Settings;

/// Verifies the site, then publishes it with the requested platform's backend.
///
/// Requests are processed one at a time; running two deployers against the
/// same site root concurrently is not supported.
pub struct Deployer {
    settings: Settings,
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl Deployer {
    /// Create a deployer with an explicit command runner
    pub fn new(settings: Settings, root: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            settings,
            root: root.into(),
            runner,
        }
    }

    /// Create a deployer that spawns real processes
    pub fn with_process_runner(settings: Settings, root: impl Into<PathBuf>) -> Self {
        let runner = Arc::new(ProcessRunner::new(settings.command_timeout()));
        Self::new(settings, root, runner)
    }

    /// Run one deployment attempt. Never retries.
    pub async fn deploy(&self, request: &DeploymentRequest) -> DeploymentOutcome {
        match self.try_deploy(request).await {
            Ok((platform, detail)) => DeploymentOutcome::Succeeded { platform, detail },
            Err(e) => {
                error!("Deployment failed: {}", e);
                DeploymentOutcome::Failed(e)
            }
        }
    }

    async fn try_deploy(
        &self,
        request: &DeploymentRequest,
    ) -> Result<(Platform, Option<String>), DeployError> {
        self.ensure_site_root().await?;

        info!("Verifying prerequisites...");
        let report = check_prerequisites(&self.root, &self.settings.required_artifacts).await;
        if !report.all_present() {
            return Err(DeployError::PrerequisiteMissing {
                missing: report.missing(),
            });
        }
        info!("All {} required files present", report.len());

        let platform: Platform = request.platform.parse()?;
        let backend = BackendFactory::create(platform, &self.settings, &self.root, self.runner.clone());
        let detail = backend.publish().await?;

        Ok((backend.platform(), detail))
    }

    /// Commands run inside the site root; it must be an existing directory
    async fn ensure_site_root(&self) -> Result<(), DeployError> {
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(DeployError::SiteRootMissing {
                path: self.root.display().to_string(),
            }),
        }
    }
}
