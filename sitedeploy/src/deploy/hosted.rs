//! Hosting CLI deployment (Vercel, Netlify)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::deploy::backend::Backend;
use crate::deploy::runner::{run_required_step, CommandRunner, Invocation};
use crate::errors::DeployError;
use crate::models::deployment::Platform;
use crate::storage::settings::HostedCliSettings;

/// Checks a hosting CLI is installed, then runs its production deploy in the site root
pub struct HostedCliBackend {
    platform: Platform,
    settings: HostedCliSettings,
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl HostedCliBackend {
    pub fn new(
        platform: Platform,
        settings: HostedCliSettings,
        root: &Path,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            platform,
            settings,
            root: root.to_path_buf(),
            runner,
        }
    }
}

#[async_trait]
impl Backend for HostedCliBackend {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self) -> Result<Option<String>, DeployError> {
        let name = self.platform.display_name();
        info!("Deploying to {}...", name);

        let version_check = Invocation::new(&self.settings.binary, &self.settings.version_args, &self.root);
        let version = run_required_step(self.runner.as_ref(), &version_check, &self.settings.install_hint).await?;
        debug!("{} CLI version: {}", name, version.stdout.trim());

        let deploy = Invocation::new(&self.settings.binary, &self.settings.deploy_args, &self.root);
        let output = run_required_step(self.runner.as_ref(), &deploy, &self.settings.install_hint).await?;

        info!("Deployment to {} successful", name);
        let detail = output.stdout.trim();
        if detail.is_empty() {
            return Ok(None);
        }
        info!("Result: {}", detail);
        Ok(Some(detail.to_string()))
    }
}
