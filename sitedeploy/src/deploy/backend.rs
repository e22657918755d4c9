//! Publishing backends

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::deploy::git::GitPagesBackend;
use crate::deploy::hosted::HostedCliBackend;
use crate::deploy::runner::CommandRunner;
use crate::errors::DeployError;
use crate::models::deployment::Platform;
use crate::storage::settings::Settings;

/// One platform's publishing protocol
#[async_trait]
pub trait Backend: Send + Sync {
    /// The platform this backend publishes to
    fn platform(&self) -> Platform;

    /// Run every publishing step in order, stopping at the first failure.
    ///
    /// On success returns informational tool output, if any.
    async fn publish(&self) -> Result<Option<String>, DeployError>;
}

/// Factory for creating backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create the backend for `platform`, publishing the site at `root`
    pub fn create(
        platform: Platform,
        settings: &Settings,
        root: &Path,
        runner: Arc<dyn CommandRunner>,
    ) -> Box<dyn Backend> {
        match platform {
            Platform::Github => Box::new(GitPagesBackend::new(
                settings.github.clone(),
                root,
                runner,
            )),
            Platform::Vercel => Box::new(HostedCliBackend::new(
                Platform::Vercel,
                settings.vercel.clone(),
                root,
                runner,
            )),
            Platform::Netlify => Box::new(HostedCliBackend::new(
                Platform::Netlify,
                settings.netlify.clone(),
                root,
                runner,
            )),
        }
    }
}
