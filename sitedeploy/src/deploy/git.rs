//! GitHub Pages deployment via git

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::deploy::backend::Backend;
use crate::deploy::runner::{
    exit_error, run_required_step, run_step, CommandOutput, CommandRunner, Invocation,
};
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::models::deployment::Platform;
use crate::storage::settings::GitPagesSettings;

const GIT_INSTALL_HINT: &str =
    "your package manager (e.g. `apt install git`) or https://git-scm.com/downloads";

/// Markers git prints when a commit has nothing to record
const NOTHING_TO_COMMIT: [&str; 2] = ["nothing to commit", "no changes added to commit"];

/// Commits the site and force-pushes it to the publishing branch
pub struct GitPagesBackend {
    settings: GitPagesSettings,
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl GitPagesBackend {
    pub fn new(settings: GitPagesSettings, root: &Path, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            settings,
            root: root.to_path_buf(),
            runner,
        }
    }

    fn git<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.settings.git_binary, args, &self.root)
    }

    async fn ensure_repository(&self) -> Result<(), DeployError> {
        if File::new(self.root.join(".git")).exists().await {
            return Ok(());
        }

        info!("Initializing git repository...");
        let init = self.git(["init", "--initial-branch", self.settings.source_branch.as_str()]);
        run_required_step(self.runner.as_ref(), &init, GIT_INSTALL_HINT).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<(), DeployError> {
        let commit = self.git(["commit", "-m", self.settings.commit_message.as_str()]);
        let output = run_step(self.runner.as_ref(), &commit, GIT_INSTALL_HINT).await?;

        if output.success() {
            return Ok(());
        }
        if is_nothing_to_commit(&output) {
            warn!("Nothing to commit, publishing the current tree");
            return Ok(());
        }
        Err(exit_error(&commit, &output))
    }
}

fn is_nothing_to_commit(output: &CommandOutput) -> bool {
    NOTHING_TO_COMMIT
        .iter()
        .any(|marker| output.stdout.contains(marker) || output.stderr.contains(marker))
}

#[async_trait]
impl Backend for GitPagesBackend {
    fn platform(&self) -> Platform {
        Platform::Github
    }

    async fn publish(&self) -> Result<Option<String>, DeployError> {
        info!("Deploying to GitHub Pages...");

        self.ensure_repository().await?;

        let add = self.git(["add", "."]);
        run_required_step(self.runner.as_ref(), &add, GIT_INSTALL_HINT).await?;

        self.commit().await?;

        info!(
            "Pushing {} to {}/{}...",
            self.settings.source_branch, self.settings.remote, self.settings.publish_branch
        );
        let refspec = format!("{}:{}", self.settings.source_branch, self.settings.publish_branch);
        let push = self.git([
            "push",
            self.settings.remote.as_str(),
            refspec.as_str(),
            "--force",
        ]);
        run_required_step(self.runner.as_ref(), &push, GIT_INSTALL_HINT).await?;

        info!("Deployment to GitHub Pages successful");
        Ok(None)
    }
}
