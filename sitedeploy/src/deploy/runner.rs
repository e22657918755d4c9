//! External command execution

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::errors::DeployError;

/// A command to run: program, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Error text of a failed command: stderr, or stdout when stderr is blank
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Runs external commands to completion.
///
/// `Err` with `io::ErrorKind::NotFound` means the program could not be
/// located. A program that ran and failed is an `Ok` with a non-success
/// [`CommandOutput`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

/// Runs commands as child processes with captured output
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the pending future on timeout kills the child.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("timed out after {}s", limit.as_secs_f64()),
                    )
                })??,
            None => command.output().await?,
        };

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a command, classifying launch failures.
///
/// The returned output may carry a non-zero exit code.
pub async fn run_step(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
    install_hint: &str,
) -> Result<CommandOutput, DeployError> {
    debug!("Running: {} (in {})", invocation, invocation.cwd.display());

    runner.run(invocation).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound if !invocation.cwd.is_dir() => DeployError::SiteRootMissing {
            path: invocation.cwd.display().to_string(),
        },
        io::ErrorKind::NotFound => DeployError::ToolNotFound {
            tool: invocation.program.clone(),
            install_hint: install_hint.to_string(),
        },
        io::ErrorKind::TimedOut => DeployError::ToolTimedOut {
            command: invocation.to_string(),
            reason: e.to_string(),
        },
        _ => DeployError::IoError(e),
    })
}

/// Run a command that must exit successfully
pub async fn run_required_step(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
    install_hint: &str,
) -> Result<CommandOutput, DeployError> {
    let output = run_step(runner, invocation, install_hint).await?;
    if !output.success() {
        return Err(exit_error(invocation, &output));
    }
    Ok(output)
}

pub(crate) fn exit_error(invocation: &Invocation, output: &CommandOutput) -> DeployError {
    DeployError::ToolExitedNonZero {
        command: invocation.to_string(),
        code: output.code,
        output: output.error_text().to_string(),
    }
}
