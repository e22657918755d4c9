//! Single deployment run

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::deploy::deployer::Deployer;
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::models::deployment::{DeploymentOutcome, DeploymentRequest, OutcomeReport};

/// Run one deployment and map its outcome to a process exit code
pub async fn run(options: AppOptions) -> ExitCode {
    info!("{}", "=".repeat(50));
    info!("Website Deployment: {}", options.request.platform);
    info!("{}", "=".repeat(50));

    let deployer = Deployer::with_process_runner(options.settings, options.root);
    let code = deploy_and_report(&deployer, &options.request, options.report_path.as_deref()).await;

    ExitCode::from(code)
}

/// Deploy, print the summary and write the optional report.
///
/// Returns 0 only when the deployment succeeded and the report, if
/// requested, was written.
pub async fn deploy_and_report(
    deployer: &Deployer,
    request: &DeploymentRequest,
    report_path: Option<&Path>,
) -> u8 {
    let outcome = deployer.deploy(request).await;

    print_summary(&outcome);

    if let Some(path) = report_path {
        if let Err(e) = write_report(path, request, &outcome).await {
            error!("Failed to write report to {}: {}", path.display(), e);
            return 1;
        }
        info!("Wrote outcome report to {}", path.display());
    }

    outcome.exit_code()
}

async fn write_report(
    path: &Path,
    request: &DeploymentRequest,
    outcome: &DeploymentOutcome,
) -> Result<(), DeployError> {
    File::new(path)
        .write_json(&OutcomeReport::new(request, outcome))
        .await
}

fn print_summary(outcome: &DeploymentOutcome) {
    match outcome {
        DeploymentOutcome::Succeeded { platform, detail } => {
            println!(
                "{} Deployment to {} completed successfully!",
                "✓".green().bold(),
                platform.display_name()
            );
            if let Some(detail) = detail {
                println!("  {}", detail);
            }
        }
        DeploymentOutcome::Failed(err) => {
            eprintln!("{} Deployment failed!", "✗".red().bold());
            eprintln!("  {}", err.diagnostic().trim_end());
        }
    }
}
