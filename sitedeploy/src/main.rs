//! sitedeploy - Entry Point
//!
//! Deploys the static website in the current directory (or `--root`) to the
//! selected platform. Exits 0 on success and 1 on any failure.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use sitedeploy::app::options::{AppOptions, CliArgs};
use sitedeploy::app::run::run;
use sitedeploy::logs::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Credentials for the hosting tools live in .env; a missing file is fine
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();

    let options = match AppOptions::resolve(args).await {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(options.log.clone()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    run(options).await
}
