//! Exit code and report tests for a single run

use sitedeploy::app::run::deploy_and_report;
use sitedeploy::deploy::deployer::Deployer;
use sitedeploy::filesys::file::File;
use sitedeploy::models::deployment::{DeploymentRequest, OutcomeReport};
use sitedeploy::storage::settings::Settings;

use crate::support::{complete_site, fail, ok, site_with, write_file, FakeRunner};

#[tokio::test]
async fn test_success_exits_zero() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("vercel --prod", ok("https://site.vercel.app\n"));
    let deployer = Deployer::new(Settings::default(), site.path(), runner.clone());

    let code = deploy_and_report(&deployer, &DeploymentRequest::new("vercel"), None).await;

    assert_eq!(code, 0);
}

#[tokio::test]
async fn test_missing_artifact_exits_one_and_reports_kind() {
    let site = site_with(&["index.html"]);
    let report_path = site.path().join("out").join("report.json");
    let runner = FakeRunner::new();
    let deployer = Deployer::new(Settings::default(), site.path(), runner.clone());

    let code = deploy_and_report(
        &deployer,
        &DeploymentRequest::new("github"),
        Some(&report_path),
    )
    .await;

    assert_eq!(code, 1);
    assert!(runner.calls().is_empty());
    let report: serde_json::Value = File::new(&report_path).read_json().await.unwrap();
    assert_eq!(report["succeeded"], false);
    assert_eq!(report["failure_kind"], "prerequisite_missing");
}

#[tokio::test]
async fn test_tool_failure_exits_one() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("netlify deploy", fail(1, "", "Not logged in\n"));
    let deployer = Deployer::new(Settings::default(), site.path(), runner.clone());

    let code = deploy_and_report(&deployer, &DeploymentRequest::new("netlify"), None).await;

    assert_eq!(code, 1);
}

#[tokio::test]
async fn test_report_write_failure_turns_success_into_failure() {
    let site = complete_site();
    // a regular file where the report's parent directory should be
    write_file(site.path(), "blocker");
    let report_path = site.path().join("blocker").join("report.json");
    let runner = FakeRunner::new();
    let deployer = Deployer::new(Settings::default(), site.path(), runner.clone());
    let request = DeploymentRequest::new("github");

    let code = deploy_and_report(&deployer, &request, Some(&report_path)).await;

    assert_eq!(code, 1);
    assert_eq!(runner.calls().last().unwrap(), "git push origin main:gh-pages --force");
}

#[tokio::test]
async fn test_report_written_on_success() {
    let site = complete_site();
    let report_path = site.path().join("report.json");
    let runner = FakeRunner::new();
    runner.on("vercel --prod", ok("https://site.vercel.app\n"));
    let deployer = Deployer::new(Settings::default(), site.path(), runner.clone());

    let code = deploy_and_report(
        &deployer,
        &DeploymentRequest::new("vercel"),
        Some(&report_path),
    )
    .await;

    assert_eq!(code, 0);
    let report: OutcomeReport = File::new(&report_path).read_json().await.unwrap();
    assert!(report.succeeded);
    assert_eq!(report.detail.as_deref(), Some("https://site.vercel.app"));
}
