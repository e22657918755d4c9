//! Backend unit tests

use sitedeploy::deploy::backend::{Backend, BackendFactory};
use sitedeploy::deploy::git::GitPagesBackend;
use sitedeploy::deploy::hosted::HostedCliBackend;
use sitedeploy::errors::DeployError;
use sitedeploy::models::deployment::Platform;
use sitedeploy::storage::settings::{GitPagesSettings, HostedCliSettings, Settings};

use crate::support::{complete_site, fail, ok, FakeRunner, Reply};

#[test]
fn test_factory_selects_backend_per_platform() {
    let site = complete_site();
    let runner = FakeRunner::new();

    for platform in Platform::ALL {
        let backend = BackendFactory::create(platform, &Settings::default(), site.path(), runner.clone());
        assert_eq!(backend.platform(), platform);
    }
}

#[tokio::test]
async fn test_git_missing_binary() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("git", Reply::NotFound);
    let backend = GitPagesBackend::new(GitPagesSettings::default(), site.path(), runner.clone());

    let err = backend.publish().await.unwrap_err();

    match err {
        DeployError::ToolNotFound { tool, install_hint } => {
            assert_eq!(tool, "git");
            assert!(install_hint.contains("git"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.calls(), ["git init --initial-branch main"]);
}

#[tokio::test]
async fn test_git_commit_failure_stops_before_push() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on(
        "git commit",
        fail(128, "", "Author identity unknown\n\n*** Please tell me who you are.\n"),
    );
    let backend = GitPagesBackend::new(GitPagesSettings::default(), site.path(), runner.clone());

    let err = backend.publish().await.unwrap_err();

    assert!(matches!(err, DeployError::ToolExitedNonZero { code: Some(128), .. }));
    assert!(err.diagnostic().starts_with("Author identity unknown"));
    assert!(!runner.calls().iter().any(|call| call.starts_with("git push")));
}

#[tokio::test]
async fn test_git_push_failure() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on(
        "git push",
        fail(128, "", "fatal: 'origin' does not appear to be a git repository\n"),
    );
    let backend = GitPagesBackend::new(GitPagesSettings::default(), site.path(), runner.clone());

    let err = backend.publish().await.unwrap_err();

    assert_eq!(
        err.diagnostic(),
        "fatal: 'origin' does not appear to be a git repository\n"
    );
    assert!(err.to_string().contains("git push origin main:gh-pages --force"));
    assert_eq!(runner.calls().len(), 4);
}

#[tokio::test]
async fn test_git_add_failure_stops_sequence() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("git add", fail(1, "", "fatal: pathspec error\n"));
    let backend = GitPagesBackend::new(GitPagesSettings::default(), site.path(), runner.clone());

    assert!(backend.publish().await.is_err());
    assert_eq!(
        runner.calls(),
        ["git init --initial-branch main", "git add ."]
    );
}

#[tokio::test]
async fn test_hosted_version_check_failure_skips_deploy() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("netlify --version", fail(2, "", "node: bad option\n"));
    let backend = HostedCliBackend::new(
        Platform::Netlify,
        HostedCliSettings::netlify(),
        site.path(),
        runner.clone(),
    );

    let err = backend.publish().await.unwrap_err();

    assert!(matches!(err, DeployError::ToolExitedNonZero { .. }));
    assert_eq!(runner.calls(), ["netlify --version"]);
}

#[tokio::test]
async fn test_hosted_custom_binary_and_args() {
    let site = complete_site();
    let runner = FakeRunner::new();
    runner.on("npx vercel deploy", ok("  https://preview.vercel.app  \n"));
    let settings = HostedCliSettings {
        binary: "npx".to_string(),
        install_hint: "install Node.js".to_string(),
        version_args: vec!["vercel".to_string(), "--version".to_string()],
        deploy_args: vec!["vercel".to_string(), "deploy".to_string(), "--prod".to_string()],
    };
    let backend = HostedCliBackend::new(Platform::Vercel, settings, site.path(), runner.clone());

    let detail = backend.publish().await.unwrap();

    assert_eq!(detail.as_deref(), Some("https://preview.vercel.app"));
    assert_eq!(
        runner.calls(),
        ["npx vercel --version", "npx vercel deploy --prod"]
    );
}
