//! Tests for the bb-clone command flow.

use super::{render_listing, resolve_dest, run_clone_and_sync};
use crate::bitbucket::RepositoryDescriptor;
use crate::cli::{CloneArgs, ReportFormat};
use crate::git::SystemGit;
use crate::sync::SyncAction;
use crate::test_support::{DirGuard, FakeGit, create_origin_and_clone, push_commits_to_origin, rev_parse};
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

fn args(dest: &Path) -> CloneArgs {
    CloneArgs {
        projects: vec!["DEVOPS".to_string()],
        dest: dest.display().to_string(),
        dry_run: false,
        list: false,
        sync_default: false,
        report: None,
    }
}

fn repo(slug: &str, url: Option<&str>) -> RepositoryDescriptor {
    RepositoryDescriptor {
        name: slug.to_string(),
        slug: slug.to_string(),
        project: Some("DEVOPS".to_string()),
        ssh: None,
        https: url.map(str::to_string),
    }
}

#[test]
fn test_no_report_without_flags() {
    let dest = TempDir::new().unwrap();
    let git = FakeGit::new();
    let result = run_clone_and_sync(&git, &args(dest.path()), &[repo("app", None)], dest.path());
    assert!(result.is_none());
}

#[test]
fn test_clone_then_sync_reports_each_repository() {
    let (_scratch, origin, _clone) = create_origin_and_clone();
    let dest = TempDir::new().unwrap();
    let origin_url = origin.to_str().unwrap();

    let mut cli = args(dest.path());
    cli.sync_default = true;
    cli.report = Some(ReportFormat::Json);

    let repos = [repo("tools", Some(origin_url)), repo("linkless", None)];

    // First pass clones, so the sync pass sees a fresh, up-to-date checkout.
    let summaries = run_clone_and_sync(&SystemGit, &cli, &repos, dest.path()).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].action, SyncAction::UpToDate);
    assert_eq!(summaries[0].default_branch.as_deref(), Some("main"));
    assert_eq!(summaries[1].action, SyncAction::ToClone);

    // Second pass after upstream moved fast-forwards the existing clone.
    push_commits_to_origin(&origin, 2);
    let summaries = run_clone_and_sync(&SystemGit, &cli, &repos, dest.path()).unwrap();
    assert_eq!(summaries[0].action, SyncAction::Pulled);
    assert_eq!(summaries[0].behind_main, 2);
    assert_eq!(
        rev_parse(&dest.path().join("tools"), "main"),
        rev_parse(&origin, "main")
    );
}

#[test]
fn test_report_only_does_not_pull() {
    let (_scratch, origin, _clone) = create_origin_and_clone();
    let dest = TempDir::new().unwrap();
    let mut cli = args(dest.path());
    cli.report = Some(ReportFormat::Text);
    let repos = [repo("tools", Some(origin.to_str().unwrap()))];

    run_clone_and_sync(&SystemGit, &cli, &repos, dest.path()).unwrap();
    let before = rev_parse(&dest.path().join("tools"), "main");
    push_commits_to_origin(&origin, 1);

    let summaries = run_clone_and_sync(&SystemGit, &cli, &repos, dest.path()).unwrap();
    assert_eq!(summaries[0].action, SyncAction::Checked);
    assert_eq!(rev_parse(&dest.path().join("tools"), "main"), before);
}

#[test]
fn test_failed_clone_is_attached_to_summary() {
    let dest = TempDir::new().unwrap();
    let missing = dest.path().join("missing.git");
    let mut cli = args(dest.path());
    cli.report = Some(ReportFormat::Text);

    let repos = [repo("ghost", Some(missing.to_str().unwrap()))];
    let summaries = run_clone_and_sync(&SystemGit, &cli, &repos, dest.path()).unwrap();

    assert_eq!(summaries[0].action, SyncAction::ToClone);
    assert!(summaries[0].error.as_deref().unwrap().contains("git clone failed"));
}

#[test]
fn test_dry_run_creates_nothing() {
    let dest = TempDir::new().unwrap();
    let dest_dir = dest.path().join("repos");
    let mut cli = args(&dest_dir);
    cli.dry_run = true;
    cli.sync_default = true;
    let git = FakeGit::new();

    let summaries =
        run_clone_and_sync(&git, &cli, &[repo("app", Some("https://example.invalid/app.git"))], &dest_dir)
            .unwrap();

    assert!(git.calls().is_empty());
    assert!(!dest_dir.exists());
    assert_eq!(summaries[0].action, SyncAction::ToClone);
}

#[test]
fn test_render_listing_shape() {
    let rendered = render_listing(&[repo("app", Some("https://bitbucket.org/acme/app.git"))]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "name": "app",
            "slug": "app",
            "project": "DEVOPS",
            "ssh": null,
            "https": "https://bitbucket.org/acme/app.git"
        }])
    );
    assert!(rendered.contains("\n  {"), "listing should be pretty-printed");
}

#[test]
fn test_resolve_dest_keeps_absolute_paths() {
    let resolved = resolve_dest("/srv/repos").unwrap();
    assert_eq!(resolved, Path::new("/srv/repos"));
}

#[test]
fn test_resolve_dest_expands_home() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    assert_eq!(resolve_dest("~/repos").unwrap(), home.join("repos"));
    assert_eq!(resolve_dest("~").unwrap(), home);
}

#[test]
#[serial]
fn test_resolve_dest_relative_to_cwd() {
    let temp_dir = TempDir::new().unwrap();
    let _guard = DirGuard::new(temp_dir.path());

    let resolved = resolve_dest("repos/team").unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(resolved, cwd.join("repos/team"));
}
