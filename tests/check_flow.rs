//! Check workflow tests against an in-memory repository host

mod helper;

use serde_json::json;

use helper::host::StubHost;
use helper::workspace::Workspace;
use noble_version_tracker::check::{CheckError, Checker, Outcome};
use noble_version_tracker::tracker::TrackerRecord;

const GO_MOD_V10: &str = r#"module github.com/noble-assets/noble/v10

go 1.22

require (
	cosmossdk.io/core v0.11.1
	dollar.noble.xyz v1.0.0
	github.com/noble-assets/forwarding/v2 v2.0.1
	github.com/noble-assets/halo/v2 v2.0.0
)

require github.com/circlefin/noble-cctp v0.0.0-20240510131035-d9e1c6f4e6a1
"#;

const GO_MOD_V11: &str = r#"module github.com/noble-assets/noble/v11

go 1.23

require (
	cosmossdk.io/core v0.11.1
	dollar.noble.xyz/v2 v2.0.0
	github.com/noble-assets/forwarding/v2 v2.0.2
	github.com/noble-assets/halo/v2 v2.0.0
	github.com/noble-assets/orbiter v1.0.0 // indirect
)

replace (
	github.com/cosmos/cosmos-sdk => github.com/noble-assets/cosmos-sdk v0.50.12-noble.1
	github.com/noble-assets/orbiter v1.0.0 => github.com/noble-assets/orbiter-fork v1.0.1
)
"#;

fn comparison_v10_v11() -> serde_json::Value {
    let mut files = vec![
        json!({"filename": "app.go", "status": "modified", "additions": 12, "deletions": 3, "changes": 15}),
        json!({"filename": "x/forwarding/keeper/msg_server.go", "status": "modified", "additions": 5, "deletions": 2, "changes": 7}),
        json!({"filename": "proto/noble/upgrade/v11.proto", "status": "added", "additions": 40, "deletions": 0, "changes": 40}),
    ];
    for i in 0..12 {
        files.push(json!({
            "filename": format!("x/dollar/keeper/file_{i}.go"),
            "status": "modified",
            "additions": 1,
            "deletions": 1,
            "changes": 2
        }));
    }

    json!({
        "status": "ahead",
        "ahead_by": 42,
        "behind_by": 0,
        "total_commits": 42,
        "html_url": "https://github.com/noble-assets/noble/compare/v10.0.0...v11.0.0",
        "files": files,
        "commits": [
            {"sha": "1a2b3c4d5e6f", "commit": {"message": "feat: dollar v2\n\nbody", "author": {"name": "alice"}}},
            {"sha": "9f8e7d6c5b4a", "commit": {"message": "chore: bump forwarding", "author": {"name": "bob"}}}
        ]
    })
}

async fn check(
    workspace: &Workspace,
    host: &StubHost,
) -> (Result<Outcome, CheckError>, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = Checker::new(&workspace.config, host)
        .check(&mut out, &mut err)
        .await;
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test]
async fn first_run_seeds_then_second_run_is_up_to_date() {
    let workspace = Workspace::with_upgrades(&["v9.0.0", "v10.0.0"]);
    let host = StubHost::new();

    let (result, out, _) = check(&workspace, &host).await;
    assert!(matches!(result, Ok(Outcome::Seeded { ref version }) if version == "v10.0.0"));
    assert!(out.contains("Tracker initialized"));

    let (result, out, _) = check(&workspace, &host).await;
    assert!(matches!(result, Ok(Outcome::UpToDate { .. })));
    assert!(out.contains("Versions match!"));

    assert!(host.calls().is_empty());
    assert_eq!(workspace.record().last_tracked_version.as_deref(), Some("v10.0.0"));
}

#[tokio::test]
async fn new_version_reports_diff_modules_and_module_diffs() {
    let workspace = Workspace::with_upgrades(&["v9.0.0", "v10.0.0", "v11.0.0"]);
    workspace.track("v10.0.0");
    let before = workspace.record();

    let host = StubHost::new()
        .with_comparison("v10.0.0", "v11.0.0", comparison_v10_v11())
        .with_manifest("v10.0.0", GO_MOD_V10)
        .with_manifest("v11.0.0", GO_MOD_V11);

    let (result, out, err) = check(&workspace, &host).await;

    assert_eq!(
        result.unwrap(),
        Outcome::NewVersion {
            tracked: "v10.0.0".to_string(),
            latest: "v11.0.0".to_string(),
            diff_fetched: true,
        }
    );
    assert!(err.is_empty(), "unexpected diagnostics: {err}");

    // diff summary
    assert!(out.contains("DIFF SUMMARY"));
    assert!(out.contains("Commits ahead: 42, behind: 0, total: 42"));
    assert!(out.contains("Files changed: 15"));
    assert!(out.contains("  [1a2b3c4] feat: dollar v2 (alice)"));
    assert!(out.contains("  * proto/noble/upgrade/v11.proto"));

    // module versions
    assert!(out.contains("MODULE VERSIONS"));
    assert!(out.contains("  github.com/noble-assets/forwarding/v2: v2.0.1 -> v2.0.2"));
    assert!(out.contains("  github.com/noble-assets/halo/v2: v2.0.0 (unchanged)"));
    assert!(out.contains("  dollar.noble.xyz/v2: v2.0.0 (added in v11.0.0)"));
    assert!(out.contains("  dollar.noble.xyz: v1.0.0 (removed in v11.0.0)"));
    assert!(out.contains("  github.com/noble-assets/orbiter-fork: v1.0.0 (added in v11.0.0)"));
    assert!(out.contains(
        "github.com/circlefin/noble-cctp: v0.0.0-20240510131035-d9e1c6f4e6a1 (removed in v11.0.0)"
    ));
    assert!(!out.contains("cosmossdk.io/core"));

    // module diffs
    assert!(out.contains("MODULE DIFFS"));
    assert!(out.contains("  forwarding (x/forwarding): 1 files changed (+5, -2, 7 total)"));
    assert!(out.contains("  dollar (x/dollar): 12 files changed (+12, -12, 24 total)"));
    assert!(out.contains("    x/dollar/keeper/file_4.go (+1, -1)"));
    assert!(!out.contains("    x/dollar/keeper/file_5.go (+1, -1)"));
    assert!(out.contains("    ... and 7 more files"));
    assert!(!out.contains("    app.go"));

    // the tracker is not advanced
    assert_eq!(workspace.record(), before);
}

#[tokio::test]
async fn module_diffs_name_head_replacements_from_single_manifest_fetch() {
    let workspace = Workspace::with_upgrades(&["v10.0.0", "v11.0.0"]);
    workspace.track("v10.0.0");
    let comparison = json!({
        "status": "ahead",
        "ahead_by": 1,
        "total_commits": 1,
        "files": [
            {"filename": "x/orbiter/keeper/keeper.go", "status": "modified", "additions": 3, "deletions": 1, "changes": 4}
        ]
    });
    let host = StubHost::new()
        .with_comparison("v10.0.0", "v11.0.0", comparison)
        .with_manifest("v10.0.0", GO_MOD_V10)
        .with_manifest("v11.0.0", GO_MOD_V11);

    let (result, out, _) = check(&workspace, &host).await;

    assert!(matches!(result, Ok(Outcome::NewVersion { .. })));
    assert!(out.contains(
        "  orbiter (x/orbiter, via github.com/noble-assets/orbiter-fork): 1 files changed (+3, -1, 4 total)"
    ));
    assert_eq!(
        host.calls(),
        vec![
            "compare v10.0.0...v11.0.0",
            "manifest v10.0.0",
            "manifest v11.0.0"
        ]
    );
}

#[tokio::test]
async fn new_version_is_reported_again_until_acknowledged() {
    let workspace = Workspace::with_upgrades(&["v10.0.0", "v11.0.0"]);
    workspace.track("v10.0.0");
    let host = StubHost::new()
        .with_comparison("v10.0.0", "v11.0.0", comparison_v10_v11())
        .with_manifest("v10.0.0", GO_MOD_V10)
        .with_manifest("v11.0.0", GO_MOD_V11);

    for _ in 0..2 {
        let (result, _, _) = check(&workspace, &host).await;
        assert!(matches!(result, Ok(Outcome::NewVersion { .. })));
    }
    let compares = host
        .calls()
        .iter()
        .filter(|call| call.starts_with("compare"))
        .count();
    assert_eq!(compares, 2);

    let mut out = Vec::new();
    let mut err = Vec::new();
    Checker::new(&workspace.config, &host)
        .acknowledge(&mut out, &mut err)
        .unwrap();

    let (result, _, _) = check(&workspace, &host).await;
    assert!(matches!(result, Ok(Outcome::UpToDate { .. })));
}

#[tokio::test]
async fn failed_comparison_falls_back_to_manual_url() {
    let workspace = Workspace::with_upgrades(&["v10.0.0", "v11.0.0"]);
    workspace.track("v10.0.0");
    let host = StubHost::new();

    let (result, out, err) = check(&workspace, &host).await;

    assert!(matches!(
        result,
        Ok(Outcome::NewVersion {
            diff_fetched: false,
            ..
        })
    ));
    assert!(out.contains("Could not fetch diff from GitHub API."));
    assert!(out.contains("https://github.com/noble-assets/noble/compare/v10.0.0...v11.0.0"));
    assert!(err.contains("GitHub API error: Not Found"));
    assert!(!out.contains("MODULE VERSIONS"));
    assert_eq!(host.calls(), vec!["compare v10.0.0...v11.0.0"]);
}

#[tokio::test]
async fn missing_manifests_still_report_diff() {
    let workspace = Workspace::with_upgrades(&["v10.0.0", "v11.0.0"]);
    workspace.track("v10.0.0");
    let host = StubHost::new().with_comparison("v10.0.0", "v11.0.0", comparison_v10_v11());

    let (result, out, err) = check(&workspace, &host).await;

    assert!(matches!(
        result,
        Ok(Outcome::NewVersion {
            diff_fetched: true,
            ..
        })
    ));
    assert!(out.contains("  Could not fetch go.mod for either tag."));
    assert!(out.contains("  dollar (x/dollar): 12 files changed"));
    assert!(err.contains("Error fetching go.mod"));
}

#[tokio::test]
async fn suffixed_upgrades_table_fails_without_touching_tracker() {
    let workspace = Workspace::with_upgrades(&["v10.0.0", "v11.0.0-rc1"]);
    workspace.track("v10.0.0");
    let before = workspace.record();
    let host = StubHost::new();

    let (result, _, err) = check(&workspace, &host).await;

    assert!(matches!(result, Err(CheckError::NoLatestVersion(_))));
    assert!(err.contains("v11.0.0-rc1"));
    assert_eq!(workspace.record(), before);
}

#[tokio::test]
async fn corrupt_tracker_is_treated_as_first_run() {
    let workspace = Workspace::with_upgrades(&["v11.0.0"]);
    std::fs::write(&workspace.config.tracker_path, "not json at all").unwrap();
    let host = StubHost::new();

    let (result, _, _) = check(&workspace, &host).await;

    assert!(matches!(result, Ok(Outcome::Seeded { .. })));
    assert_ne!(workspace.record(), TrackerRecord::default());
}

#[tokio::test]
async fn unwritable_tracker_does_not_fail_seeding() {
    let mut workspace = Workspace::with_upgrades(&["v11.0.0"]);
    workspace.config.tracker_path = workspace
        .config
        .tracker_path
        .with_file_name("missing")
        .join("tracker.json");
    let host = StubHost::new();

    let (result, out, err) = check(&workspace, &host).await;

    assert!(matches!(result, Ok(Outcome::Seeded { .. })));
    assert!(err.contains("Error writing tracker file"));
    assert!(!out.contains("Tracker initialized"));
}
