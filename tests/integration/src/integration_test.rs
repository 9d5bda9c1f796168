//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: config loading -> root validation
//! -> scheduled passes -> converged destination.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use mirror_core::{
    ErrorPolicy, MemorySink, MirrorConfig, Reconciler, Scheduler, StopReason, SyncDecision,
};
use mirror_fs::{ComparisonMode, validate_roots};
use mirror_test_utils::MirrorFixture;

#[tokio::test]
async fn test_config_to_converged_destination() {
    let fx = MirrorFixture::new();
    fx.write_source("docs/readme.md", "# hello");
    fx.write_source("data/1.bin", [1u8, 2, 3]);
    fx.write_destination("data/1.bin", [9u8, 9, 9]);
    fx.write_destination("obsolete/x.txt", "x");

    let config_path = fx.root().join("mirror.toml");
    fs::write(
        &config_path,
        r#"
[sync]
error_policy = "continue-on-error"
comparison = "full"
"#,
    )
    .unwrap();
    let config = MirrorConfig::load(&config_path).unwrap();
    assert_eq!(config.sync.error_policy, ErrorPolicy::ContinueOnError);
    assert_eq!(config.sync.comparison, ComparisonMode::Full);

    validate_roots(&fx.source(), &fx.destination()).unwrap();

    let sink = Arc::new(MemorySink::new());
    let reconciler = Reconciler::new(config.reconcile_options(), sink.clone());
    let summary = Scheduler::new(
        reconciler,
        fx.source(),
        fx.destination(),
        Duration::from_millis(5),
    )
    .with_max_passes(2)
    .run(std::future::pending())
    .await
    .unwrap();

    assert_eq!(summary.reason, StopReason::PassLimit);
    assert_eq!(summary.passes, 2);
    fx.assert_mirrored();

    let lines = sink.lines();
    let deleted: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("Deleted directory: "))
        .collect();
    assert_eq!(deleted.len(), 1, "records: {lines:?}");
    assert!(deleted[0].ends_with("obsolete"));
}

#[test]
fn test_single_pass_report_matches_destination_changes() {
    let fx = MirrorFixture::new();
    fx.write_source("a.txt", "hi");
    fx.write_source("sub/b.txt", "yo");
    fx.write_destination("a.txt", "hi");
    fx.write_destination("c.txt", "old");

    let report = Reconciler::new(Default::default(), Arc::new(MemorySink::new()))
        .reconcile(&fx.source(), &fx.destination())
        .unwrap();

    let summary = report.summary();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.copied, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.deleted_files, 1);
    assert_eq!(summary.deleted_directories, 0);
    assert_eq!(report.applied().count(), 3);
    let copied: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.decision == Some(SyncDecision::CopyFile))
        .map(|o| o.relative.as_str())
        .collect();
    assert_eq!(copied, vec!["sub/b.txt"]);
}
