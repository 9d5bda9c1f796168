//! Lifecycle tests: a source that changes between passes.
//!
//! Each test runs several passes against one destination and edits the
//! source in between, checking that every pass does only what the edit
//! requires.

use std::fs;
use std::sync::Arc;

use mirror_core::{MemorySink, PassReport, ReconcileOptions, Reconciler, SyncDecision};
use mirror_test_utils::MirrorFixture;
use pretty_assertions::assert_eq;

fn pass(reconciler: &Reconciler, fx: &MirrorFixture) -> PassReport {
    let report = reconciler
        .reconcile(&fx.source(), &fx.destination())
        .unwrap();
    fx.assert_mirrored();
    report
}

/// `label relative` for every applied outcome.
fn applied(report: &PassReport) -> Vec<String> {
    report
        .applied()
        .map(|o| format!("{} {}", o.label(), o.relative))
        .collect()
}

fn new_reconciler() -> Reconciler {
    Reconciler::new(ReconcileOptions::default(), Arc::new(MemorySink::new()))
}

#[test]
fn edits_between_passes_are_applied_minimally() {
    let fx = MirrorFixture::new();
    fx.write_source("notes/today.md", "draft");
    fx.write_source("notes/ideas.md", "many");
    fx.write_source("photos/cat.jpg", [0xffu8, 0xd8, 0xff]);
    let reconciler = new_reconciler();

    pass(&reconciler, &fx);

    // Edit one file, add one, remove one directory.
    fx.write_source("notes/today.md", "final");
    fx.write_source("notes/tomorrow.md", "plan");
    fs::remove_dir_all(fx.source().join("photos")).unwrap();

    let report = pass(&reconciler, &fx);
    assert_eq!(
        applied(&report),
        vec![
            "Copied notes/today.md",
            "Copied notes/tomorrow.md",
            "Deleted directory photos",
        ]
    );
    assert_eq!(report.count(SyncDecision::SkipFile), 1);

    let report = pass(&reconciler, &fx);
    assert!(report.is_noop());
}

#[test]
fn file_replaced_by_directory_in_source_needs_a_clean_destination() {
    let fx = MirrorFixture::new();
    fx.write_source("item", "a file first");
    let reconciler = new_reconciler();
    pass(&reconciler, &fx);

    // The source swaps kinds; the stale destination file blocks the directory.
    fs::remove_file(fx.source().join("item")).unwrap();
    fx.write_source("item/inside.txt", "now a dir");

    let err = reconciler
        .reconcile(&fx.source(), &fx.destination())
        .unwrap_err();
    assert!(matches!(err, mirror_core::Error::Fs(mirror_fs::Error::Io { .. })));

    // Once the clash is cleared by hand, the next pass converges.
    fs::remove_file(fx.destination().join("item")).unwrap();
    let report = pass(&reconciler, &fx);
    assert_eq!(
        applied(&report),
        vec!["Created directory item", "Copied item/inside.txt"]
    );
}

#[test]
fn tampering_with_the_destination_is_reverted() {
    let fx = MirrorFixture::new();
    fx.write_source("config/app.toml", "port = 80");
    let reconciler = new_reconciler();
    pass(&reconciler, &fx);

    fx.write_destination("config/app.toml", "port = 8080");
    fx.write_destination("config/local.toml", "debug = true");

    let report = pass(&reconciler, &fx);
    assert_eq!(
        applied(&report),
        vec!["Copied config/app.toml", "Deleted config/local.toml"]
    );
}
