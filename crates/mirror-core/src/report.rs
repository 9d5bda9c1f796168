//! Pass reports

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decision::{EntryOutcome, SyncDecision};

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassStatus {
    /// The whole tree was visited (individual entries may still have failed
    /// under the continue-on-error policy)
    Completed,
    /// The source root did not exist; nothing was touched
    SourceMissing,
}

/// Report from one reconciliation pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub status: PassStatus,
    /// Every decision made, in the order it was made
    pub outcomes: Vec<EntryOutcome>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl PassReport {
    pub(crate) fn new(status: PassStatus, started_at: DateTime<Utc>) -> Self {
        Self {
            status,
            outcomes: Vec::new(),
            started_at,
            elapsed: Duration::ZERO,
        }
    }

    /// Whether the driver should keep scheduling passes.
    pub fn success(&self) -> bool {
        self.status == PassStatus::Completed
    }

    /// Outcomes that changed the destination.
    pub fn applied(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_applied())
    }

    /// Outcomes that failed under the continue-on-error policy.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Number of non-failed outcomes with `decision`.
    pub fn count(&self, decision: SyncDecision) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.decision == Some(decision) && !o.is_failed())
            .count()
    }

    /// True when the pass completed without changing (or planning to change)
    /// anything and without failures.
    pub fn is_noop(&self) -> bool {
        self.success()
            && !self
                .outcomes
                .iter()
                .any(|o| o.is_failed() || o.decision.is_some_and(|d| d.mutates()))
    }

    pub fn summary(&self) -> PassSummary {
        PassSummary {
            created: self.count(SyncDecision::CreateDirectory),
            copied: self.count(SyncDecision::CopyFile),
            unchanged: self.count(SyncDecision::SkipFile),
            deleted_files: self.count(SyncDecision::DeleteFile),
            deleted_directories: self.count(SyncDecision::DeleteDirectory),
            failed: self.failures().count(),
        }
    }
}

/// Counts per decision for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub created: usize,
    pub copied: usize,
    pub unchanged: usize,
    pub deleted_files: usize,
    pub deleted_directories: usize,
    pub failed: usize,
}

impl std::fmt::Display for PassSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} copied, {} unchanged, {} files deleted, {} directories deleted, {} failed",
            self.created,
            self.copied,
            self.unchanged,
            self.deleted_files,
            self.deleted_directories,
            self.failed
        )
    }
}
