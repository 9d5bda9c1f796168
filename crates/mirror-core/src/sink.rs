//! Action sinks: where the reconciler reports what it did
//!
//! The reconciler never talks to a logger directly. It is handed an
//! [`ActionSink`] at construction, so the binary decides where records go
//! and tests can capture them.

use std::path::Path;
use std::sync::Mutex;

use crate::decision::{EntryOutcome, EntryStatus};

/// Receiver of per-directory and per-entry records.
pub trait ActionSink: Send + Sync {
    /// A directory pair is about to be compared.
    fn synchronizing(&self, source: &Path, destination: &Path);

    /// An entry outcome was recorded.
    fn outcome(&self, outcome: &EntryOutcome);

    /// The pass root is missing; the pass is abandoned.
    fn source_missing(&self, source: &Path);
}

/// Forwards records to `tracing`.
///
/// Applied and planned actions are `info`, unchanged files `debug`,
/// tolerated failures `warn`, and a missing source `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ActionSink for TracingSink {
    fn synchronizing(&self, source: &Path, destination: &Path) {
        tracing::info!("Synchronizing {} to {}", source.display(), destination.display());
    }

    fn outcome(&self, outcome: &EntryOutcome) {
        match outcome.status {
            EntryStatus::Applied | EntryStatus::Planned => {
                tracing::info!("{}", outcome.message())
            }
            EntryStatus::Skipped => tracing::debug!("{}", outcome.message()),
            EntryStatus::Failed { .. } => tracing::warn!("{}", outcome.message()),
        }
    }

    fn source_missing(&self, _source: &Path) {
        tracing::error!("Source directory does not exist");
    }
}

/// Keeps every record as the line [`TracingSink`] would log.
///
/// Unchanged-file records are kept too, so callers can tell a skip from
/// an entry that was never looked at.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Remove and return the records so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A panic while holding the lock leaves the Vec intact.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, line: String) {
        self.lock().push(line);
    }
}

impl ActionSink for MemorySink {
    fn synchronizing(&self, source: &Path, destination: &Path) {
        self.push(format!(
            "Synchronizing {} to {}",
            source.display(),
            destination.display()
        ));
    }

    fn outcome(&self, outcome: &EntryOutcome) {
        self.push(outcome.message());
    }

    fn source_missing(&self, _source: &Path) {
        self.push("Source directory does not exist".to_string());
    }
}
