//! Per-entry decisions and their outcomes

use std::path::PathBuf;

use mirror_fs::RelativePath;
use serde::Serialize;

/// What the reconciler decided to do with one entry.
///
/// Decisions are computed fresh for every entry on every pass and never
/// stored between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncDecision {
    /// Destination directory is missing and must be created
    CreateDirectory,
    /// Destination file is missing or differs from the source
    CopyFile,
    /// Destination file already matches the source
    SkipFile,
    /// Destination-only file (or symlink, or special file)
    DeleteFile,
    /// Destination-only directory, removed with its subtree
    DeleteDirectory,
}

impl SyncDecision {
    /// Label used in log records, e.g. `Copied: <path>`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateDirectory => "Created directory",
            Self::CopyFile => "Copied",
            Self::SkipFile => "Skipped",
            Self::DeleteFile => "Deleted",
            Self::DeleteDirectory => "Deleted directory",
        }
    }

    /// Whether applying this decision changes the destination.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::SkipFile)
    }
}

impl std::fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of acting on one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum EntryStatus {
    /// The filesystem operation was performed
    Applied,
    /// Nothing needed doing
    Skipped,
    /// Dry run: the operation would have been performed
    Planned,
    /// The operation (or the inspection leading to it) failed and the pass
    /// continued
    Failed { reason: String },
}

/// One entry's decision, where it applies, and how it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    /// `None` when the failure happened while inspecting the entry, before a
    /// decision could be made (listing or probing).
    pub decision: Option<SyncDecision>,
    /// Absolute destination path (or source path for inspection failures)
    pub path: PathBuf,
    /// Path relative to the mirror roots
    pub relative: RelativePath,
    #[serde(flatten)]
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn label(&self) -> &'static str {
        self.decision.map(|d| d.label()).unwrap_or("Inspect")
    }

    pub fn is_applied(&self) -> bool {
        self.status == EntryStatus::Applied
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, EntryStatus::Failed { .. })
    }

    /// The log line for this outcome, e.g. `Deleted directory: /dst/old`.
    pub fn message(&self) -> String {
        let path = self.path.display();
        match &self.status {
            EntryStatus::Applied => format!("{}: {}", self.label(), path),
            EntryStatus::Skipped => format!("Unchanged: {}", path),
            EntryStatus::Planned => format!("[dry-run] {}: {}", self.label(), path),
            EntryStatus::Failed { reason } => {
                format!("{} failed: {}: {}", self.label(), path, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(decision: Option<SyncDecision>, status: EntryStatus) -> EntryOutcome {
        EntryOutcome {
            decision,
            path: PathBuf::from("/dst/sub/b.txt"),
            relative: RelativePath::new("sub/b.txt"),
            status,
        }
    }

    #[test]
    fn applied_messages_use_action_labels() {
        assert_eq!(
            outcome(Some(SyncDecision::CopyFile), EntryStatus::Applied).message(),
            "Copied: /dst/sub/b.txt"
        );
        assert_eq!(
            outcome(Some(SyncDecision::DeleteDirectory), EntryStatus::Applied).message(),
            "Deleted directory: /dst/sub/b.txt"
        );
    }

    #[test]
    fn planned_messages_are_prefixed() {
        assert_eq!(
            outcome(Some(SyncDecision::DeleteFile), EntryStatus::Planned).message(),
            "[dry-run] Deleted: /dst/sub/b.txt"
        );
    }

    #[test]
    fn inspection_failures_have_no_decision() {
        let o = outcome(
            None,
            EntryStatus::Failed {
                reason: "denied".into(),
            },
        );
        assert!(o.is_failed());
        assert_eq!(o.message(), "Inspect failed: /dst/sub/b.txt: denied");
    }

    #[test]
    fn skip_is_the_only_non_mutating_decision() {
        assert!(!SyncDecision::SkipFile.mutates());
        assert!(SyncDecision::CreateDirectory.mutates());
        assert!(SyncDecision::DeleteFile.mutates());
    }
}
