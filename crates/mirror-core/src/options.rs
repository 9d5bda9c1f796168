//! Options controlling a reconciliation pass

use mirror_fs::ComparisonMode;
use serde::{Deserialize, Serialize};

/// What to do when a filesystem operation on one entry fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop the pass and return the error
    #[default]
    AbortOnFirstError,
    /// Record the failure in the report and keep going
    ContinueOnError,
}

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub error_policy: ErrorPolicy,
    pub comparison: ComparisonMode,
    /// If true, compute decisions without modifying the destination.
    /// Outcomes are reported as planned and logged with a `[dry-run]` prefix.
    pub dry_run: bool,
}

impl ReconcileOptions {
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonMode) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
