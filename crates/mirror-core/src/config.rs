//! Mirror configuration file
//!
//! Every field is optional; an empty file yields the defaults, which match
//! the behaviour of a bare `mirror <source> <destination> <interval>` run.

use std::path::{Path, PathBuf};

use mirror_fs::{ComparisonMode, ConfigStore, DEFAULT_LOG_FILE};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::options::{ErrorPolicy, ReconcileOptions};

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_level() -> String {
    "info".to_string()
}

/// `[sync]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSection {
    pub error_policy: ErrorPolicy,
    pub comparison: ComparisonMode,
    pub dry_run: bool,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Log file, appended to on every run
    pub file: PathBuf,
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_level(),
        }
    }
}

/// Mirror configuration loaded from TOML, JSON or YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    pub sync: SyncSection,
    pub logging: LoggingSection,
}

impl MirrorConfig {
    /// Load from a file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions::default()
            .with_error_policy(self.sync.error_policy)
            .with_comparison(self.sync.comparison)
            .with_dry_run(self.sync.dry_run)
    }
}
