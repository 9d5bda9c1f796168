//! Effective settings: command-line flags over config file over defaults

use std::path::PathBuf;

use mirror_core::{ErrorPolicy, MirrorConfig, ReconcileOptions};

use crate::cli::Cli;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub reconcile: ReconcileOptions,
    pub log_file: PathBuf,
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub once: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => MirrorConfig::load(path)?,
            None => MirrorConfig::default(),
        };
        Ok(Self::merge(cli, config))
    }

    fn merge(cli: &Cli, config: MirrorConfig) -> Self {
        let mut reconcile = config.reconcile_options();
        if cli.dry_run {
            reconcile = reconcile.with_dry_run(true);
        }
        if cli.continue_on_error {
            reconcile = reconcile.with_error_policy(ErrorPolicy::ContinueOnError);
        }
        if let Some(mode) = cli.compare {
            reconcile = reconcile.with_comparison(mode);
        }

        Self {
            reconcile,
            log_file: cli.log_file.clone().unwrap_or(config.logging.file),
            level: if cli.verbose {
                "debug".to_string()
            } else {
                config.logging.level
            },
            once: cli.once,
        }
    }
}
