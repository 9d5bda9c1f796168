//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use mirror_fs::ComparisonMode;

/// Mirror a source directory onto a destination directory at a fixed interval
///
/// Each pass copies new and changed files, creates missing directories and
/// deletes destination entries that no longer exist in the source.
///
/// Examples:
///   mirror ./data /backup/data 60             # every minute until Ctrl+C
///   mirror ./data /backup/data 0 --once       # single pass
///   mirror ./data /backup/data 60 --dry-run   # log what would change
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,

    /// Directory to mirror into (created if missing)
    pub destination: PathBuf,

    /// Seconds to wait between passes
    pub interval: u64,

    /// Append log records to this file [default: logs/sync.logs]
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Load settings from a TOML, JSON or YAML file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,

    /// Log what would change without modifying the destination
    #[arg(long)]
    pub dry_run: bool,

    /// Record failing entries and keep going instead of aborting the pass
    #[arg(long)]
    pub continue_on_error: bool,

    /// File comparison: full (byte-by-byte) or metadata (size and mtime first)
    #[arg(long, value_name = "MODE")]
    pub compare: Option<ComparisonMode>,

    /// Enable debug output
    #[arg(short, long)]
    pub verbose: bool,
}
