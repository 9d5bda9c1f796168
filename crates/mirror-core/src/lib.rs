//! Reconciliation engine for the directory mirror
//!
//! This crate provides:
//!
//! - **Reconciler**: one recursive pass that converges a destination tree
//!   onto a source tree (create directories, copy changed files, delete
//!   destination-only entries)
//! - **Decisions and reports**: the per-entry [`SyncDecision`], its
//!   [`EntryOutcome`], and the [`PassReport`] for a whole pass
//! - **Action sinks**: the injected receiver of per-action log records
//! - **Scheduler**: runs passes at a fixed interval until the source
//!   disappears or shutdown is requested
//!
//! # Architecture
//!
//! ```text
//!        mirror-cli
//!            |
//!       mirror-core
//!            |
//!        mirror-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{Reconciler, Result};
//! use std::path::Path;
//!
//! fn example() -> Result<()> {
//!     let report = Reconciler::default().reconcile(Path::new("data"), Path::new("backup"))?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod options;
pub mod reconciler;
pub mod report;
pub mod scheduler;
pub mod sink;

pub use config::{LoggingSection, MirrorConfig, SyncSection};
pub use decision::{EntryOutcome, EntryStatus, SyncDecision};
pub use error::{Error, Result};
pub use options::{ErrorPolicy, ReconcileOptions};
pub use reconciler::Reconciler;
pub use report::{PassReport, PassStatus, PassSummary};
pub use scheduler::{RunSummary, Scheduler, StopReason};
pub use sink::{ActionSink, MemorySink, TracingSink};
