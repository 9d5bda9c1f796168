//! Recursive one-way reconciliation of a destination tree onto a source tree
//!
//! A pass walks the source depth-first. For each directory pair it lists
//! both sides once, copies or recurses into every source child, then removes
//! destination-only names. No state survives between passes.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use mirror_fs::{EntryKind, RelativePath, files_identical, io};
use tracing::{debug, warn};

use crate::decision::{EntryOutcome, EntryStatus, SyncDecision};
use crate::options::{ErrorPolicy, ReconcileOptions};
use crate::report::{PassReport, PassStatus};
use crate::sink::{ActionSink, TracingSink};
use crate::{Error, Result};

/// Brings a destination tree into agreement with a source tree.
pub struct Reconciler {
    options: ReconcileOptions,
    sink: Arc<dyn ActionSink>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(ReconcileOptions::default(), Arc::new(TracingSink))
    }
}

impl Reconciler {
    /// Create a reconciler that reports through `sink`.
    pub fn new(options: ReconcileOptions, sink: Arc<dyn ActionSink>) -> Self {
        Self { options, sink }
    }

    /// Run one full pass.
    ///
    /// A missing source is not an error: it is logged through the sink and
    /// reported as [`PassStatus::SourceMissing`] with nothing touched. A
    /// source that exists but is not a directory is an error.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::AbortOnFirstError`], the first failing filesystem
    /// operation ends the pass and is returned. Under
    /// [`ErrorPolicy::ContinueOnError`], only the source-root check can fail.
    pub fn reconcile(&self, source: &Path, destination: &Path) -> Result<PassReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        match io::probe(source)? {
            None => {
                self.sink.source_missing(source);
                let mut report = PassReport::new(PassStatus::SourceMissing, started_at);
                report.elapsed = clock.elapsed();
                return Ok(report);
            }
            Some(EntryKind::Directory) => {}
            Some(_) => {
                return Err(mirror_fs::Error::NotADirectory {
                    path: source.to_path_buf(),
                }
                .into());
            }
        }

        let mut pass = Pass {
            options: &self.options,
            sink: self.sink.as_ref(),
            report: PassReport::new(PassStatus::Completed, started_at),
        };
        pass.sync_dir(source, destination, &RelativePath::root())?;

        let mut report = pass.report;
        report.elapsed = clock.elapsed();
        debug!(summary = %report.summary(), "Pass complete");
        Ok(report)
    }
}

/// State for one pass.
struct Pass<'a> {
    options: &'a ReconcileOptions,
    sink: &'a dyn ActionSink,
    report: PassReport,
}

impl Pass<'_> {
    /// Reconcile one directory pair and everything below it.
    ///
    /// The destination root may be missing several levels deep; below the
    /// root the parent has always been handled already, so a single-level
    /// create suffices.
    fn sync_dir(
        &mut self,
        source: &Path,
        destination: &Path,
        relative: &RelativePath,
    ) -> Result<()> {
        let Some(existing) = self.inspect(destination, relative, || io::probe(destination))? else {
            return Ok(());
        };

        let dest_present = existing.is_some();
        if !dest_present {
            let created = self.apply(SyncDecision::CreateDirectory, destination, relative, || {
                if relative.is_root() {
                    io::create_dir_all(destination)
                } else {
                    io::create_dir(destination)
                }
            })?;
            if !created {
                return Ok(());
            }
        }

        self.sink.synchronizing(source, destination);

        // Both listings are taken before anything in this directory changes.
        let Some(source_names) = self.inspect(source, relative, || io::list_names(source))? else {
            return Ok(());
        };
        let dest_names = if dest_present || !self.options.dry_run {
            match self.inspect(destination, relative, || io::list_names(destination))? {
                Some(names) => names,
                None => return Ok(()),
            }
        } else {
            BTreeSet::new()
        };

        for name in &source_names {
            self.sync_child(source, destination, relative, name)?;
        }

        for name in dest_names.difference(&source_names) {
            self.remove_extra(&destination.join(name), &relative.join(name))?;
        }

        Ok(())
    }

    fn sync_child(
        &mut self,
        source: &Path,
        destination: &Path,
        relative: &RelativePath,
        name: &OsString,
    ) -> Result<()> {
        let src = source.join(name);
        let dst = destination.join(name);
        let rel = relative.join(name);

        match self.inspect(&src, &rel, || io::probe(&src))? {
            // Inspection failed and was recorded.
            None => Ok(()),
            Some(Some(EntryKind::Directory)) => self.sync_dir(&src, &dst, &rel),
            Some(Some(EntryKind::File)) => self.sync_file(&src, &dst, &rel),
            Some(Some(EntryKind::Other)) => {
                warn!("Skipping {}: not a regular file or directory", src.display());
                Ok(())
            }
            Some(None) => {
                warn!("Skipping {}: vanished or dangling link", src.display());
                Ok(())
            }
        }
    }

    fn sync_file(&mut self, src: &Path, dst: &Path, rel: &RelativePath) -> Result<()> {
        let comparison = self.options.comparison;
        let unchanged = self.check(SyncDecision::CopyFile, dst, rel, || {
            Ok(io::probe(dst)?.is_some() && files_identical(src, dst, comparison)?)
        })?;

        match unchanged {
            None => {}
            Some(true) => self.record(SyncDecision::SkipFile, dst, rel, EntryStatus::Skipped),
            Some(false) => {
                self.apply(SyncDecision::CopyFile, dst, rel, || {
                    io::copy_file(src, dst).map(|_| ())
                })?;
            }
        }
        Ok(())
    }

    /// Delete a destination-only entry. Symlinks are removed, never followed.
    fn remove_extra(&mut self, path: &Path, rel: &RelativePath) -> Result<()> {
        match self.inspect(path, rel, || io::probe_no_follow(path))? {
            None | Some(None) => {}
            Some(Some(EntryKind::Directory)) => {
                self.apply(SyncDecision::DeleteDirectory, path, rel, || io::remove_dir_all(path))?;
            }
            Some(Some(_)) => {
                self.apply(SyncDecision::DeleteFile, path, rel, || io::remove_file(path))?;
            }
        }
        Ok(())
    }

    /// Perform (or, in a dry run, plan) a mutating decision.
    ///
    /// Returns whether the destination now reflects the decision, so callers
    /// can skip work beneath a directory that could not be created.
    fn apply(
        &mut self,
        decision: SyncDecision,
        path: &Path,
        rel: &RelativePath,
        op: impl FnOnce() -> mirror_fs::Result<()>,
    ) -> Result<bool> {
        if self.options.dry_run {
            self.record(decision, path, rel, EntryStatus::Planned);
            return Ok(true);
        }
        match self.check(decision, path, rel, op)? {
            Some(()) => {
                self.record(decision, path, rel, EntryStatus::Applied);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run an inspection that precedes any decision.
    fn inspect<T>(
        &mut self,
        path: &Path,
        rel: &RelativePath,
        op: impl FnOnce() -> mirror_fs::Result<T>,
    ) -> Result<Option<T>> {
        self.guard(None, path, rel, op)
    }

    /// Run a step belonging to `decision`.
    fn check<T>(
        &mut self,
        decision: SyncDecision,
        path: &Path,
        rel: &RelativePath,
        op: impl FnOnce() -> mirror_fs::Result<T>,
    ) -> Result<Option<T>> {
        self.guard(Some(decision), path, rel, op)
    }

    /// Apply the error policy to one fallible step.
    ///
    /// `Ok(None)` means the step failed, was recorded, and the pass goes on.
    fn guard<T>(
        &mut self,
        decision: Option<SyncDecision>,
        path: &Path,
        rel: &RelativePath,
        op: impl FnOnce() -> mirror_fs::Result<T>,
    ) -> Result<Option<T>> {
        match op() {
            Ok(value) => Ok(Some(value)),
            Err(e) => match self.options.error_policy {
                ErrorPolicy::AbortOnFirstError => Err(Error::from(e)),
                ErrorPolicy::ContinueOnError => {
                    let outcome = EntryOutcome {
                        decision,
                        path: path.to_path_buf(),
                        relative: rel.clone(),
                        status: EntryStatus::Failed {
                            reason: e.to_string(),
                        },
                    };
                    self.sink.outcome(&outcome);
                    self.report.outcomes.push(outcome);
                    Ok(None)
                }
            },
        }
    }

    fn record(
        &mut self,
        decision: SyncDecision,
        path: &Path,
        rel: &RelativePath,
        status: EntryStatus,
    ) {
        let outcome = EntryOutcome {
            decision: Some(decision),
            path: path.to_path_buf(),
            relative: rel.clone(),
            status,
        };
        self.sink.outcome(&outcome);
        self.report.outcomes.push(outcome);
    }
}
