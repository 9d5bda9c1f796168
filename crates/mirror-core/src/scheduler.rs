//! Fixed-interval pass scheduling
//!
//! The scheduler runs one pass, waits for the interval, and repeats. Passes
//! never overlap. Waiting is the only point where shutdown is observed, so a
//! pass in flight always runs to completion.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::Result;
use crate::reconciler::Reconciler;

/// Why the scheduler stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last pass found no source directory
    SourceMissing,
    /// The shutdown future resolved while waiting between passes
    Interrupted,
    /// The configured number of passes ran
    PassLimit,
}

/// What a scheduler run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub passes: u64,
}

/// Drives a [`Reconciler`] at a fixed interval.
pub struct Scheduler {
    reconciler: Reconciler,
    source: PathBuf,
    destination: PathBuf,
    interval: Duration,
    max_passes: Option<u64>,
}

impl Scheduler {
    pub fn new(
        reconciler: Reconciler,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            reconciler,
            source: source.into(),
            destination: destination.into(),
            interval,
            max_passes: None,
        }
    }

    /// Stop after `passes` passes (e.g. `1` for a one-shot run).
    pub fn with_max_passes(mut self, passes: u64) -> Self {
        self.max_passes = Some(passes);
        self
    }

    /// Run passes until the source disappears, `shutdown` resolves, or the
    /// pass limit is reached.
    ///
    /// A zero interval runs passes back to back; the shutdown future is
    /// still polled between them.
    ///
    /// # Errors
    ///
    /// Returns the first error a pass returns.
    pub async fn run<F>(&self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut passes = 0u64;

        loop {
            let report = self.reconciler.reconcile(&self.source, &self.destination)?;
            passes += 1;
            debug!(pass = passes, summary = %report.summary(), "Pass finished");

            if !report.success() {
                return Ok(RunSummary {
                    reason: StopReason::SourceMissing,
                    passes,
                });
            }
            if self.max_passes.is_some_and(|max| passes >= max) {
                return Ok(RunSummary {
                    reason: StopReason::PassLimit,
                    passes,
                });
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Synchronisation interrupted by user.");
                    return Ok(RunSummary {
                        reason: StopReason::Interrupted,
                        passes,
                    });
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
