//! Directory mirror CLI
//!
//! Mirrors a source directory onto a destination directory, one full pass
//! every `interval` seconds, until the source disappears or the process is
//! interrupted.
//!
//! # Usage
//!
//! ```bash
//! mirror <source> <destination> <interval> [--once] [--dry-run] [--log-file <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `info`)

mod cli;
mod error;
mod logging;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use mirror_core::{Reconciler, Scheduler, TracingSink};

use cli::Cli;
use error::Result;
use settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    let _guard = logging::init(&settings.log_file, &settings.level)?;

    tracing::info!("Source: {}", cli.source.display());
    tracing::info!("Destination: {}", cli.destination.display());
    tracing::info!("Interval: {}", cli.interval);
    if settings.reconcile.dry_run {
        tracing::info!("Dry run: the destination will not be modified");
    }

    mirror_fs::validate_roots(&cli.source, &cli.destination)?;
    let shutdown = shutdown_signal()?;

    let reconciler = Reconciler::new(settings.reconcile, Arc::new(TracingSink));
    let mut scheduler = Scheduler::new(
        reconciler,
        &cli.source,
        &cli.destination,
        Duration::from_secs(cli.interval),
    );
    if settings.once {
        scheduler = scheduler.with_max_passes(1);
    }

    let summary = scheduler
        .run(shutdown)
        .await
        .inspect_err(|e| tracing::error!("Synchronisation aborted: {}", e))?;
    tracing::debug!(passes = summary.passes, reason = ?summary.reason, "Mirror stopped");

    Ok(())
}

/// Register the interrupt handlers and return a future that resolves when
/// one fires.
///
/// Registration happens here rather than on first poll, so an interrupt
/// during the first pass is held like any other instead of killing the
/// process.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    })
}

#[cfg(windows)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;
    Ok(async move {
        ctrl_c.recv().await;
    })
}
