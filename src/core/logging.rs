//! Logging setup.
//!
//! `log` macros are used throughout the crate; they are bridged into
//! `tracing` and written as JSON lines to a daily rolling file.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// Base name of the rolling log files.
pub const LOG_FILE_NAME: &str = "cocktail-search.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Subscriber writing JSON lines to a daily rolling file in `log_dir`, plus
/// the guard that flushes it on drop.
fn file_subscriber(log_dir: &Path) -> (impl tracing::Subscriber + Send + Sync, WorkerGuard) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    (tracing_subscriber::registry().with(layer), guard)
}

/// Initialize logging for TUI mode: file only, the TUI owns the terminal.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    let (subscriber, guard) = file_subscriber(log_dir);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );
    guard
}
