//! Optional diagnostic log sink.
//!
//! The orchestrator reads the plugin's combined stdout and stderr as the
//! JSON response, so diagnostics never go to either stream. They go to a
//! file, and only when one is configured.

use std::fs::OpenOptions;
use std::path::Path;

use loopvol_shared::errors::{LoopvolError, LoopvolResult};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the log filter: `RUST_LOG` wins, then `level`, then "info".
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Route `tracing` output to `log_file` (appending) at `level`.
///
/// The returned guard flushes buffered lines when dropped; hold it until the
/// process is about to exit.
pub fn init_file_logging(log_file: &Path, level: &str) -> LoopvolResult<WorkerGuard> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to open log file {}: {}",
                log_file.display(),
                e
            ))
        })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    register_to_tracing(non_blocking, env_filter(level));
    Ok(guard)
}

pub fn register_to_tracing(non_blocking: NonBlocking, env_filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false),
        )
        .try_init();
}
