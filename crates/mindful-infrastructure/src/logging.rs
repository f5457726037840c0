//! Tracing subscriber setup for hosts embedding the client.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Set to `1`/`true`/`yes` to force debug-level logging.
pub const DEBUG_LOG_ENV: &str = "MINDFUL_DEBUG_LOG";

const LOG_FILE_PREFIX: &str = "mindful.log";

/// Installs the global subscriber: stderr plus a daily-rolling file in
/// `logs_dir`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`; the debug
/// variable overrides both. Keep the returned guard alive for as long as
/// file logging should be flushed. Returns `None` if a global subscriber
/// was already installed.
pub fn init_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr.and(file_writer))
        .with_ansi(false)
        .try_init();

    match result {
        Ok(()) => Some(guard),
        Err(e) => {
            tracing::debug!("[Logging] Subscriber already installed: {}", e);
            None
        }
    }
}

fn build_filter() -> EnvFilter {
    let debug_enabled = std::env::var(DEBUG_LOG_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}
