//! File logging. The terminal belongs to the UI, so every event goes to
//! `.donkeyshot/logs/donkeyshot.log` through a non-blocking writer.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ds_base::constants::{LOG_DIR, LOG_FILE, LOG_FILTER_VAR, STORE_DIR};

/// Default log location, relative to the working directory.
pub fn log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_DIR).join(LOG_FILE)
}

/// Filter from `DONKEYSHOT_LOG`, falling back to `info` when unset or invalid.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init(path: &Path) -> io::Result<WorkerGuard> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(guard)
}
