//! Log setup for processes embedding the navigation engine (editor
//! adapters, batch indexers).

use crate::error::{Result, SolscopeError};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR_ENV: &str = "SOLSCOPE_LOG_DIR";
const DEFAULT_DIRECTIVE: &str = "info";

/// Directory the rolling log files go to: `$SOLSCOPE_LOG_DIR`, else
/// `~/.solscope/logs`.
pub fn log_dir() -> PathBuf {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".solscope").join("logs")
        }
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber: a daily-rolling file named after
/// `component` (e.g. `editor.log.2024-01-21`), optionally mirrored to stderr.
///
/// Keep the returned guard alive for as long as logs should be flushed.
/// Fails if a global subscriber is already installed.
pub fn init_logging(component: &str, to_stderr: bool) -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        &dir, component,
    ));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| SolscopeError::Internal(format!("logging already initialized: {e}")))?;

    tracing::info!(component, dir = %dir.display(), "Logging initialized");
    Ok(guard)
}
