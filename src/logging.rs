//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so the interactive mode logs to a file
//! through a non-blocking appender.  One-shot mode logs to stderr, leaving
//! stdout for the rendered panel.

use std::path::Path;

use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("log path '{0}' has no file name")]
    InvalidPath(String),

    #[error("failed to initialize logger: {0}")]
    InitializationFailed(String),
}

/// `RUST_LOG` wins; otherwise this crate logs at `level`.
fn filter(level: &str) -> Result<EnvFilter, LoggerError> {
    let level: Level = level
        .parse()
        .map_err(|_| LoggerError::InvalidLevel(level.to_string()))?;
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_CRATE_NAME"),
            level.as_str().to_lowercase()
        ))
    }))
}

/// Log to `path`.  Keep the returned guard alive until exit so buffered
/// records are flushed.
pub fn init_file(path: &Path, level: &str) -> Result<WorkerGuard, LoggerError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggerError::InvalidPath(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| LoggerError::InitializationFailed(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggerError::InitializationFailed(e.to_string()))?;

    tracing::info!(path = %path.display(), "logger initialized");
    Ok(guard)
}

/// Log to stderr.
pub fn init_stderr(level: &str) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggerError::InitializationFailed(e.to_string()))
}
