//! Shared logging utilities for Ingot binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "ingot=info";
const VERBOSE_LOG_FILTER: &str = "ingot=debug";

/// Logging configuration shared by Ingot binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Holds the background file writer. Dropping it flushes buffered lines,
/// so keep it alive until the process is about to exit.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// `RUST_LOG` overrides the default filter for both layers. With `verbose`
/// the console layer shows debug events regardless of `RUST_LOG`. If the logs
/// directory cannot be created, logging continues on stderr only.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let (file_layer, guard) = match ensure_logs_dir() {
        Ok(log_dir) => {
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let appender = tracing_appender::rolling::daily(log_dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        Err(err) => {
            eprintln!("Warning: {:#}", err);
            (None, None)
        }
    };

    let console_filter = if config.verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        env_filter()
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Get the Ingot home directory.
///
/// Priority:
/// 1) INGOT_HOME
/// 2) ~/.ingot
/// 3) ./.ingot
pub fn ingot_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("INGOT_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ingot")
}

/// Get the logs directory: ~/.ingot/logs
pub fn logs_dir() -> PathBuf {
    ingot_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
