//! Shared logging utilities for the filmscan binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "filmscan=info,filmscan_catalog=info";

/// Logging configuration shared by the filmscan binaries.
#[derive(Debug)]
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Keeps the non-blocking file writer alive. Hold it until `main` returns.
#[derive(Debug)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// Console output is limited to warnings unless `verbose` is set, so that
/// stdout/stderr stay readable for the user. A log directory that cannot be
/// created disables the file layer instead of failing the tool.
pub fn init_logging(config: LogConfig<'_>) -> LogGuard {
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        file_filter.clone()
    } else {
        EnvFilter::new("warn")
    };

    let mut guard = None;
    let file_layer = match ensure_logs_dir() {
        Ok(log_dir) => {
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let appender = tracing_appender::rolling::daily(log_dir, file_name);
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(file_filter),
            )
        }
        Err(err) => {
            eprintln!("Warning: {:#}", err);
            None
        }
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    // Keep any subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    LogGuard { _file: guard }
}

/// Get the filmscan home directory: ~/.filmscan
///
/// Priority:
/// 1) FILMSCAN_HOME
/// 2) the user's home directory
/// 3) ./.filmscan
pub fn filmscan_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("FILMSCAN_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".filmscan")
}

/// Get the logs directory: ~/.filmscan/logs
pub fn logs_dir() -> PathBuf {
    logs_dir_in(&filmscan_home())
}

fn logs_dir_in(home: &Path) -> PathBuf {
    home.join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("failed to create logs directory {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("photo-exif"), "photo-exif");
        assert_eq!(sanitize_name("photo exif/../x"), "photo_exif____x");
    }

    #[test]
    fn test_logs_dir_under_home() {
        let home = tempfile::TempDir::new().unwrap();
        assert_eq!(logs_dir_in(home.path()), home.path().join("logs"));
    }
}
