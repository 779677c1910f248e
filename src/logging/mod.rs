//! Structured logging setup using tracing
//!
//! Console output is always enabled; JSON file logging with rotation is
//! opt-in via [`LoggingConfig`]. Cell values and key material are never
//! logged by the library's own events.
//!
//! # Example
//!
//! ```no_run
//! use cleanframe::config::LoggingConfig;
//! use cleanframe::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! tracing::info!("ready");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{CleanError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure file logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// # Errors
///
/// Returns [`CleanError::Configuration`] on an unknown level string or when
/// the log directory cannot be created.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cleanframe={log_level}")));

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(env_filter)
        .boxed();
    layers.push(console_layer);

    let file_guard = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            _ => Rotation::DAILY,
        };

        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            CleanError::Configuration(format!(
                "Failed to create log directory {}: {e}",
                config.local_path
            ))
        })?;

        let file_appender =
            RollingFileAppender::new(rotation, &config.local_path, "cleanframe.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_filter = EnvFilter::new(format!("cleanframe={log_level}"));
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(file_filter)
            .boxed();
        layers.push(file_layer);

        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    Ok(LoggingGuard::new(file_guard))
}

/// Parse a log level string
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(CleanError::Configuration(format!(
            "Unknown log level: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }
}
