// Logging module - tracing subscriber setup for the CLI
//
// stdout carries formatted amounts (it is piped into other tools), so human
// logs go to stderr. File logging is optional and writes JSON through a
// non-blocking rolling appender.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogRotation, LoggingConfig};

/// Filter used when RUST_LOG is not set
pub fn default_directive(level: &str) -> String {
    format!("yen_units={}", level.trim().to_lowercase())
}

/// Filter for the configured level; an unknown level is an error
pub fn config_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    config.level_filter()?;
    EnvFilter::try_new(default_directive(&config.level))
        .with_context(|| format!("invalid log level {:?}", config.level))
}

/// Install the global subscriber.
///
/// Precedence: RUST_LOG env var > config level. The configured level is
/// checked even when RUST_LOG is set. The returned guard must be kept alive
/// for the program's duration so file logs flush.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let configured = config_filter(config)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if !config.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    }

    let file_appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
        }
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}
