//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber: human-readable output for
//! development, JSON lines when `json_logs` is set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter from `config.log_level`.
///
/// The process environment is not consulted here: `EVENTS_LOG_LEVEL` and the
/// `RUST_LOG` fallback are already resolved into the config.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Initialize the global subscriber.
///
/// Fails with [`TelemetryError::AlreadyInitialized`] when a global subscriber
/// is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    let console = config.console_output.then(|| {
        if config.json_logs {
            // JSON output for log shipping
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            // Pretty output for development
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(true)
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
