//! # Events Telemetry
//!
//! Logging setup shared by applications built on `component-events`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use events_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // Bus diagnostics now show up as warnings on the console
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EVENTS_SERVICE_NAME` | `component-events` | Service name in logs |
//! | `EVENTS_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `EVENTS_CONSOLE_OUTPUT` | `true` | Write logs to the console |
//! | `EVENTS_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Global subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}
