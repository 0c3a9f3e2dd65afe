//! # GD Telemetry
//!
//! Tracing bootstrap for GenesisDrop tooling.
//!
//! Library crates only emit `tracing` events; this crate is where a
//! binary or test harness installs the subscriber.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gd_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("failed to init telemetry");
//!     // Claims validated from here on are logged.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GD_SERVICE_NAME` | `genesisdrop` | Service name in log lines |
//! | `GD_LOG_LEVEL` or `RUST_LOG` | `info` | Log level filter |
//! | `GD_JSON_LOGS` | `false` | JSON-formatted output |

#![warn(missing_docs)]

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The configured log filter did not parse.
    #[error("Failed to parse log filter: {0}")]
    FilterInit(String),

    /// A global subscriber was already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global tracing subscriber from the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level, matching the
/// usual `tracing-subscriber` conventions.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::FilterInit(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "telemetry initialized"
    );
    Ok(())
}
