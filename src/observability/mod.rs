//! Logging for the lightsaber service
//!
//! Structured logging goes through `tracing`. Lifecycle steps and record
//! mutations carry a typed `Event` name in the `event` field:
//!
//! ```ignore
//! use lightsaber_api::observability::Event;
//!
//! tracing::info!(event = %Event::RecordCreated, id = %id, "lightsaber created");
//! ```

mod events;

pub use events::Event;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Filter directive for a level: this crate and tower_http at `level`.
pub fn filter_directive(level: &str) -> String {
    format!("lightsaber_api={},lightsaber={},tower_http={}", level, level, level)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
/// * `format` - Pretty or JSON output
pub fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
