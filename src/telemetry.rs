//! Tracing subscriber initialisation for the server binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from a raw `RUST_LOG` value.
#[must_use]
pub fn log_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber, writing formatted events to stderr.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init() {
    let raw = std::env::var("RUST_LOG").ok();
    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter(raw.as_deref()))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
