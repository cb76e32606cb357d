use std::time::Duration;

use anyhow::Context;
use slotwatch_domain::SlotwatchError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "slotwatch=info";

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "SLOTWATCH_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else is plain text.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }
}

/// Install the global subscriber.
///
/// Honors `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(false)).try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("Failed to install tracing subscriber")
}

/// Log the outcome of an HTTP request with structured fields.
///
/// `route` must be the route template, never the raw URI with query values.
#[inline]
pub fn log_request_outcome(route: &str, elapsed: Duration, error: Option<&SlotwatchError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(route, duration_ms, "request_success"),
        Some(err) => warn!(route, duration_ms, kind = error_label(err), error = %err, "request_failure"),
    }
}

/// Stable label for an error, suitable for logs and response bodies.
#[inline]
pub fn error_label(error: &SlotwatchError) -> &'static str {
    match error {
        SlotwatchError::Config(_) => "config",
        SlotwatchError::Network(_) => "network",
        SlotwatchError::Auth(_) => "auth",
        SlotwatchError::NotFound(_) => "not_found",
        SlotwatchError::InvalidInput(_) => "invalid_input",
        SlotwatchError::Internal(_) => "internal",
    }
}
