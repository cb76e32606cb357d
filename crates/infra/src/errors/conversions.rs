//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reqwest::StatusCode;
use slotwatch_domain::{SlotwatchError, SourceError};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotwatchError);

impl From<InfraError> for SlotwatchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotwatchError> for InfraError {
    fn from(value: SlotwatchError) -> Self {
        Self(value)
    }
}

/// Adapter boundary view: auth failures stay auth failures, everything else
/// is a transport problem.
impl From<InfraError> for SourceError {
    fn from(value: InfraError) -> Self {
        match value.0 {
            SlotwatchError::Auth(message) => Self::Auth { message },
            SlotwatchError::Config(message) => Self::MissingCredentials { what: message },
            other => Self::Transport { message: other.to_string() },
        }
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSlotwatchError {
    fn into_slotwatch(self) -> SlotwatchError;
}

/* -------------------------------------------------------------------------- */
/* HTTP status → SlotwatchError */
/* -------------------------------------------------------------------------- */

/// Map a non-success status (with an optional body excerpt) to a domain
/// error.
pub fn status_error(status: StatusCode, body: &str) -> InfraError {
    let code = status.as_u16();
    let mut message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    let excerpt: String = body.chars().take(200).collect();
    if !excerpt.trim().is_empty() {
        message.push_str(": ");
        message.push_str(excerpt.trim());
    }

    InfraError(match code {
        401 | 403 => SlotwatchError::Auth(message),
        404 => SlotwatchError::NotFound(message),
        429 => SlotwatchError::Network(message),
        400..=499 => SlotwatchError::InvalidInput(message),
        _ => SlotwatchError::Network(message),
    })
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SlotwatchError */
/* -------------------------------------------------------------------------- */

impl IntoSlotwatchError for HttpError {
    fn into_slotwatch(self) -> SlotwatchError {
        if self.is_timeout() {
            return SlotwatchError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SlotwatchError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return SlotwatchError::Network(format!("invalid response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, "").0;
        }

        SlotwatchError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_slotwatch())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
