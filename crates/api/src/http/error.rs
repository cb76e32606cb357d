//! Mapping of domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use slotwatch_domain::SlotwatchError;

use crate::utils::logging::error_label;

/// Handler error. Wraps a [`SlotwatchError`] so it can be returned from axum
/// handlers.
#[derive(Debug)]
pub struct ApiError(pub SlotwatchError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotwatchError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotwatchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // Upstream credentials or services failed, not the caller.
            SlotwatchError::Auth(_) | SlotwatchError::Network(_) => StatusCode::BAD_GATEWAY,
            SlotwatchError::Config(_) | SlotwatchError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<SlotwatchError> for ApiError {
    fn from(err: SlotwatchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": error_label(&self.0),
        }));
        (self.status(), body).into_response()
    }
}
