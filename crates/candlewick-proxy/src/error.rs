use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use candlewick_core::{SourceError, SourceErrorKind, ValidationError};

pub const CHART_FAILURE: &str = "Failed to fetch data from Yahoo Finance";
pub const CHART_MALFORMED: &str = "Invalid data format from Yahoo Finance";
pub const RELAY_FAILURE: &str = "Proxy server error";

/// Error type for both proxy servers.
#[derive(Debug)]
pub enum ProxyError {
    BadRequest(String),
    /// Chart fetch failed; the string is what the client sees as `details`.
    Chart(String),
    Relay(String),
}

impl ProxyError {
    /// Map an adapter error onto the chart endpoint's response contract.
    pub fn chart(error: SourceError) -> Self {
        match error.kind() {
            SourceErrorKind::InvalidRequest => Self::BadRequest(error.message().to_owned()),
            SourceErrorKind::Upstream => Self::Chart(error.message().to_owned()),
            SourceErrorKind::MalformedPayload => Self::Chart(CHART_MALFORMED.to_owned()),
        }
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::Chart(msg) => write!(f, "chart_error: {msg}"),
            Self::Relay(msg) => write!(f, "relay_error: {msg}"),
        }
    }
}

impl std::error::Error for ProxyError {}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            Self::Chart(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": CHART_FAILURE, "details": details })),
            )
                .into_response(),
            Self::Relay(_) => (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILURE).into_response(),
        }
    }
}

impl From<ValidationError> for ProxyError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}
