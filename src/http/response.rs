//! JSON error responses.
//!
//! Every failure the gateway produces itself is an [`ErrorRecord`]: a short
//! machine-oriented `error` category plus a human-readable `message`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wire shape of every gateway-generated error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// Pair the record with a status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const NOT_FOUND: &str = "Not found";

/// Response for unmatched paths.
pub fn not_found(path: &str) -> Response {
    ErrorRecord::new(NOT_FOUND, format!("No route for {path}")).with_status(StatusCode::NOT_FOUND)
}

/// Response for a handler that panicked.
pub fn panic_response(detail: &str) -> Response {
    ErrorRecord::new(INTERNAL_ERROR, detail).with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
