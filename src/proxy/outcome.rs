//! Result taxonomy of a proxy call.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::ErrorRecord;
use crate::proxy::fetcher::{FetchError, Fetched};

pub const MISSING_PARAMETER: &str = "Missing url parameter";
pub const MISSING_PARAMETER_HINT: &str = "Please provide a target URL via ?url=<target_url>";
pub const FETCH_FAILED: &str = "Proxy request failed";
pub const READ_FAILED: &str = "Failed to read response";

/// Exactly one of these is produced per `/api/proxy` call.
#[derive(Debug, Clone)]
pub enum ProxyOutcome {
    /// `url` absent or empty; no outbound call was made.
    MissingParameter,
    /// Transport-level failure before a response head arrived.
    FetchFailed(String),
    /// Response head arrived but the body could not be read.
    ReadFailed(String),
    /// Origin response, relayed as-is.
    Relayed {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
}

impl ProxyOutcome {
    /// Status code the caller will see.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter => StatusCode::BAD_REQUEST,
            Self::FetchFailed(_) | Self::ReadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Relayed { status, .. } => *status,
        }
    }

    /// Low-cardinality label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingParameter => "missing_parameter",
            Self::FetchFailed(_) => "fetch_failed",
            Self::ReadFailed(_) => "read_failed",
            Self::Relayed { .. } => "relayed",
        }
    }
}

impl From<Result<Fetched, FetchError>> for ProxyOutcome {
    fn from(result: Result<Fetched, FetchError>) -> Self {
        match result {
            Ok(fetched) => Self::Relayed {
                status: fetched.status,
                content_type: fetched.content_type,
                body: fetched.body,
            },
            Err(err @ FetchError::Send(_)) => Self::FetchFailed(err.to_string()),
            Err(err @ FetchError::Read(_)) => Self::ReadFailed(err.to_string()),
        }
    }
}

impl IntoResponse for ProxyOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingParameter => {
                ErrorRecord::new(MISSING_PARAMETER, MISSING_PARAMETER_HINT).with_status(status)
            }
            Self::FetchFailed(detail) => ErrorRecord::new(FETCH_FAILED, detail).with_status(status),
            Self::ReadFailed(detail) => ErrorRecord::new(READ_FAILED, detail).with_status(status),
            Self::Relayed {
                content_type, body, ..
            } => {
                let mut response = Response::new(Body::from(body));
                *response.status_mut() = status;
                if let Some(content_type) = content_type {
                    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
                }
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn missing_parameter_renders_400_json() {
        let response = ProxyOutcome::MissingParameter.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let record: ErrorRecord = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(record, ErrorRecord::new(MISSING_PARAMETER, MISSING_PARAMETER_HINT));
    }

    #[tokio::test]
    async fn read_failure_keeps_detail() {
        let response = ProxyOutcome::ReadFailed("unexpected eof".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let record: ErrorRecord = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(record.error, READ_FAILED);
        assert_eq!(record.message, "unexpected eof");
    }

    #[tokio::test]
    async fn relay_is_verbatim() {
        let outcome = ProxyOutcome::Relayed {
            status: StatusCode::IM_A_TEAPOT,
            content_type: Some(HeaderValue::from_static("text/csv")),
            body: Bytes::from_static(b"a,b\n1,2\n"),
        };
        let response = outcome.into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(body_of(response).await, Bytes::from_static(b"a,b\n1,2\n"));
    }

    #[tokio::test]
    async fn relay_without_content_type_adds_none() {
        let outcome = ProxyOutcome::Relayed {
            status: StatusCode::OK,
            content_type: None,
            body: Bytes::from_static(b"raw"),
        };
        let response = outcome.into_response();
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
