//! Request-side helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Expose query parameters by name to handlers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A caller-supplied `x-request-id` is kept as-is
//! - Query lookup never rejects: malformed pairs are skipped, first value wins

use std::borrow::Cow;
use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Raw query string of a request with by-name lookup.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    raw: Option<String>,
}

impl QueryParams {
    pub fn new(raw: Option<&str>) -> Self {
        Self {
            raw: raw.map(str::to_owned),
        }
    }

    /// First value of `name`, percent-decoded.
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        let raw = self.raw.as_deref()?;
        form_urlencoded::parse(raw.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(parts.uri.query()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_takes_first_value() {
        let query = QueryParams::new(Some("url=http%3A%2F%2Fa.test%2Fx%3Fq%3D1&url=http://b.test"));
        assert_eq!(query.get("url").as_deref(), Some("http://a.test/x?q=1"));
    }

    #[test]
    fn absent_and_empty_values() {
        assert_eq!(QueryParams::new(None).get("url"), None);
        assert_eq!(QueryParams::new(Some("other=1")).get("url"), None);
        assert_eq!(QueryParams::new(Some("url=")).get("url").as_deref(), Some(""));
        assert_eq!(QueryParams::new(Some("url")).get("url").as_deref(), Some(""));
    }

    #[test]
    fn request_ids_are_unique() {
        let request = Request::new(());
        let mut make = MakeRequestUuidV4;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
