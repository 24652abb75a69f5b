//! Outbound fetcher.
//!
//! Issues a single GET to an arbitrary URL and buffers the full response.
//! The inbound request's headers, cookies and body are never consulted.

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Failure while talking to an origin.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response head was received (DNS, connect, TLS, malformed URL, deadline).
    #[error("{}", describe(.0))]
    Send(#[source] reqwest::Error),

    /// The head arrived but the body could not be read in full.
    #[error("{}", describe(.0))]
    Read(#[source] reqwest::Error),
}

/// Render an error together with its `source()` chain, outermost first.
pub fn describe(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// The final (post-redirect) response of an origin, fully buffered.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Shared outbound HTTP client.
///
/// Connection pooling lives inside the client; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher from the upstream settings.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().redirect(Policy::limited(config.max_redirects));

        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET `url`, following redirects, and read the whole body.
    ///
    /// The response, and with it the pooled connection, is released before
    /// this returns on every path.
    pub async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        let response = self.client.get(url).send().await.map_err(FetchError::Send)?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(FetchError::Read)?;

        Ok(Fetched {
            status,
            content_type,
            body,
        })
    }
}
