//! API Gateway Library
//!
//! A small HTTP gateway built with Tokio and Axum: a service descriptor at
//! `/`, a liveness probe at `/health`, and a single-hop proxy at
//! `/api/proxy?url=<target_url>` that relays the target's status code,
//! content type and body verbatim.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http::server (router, request ID, tracing) │
//!                             │        │                 │                   │
//!                             │        ▼                 ▼                   │
//!                             │   service (/, /health)  proxy::handler       │
//!                             │                          │                   │
//!                             │                          ▼                   │
//!     Client Response         │                     proxy::fetcher ─────────┼──▶ Origin
//!     ◀───────────────────────┼── proxy::outcome ◀───────┘                   │
//!                             │                                              │
//!                             │  config · observability · lifecycle · error  │
//!                             └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod service;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
