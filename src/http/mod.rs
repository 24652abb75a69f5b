//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, query lookup)
//!     → handler: service records or proxy core
//!     → response.rs (JSON error records)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, QueryParams, X_REQUEST_ID};
pub use response::ErrorRecord;
pub use server::{AppState, HttpServer};
