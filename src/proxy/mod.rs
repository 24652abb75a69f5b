//! Single-hop proxy subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/proxy?url=<target>
//!     → handler.rs (validate target)
//!     → fetcher.rs (GET target, follow redirects, buffer body)
//!     → outcome.rs (MissingParameter | FetchFailed | ReadFailed | Relayed)
//!     → IntoResponse (JSON error or verbatim relay)
//! ```
//!
//! # Design Decisions
//! - Only the target string crosses from the inbound request to the outbound one
//! - No retries; every failure is terminal and maps to one status code
//! - The core never logs; the HTTP layer records outcomes

pub mod fetcher;
pub mod handler;
pub mod outcome;

pub use fetcher::{FetchError, Fetched, Fetcher};
pub use handler::forward;
pub use outcome::ProxyOutcome;
