//! Static service records.
//!
//! `/` describes the gateway and its endpoints; `/health` is a liveness
//! probe. Neither has failure modes.

pub mod descriptor;
pub mod health;

pub use descriptor::RootRecord;
pub use health::HealthRecord;
