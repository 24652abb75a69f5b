//! Liveness payload served at `/health`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;

pub const HEALTHY: &str = "healthy";

/// Liveness payload returned by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub status: String,
    /// RFC 3339, UTC, whole seconds.
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

impl HealthRecord {
    /// Snapshot taken now.
    pub fn now(service: &ServiceConfig) -> Self {
        Self::at(service, Utc::now())
    }

    pub fn at(service: &ServiceConfig, when: DateTime<Utc>) -> Self {
        Self {
            status: HEALTHY.to_string(),
            timestamp: when.to_rfc3339_opts(SecondsFormat::Secs, true),
            service: service.id.clone(),
            version: service.version.clone(),
        }
    }
}
