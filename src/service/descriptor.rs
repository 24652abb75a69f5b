//! Service descriptor served at `/`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;

pub const HEALTH_PATH: &str = "/health";
pub const PROXY_PATH: &str = "/api/proxy";

/// Service descriptor returned by `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootRecord {
    pub service: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

impl RootRecord {
    pub fn new(service: &ServiceConfig) -> Self {
        let endpoints = BTreeMap::from([
            ("health".to_string(), HEALTH_PATH.to_string()),
            ("proxy".to_string(), format!("{PROXY_PATH}?url=<target_url>")),
        ]);

        Self {
            service: service.name.clone(),
            version: service.version.clone(),
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_both_endpoints() {
        let record = RootRecord::new(&ServiceConfig::default());
        assert_eq!(record.service, "API Gateway Service");
        assert_eq!(record.version, "1.0.0");
        assert_eq!(record.endpoints["health"], "/health");
        assert_eq!(record.endpoints["proxy"], "/api/proxy?url=<target_url>");
    }
}
