#![allow(dead_code)]

use regprobe::{ScanConfig, TargetService};

/// A port nothing listens on; connections are refused immediately.
pub const DEAD_SERVICE: &str = "http://127.0.0.1:1";

pub fn config_for(services: &[(&str, &str)]) -> ScanConfig {
    ScanConfig {
        services: services
            .iter()
            .map(|(name, url)| TargetService::new(*name, *url))
            .collect(),
        timeout_secs: 5,
        auth_timeout_secs: 5,
        ..ScanConfig::default()
    }
}
