use serde::{Deserialize, Serialize};

/// Service names and ports of the registry deployment, in scan order.
pub const DEFAULT_SERVICES: &[(&str, u16)] = &[
    ("registration", 8080),
    ("data_management", 8081),
    ("eligibility", 8082),
    ("interoperability", 8083),
    ("payment", 8084),
    ("grievance", 8085),
    ("analytics", 8086),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetService {
    pub name: String,
    pub base_url: String,
}

impl TargetService {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name: name.into(),
            base_url,
        }
    }

    /// Builds the default seven-service layout as `{base_url}:{port}`.
    pub fn defaults_for(base_url: &str) -> Vec<Self> {
        let base = base_url.trim_end_matches('/');
        DEFAULT_SERVICES
            .iter()
            .map(|(name, port)| Self::new(*name, format!("{}:{}", base, port)))
            .collect()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
