use serde::{Deserialize, Serialize};

use super::{dispatch, matched_keywords, record, to_strings};
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{Finding, ResponseInfo, ServiceOutcome, Severity, TargetService, VulnType};

const PROBE_ENDPOINTS: &[&str] = &[
    "/api/v1/nonexistent",
    "/api/v1/users/999999",
    "/api/v1/admin/config",
    "/actuator/env",
    "/actuator/configprops",
];

const DISCLOSURE_KEYWORDS: &[&str] = &[
    "password",
    "secret",
    "key",
    "token",
    "database",
    "connection",
    "jdbc",
    "username",
    "config",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoDisclosureCatalog {
    pub endpoints: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for InfoDisclosureCatalog {
    fn default() -> Self {
        Self {
            endpoints: to_strings(PROBE_ENDPOINTS),
            keywords: to_strings(DISCLOSURE_KEYWORDS),
        }
    }
}

/// Keywords leaked by a non-404 response; empty means no finding.
pub fn classify<'a>(response: &ResponseInfo, keywords: &'a [String]) -> Vec<&'a str> {
    if response.status == 404 {
        return Vec::new();
    }
    matched_keywords(&response.body_lowercase(), keywords)
}

pub async fn scan_service(
    client: &HttpClient,
    service: &TargetService,
    catalog: &InfoDisclosureCatalog,
) -> ServiceOutcome {
    let mut outcome = ServiceOutcome::default();

    for endpoint in &catalog.endpoints {
        let request = ProbeRequest::get(service.url(endpoint));
        let Some(response) = dispatch(client, service, &request).await else {
            continue;
        };

        let found = classify(&response, &catalog.keywords);
        if !found.is_empty() {
            record(
                &mut outcome,
                Finding::new(
                    Severity::Medium,
                    &service.name,
                    VulnType::InformationDisclosure,
                    format!("Sensitive information exposed in {}", endpoint),
                    format!("Found keywords: {}", found.join(", ")),
                    "Remove sensitive information from error messages and responses",
                ),
            );
        }
    }

    outcome
}
