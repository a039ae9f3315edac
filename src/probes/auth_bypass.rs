use serde::{Deserialize, Serialize};

use super::{dispatch, matched_keywords, record, to_strings};
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{Finding, ResponseInfo, ServiceOutcome, Severity, TargetService, VulnType};

const SENSITIVE_ENDPOINTS: &[&str] = &[
    "/api/v1/health",
    "/api/v1/admin/users",
    "/api/v1/config",
    "/actuator/env",
    "/actuator/configprops",
];

const SENSITIVE_KEYWORDS: &[&str] = &["password", "secret", "key", "token"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthBypassCatalog {
    pub endpoints: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for AuthBypassCatalog {
    fn default() -> Self {
        Self {
            endpoints: to_strings(SENSITIVE_ENDPOINTS),
            keywords: to_strings(SENSITIVE_KEYWORDS),
        }
    }
}

/// 200 to an unauthenticated request whose body mentions a sensitive keyword.
pub fn classify(response: &ResponseInfo, keywords: &[String]) -> bool {
    response.status == 200 && !matched_keywords(&response.body_lowercase(), keywords).is_empty()
}

pub async fn scan_service(
    client: &HttpClient,
    service: &TargetService,
    catalog: &AuthBypassCatalog,
) -> ServiceOutcome {
    let mut outcome = ServiceOutcome::default();

    for endpoint in &catalog.endpoints {
        // Deliberately sent without credentials.
        let request = ProbeRequest::get(service.url(endpoint));
        let Some(response) = dispatch(client, service, &request).await else {
            continue;
        };

        if classify(&response, &catalog.keywords) {
            record(
                &mut outcome,
                Finding::new(
                    Severity::High,
                    &service.name,
                    VulnType::SensitiveDataExposure,
                    format!(
                        "Endpoint {} exposes sensitive information without authentication",
                        endpoint
                    ),
                    format!("Response contains sensitive keywords: {}", response.status),
                    "Implement proper authentication and data filtering",
                ),
            );
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ResponseInfo {
        ResponseInfo::new(status, body.to_string(), 5)
    }

    #[test]
    fn test_exposed_secret() {
        let catalog = AuthBypassCatalog::default();
        assert!(classify(
            &response(200, r#"{"db.PASSWORD": "hunter2"}"#),
            &catalog.keywords
        ));
    }

    #[test]
    fn test_requires_200() {
        let catalog = AuthBypassCatalog::default();
        assert!(!classify(&response(401, "token required"), &catalog.keywords));
        assert!(!classify(&response(201, "token"), &catalog.keywords));
    }

    #[test]
    fn test_clean_body() {
        let catalog = AuthBypassCatalog::default();
        assert!(!classify(&response(200, r#"{"status":"UP"}"#), &catalog.keywords));
    }
}
