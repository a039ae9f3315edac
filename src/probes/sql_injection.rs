use serde::{Deserialize, Serialize};

use super::{dispatch, record, to_strings};
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{Finding, ResponseInfo, ServiceOutcome, Severity, TargetService, VulnType};

const PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "'; DROP TABLE users; --",
    "' UNION SELECT version() --",
    "1' OR 1=1#",
    "admin'/**/OR/**/1=1#",
];

const ERROR_SIGNATURES: &[&str] = &[
    "sql syntax",
    "mysql",
    "postgresql",
    "ora-",
    "sqlite",
    "syntax error",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTarget {
    pub endpoint: String,
    pub param: String,
}

impl QueryTarget {
    fn new(endpoint: &str, param: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            param: param.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlInjectionCatalog {
    pub payloads: Vec<String>,
    pub test_cases: Vec<QueryTarget>,
    pub error_signatures: Vec<String>,
}

impl Default for SqlInjectionCatalog {
    fn default() -> Self {
        Self {
            payloads: to_strings(PAYLOADS),
            test_cases: vec![
                QueryTarget::new("/api/v1/search", "query"),
                QueryTarget::new("/api/v1/households/search", "name"),
                QueryTarget::new("/api/v1/users", "filter"),
            ],
            error_signatures: to_strings(ERROR_SIGNATURES),
        }
    }
}

/// Any database error signature in the body, regardless of status.
pub fn classify(response: &ResponseInfo, signatures: &[String]) -> bool {
    let body = response.body_lowercase();
    signatures
        .iter()
        .any(|sig| body.contains(&sig.to_lowercase()))
}

pub async fn scan_service(
    client: &HttpClient,
    service: &TargetService,
    catalog: &SqlInjectionCatalog,
) -> ServiceOutcome {
    let mut outcome = ServiceOutcome::default();

    for case in &catalog.test_cases {
        for payload in &catalog.payloads {
            let request = ProbeRequest::get(service.url(&case.endpoint))
                .with_query(&case.param, payload)
                .authenticated();
            let Some(response) = dispatch(client, service, &request).await else {
                continue;
            };

            if classify(&response, &catalog.error_signatures) {
                record(
                    &mut outcome,
                    Finding::new(
                        Severity::Critical,
                        &service.name,
                        VulnType::SqlInjection,
                        format!("SQL injection vulnerability in {}", case.endpoint),
                        format!("Payload: {}, Response contains SQL errors", payload),
                        "Use parameterized queries and input validation",
                    ),
                );
                // One confirmed payload is enough for this test case.
                break;
            }
        }
    }

    outcome
}
