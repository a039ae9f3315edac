use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{dispatch, record, to_strings};
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{
    Finding, HttpMethod, ResponseInfo, ServiceOutcome, Severity, TargetService, VulnType,
};

const PAYLOADS: &[&str] = &[
    r#"<script>alert("XSS")</script>"#,
    r#"<img src="x" onerror="alert(1)">"#,
    r#"javascript:alert("XSS")"#,
    r#"<svg onload="alert(1)">"#,
    r#""><script>alert("XSS")</script>"#,
];

const SCRIPT_MARKER: &str = "<script>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTarget {
    pub url: String,
    #[serde(default = "default_form_method")]
    pub method: HttpMethod,
    pub fields: Vec<String>,
}

fn default_form_method() -> HttpMethod {
    HttpMethod::Post
}

impl FormTarget {
    fn post(url: &str, fields: &[&str]) -> Self {
        Self {
            url: url.to_string(),
            method: HttpMethod::Post,
            fields: to_strings(fields),
        }
    }

    fn request(&self, service: &TargetService, payload: &str) -> ProbeRequest {
        let url = service.url(&self.url);
        if self.method.requires_body() {
            let body: Map<String, Value> = self
                .fields
                .iter()
                .map(|field| (field.clone(), Value::String(payload.to_string())))
                .collect();
            ProbeRequest::new(self.method, url)
                .with_body(Value::Object(body))
                .authenticated()
        } else {
            self.fields
                .iter()
                .fold(ProbeRequest::new(self.method, url), |req, field| {
                    req.with_query(field, payload)
                })
                .authenticated()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XssCatalog {
    pub payloads: Vec<String>,
    pub targets: Vec<FormTarget>,
}

impl Default for XssCatalog {
    fn default() -> Self {
        Self {
            payloads: to_strings(PAYLOADS),
            targets: vec![
                FormTarget::post("/api/v1/grievances", &["complainantName", "description"]),
                FormTarget::post("/api/v1/households", &["firstName", "lastName"]),
                FormTarget::post("/api/v1/comments", &["content", "title"]),
            ],
        }
    }
}

/// Accepted response that echoes the payload verbatim with a live `<script>`
/// tag. Compared on the raw body: an HTML-escaped echo is not a finding.
pub fn classify(response: &ResponseInfo, payload: &str) -> bool {
    response.is_accepted()
        && response.body.contains(payload)
        && response.body.contains(SCRIPT_MARKER)
}

pub async fn scan_service(
    client: &HttpClient,
    service: &TargetService,
    catalog: &XssCatalog,
) -> ServiceOutcome {
    let mut outcome = ServiceOutcome::default();

    for target in &catalog.targets {
        for payload in &catalog.payloads {
            let request = target.request(service, payload);
            let Some(response) = dispatch(client, service, &request).await else {
                continue;
            };

            if classify(&response, payload) {
                record(
                    &mut outcome,
                    Finding::new(
                        Severity::High,
                        &service.name,
                        VulnType::CrossSiteScripting,
                        format!("XSS vulnerability in {}", target.url),
                        format!("Payload reflected without encoding: {}", payload),
                        "Implement proper input validation and output encoding",
                    ),
                );
            }
        }
    }

    outcome
}
