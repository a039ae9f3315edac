use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{dispatch, record};
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{
    Finding, HttpMethod, ResponseInfo, ServiceOutcome, Severity, TargetService, VulnType,
};

/// A single out-of-range submission the target service must reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRule {
    pub service: String,
    pub endpoint: String,
    #[serde(default = "default_rule_method")]
    pub method: HttpMethod,
    pub body: serde_json::Value,
    pub severity: Severity,
    pub description: String,
    pub evidence: String,
    pub recommendation: String,
}

fn default_rule_method() -> HttpMethod {
    HttpMethod::Post
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessLogicCatalog {
    pub rules: Vec<BusinessRule>,
}

impl Default for BusinessLogicCatalog {
    fn default() -> Self {
        Self {
            rules: vec![
                BusinessRule {
                    service: "eligibility".to_string(),
                    endpoint: "/api/v1/eligibility/assessments".to_string(),
                    method: HttpMethod::Post,
                    body: json!({
                        "householdId": "HH-TEST-123",
                        "monthlyIncome": -50000,
                        "assessmentType": "FULL_ASSESSMENT"
                    }),
                    severity: Severity::High,
                    description: "Negative income values accepted in eligibility assessment"
                        .to_string(),
                    evidence: "Negative income (-50000) was accepted".to_string(),
                    recommendation: "Implement server-side business rule validation".to_string(),
                },
                BusinessRule {
                    service: "payment".to_string(),
                    endpoint: "/api/v1/payments".to_string(),
                    method: HttpMethod::Post,
                    body: json!({
                        "beneficiaryId": "BEN-TEST-123",
                        "amount": 999999999,
                        "programId": "PANTAWID"
                    }),
                    severity: Severity::Critical,
                    description: "Unrealistic payment amounts accepted".to_string(),
                    evidence: "Large payment amount (999999999) was accepted".to_string(),
                    recommendation: "Implement payment amount limits and validation".to_string(),
                },
            ],
        }
    }
}

impl BusinessLogicCatalog {
    pub fn rules_for<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a BusinessRule> {
        self.rules.iter().filter(move |r| r.service == service)
    }
}

/// The service accepted a value it should have refused.
pub fn classify(response: &ResponseInfo) -> bool {
    response.is_accepted()
}

pub async fn scan_service(
    client: &HttpClient,
    service: &TargetService,
    catalog: &BusinessLogicCatalog,
) -> ServiceOutcome {
    let mut outcome = ServiceOutcome::default();

    for rule in catalog.rules_for(&service.name) {
        let request = ProbeRequest::new(rule.method, service.url(&rule.endpoint))
            .with_body(rule.body.clone())
            .authenticated();
        let Some(response) = dispatch(client, service, &request).await else {
            continue;
        };

        if classify(&response) {
            record(
                &mut outcome,
                Finding::new(
                    rule.severity,
                    &service.name,
                    VulnType::BusinessLogicBypass,
                    rule.description.as_str(),
                    format!("{}: {}", rule.evidence, response.status),
                    rule.recommendation.as_str(),
                ),
            );
        }
    }

    outcome
}
