//! The five probe passes. Each `scan_service` issues one request per
//! (test case, payload) pair against a single service and returns that
//! service's findings; classification lives in pure `classify` functions.
//!
//! Matching is plain case-insensitive substring search, so a keyword such as
//! `key` also matches `monkey`. Tests pin this behaviour down.

mod auth_bypass;
mod business_logic;
mod info_disclosure;
mod sql_injection;
mod xss;

pub use auth_bypass::AuthBypassCatalog;
pub use business_logic::{BusinessLogicCatalog, BusinessRule};
pub use info_disclosure::InfoDisclosureCatalog;
pub use sql_injection::{QueryTarget, SqlInjectionCatalog};
pub use xss::{FormTarget, XssCatalog};

use tracing::{debug, warn};

use crate::config::ProbeCatalog;
use crate::http::{HttpClient, ProbeRequest};
use crate::models::{Finding, ProbeKind, ResponseInfo, ServiceOutcome, TargetService};

pub async fn scan_service(
    probe: ProbeKind,
    client: &HttpClient,
    service: &TargetService,
    catalog: &ProbeCatalog,
) -> ServiceOutcome {
    match probe {
        ProbeKind::AuthenticationBypass => {
            auth_bypass::scan_service(client, service, &catalog.authentication_bypass).await
        }
        ProbeKind::SqlInjection => {
            sql_injection::scan_service(client, service, &catalog.sql_injection).await
        }
        ProbeKind::XssVulnerabilities => xss::scan_service(client, service, &catalog.xss).await,
        ProbeKind::BusinessLogicFlaws => {
            business_logic::scan_service(client, service, &catalog.business_logic).await
        }
        ProbeKind::InformationDisclosure => {
            info_disclosure::scan_service(client, service, &catalog.information_disclosure).await
        }
    }
}

/// Sends one request; a transport failure skips the triple.
async fn dispatch(
    client: &HttpClient,
    service: &TargetService,
    request: &ProbeRequest,
) -> Option<ResponseInfo> {
    let response = client.send(request).await;
    match &response.error {
        Some(err) => {
            debug!(service = %service.name, url = %request.url, error = %err, "request failed, skipping");
            None
        }
        None => Some(response),
    }
}

fn record(outcome: &mut ServiceOutcome, finding: Finding) {
    warn!(
        service = %finding.service,
        severity = %finding.severity,
        kind = %finding.vuln_type,
        "vulnerability found"
    );
    outcome.record(finding);
}

/// Keywords present in `lowercase_body`, in catalog order.
fn matched_keywords<'a>(lowercase_body: &str, keywords: &'a [String]) -> Vec<&'a str> {
    keywords
        .iter()
        .map(String::as_str)
        .filter(|kw| lowercase_body.contains(&kw.to_lowercase()))
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
