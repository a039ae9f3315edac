mod common;

use std::time::Duration;

use regprobe::models::{ProbeKind, ServiceStatus};
use regprobe::{Scanner, Severity, VulnType};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{DEAD_SERVICE, config_for};

const SCRIPT: &str = r#"<script>alert("XSS")</script>"#;

#[tokio::test]
async fn test_sql_error_records_one_critical_and_short_circuits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("sql syntax error"))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("registration", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::SqlInjection).await;

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(finding.vuln_type, VulnType::SqlInjection);
    assert_eq!(finding.service, "registration");
    assert_eq!(finding.description, "SQL injection vulnerability in /api/v1/search");
    assert!(finding.evidence.starts_with("Payload: ' OR '1'='1"));

    let tally = outcome.result.tally("registration").unwrap();
    assert_eq!(tally.count, 1);
    assert_eq!(tally.status, ServiceStatus::Vulnerable);
}

#[tokio::test]
async fn test_sql_injection_counts_each_test_case() {
    let server = MockServer::start().await;

    for endpoint in ["/api/v1/search", "/api/v1/users"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("SQLite error: near \"'\": syntax"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let scanner = Scanner::new(config_for(&[("analytics", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::SqlInjection).await;

    assert_eq!(outcome.findings.len(), 2);
    assert_eq!(outcome.result.tally("analytics").unwrap().count, 2);
}

#[tokio::test]
async fn test_sql_payload_sent_as_query_param() {
    let server = MockServer::start().await;

    let scanner = Scanner::new(config_for(&[("registration", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::SqlInjection).await;
    assert!(outcome.findings.is_empty());

    let requests = server.received_requests().await.unwrap();
    // 3 test cases x 5 payloads, nothing short-circuits.
    assert_eq!(requests.len(), 15);
    let first = &requests[0];
    assert_eq!(first.url.path(), "/api/v1/search");
    let (key, value) = first.url.query_pairs().next().unwrap();
    assert_eq!(key, "query");
    assert_eq!(value, "' OR '1'='1");
}

#[tokio::test]
async fn test_reflected_script_records_one_high() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/grievances"))
        .respond_with(ResponseTemplate::new(201).set_body_string(SCRIPT))
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("grievance", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::XssVulnerabilities).await;

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.severity, Severity::High);
    assert_eq!(finding.vuln_type, VulnType::CrossSiteScripting);
    assert_eq!(finding.description, "XSS vulnerability in /api/v1/grievances");
}

#[tokio::test]
async fn test_escaped_script_records_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/grievances"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string("&lt;script&gt;alert(&quot;XSS&quot;)&lt;/script&gt;"),
        )
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("grievance", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::XssVulnerabilities).await;

    assert!(outcome.findings.is_empty());
    assert_eq!(
        outcome.result.tally("grievance").unwrap().status,
        ServiceStatus::Secure
    );
}

#[tokio::test]
async fn test_negative_income_accepted_is_high() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/eligibility/assessments"))
        .and(body_partial_json(json!({"monthlyIncome": -50000})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("eligibility", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::BusinessLogicFlaws).await;

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.severity, Severity::High);
    assert_eq!(finding.vuln_type, VulnType::BusinessLogicBypass);
    assert_eq!(finding.evidence, "Negative income (-50000) was accepted: 201");
}

#[tokio::test]
async fn test_negative_income_rejected_is_clean() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/eligibility/assessments"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("eligibility", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::BusinessLogicFlaws).await;

    assert!(outcome.findings.is_empty());
}

#[tokio::test]
async fn test_business_rules_only_target_their_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("grievance", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::BusinessLogicFlaws).await;

    assert!(outcome.findings.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_auth_bypass_requests_carry_no_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actuator/env"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"spring.datasource.password":"******"}"#),
        )
        .mount(&server)
        .await;

    let scanner = Scanner::new(
        config_for(&[("payment", server.uri().as_str())]),
        Some("test-token".to_string()),
    )
    .unwrap();
    let outcome = scanner.run_probe(ProbeKind::AuthenticationBypass).await;

    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.findings[0].severity, Severity::High);
    assert_eq!(outcome.findings[0].vuln_type, VulnType::SensitiveDataExposure);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    assert!(requests.iter().all(|r| !r.headers.contains_key("authorization")));
}

#[tokio::test]
async fn test_injection_requests_carry_token() {
    let server = MockServer::start().await;

    let scanner = Scanner::new(
        config_for(&[("payment", server.uri().as_str())]),
        Some("test-token".to_string()),
    )
    .unwrap();
    scanner.run_probe(ProbeKind::SqlInjection).await;

    let requests = server.received_requests().await.unwrap();
    assert!(!requests.is_empty());
    for request in requests {
        let auth = request.headers.get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer test-token");
    }
}

#[tokio::test]
async fn test_disclosure_lists_keywords_and_ignores_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/999999"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Could not get JDBC Connection; database unavailable"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/nonexistent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no config for path"))
        .mount(&server)
        .await;

    let scanner = Scanner::new(config_for(&[("interoperability", server.uri().as_str())]), None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::InformationDisclosure).await;

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.severity, Severity::Medium);
    assert_eq!(finding.description, "Sensitive information exposed in /api/v1/users/999999");
    assert_eq!(finding.evidence, "Found keywords: database, connection, jdbc");
}

#[tokio::test]
async fn test_unreachable_service_does_not_stop_others() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/households/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("PostgreSQL error"))
        .mount(&server)
        .await;

    let config = config_for(&[("registration", DEAD_SERVICE), ("data_management", server.uri().as_str())]);
    let scanner = Scanner::new(config, None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::SqlInjection).await;

    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.findings[0].service, "data_management");
    assert_eq!(outcome.result.tally("registration").unwrap().count, 0);
    assert_eq!(outcome.result.tally("data_management").unwrap().count, 1);
}

#[tokio::test]
async fn test_timed_out_request_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actuator/env"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("password=hunter2")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actuator/configprops"))
        .respond_with(ResponseTemplate::new(200).set_body_string("jdbc:postgresql://db"))
        .mount(&server)
        .await;

    let mut config = config_for(&[("registration", server.uri().as_str())]);
    config.timeout_secs = 1;
    let scanner = Scanner::new(config, None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::InformationDisclosure).await;

    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(
        outcome.findings[0].description,
        "Sensitive information exposed in /actuator/configprops"
    );
}

#[tokio::test]
async fn test_parallel_services_keep_service_order() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    for server in [&first, &second] {
        Mock::given(method("GET"))
            .and(path("/api/v1/admin/config"))
            .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
            .mount(server)
            .await;
    }

    let mut config = config_for(&[("payment", first.uri().as_str()), ("grievance", second.uri().as_str())]);
    config.concurrency = 2;
    let scanner = Scanner::new(config, None).unwrap();
    let outcome = scanner.run_probe(ProbeKind::InformationDisclosure).await;

    let services: Vec<&str> = outcome.findings.iter().map(|f| f.service.as_str()).collect();
    assert_eq!(services, vec!["payment", "grievance"]);
    assert_eq!(outcome.result.services[0].service, "payment");
    assert_eq!(outcome.result.services[1].service, "grievance");
}
