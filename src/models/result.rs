use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{Finding, Severity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub status: u16,
    pub size: usize,
    pub body: String,
    pub headers: HashMap<String, String>,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl ResponseInfo {
    pub fn new(status: u16, body: String, duration_ms: u64) -> Self {
        Self {
            status,
            size: body.len(),
            body,
            headers: HashMap::new(),
            duration_ms,
            error: None,
        }
    }

    pub fn error(err: String) -> Self {
        Self {
            status: 0,
            size: 0,
            body: String::new(),
            headers: HashMap::new(),
            duration_ms: 0,
            error: Some(err),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// 200 OK or 201 Created, the two statuses treated as "request accepted".
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    pub fn body_lowercase(&self) -> String {
        self.body.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    AuthenticationBypass,
    SqlInjection,
    XssVulnerabilities,
    BusinessLogicFlaws,
    InformationDisclosure,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 5] = [
        ProbeKind::AuthenticationBypass,
        ProbeKind::SqlInjection,
        ProbeKind::XssVulnerabilities,
        ProbeKind::BusinessLogicFlaws,
        ProbeKind::InformationDisclosure,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProbeKind::AuthenticationBypass => "authentication_bypass",
            ProbeKind::SqlInjection => "sql_injection",
            ProbeKind::XssVulnerabilities => "xss_vulnerabilities",
            ProbeKind::BusinessLogicFlaws => "business_logic_flaws",
            ProbeKind::InformationDisclosure => "information_disclosure",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s.trim().to_lowercase())
    }

    /// Name of the per-service counter in the detailed report.
    pub fn counter_key(&self) -> &'static str {
        match self {
            ProbeKind::AuthenticationBypass => "bypass_attempts",
            ProbeKind::SqlInjection => "vulnerable_endpoints",
            ProbeKind::XssVulnerabilities => "vulnerable_fields",
            ProbeKind::BusinessLogicFlaws => "logic_flaws",
            ProbeKind::InformationDisclosure => "disclosure_issues",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeKind::AuthenticationBypass => "Authentication Bypass",
            ProbeKind::SqlInjection => "SQL Injection",
            ProbeKind::XssVulnerabilities => "XSS Vulnerabilities",
            ProbeKind::BusinessLogicFlaws => "Business Logic Flaws",
            ProbeKind::InformationDisclosure => "Information Disclosure",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    Vulnerable,
    Secure,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Vulnerable => write!(f, "VULNERABLE"),
            ServiceStatus::Secure => write!(f, "SECURE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTally {
    pub service: String,
    pub count: usize,
    pub status: ServiceStatus,
}

impl ServiceTally {
    pub fn new(service: impl Into<String>, count: usize) -> Self {
        let status = if count > 0 {
            ServiceStatus::Vulnerable
        } else {
            ServiceStatus::Secure
        };
        Self {
            service: service.into(),
            count,
            status,
        }
    }
}

/// Findings of one service for one probe.
#[derive(Debug, Clone, Default)]
pub struct ServiceOutcome {
    pub count: usize,
    pub findings: Vec<Finding>,
}

impl ServiceOutcome {
    pub fn record(&mut self, finding: Finding) {
        self.count += 1;
        self.findings.push(finding);
    }
}

/// Per-service tallies of one probe pass.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub probe: ProbeKind,
    pub services: Vec<ServiceTally>,
}

impl ProbeResult {
    pub fn tally(&self, service: &str) -> Option<&ServiceTally> {
        self.services.iter().find(|t| t.service == service)
    }
}

impl Serialize for ProbeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.services.len()))?;
        for tally in &self.services {
            map.serialize_entry(
                &tally.service,
                &TallyEntry {
                    counter: self.probe.counter_key(),
                    tally,
                },
            )?;
        }
        map.end()
    }
}

struct TallyEntry<'a> {
    counter: &'static str,
    tally: &'a ServiceTally,
}

impl Serialize for TallyEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.counter, &self.tally.count)?;
        map.serialize_entry("status", &self.tally.status)?;
        map.end()
    }
}

/// Tallies plus findings, as returned by a probe before aggregation.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub result: ProbeResult,
    pub findings: Vec<Finding>,
}

impl ProbeOutcome {
    pub fn new(probe: ProbeKind) -> Self {
        Self {
            result: ProbeResult {
                probe,
                services: Vec::new(),
            },
            findings: Vec::new(),
        }
    }

    pub fn push_service(&mut self, service: &str, outcome: ServiceOutcome) {
        self.result
            .services
            .push(ServiceTally::new(service, outcome.count));
        self.findings.extend(outcome.findings);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityBreakdown {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut breakdown = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Critical => breakdown.critical += 1,
                Severity::High => breakdown.high += 1,
                Severity::Medium => breakdown.medium += 1,
                Severity::Low => breakdown.low += 1,
            }
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityStatus {
    CriticalRisk,
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl SecurityStatus {
    pub fn from_breakdown(breakdown: &SeverityBreakdown) -> Self {
        if breakdown.critical > 0 {
            SecurityStatus::CriticalRisk
        } else if breakdown.high > 3 {
            SecurityStatus::HighRisk
        } else if breakdown.high > 0 {
            SecurityStatus::MediumRisk
        } else {
            SecurityStatus::LowRisk
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            SecurityStatus::CriticalRisk => {
                "IMMEDIATE ACTION REQUIRED - Do not deploy to production"
            }
            SecurityStatus::HighRisk => {
                "Address high-severity vulnerabilities before production deployment"
            }
            SecurityStatus::MediumRisk => {
                "Review and address vulnerabilities, acceptable for production with monitoring"
            }
            SecurityStatus::LowRisk => {
                "System is secure for production deployment with standard monitoring"
            }
        }
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecurityStatus::CriticalRisk => "CRITICAL_RISK",
            SecurityStatus::HighRisk => "HIGH_RISK",
            SecurityStatus::MediumRisk => "MEDIUM_RISK",
            SecurityStatus::LowRisk => "LOW_RISK",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub test_duration: f64,
    pub services_tested: usize,
    pub total_vulnerabilities: usize,
    pub vulnerability_breakdown: SeverityBreakdown,
    #[serde(serialize_with = "serialize_test_results")]
    pub test_results: Vec<ProbeResult>,
    pub vulnerabilities: Vec<Finding>,
    pub overall_security_status: SecurityStatus,
}

impl ScanSummary {
    /// Merges probe outcomes in the order given; finding order follows it.
    pub fn from_outcomes(
        outcomes: Vec<ProbeOutcome>,
        services_tested: usize,
        test_duration: f64,
    ) -> Self {
        let mut test_results = Vec::with_capacity(outcomes.len());
        let mut vulnerabilities = Vec::new();

        for outcome in outcomes {
            test_results.push(outcome.result);
            vulnerabilities.extend(outcome.findings);
        }

        let vulnerability_breakdown = SeverityBreakdown::from_findings(&vulnerabilities);

        Self {
            test_duration,
            services_tested,
            total_vulnerabilities: vulnerabilities.len(),
            vulnerability_breakdown,
            test_results,
            overall_security_status: SecurityStatus::from_breakdown(&vulnerability_breakdown),
            vulnerabilities,
        }
    }

    pub fn probe(&self, probe: ProbeKind) -> Option<&ProbeResult> {
        self.test_results.iter().find(|r| r.probe == probe)
    }
}

fn serialize_test_results<S: Serializer>(
    results: &[ProbeResult],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for result in results {
        map.serialize_entry(result.probe.key(), result)?;
    }
    map.end()
}
