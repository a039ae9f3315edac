use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn numeric_value(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VulnType {
    #[serde(rename = "Sensitive Data Exposure")]
    SensitiveDataExposure,
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "Cross-Site Scripting (XSS)")]
    CrossSiteScripting,
    #[serde(rename = "Business Logic Bypass")]
    BusinessLogicBypass,
    #[serde(rename = "Information Disclosure")]
    InformationDisclosure,
}

impl fmt::Display for VulnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VulnType::SensitiveDataExposure => "Sensitive Data Exposure",
            VulnType::SqlInjection => "SQL Injection",
            VulnType::CrossSiteScripting => "Cross-Site Scripting (XSS)",
            VulnType::BusinessLogicBypass => "Business Logic Bypass",
            VulnType::InformationDisclosure => "Information Disclosure",
        };
        write!(f, "{}", s)
    }
}

/// A single suspected vulnerability. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub timestamp: DateTime<Utc>,
    pub service: String,
    #[serde(rename = "type")]
    pub vuln_type: VulnType,
    pub severity: Severity,
    pub description: String,
    pub evidence: String,
    pub recommendation: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        service: impl Into<String>,
        vuln_type: VulnType,
        description: impl Into<String>,
        evidence: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            service: service.into(),
            vuln_type,
            severity,
            description: description.into(),
            evidence: evidence.into(),
            recommendation: recommendation.into(),
        }
    }
}
