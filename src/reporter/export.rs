use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::models::{ScanSummary, SecurityStatus};

pub const TESTER: &str = "DSR Penetration Testing Suite";
pub const TARGET_SYSTEM: &str = "Dynamic Social Registry (DSR) v3.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tester: String,
    pub version: String,
    pub target_system: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub test_duration_seconds: f64,
    pub services_tested: usize,
    pub total_vulnerabilities: usize,
    pub overall_security_status: SecurityStatus,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PentestReport {
    pub report_metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    pub detailed_results: ScanSummary,
}

impl PentestReport {
    pub fn new(summary: ScanSummary) -> Self {
        let status = summary.overall_security_status;
        Self {
            report_metadata: ReportMetadata {
                generated_at: Utc::now(),
                tester: TESTER.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                target_system: TARGET_SYSTEM.to_string(),
            },
            executive_summary: ExecutiveSummary {
                test_duration_seconds: summary.test_duration,
                services_tested: summary.services_tested,
                total_vulnerabilities: summary.total_vulnerabilities,
                overall_security_status: status,
                recommendation: status.recommendation().to_string(),
            },
            detailed_results: summary,
        }
    }
}

pub struct JsonExporter;

impl JsonExporter {
    pub fn render(report: &PentestReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn export(report: &PentestReport, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = Self::render(report)?;
        fs::write(path, json).map_err(|source| ScanError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
