use colored::Colorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::models::{ProbeKind, ScanSummary, SecurityStatus, ServiceStatus, Severity};

pub struct ConsoleReporter;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Auth Bypass")]
    auth_bypass: String,
    #[tabled(rename = "SQLi")]
    sql_injection: String,
    #[tabled(rename = "XSS")]
    xss: String,
    #[tabled(rename = "Logic")]
    business_logic: String,
    #[tabled(rename = "Disclosure")]
    disclosure: String,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Service × probe status grid.
    pub fn print_matrix(&self, summary: &ScanSummary) {
        let services: Vec<&str> = summary
            .test_results
            .first()
            .map(|r| r.services.iter().map(|t| t.service.as_str()).collect())
            .unwrap_or_default();

        if services.is_empty() {
            return;
        }

        let cell = |probe: ProbeKind, service: &str| -> String {
            let tally = summary.probe(probe).and_then(|r| r.tally(service));
            match tally {
                Some(t) if t.status == ServiceStatus::Vulnerable => {
                    format!("{} ({})", "VULN".red(), t.count)
                }
                Some(_) => "OK".green().to_string(),
                None => "-".to_string(),
            }
        };

        let rows: Vec<TableRow> = services
            .iter()
            .map(|&service| TableRow {
                service: service.to_string(),
                auth_bypass: cell(ProbeKind::AuthenticationBypass, service),
                sql_injection: cell(ProbeKind::SqlInjection, service),
                xss: cell(ProbeKind::XssVulnerabilities, service),
                business_logic: cell(ProbeKind::BusinessLogicFlaws, service),
                disclosure: cell(ProbeKind::InformationDisclosure, service),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("\n{}", table);
    }

    pub fn print_summary(&self, summary: &ScanSummary) {
        let breakdown = &summary.vulnerability_breakdown;
        let rule = "=".repeat(60);

        println!("\n{}", rule);
        println!("{}", "DSR PENETRATION TESTING SUMMARY".bold());
        println!("{}", rule);
        println!("Test Duration: {:.2} seconds", summary.test_duration);
        println!("Services Tested: {}", summary.services_tested);
        println!("Total Vulnerabilities: {}", summary.total_vulnerabilities);
        println!("Breakdown:");
        println!("   {}: {}", "Critical".red().bold(), breakdown.critical);
        println!("   {}: {}", "High".red(), breakdown.high);
        println!("   {}: {}", "Medium".yellow(), breakdown.medium);
        println!("   {}: {}", "Low".blue(), breakdown.low);
        println!(
            "Overall Status: {}",
            Self::status_label(summary.overall_security_status)
        );
        println!("{}", rule);
    }

    pub fn print_details(&self, summary: &ScanSummary) {
        if summary.vulnerabilities.is_empty() {
            return;
        }

        println!("\n{}", "Findings".bold().underline());

        for finding in &summary.vulnerabilities {
            println!(
                "\n[{}] {} - {}",
                Self::severity_label(finding.severity),
                finding.service.white().bold(),
                finding.vuln_type.to_string().yellow()
            );
            println!("  → {}", finding.description);
            println!("    {}: {}", "Evidence".cyan(), finding.evidence);
            println!("    {}: {}", "Fix".cyan(), finding.recommendation);
        }
    }

    fn severity_label(severity: Severity) -> String {
        match severity {
            Severity::Critical => "CRITICAL".red().bold().to_string(),
            Severity::High => "HIGH".red().to_string(),
            Severity::Medium => "MEDIUM".yellow().to_string(),
            Severity::Low => "LOW".blue().to_string(),
        }
    }

    fn status_label(status: SecurityStatus) -> String {
        let text = status.to_string();
        match status {
            SecurityStatus::CriticalRisk => text.red().bold().to_string(),
            SecurityStatus::HighRisk => text.red().to_string(),
            SecurityStatus::MediumRisk => text.yellow().to_string(),
            SecurityStatus::LowRisk => text.green().to_string(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
