use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use regprobe::cli::Cli;
use regprobe::{
    Authenticator, ConsoleReporter, Credentials, JsonExporter, PentestReport, ProbeKind,
    ScanConfig, Scanner,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let probes = parse_probes(cli.probes.as_deref())?;

    let token = if cli.skip_auth {
        None
    } else {
        let authenticator =
            Authenticator::new(&config).context("Failed to create authentication client")?;
        let credentials = Credentials::new(&cli.auth_email, &cli.auth_password);
        let token = authenticator.try_login(&credentials).await;
        if token.is_none() {
            println!(
                "{}",
                "Authentication failed. Some tests may not run properly.".yellow()
            );
        }
        token
    };

    let scanner = Scanner::new(config, token)
        .context("Failed to create HTTP client")?
        .with_probes(&probes)
        .with_progress(std::io::stderr().is_terminal());

    println!("{}", "Starting DSR Penetration Testing Suite...".bold());
    println!("Target services: {}", scanner.services().len());
    println!(
        "Authentication: {}",
        if scanner.is_authenticated() {
            "Enabled".green()
        } else {
            "Disabled".red()
        }
    );

    let summary = scanner.run().await;
    let report = PentestReport::new(summary);

    let output = cli.output.unwrap_or_else(default_output_path);
    JsonExporter::export(&report, &output)
        .with_context(|| format!("Failed to save report to {}", output))?;
    println!("Report saved to: {}", output.cyan());

    let reporter = ConsoleReporter::new();
    reporter.print_matrix(&report.detailed_results);
    if cli.verbose {
        reporter.print_details(&report.detailed_results);
    }
    reporter.print_summary(&report.detailed_results);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    }
    .with_base_url(&cli.base_url);

    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(timeout) = cli.auth_timeout {
        config.auth_timeout_secs = timeout;
    }

    Ok(config)
}

fn parse_probes(input: Option<&str>) -> Result<Vec<ProbeKind>> {
    let Some(input) = input else {
        return Ok(ProbeKind::ALL.to_vec());
    };

    let mut probes = Vec::new();
    for part in input.split(',').filter(|p| !p.trim().is_empty()) {
        match ProbeKind::parse(part) {
            Some(probe) => probes.push(probe),
            None => bail!(
                "Unknown probe '{}'. Supported: {}",
                part.trim(),
                ProbeKind::ALL.map(|p| p.key()).join(", ")
            ),
        }
    }

    if probes.is_empty() {
        bail!("No probes selected");
    }
    Ok(probes)
}

fn default_output_path() -> String {
    format!(
        "dsr_pentest_report_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}
