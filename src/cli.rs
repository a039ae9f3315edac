use clap::Parser;

use crate::config::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "regprobe")]
#[command(version, about = "Black-box penetration tests for the DSR microservices")]
pub struct Cli {
    /// Host the seven services run on; ports 8080-8086 are appended
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Report path, defaults to dsr_pentest_report_<timestamp>.json
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, default_value = "security.tester@dsr.gov.ph")]
    pub auth_email: String,

    #[arg(long, default_value = "SecureTestPassword123!")]
    pub auth_password: String,

    /// Do not attempt to log in; every probe runs unauthenticated
    #[arg(long)]
    pub skip_auth: bool,

    /// JSON file overriding services, timeouts and probe tables
    #[arg(long)]
    pub config: Option<String>,

    /// Comma-separated probes to run, e.g. sql_injection,xss_vulnerabilities
    #[arg(long)]
    pub probes: Option<String>,

    /// Services probed in parallel
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout for probes, in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Timeout for the login request, in seconds
    #[arg(long)]
    pub auth_timeout: Option<u64>,

    #[arg(short, long)]
    pub verbose: bool,
}
