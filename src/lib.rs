pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod probes;
pub mod reporter;
pub mod scanner;

pub use auth::{Authenticator, Credentials};
pub use config::{ProbeCatalog, ScanConfig};
pub use error::{AuthError, ScanError};
pub use models::{
    Finding, ProbeKind, ScanSummary, SecurityStatus, Severity, TargetService, VulnType,
};
pub use reporter::{ConsoleReporter, JsonExporter, PentestReport};
pub use scanner::Scanner;
