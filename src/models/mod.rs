mod finding;
mod method;
mod result;
mod service;

pub use finding::{Finding, Severity, VulnType};
pub use method::HttpMethod;
pub use result::{
    ProbeKind, ProbeOutcome, ProbeResult, ResponseInfo, ScanSummary, SecurityStatus,
    ServiceOutcome, ServiceStatus, ServiceTally, SeverityBreakdown,
};
pub use service::{DEFAULT_SERVICES, TargetService};
