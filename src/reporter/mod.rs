mod console;
mod export;

pub use console::ConsoleReporter;
pub use export::{ExecutiveSummary, JsonExporter, PentestReport, ReportMetadata};
