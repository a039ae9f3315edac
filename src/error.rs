use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("service '{0}' is not configured")]
    ServiceNotConfigured(String),

    #[error("login request failed: {0}")]
    Transport(String),

    #[error("login rejected with status {0}")]
    Rejected(u16),

    #[error("login response did not contain an accessToken")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, ScanError>;
