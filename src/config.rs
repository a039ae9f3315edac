use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScanError};
use crate::models::TargetService;
use crate::probes::{
    AuthBypassCatalog, BusinessLogicCatalog, InfoDisclosureCatalog, SqlInjectionCatalog,
    XssCatalog,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_USER_AGENT: &str = "DSR-PenTest-Suite/1.0";

/// Everything a scan needs, loadable from a partial JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub services: Vec<TargetService>,
    pub timeout_secs: u64,
    pub auth_timeout_secs: u64,
    pub concurrency: usize,
    pub user_agent: String,
    pub auth: AuthSettings,
    pub probes: ProbeCatalog,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            services: Vec::new(),
            timeout_secs: 10,
            auth_timeout_secs: 30,
            concurrency: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auth: AuthSettings::default(),
            probes: ProbeCatalog::default(),
        }
    }
}

impl ScanConfig {
    pub fn for_base_url(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ScanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fills the default service layout when none was configured.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        if self.services.is_empty() {
            self.services = TargetService::defaults_for(base_url);
        }
        self
    }

    pub fn service(&self, name: &str) -> Option<&TargetService> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub service: String,
    pub login_path: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            service: "registration".to_string(),
            login_path: "/api/v1/auth/login".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeCatalog {
    pub authentication_bypass: AuthBypassCatalog,
    pub sql_injection: SqlInjectionCatalog,
    pub xss: XssCatalog,
    pub business_logic: BusinessLogicCatalog,
    pub information_disclosure: InfoDisclosureCatalog,
}
