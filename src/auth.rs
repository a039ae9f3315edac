use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::config::ScanConfig;
use crate::error::{AuthError, Result};
use crate::http::{HttpClient, ProbeRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Obtains a bearer token from the registration service login endpoint.
pub struct Authenticator {
    client: HttpClient,
    login_url: Option<String>,
    service: String,
}

impl Authenticator {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let client = HttpClient::new(config.auth_timeout(), &config.user_agent)?;
        let login_url = config
            .service(&config.auth.service)
            .map(|svc| svc.url(&config.auth.login_path));

        Ok(Self {
            client,
            login_url,
            service: config.auth.service.clone(),
        })
    }

    pub async fn login(&self, credentials: &Credentials) -> std::result::Result<String, AuthError> {
        let url = self
            .login_url
            .as_ref()
            .ok_or_else(|| AuthError::ServiceNotConfigured(self.service.clone()))?;

        let request = ProbeRequest::post(
            url.as_str(),
            json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
        )
        .authenticated();

        let response = self.client.send(&request).await;
        if let Some(err) = response.error {
            return Err(AuthError::Transport(err));
        }
        if response.status != 200 {
            return Err(AuthError::Rejected(response.status));
        }

        serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| body.get("accessToken")?.as_str().map(str::to_string))
            .ok_or(AuthError::MissingToken)
    }

    /// Logs the outcome; a failed login means probing continues without a token.
    pub async fn try_login(&self, credentials: &Credentials) -> Option<String> {
        match self.login(credentials).await {
            Ok(token) => {
                info!(service = %self.service, "authentication successful");
                Some(token)
            }
            Err(e) => {
                warn!(service = %self.service, error = %e, "authentication failed, continuing unauthenticated");
                None
            }
        }
    }
}
