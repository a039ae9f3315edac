use reqwest::{Client, Method, RequestBuilder};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::models::{HttpMethod, ResponseInfo};

/// One probe request. `authenticated` requests carry the JSON content type
/// and, when a token is held, the bearer header.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub authenticated: bool,
}

impl ProbeRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            authenticated: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Post, url).with_body(body)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn full_url(&self) -> String {
        format!("{}{}", self.url, Self::query_string(&self.query))
    }

    fn query_string(params: &[(String, String)]) -> String {
        let pairs: Vec<String> = params
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    urlencoding::encode(k).to_string()
                } else {
                    format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                }
            })
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

pub struct HttpClient {
    client: Client,
    bearer_token: Option<String>,
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(false)
            .build()?;

        Ok(Self {
            client,
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn has_token(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Never fails; transport errors come back as `ResponseInfo::error`.
    pub async fn send(&self, probe: &ProbeRequest) -> ResponseInfo {
        let start = Instant::now();
        let url = probe.full_url();

        let method = Self::to_reqwest_method(probe.method);
        let mut request = self.client.request(method, &url);

        if probe.authenticated {
            request = request.header("Content-Type", "application/json");
            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }
        }

        if probe.method.requires_body() {
            if let Some(body) = &probe.body {
                request = request.json(body);
            }
        }

        self.execute_request(request, start).await
    }

    async fn execute_request(&self, request: RequestBuilder, start: Instant) -> ResponseInfo {
        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let headers: HashMap<String, String> = response
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                    .collect();

                let bytes = match response.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => return Self::failed(e, start),
                };
                let body = String::from_utf8_lossy(&bytes).into_owned();
                let duration_ms = start.elapsed().as_millis() as u64;

                let mut info = ResponseInfo::new(status, body, duration_ms);
                info.headers = headers;
                info
            }
            Err(e) => Self::failed(e, start),
        }
    }

    fn failed(e: reqwest::Error, start: Instant) -> ResponseInfo {
        let mut info = ResponseInfo::error(e.to_string());
        info.duration_ms = start.elapsed().as_millis() as u64;
        info
    }

    fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_encodes_payload() {
        let request = ProbeRequest::get("http://localhost:8080/api/v1/search")
            .with_query("query", "' OR '1'='1");
        assert_eq!(
            request.full_url(),
            "http://localhost:8080/api/v1/search?query=%27%20OR%20%271%27%3D%271"
        );
    }

    #[test]
    fn test_no_query() {
        let request = ProbeRequest::get("http://localhost:8080/actuator/env");
        assert_eq!(request.full_url(), "http://localhost:8080/actuator/env");
        assert!(!request.authenticated);
    }

    #[test]
    fn test_post_builder() {
        let request = ProbeRequest::post("http://x/api", json!({"a": 1})).authenticated();
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.authenticated);
        assert_eq!(request.body, Some(json!({"a": 1})));
    }
}
