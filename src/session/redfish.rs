//! Redfish Session Adapter
//!
//! Implements the session ports over HTTPS using Redfish session
//! authentication: a session is created on login, its `X-Auth-Token` is
//! sent with every request and the session resource is deleted on logout.

use crate::domain::ports::{Credentials, Headers, HttpResponse, SessionClient, SessionConnector};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, info, warn};

// =============================================================================
// Constants
// =============================================================================

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const SESSIONS_PATH: &str = "/SessionService/Sessions";

/// Default connect/read timeout for every request of a session
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for Redfish sessions
#[derive(Debug, Clone)]
pub struct RedfishConfig {
    /// URL scheme used to reach the BMC
    pub scheme: String,
    /// Service root prefix prepended to relative paths
    pub default_prefix: String,
    /// Timeout applied to each request
    pub timeout: Duration,
    /// BMCs ship self-signed certificates
    pub accept_invalid_certs: bool,
}

impl Default for RedfishConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            default_prefix: "/redfish/v1".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: true,
        }
    }
}

// =============================================================================
// Connector
// =============================================================================

/// Opens one Redfish session per host
#[derive(Debug, Clone, Default)]
pub struct RedfishConnector {
    config: RedfishConfig,
}

impl RedfishConnector {
    /// Create a new connector
    pub fn new(config: RedfishConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionConnector for RedfishConnector {
    async fn login(&self, host: &str, credentials: &Credentials) -> Result<Box<dyn SessionClient>> {
        let session = RedfishSession::login(&self.config, host, credentials).await?;
        Ok(Box::new(session))
    }
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated Redfish session bound to one host.
///
/// Each session owns its own HTTP client so nothing is pooled across hosts.
pub struct RedfishSession {
    host: String,
    base_url: String,
    default_prefix: String,
    client: Client,
    token: String,
    session_uri: Option<String>,
}

impl RedfishSession {
    /// Create a session on `host` with the given account
    pub async fn login(
        config: &RedfishConfig,
        host: &str,
        credentials: &Credentials,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let base_url = format!("{}://{}", config.scheme, host);
        let url = format!("{}{}{}", base_url, config.default_prefix, SESSIONS_PATH);

        debug!(host = %host, "Opening Redfish session");

        let body = serde_json::json!({
            "UserName": credentials.username,
            "Password": credentials.password,
        });

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Login {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Login {
                host: host.to_string(),
                reason: format!("session service returned {}", status.as_u16()),
            });
        }

        let token = header_value(&response, AUTH_TOKEN_HEADER).ok_or_else(|| Error::Login {
            host: host.to_string(),
            reason: format!("no {} in session response", AUTH_TOKEN_HEADER),
        })?;
        let session_uri = header_value(&response, reqwest::header::LOCATION.as_str());

        info!(host = %host, "Redfish session established");

        Ok(Self {
            host: host.to_string(),
            base_url,
            default_prefix: config.default_prefix.clone(),
            client,
            token,
            session_uri,
        })
    }

    /// Resolve a path against the host and service root
    fn resolve(&self, path: &str) -> String {
        resolve_url(&self.base_url, &self.default_prefix, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse> {
        let url = self.resolve(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(AUTH_TOKEN_HEADER, self.token.as_str());

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| Error::Request {
            host: self.host.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();
        debug!(host = %self.host, method = %method, url = %url, status, "Redfish request complete");

        Ok(HttpResponse::new(status))
    }
}

#[async_trait]
impl SessionClient for RedfishSession {
    async fn get(&self, path: &str, headers: &Headers) -> Result<HttpResponse> {
        self.send(Method::GET, path, headers, None).await
    }

    async fn post(
        &self,
        path: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.send(Method::POST, path, headers, Some(body)).await
    }

    async fn patch(
        &self,
        path: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.send(Method::PATCH, path, headers, Some(body)).await
    }

    async fn delete(&self, path: &str, headers: &Headers) -> Result<HttpResponse> {
        self.send(Method::DELETE, path, headers, None).await
    }

    async fn logout(&self) {
        let Some(uri) = self.session_uri.as_deref() else {
            debug!(host = %self.host, "No session resource to delete");
            return;
        };

        match self.delete(uri, &Headers::new()).await {
            Ok(response) if response.status < 300 => {
                debug!(host = %self.host, "Redfish session closed");
            }
            Ok(response) => {
                warn!(host = %self.host, status = response.status, "Session logout rejected");
            }
            Err(e) => {
                warn!(host = %self.host, error = %e, "Session logout failed");
            }
        }
    }

    fn host(&self) -> &str {
        &self.host
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Absolute URLs pass through, rooted paths hang off the host and anything
/// else is taken relative to the service root.
fn resolve_url(base_url: &str, default_prefix: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}{}/{}", base_url, default_prefix, path)
    }
}
