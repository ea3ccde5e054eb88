//! Domain Ports - Core trait definitions for qc-raid
//!
//! These traits define the boundary between the dispatch logic and the
//! management controller of each host. The Redfish adapter implements them
//! over HTTPS; tests implement them in memory.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

// =============================================================================
// Credentials
// =============================================================================

/// BMC account used for every host in a run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "admin")
    }
}

// =============================================================================
// HTTP Types
// =============================================================================

/// Extra headers attached to a single request
pub type Headers = BTreeMap<String, String>;

/// Response from a management request. Only the status code is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

// =============================================================================
// Session Ports
// =============================================================================

/// An authenticated session against one host's management controller
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Perform a GET request
    async fn get(&self, path: &str, headers: &Headers) -> Result<HttpResponse>;

    /// Perform a POST request with a JSON body
    async fn post(
        &self,
        path: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;

    /// Perform a PATCH request with a JSON body
    async fn patch(
        &self,
        path: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;

    /// Perform a DELETE request
    async fn delete(&self, path: &str, headers: &Headers) -> Result<HttpResponse>;

    /// Close the session. Failures are not reported to the caller.
    async fn logout(&self);

    /// Host this session is bound to
    fn host(&self) -> &str;
}

/// Opens sessions. One fresh session is opened per host per task.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn login(&self, host: &str, credentials: &Credentials) -> Result<Box<dyn SessionClient>>;
}
