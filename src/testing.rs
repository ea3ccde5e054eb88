//! In-memory session and reporter doubles for unit tests

use crate::dispatch::{OutcomeReporter, TaskOutcome};
use crate::domain::ports::{Credentials, Headers, HttpResponse, SessionClient, SessionConnector};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a mocked host behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Login succeeds and the POST answers with this status
    Status(u16),
    /// Login fails as if the host were unreachable
    LoginFails,
    /// Login succeeds but the POST errors
    PostFails,
    /// Login panics
    LoginPanics,
}

/// A POST seen by a mocked session
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub host: String,
    pub path: String,
    pub headers: Headers,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct MockState {
    logins: Mutex<Vec<String>>,
    posts: Mutex<Vec<RecordedPost>>,
    logouts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub struct MockConnector {
    default: MockBehavior,
    hosts: HashMap<String, MockBehavior>,
    delay: Duration,
    logout_delay: Duration,
    state: Arc<MockState>,
}

impl MockConnector {
    pub fn new(default: MockBehavior) -> Self {
        Self {
            default,
            hosts: HashMap::new(),
            delay: Duration::ZERO,
            logout_delay: Duration::ZERO,
            state: Arc::new(MockState::default()),
        }
    }

    pub fn with_host(mut self, host: &str, behavior: MockBehavior) -> Self {
        self.hosts.insert(host.to_string(), behavior);
        self
    }

    /// Make every POST take this long
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every logout stall this long
    pub fn with_logout_delay(mut self, delay: Duration) -> Self {
        self.logout_delay = delay;
        self
    }

    /// Hosts a login was attempted for, in attempt order
    pub fn logins(&self) -> Vec<String> {
        self.state.logins.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.state.posts.lock().unwrap().clone()
    }

    pub fn logouts(&self) -> usize {
        self.state.logouts.load(Ordering::SeqCst)
    }

    /// Highest number of sessions open at the same time
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionConnector for MockConnector {
    async fn login(&self, host: &str, credentials: &Credentials) -> Result<Box<dyn SessionClient>> {
        self.state.logins.lock().unwrap().push(host.to_string());

        let behavior = self.hosts.get(host).copied().unwrap_or(self.default);
        if behavior == MockBehavior::LoginPanics {
            panic!("login to {} panicked", host);
        }
        if behavior == MockBehavior::LoginFails {
            return Err(Error::Login {
                host: host.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        if credentials.password.is_empty() {
            return Err(Error::Login {
                host: host.to_string(),
                reason: "session service returned 401".to_string(),
            });
        }

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);

        Ok(Box::new(MockSession {
            host: host.to_string(),
            behavior,
            delay: self.delay,
            logout_delay: self.logout_delay,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSession {
    host: String,
    behavior: MockBehavior,
    delay: Duration,
    logout_delay: Duration,
    state: Arc<MockState>,
}

impl MockSession {
    async fn answer(&self) -> Result<HttpResponse> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.behavior {
            MockBehavior::Status(status) => Ok(HttpResponse::new(status)),
            _ => Err(Error::Request {
                host: self.host.clone(),
                reason: "connection reset".to_string(),
            }),
        }
    }
}

#[async_trait]
impl SessionClient for MockSession {
    async fn get(&self, _path: &str, _headers: &Headers) -> Result<HttpResponse> {
        self.answer().await
    }

    async fn post(
        &self,
        path: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.state.posts.lock().unwrap().push(RecordedPost {
            host: self.host.clone(),
            path: path.to_string(),
            headers: headers.clone(),
            body: body.clone(),
        });
        self.answer().await
    }

    async fn patch(
        &self,
        _path: &str,
        _headers: &Headers,
        _body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.answer().await
    }

    async fn delete(&self, _path: &str, _headers: &Headers) -> Result<HttpResponse> {
        self.answer().await
    }

    async fn logout(&self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
        if !self.logout_delay.is_zero() {
            tokio::time::sleep(self.logout_delay).await;
        }
        self.state.logouts.fetch_add(1, Ordering::SeqCst);
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Collects outcomes instead of printing them
#[derive(Default)]
pub struct CapturingReporter {
    outcomes: Mutex<Vec<(String, TaskOutcome)>>,
}

impl CapturingReporter {
    pub fn outcomes(&self) -> Vec<(String, TaskOutcome)> {
        self.outcomes.lock().unwrap().clone()
    }

    /// Lines as the stdout reporter would print them
    pub fn lines(&self) -> Vec<String> {
        self.outcomes()
            .iter()
            .map(|(host, outcome)| outcome.render(host))
            .collect()
    }
}

impl OutcomeReporter for CapturingReporter {
    fn report(&self, host: &str, outcome: &TaskOutcome) {
        self.outcomes
            .lock()
            .unwrap()
            .push((host.to_string(), outcome.clone()));
    }
}
