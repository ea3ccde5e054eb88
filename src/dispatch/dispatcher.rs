//! Volume Dispatcher
//!
//! Runs one "create volume" task per host with bounded concurrency. Tasks
//! are independent: each opens its own session, and its outcome is reported
//! the moment it finishes. A failing host never affects another host.

use super::outcome::{OutcomeReporter, TaskOutcome};
use crate::domain::ports::{Credentials, SessionConnector};
use crate::volume::VolumeRequest;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

// =============================================================================
// Configuration
// =============================================================================

/// Default number of hosts configured concurrently
pub const DEFAULT_MAX_WORKERS: usize = 50;

/// Configuration for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Upper bound on in-flight host tasks; further tasks queue for a slot.
    /// Zero is treated as one, and the bound never exceeds
    /// [`Semaphore::MAX_PERMITS`].
    pub max_workers: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl DispatcherConfig {
    fn effective_workers(&self) -> usize {
        self.max_workers.clamp(1, Semaphore::MAX_PERMITS)
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Fans a volume request out across hosts
pub struct Dispatcher {
    config: DispatcherConfig,
    connector: Arc<dyn SessionConnector>,
    reporter: Arc<dyn OutcomeReporter>,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(
        config: DispatcherConfig,
        connector: Arc<dyn SessionConnector>,
        reporter: Arc<dyn OutcomeReporter>,
    ) -> Self {
        Self {
            config,
            connector,
            reporter,
        }
    }

    /// Submit one task per host and wait for every task to finish.
    ///
    /// Returns the number of tasks dispatched. Outcomes are not collected;
    /// they only reach the reporter.
    pub async fn dispatch(
        &self,
        hosts: Vec<String>,
        request: VolumeRequest,
        credentials: Credentials,
    ) -> usize {
        let workers = self.config.effective_workers();
        let semaphore = Arc::new(Semaphore::new(workers));
        let request = Arc::new(request);
        let credentials = Arc::new(credentials);
        let dispatched = hosts.len();

        info!(hosts = dispatched, workers, path = %request.path, "Dispatching volume request");

        let mut tasks = JoinSet::new();
        for host in hosts {
            let semaphore = Arc::clone(&semaphore);
            let connector = Arc::clone(&self.connector);
            let reporter = Arc::clone(&self.reporter);
            let request = Arc::clone(&request);
            let credentials = Arc::clone(&credentials);

            tasks.spawn(async move {
                // The semaphore is never closed
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };

                configure_volume(
                    connector.as_ref(),
                    reporter.as_ref(),
                    &host,
                    &credentials,
                    &request,
                )
                .await;
            });
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Volume task panicked");
            }
        }

        debug!(hosts = dispatched, "All volume tasks finished");
        dispatched
    }
}

/// Create the volume on a single host and report its outcome.
///
/// Every failure along the way is folded into [`TaskOutcome::Failure`]. The
/// outcome reaches the reporter before the session is closed.
pub async fn configure_volume(
    connector: &dyn SessionConnector,
    reporter: &dyn OutcomeReporter,
    host: &str,
    credentials: &Credentials,
    request: &VolumeRequest,
) -> TaskOutcome {
    let session = match connector.login(host, credentials).await {
        Ok(session) => session,
        Err(e) => {
            warn!(host = %host, error = %e, "Login failed");
            let outcome = TaskOutcome::Failure(e.to_string());
            reporter.report(host, &outcome);
            return outcome;
        }
    };

    let outcome = match session
        .post(&request.path, &request.headers, &request.body)
        .await
    {
        Ok(response) => {
            let outcome = TaskOutcome::from_status(response.status);
            if outcome.is_success() {
                info!(host = %host, status = response.status, "Volume created");
            } else {
                warn!(host = %host, status = response.status, "Volume request rejected");
            }
            outcome
        }
        Err(e) => {
            warn!(host = %host, error = %e, "Volume request failed");
            TaskOutcome::Failure(e.to_string())
        }
    };

    reporter.report(host, &outcome);
    session.logout().await;
    outcome
}
