//! Task Outcomes
//!
//! The result of configuring one host, and how it is reported.

use std::io::Write;

/// Result of one host's "create volume" task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The controller answered 200
    Success(u16),
    /// The request completed with any other status
    NonSuccess(u16),
    /// Login or the request itself failed
    Failure(String),
}

impl TaskOutcome {
    /// Classify a completed request by its status code
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            TaskOutcome::Success(status)
        } else {
            TaskOutcome::NonSuccess(status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success(_))
    }

    /// The user facing line for `host`
    pub fn render(&self, host: &str) -> String {
        match self {
            TaskOutcome::Success(code) => format!("[{}] Successful: return {}", host, code),
            TaskOutcome::NonSuccess(code) => format!("[{}] Full: return {}", host, code),
            TaskOutcome::Failure(_) => format!(
                "\n ERROR: {} Connection Fail. Please check the network or user account",
                host
            ),
        }
    }
}

/// Receives each outcome as soon as its task completes
pub trait OutcomeReporter: Send + Sync {
    fn report(&self, host: &str, outcome: &TaskOutcome);
}

/// Prints one line per outcome to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl OutcomeReporter for StdoutReporter {
    fn report(&self, host: &str, outcome: &TaskOutcome) {
        let line = outcome.render(host);
        let mut stdout = std::io::stdout().lock();
        // stdout closed by the caller; nothing left to tell
        let _ = writeln!(stdout, "{}", line);
    }
}
