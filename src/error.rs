//! Error types for qc-raid
//!
//! Errors fall into two tiers: pre-flight errors that abort the whole run
//! before any host is contacted, and per-host errors that are folded into
//! a task outcome by the dispatcher.

use thiserror::Error;

/// Unified error type for the tool
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("-l parameter error: unsupported RAID level '{0}' (expected RAID0/RAID1/RAID5/RAID10)")]
    InvalidRaidLevel(String),

    #[error("-d parameter error: invalid drive list '{drives}': {reason}")]
    InvalidDrives { drives: String, reason: String },

    #[error("Invalid {field} value '{value}' (expected {expected})")]
    InvalidPolicy {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Host file not found: {path}")]
    HostFileNotFound { path: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    #[error("Login to {host} failed: {reason}")]
    Login { host: String, reason: String },

    #[error("Request to {host} failed: {reason}")]
    Request { host: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Parse / IO Errors
    // =========================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error must abort the run before dispatch
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidRaidLevel(_)
                | Error::InvalidDrives { .. }
                | Error::InvalidPolicy { .. }
                | Error::HostFileNotFound { .. }
                | Error::Configuration(_)
                | Error::Io(_)
        )
    }
}

/// Result type alias for the tool
pub type Result<T> = std::result::Result<T, Error>;
