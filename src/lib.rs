//! qc-raid - RAID volume configuration for FitServer R2280 servers
//!
//! Creates a RAID volume through each host's Redfish management controller,
//! fanning the same request out across many hosts at once.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         CLI (flags, env)                             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │   ┌──────────────────────┐          ┌──────────────────────────┐     │
//! │   │   Volume Request     │          │    Host List Loader      │     │
//! │   │  (validate + body)   │          │   (file or --host)       │     │
//! │   └──────────┬───────────┘          └────────────┬─────────────┘     │
//! │              └──────────────┬────────────────────┘                   │
//! │                  ┌──────────┴───────────┐                            │
//! │                  │      Dispatcher      │                            │
//! │                  │ (bounded, per host)  │                            │
//! │                  └──────────┬───────────┘                            │
//! ├─────────────────────────────┼────────────────────────────────────────┤
//! │              ┌──────────────┴───────────────┐                        │
//! │              │  Redfish session (per host)  │  login → POST → logout │
//! │              └──────────────────────────────┘                        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Top level flow
//! - [`cli`]: Command line flags
//! - [`dispatch`]: Bounded fan-out and outcome reporting
//! - [`domain`]: Session port traits and shared types
//! - [`hosts`]: Target host list
//! - [`session`]: Basic auth encoding and the Redfish adapter
//! - [`volume`]: Volume parameters and request building
//! - [`error`]: Error types and handling

pub mod app;
pub mod cli;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod hosts;
pub mod session;
pub mod volume;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use cli::Cli;

pub use dispatch::{
    Dispatcher, DispatcherConfig, OutcomeReporter, StdoutReporter, TaskOutcome,
    DEFAULT_MAX_WORKERS,
};

pub use domain::ports::{Credentials, Headers, HttpResponse, SessionClient, SessionConnector};

pub use error::{Error, Result};

pub use hosts::load_hosts;

pub use session::{basic_auth_header, RedfishConfig, RedfishConnector, RedfishSession};

pub use volume::{RaidLevel, VolumeParams, VolumeRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
