//! Session Module
//!
//! Credential encoding and the Redfish session adapter.

pub mod auth;
pub mod redfish;

pub use auth::*;
pub use redfish::*;
