//! Domain Module
//!
//! Core types and port traits shared by the dispatcher and session adapters.

pub mod ports;

pub use ports::*;
