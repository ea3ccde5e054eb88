//! Dispatch Module
//!
//! Bounded concurrent fan-out of the volume request and per-host reporting.

pub mod dispatcher;
pub mod outcome;

pub use dispatcher::*;
pub use outcome::*;
