//! Volume Module
//!
//! RAID volume parameters and the Redfish request that creates the volume.

pub mod params;
pub mod request;

pub use params::*;
pub use request::*;
