//! Volume Parameters
//!
//! Typed RAID level and cache/IO policy values, and the immutable parameter
//! set a volume request is built from.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Constants
// =============================================================================

/// Default optimum IO size in bytes
pub const DEFAULT_OPTIMUM_IO_SIZE_BYTES: u64 = 262_144;

/// Default span depth
pub const DEFAULT_SPAN_DEPTH: u32 = 1;

// =============================================================================
// RAID Level
// =============================================================================

/// RAID levels supported by the R2280 storage controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidLevel {
    #[serde(rename = "RAID0")]
    Raid0,
    #[serde(rename = "RAID1")]
    Raid1,
    #[serde(rename = "RAID5")]
    Raid5,
    #[serde(rename = "RAID10")]
    Raid10,
}

impl RaidLevel {
    pub const ALL: [RaidLevel; 4] = [
        RaidLevel::Raid0,
        RaidLevel::Raid1,
        RaidLevel::Raid5,
        RaidLevel::Raid10,
    ];

    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidLevel::Raid0 => "RAID0",
            RaidLevel::Raid1 => "RAID1",
            RaidLevel::Raid5 => "RAID5",
            RaidLevel::Raid10 => "RAID10",
        }
    }
}

impl std::fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaidLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RaidLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| Error::InvalidRaidLevel(s.to_string()))
    }
}

// =============================================================================
// Cache / IO Policies
// =============================================================================

/// Declares a policy enum whose variants map one-to-one onto the strings
/// the controller expects.
macro_rules! policy_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, default = $default:ident,
        { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of the value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(Error::InvalidPolicy {
                        field: $field,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join("/"),
                    }),
                }
            }
        }
    };
}

policy_enum! {
    /// How the controller initializes a new volume
    InitializationMode, "InitializationMode", default = QuickInit, {
        UnInit => "UnInit",
        QuickInit => "QuickInit",
        FullInit => "FullInit",
    }
}

policy_enum! {
    /// Physical drive write cache
    DriveCachePolicy, "DriveCachePolicy", default = Disabled, {
        Disabled => "Disabled",
        Enabled => "Enabled",
    }
}

policy_enum! {
    ReadPolicy, "DefaultReadPolicy", default = ReadAhead, {
        ReadAhead => "ReadAhead",
        NoReadAhead => "NoReadAhead",
    }
}

policy_enum! {
    /// Write-back requires a healthy battery unless `WriteBackWithBbu` is
    /// chosen, which keeps write-back only while the BBU is present.
    WritePolicy, "DefaultWritePolicy", default = WriteBack, {
        WriteThrough => "WriteThrough",
        WriteBack => "WriteBack",
        WriteBackWithBbu => "WriteBackWithBBU",
    }
}

policy_enum! {
    CachePolicy, "DefaultCachePolicy", default = DirectIo, {
        DirectIo => "DirectIO",
        CachedIo => "CachedIO",
    }
}

policy_enum! {
    /// Host access to the volume
    AccessPolicy, "AccessPolicy", default = ReadWrite, {
        ReadWrite => "ReadWrite",
        ReadOnly => "ReadOnly",
        Blocked => "Blocked",
    }
}

// =============================================================================
// Volume Parameters
// =============================================================================

/// Everything needed to describe the volume to create.
///
/// The RAID level and drive list are kept as the user typed them; they are
/// validated when the request is built so one bad value aborts the run
/// before any host is contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeParams {
    /// RAID controller index (RAIDStorage{n})
    pub controller: u32,
    /// Raw RAID level, e.g. "RAID5"
    pub level: String,
    /// Raw comma separated drive list, e.g. "0,1,2"
    pub drives: String,
    /// Volume name; the RAID level is used when absent
    pub name: Option<String>,
    pub init_mode: InitializationMode,
    pub span_depth: u32,
    pub span_number: u32,
    pub optimum_io_size_bytes: u64,
    pub drive_cache: DriveCachePolicy,
    pub read_policy: ReadPolicy,
    pub write_policy: WritePolicy,
    pub cache_policy: CachePolicy,
    pub access_policy: AccessPolicy,
}

impl VolumeParams {
    /// Create parameters for the required fields, defaulting the rest
    pub fn new(
        controller: u32,
        level: impl Into<String>,
        drives: impl Into<String>,
        span_number: u32,
    ) -> Self {
        Self {
            controller,
            level: level.into(),
            drives: drives.into(),
            name: None,
            init_mode: InitializationMode::default(),
            span_depth: DEFAULT_SPAN_DEPTH,
            span_number,
            optimum_io_size_bytes: DEFAULT_OPTIMUM_IO_SIZE_BYTES,
            drive_cache: DriveCachePolicy::default(),
            read_policy: ReadPolicy::default(),
            write_policy: WritePolicy::default(),
            cache_policy: CachePolicy::default(),
            access_policy: AccessPolicy::default(),
        }
    }

    /// Set an explicit volume name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Parse a comma separated drive list into drive indexes, keeping order.
///
/// Tokens may carry surrounding whitespace. Any token that is not a
/// non-negative integer fails the whole list.
pub fn parse_drives(drives: &str) -> Result<Vec<u32>> {
    drives
        .split(',')
        .map(|token| {
            token.trim().parse::<u32>().map_err(|e| Error::InvalidDrives {
                drives: drives.to_string(),
                reason: format!("'{}': {}", token, e),
            })
        })
        .collect()
}
