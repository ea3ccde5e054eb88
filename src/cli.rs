//! Command Line Interface
//!
//! Flag names follow the R2280 tooling conventions (`--Controller`,
//! `--SpanNumber`, ...). Long flags may be shortened to any unambiguous
//! prefix.

use crate::dispatch::{DispatcherConfig, DEFAULT_MAX_WORKERS};
use crate::domain::ports::Credentials;
use crate::error::{Error, Result};
use crate::hosts::DEFAULT_HOST;
use crate::session::{RedfishConfig, DEFAULT_TIMEOUT_SECS};
use crate::volume::{
    AccessPolicy, CachePolicy, DriveCachePolicy, InitializationMode, ReadPolicy, VolumeParams,
    WritePolicy, DEFAULT_OPTIMUM_IO_SIZE_BYTES, DEFAULT_SPAN_DEPTH,
};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::Level;

/// Two-letter short flags clap cannot express, and their long forms
const MULTI_CHAR_SHORTS: &[(&str, &str)] = &[("-sd", "--spanDepth"), ("-sn", "--SpanNumber")];

// =============================================================================
// CLI Arguments
// =============================================================================

/// FitServer R2280 Server RAID Tools
#[derive(Parser, Debug, Clone)]
#[command(
    name = "QcRaid",
    version,
    about = "FitServer R2280 Server RAID Tools",
    long_about = None,
    disable_version_flag = true,
    infer_long_args = true
)]
pub struct Cli {
    /// RAID Controller, 0/1
    #[arg(short = 'C', long = "Controller", value_name = "INDEX")]
    pub controller: u32,

    /// LAN interface address(es), whitespace separated
    #[arg(short = 'H', long = "host", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Read the IP addresses from a file, one per line
    #[arg(short = 'f', long = "files", value_name = "PATH")]
    pub files: Option<PathBuf>,

    /// Remote host account
    #[arg(short = 'U', long = "user", env = "QCRAID_USER", default_value = "admin")]
    pub user: String,

    /// Remote host password
    #[arg(
        short = 'P',
        long = "pwd",
        env = "QCRAID_PWD",
        default_value = "admin",
        hide_env_values = true
    )]
    pub pwd: String,

    /// Volume name [default: same as the level parameter]
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Volume RAID level, RAID0/RAID1/RAID5/RAID10
    #[arg(short = 'l', long = "level")]
    pub level: String,

    /// Drives, comma separated (e.g. 0,1,2)
    #[arg(short = 'd', long = "drives")]
    pub drives: String,

    /// InitializationMode, UnInit/QuickInit/FullInit
    #[arg(short = 'i', long = "init", default_value = "QuickInit")]
    pub init: InitializationMode,

    /// Span depth (also -sd)
    #[arg(long = "spanDepth", default_value_t = DEFAULT_SPAN_DEPTH)]
    pub span_depth: u32,

    /// Span number (also -sn)
    #[arg(long = "SpanNumber")]
    pub span_number: u32,

    /// OptimumIOSizeBytes
    #[arg(long = "Bytes", default_value_t = DEFAULT_OPTIMUM_IO_SIZE_BYTES)]
    pub bytes: u64,

    /// DriveCachePolicy, Disabled/Enabled
    #[arg(long = "DiskCache", default_value = "Disabled")]
    pub disk_cache: DriveCachePolicy,

    /// Read Policy, ReadAhead/NoReadAhead
    #[arg(long = "ReadPolicy", default_value = "ReadAhead")]
    pub read_policy: ReadPolicy,

    /// Write Policy, WriteThrough/WriteBack/WriteBackWithBBU
    #[arg(long = "WritePolicy", default_value = "WriteBack")]
    pub write_policy: WritePolicy,

    /// Default Cache Policy, DirectIO/CachedIO
    #[arg(long = "CachePolicy", default_value = "DirectIO")]
    pub cache_policy: CachePolicy,

    /// Access Policy, ReadWrite/ReadOnly/Blocked
    #[arg(long = "AccessPolicy", default_value = "ReadWrite")]
    pub access_policy: AccessPolicy,

    /// Hosts configured concurrently
    #[arg(long = "workers", default_value_t = DEFAULT_MAX_WORKERS)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error) [default: warn, or RUST_LOG when set]
    #[arg(long = "log-level", env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub log_json: bool,

    /// Show version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: (),
}

impl Cli {
    /// Parse the process arguments
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse an explicit argument list, program name first
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Configuration(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        if self.workers > Semaphore::MAX_PERMITS {
            return Err(Error::Configuration(format!(
                "--workers must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    /// Level directive to add on top of `RUST_LOG`.
    ///
    /// An explicit `--log-level` always applies; the `warn` default only
    /// applies when `RUST_LOG` is unset.
    pub fn log_level_directive(&self, rust_log_set: bool) -> Option<Level> {
        match (self.log_level.as_deref(), rust_log_set) {
            (Some(level), _) => Some(parse_level(level)),
            (None, true) => None,
            (None, false) => Some(Level::WARN),
        }
    }

    pub fn volume_params(&self) -> VolumeParams {
        VolumeParams {
            controller: self.controller,
            level: self.level.clone(),
            drives: self.drives.clone(),
            name: self.name.clone(),
            init_mode: self.init,
            span_depth: self.span_depth,
            span_number: self.span_number,
            optimum_io_size_bytes: self.bytes,
            drive_cache: self.disk_cache,
            read_policy: self.read_policy,
            write_policy: self.write_policy,
            cache_policy: self.cache_policy,
            access_policy: self.access_policy,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user.clone(), self.pwd.clone())
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            max_workers: self.workers,
        }
    }

    pub fn redfish_config(&self) -> RedfishConfig {
        RedfishConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Rewrite `-sd`/`-sn` (optionally `-sd=N`) to their long forms.
///
/// Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            for (short, long) in MULTI_CHAR_SHORTS {
                if text == *short {
                    return OsString::from(*long);
                }
                let value = text
                    .strip_prefix(short)
                    .and_then(|rest| rest.strip_prefix('='));
                if let Some(value) = value {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
