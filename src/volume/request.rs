//! Volume Request Builder
//!
//! Turns validated [`VolumeParams`] into the Redfish path, headers and JSON
//! body that create the volume on the storage controller.

use super::params::{
    parse_drives, AccessPolicy, CachePolicy, DriveCachePolicy, InitializationMode, RaidLevel,
    ReadPolicy, VolumeParams, WritePolicy,
};
use crate::domain::ports::{Credentials, Headers};
use crate::error::Result;
use crate::session::auth::basic_auth_header;
use serde::Serialize;
use tracing::debug;

// =============================================================================
// Request Body
// =============================================================================

/// Top level body; all settings live in the vendor extension namespace
#[derive(Debug, Clone, Serialize)]
pub struct VolumeBody {
    #[serde(rename = "Oem")]
    pub oem: OemSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct OemSection {
    #[serde(rename = "Public")]
    pub public: PublicVolumeSettings,
}

/// Volume settings as the controller names them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicVolumeSettings {
    #[serde(rename = "OptimumIOSizeBytes")]
    pub optimum_io_size_bytes: u64,
    pub volume_name: String,
    pub volume_raid_level: RaidLevel,
    pub initialization_mode: InitializationMode,
    pub drive_cache_policy: DriveCachePolicy,
    pub default_read_policy: ReadPolicy,
    pub default_write_policy: WritePolicy,
    pub default_cache_policy: CachePolicy,
    pub access_policy: AccessPolicy,
    #[serde(rename = "spanDepth")]
    pub span_depth: u32,
    pub span_number: u32,
    pub drives: Vec<u32>,
}

// =============================================================================
// Volume Request
// =============================================================================

/// A fully built "create volume" request, shared read-only by every host task
#[derive(Debug, Clone)]
pub struct VolumeRequest {
    pub path: String,
    pub headers: Headers,
    pub body: serde_json::Value,
}

impl VolumeRequest {
    /// Build the request, validating the RAID level and drive list.
    ///
    /// Either validation failing is fatal for the whole run.
    pub fn build(params: &VolumeParams, credentials: &Credentials) -> Result<Self> {
        let level: RaidLevel = params.level.parse()?;
        let drives = parse_drives(&params.drives)?;

        let settings = PublicVolumeSettings {
            optimum_io_size_bytes: params.optimum_io_size_bytes,
            volume_name: params
                .name
                .clone()
                .unwrap_or_else(|| level.to_string()),
            volume_raid_level: level,
            initialization_mode: params.init_mode,
            drive_cache_policy: params.drive_cache,
            default_read_policy: params.read_policy,
            default_write_policy: params.write_policy,
            default_cache_policy: params.cache_policy,
            access_policy: params.access_policy,
            span_depth: params.span_depth,
            span_number: params.span_number,
            drives,
        };

        let body = serde_json::to_value(VolumeBody {
            oem: OemSection { public: settings },
        })?;

        debug!(
            controller = params.controller,
            level = %level,
            "Built volume request"
        );

        Ok(Self {
            path: volume_path(params.controller),
            headers: request_headers(credentials),
            body,
        })
    }
}

/// Volume collection of a RAID controller
pub fn volume_path(controller: u32) -> String {
    format!("/redfish/v1/Systems/1/Storages/RAIDStorage{}/Volumes", controller)
}

fn request_headers(credentials: &Credentials) -> Headers {
    let mut headers = Headers::new();
    headers.insert(
        "Authorization".to_string(),
        basic_auth_header(&credentials.username, &credentials.password),
    );
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}
