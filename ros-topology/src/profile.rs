//! Emitter profile: the fixed, site-wide constants baked into every script.
//!
//! The topology model describes one device; the profile describes the fleet
//! conventions (probe hosts, list names, hardening, heartbeat cadence). An
//! embedded `profiles/default.toml` is used unless a file is supplied.

use std::net::Ipv4Addr;
use std::path::Path;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterProfile {
    /// Shared VLAN-filtering bridge for all LAN ports.
    pub bridge_name: String,
    /// Interface list holding every uplink egress interface.
    pub wan_list: String,
    /// Address list allowed to reach the management service.
    pub management_list: String,
    /// Address list holding every configured network subnet.
    pub local_list: String,
    /// Monitoring targets, one per uplink position. Also caps the uplink count.
    pub probe_addresses: Vec<Ipv4Addr>,
    pub time_zone: String,
    pub ntp_servers: Vec<String>,
    pub admin_user: String,
    pub admin_group: String,
    /// The one remote-management service left enabled.
    pub management_service: String,
    pub disabled_services: Vec<String>,
    pub management_allow_list: Vec<Ipv4Net>,
    pub dhcp_lease_time: String,
    pub hotspot_login_by: Vec<String>,
    pub heartbeat_script: String,
    pub heartbeat_interval: String,
}

impl Default for EmitterProfile {
    fn default() -> Self {
        Self {
            bridge_name: "bridge-lan".to_string(),
            wan_list: "WAN".to_string(),
            management_list: "MGMT".to_string(),
            local_list: "LOCAL-NETS".to_string(),
            probe_addresses: vec![
                Ipv4Addr::new(8, 8, 8, 8),
                Ipv4Addr::new(1, 1, 1, 1),
                Ipv4Addr::new(8, 8, 4, 4),
                Ipv4Addr::new(1, 0, 0, 1),
                Ipv4Addr::new(9, 9, 9, 9),
            ],
            time_zone: "UTC".to_string(),
            ntp_servers: vec!["pool.ntp.org".to_string(), "time.cloudflare.com".to_string()],
            admin_user: "netadmin".to_string(),
            admin_group: "full".to_string(),
            management_service: "winbox".to_string(),
            disabled_services: ["telnet", "ftp", "www", "www-ssl", "ssh", "api", "api-ssl"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            management_allow_list: [
                (Ipv4Addr::new(10, 0, 0, 0), 8),
                (Ipv4Addr::new(172, 16, 0, 0), 12),
                (Ipv4Addr::new(192, 168, 0, 0), 16),
            ]
            .into_iter()
            .filter_map(|(addr, prefix)| Ipv4Net::new(addr, prefix).ok())
            .collect(),
            dhcp_lease_time: "1d".to_string(),
            hotspot_login_by: ["cookie", "http-chap", "http-pap", "mac-cookie"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            heartbeat_script: "heartbeat".to_string(),
            heartbeat_interval: "5m".to_string(),
        }
    }
}

/// Errors returned when loading a profile file.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("profile {path} lists no probe addresses")]
    NoProbes { path: String },
}

/// Load the profile from `path`, or the embedded default when `path` is `None`.
///
/// Returns the profile together with a description of where it came from
/// (`embedded` or `file:<path>`).
pub fn load_profile_with_source(
    path: Option<&Path>,
) -> Result<(EmitterProfile, String), ProfileLoadError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let profile = parse_profile(&raw, path.display().to_string())?;
            Ok((profile, format!("file:{}", path.display())))
        }
        None => Ok((embedded_profile(), "embedded".to_string())),
    }
}

/// Built-in profile, falling back to [`EmitterProfile::default`].
pub fn embedded_profile() -> EmitterProfile {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/profiles/default.toml"));
    match parse_profile(embedded, "embedded profile".to_string()) {
        Ok(profile) => profile,
        Err(err) => {
            log::warn!("{err}; using built-in defaults");
            EmitterProfile::default()
        }
    }
}

fn parse_profile(raw: &str, path: String) -> Result<EmitterProfile, ProfileLoadError> {
    let profile: EmitterProfile = toml::from_str(raw).map_err(|source| ProfileLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    if profile.probe_addresses.is_empty() {
        return Err(ProfileLoadError::NoProbes { path });
    }
    Ok(profile)
}
