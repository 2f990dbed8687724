//! Topology model: the validated description of a router's desired network state.
//!
//! A [`TopologyModel`] is built once per compile request (usually deserialized
//! from the wizard's TOML/JSON export) and read by every planner without being
//! modified. Field-level shape is enforced by the types; cross-entity
//! invariants are checked by [`crate::validate`].

use std::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};

use indexmap::IndexMap;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// VLAN carried untagged by the bridge when nothing else is configured.
pub const DEFAULT_VLAN: u16 = 1;
/// Highest usable 802.1Q VLAN id.
pub const MAX_VLAN: u16 = 4094;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyModel {
    /// Device name written to `/system identity`.
    pub identity: String,
    pub management: ManagementAccess,
    /// Physical port catalog of the device model.
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub uplinks: Vec<UplinkLink>,
    #[serde(default)]
    pub networks: Vec<Network>,
    /// LAN port assignments keyed by port name, in declaration order.
    #[serde(default)]
    pub assignments: IndexMap<String, PortAssignment>,
    #[serde(default)]
    pub policy_routing: PolicyRoutingConfig,
    pub dns: DnsPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementAccess {
    /// Opaque bearer token passed through to the heartbeat task.
    pub token: String,
    /// Callback URL of the device-monitoring service.
    pub heartbeat_url: String,
    /// Password for the fixed administrative account.
    #[serde(default)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareType {
    Ether,
    Sfp,
    Wlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    Wan,
    Lan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub hardware_type: HardwareType,
    pub default_role: PortRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkLink {
    pub id: String,
    /// Physical port carrying the uplink.
    pub interface: String,
    #[serde(flatten)]
    pub kind: UplinkKind,
}

/// How an uplink obtains connectivity.
///
/// Credentials and addressing are optional at the type level because the
/// wizard may hand over incomplete links; the failover planner rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UplinkKind {
    Pppoe {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
    Static {
        #[serde(default)]
        address: Option<Ipv4Net>,
        #[serde(default)]
        gateway: Option<Ipv4Addr>,
    },
    /// DHCP-client uplink. Brought up, but not part of failover routing.
    Dhcp,
}

impl UplinkKind {
    pub fn name(&self) -> &'static str {
        match self {
            UplinkKind::Pppoe { .. } => "pppoe",
            UplinkKind::Static { .. } => "static",
            UplinkKind::Dhcp => "dhcp",
        }
    }

    /// True for kinds the failover planner builds routes for.
    pub fn is_routable(&self) -> bool {
        !matches!(self, UplinkKind::Dhcp)
    }
}

impl UplinkLink {
    /// Interface carrying this uplink's IP traffic, given its 1-based position.
    pub fn egress_interface(&self, index: usize) -> String {
        match self.kind {
            UplinkKind::Pppoe { .. } => pppoe_interface_name(index),
            UplinkKind::Static { .. } | UplinkKind::Dhcp => self.interface.clone(),
        }
    }
}

/// Name of the PPPoE client interface for the uplink at 1-based `index`.
pub fn pppoe_interface_name(index: usize) -> String {
    format!("pppoe-out{index}")
}

/// Name of the dedicated routing table for the uplink at 1-based `index`.
pub fn routing_table_name(index: usize) -> String {
    format!("to-wan{index}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    /// Segment name; also the name of its VLAN interface.
    pub name: String,
    pub vlan_id: u16,
    /// Router address and prefix length, e.g. `192.168.10.1/24`.
    pub cidr: Ipv4Net,
    #[serde(default)]
    pub dhcp: bool,
    #[serde(default)]
    pub hotspot: bool,
}

impl Network {
    /// Address the router holds inside this segment.
    pub fn router_address(&self) -> Ipv4Addr {
        self.cidr.addr()
    }

    /// Network-aligned subnet, e.g. `192.168.10.0/24`.
    pub fn subnet(&self) -> Ipv4Net {
        self.cidr.trunc()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    Access,
    Trunk,
}

impl Display for PortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PortMode::Access => write!(f, "access"),
            PortMode::Trunk => write!(f, "trunk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PortAssignment {
    /// One untagged VLAN.
    Access { pvid: u16 },
    /// Untagged native VLAN plus tagged allowed VLANs.
    Trunk {
        #[serde(default = "default_native_vlan")]
        native_vlan: u16,
        #[serde(default)]
        allowed_vlans: Vec<u16>,
    },
}

fn default_native_vlan() -> u16 {
    DEFAULT_VLAN
}

impl PortAssignment {
    pub fn mode(&self) -> PortMode {
        match self {
            PortAssignment::Access { .. } => PortMode::Access,
            PortAssignment::Trunk { .. } => PortMode::Trunk,
        }
    }

    /// VLAN carried untagged on this port.
    pub fn pvid(&self) -> u16 {
        match self {
            PortAssignment::Access { pvid } => *pvid,
            PortAssignment::Trunk { native_vlan, .. } => *native_vlan,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRoutingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Network id to uplink id.
    #[serde(default)]
    pub mapping: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPolicy {
    /// Upstream resolvers in preference order.
    pub servers: Vec<IpAddr>,
    /// Resolve for LAN clients instead of only forwarding for the router itself.
    #[serde(default)]
    pub allow_remote_requests: bool,
}

impl TopologyModel {
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn network_by_vlan(&self, vlan_id: u16) -> Option<&Network> {
        self.networks.iter().find(|n| n.vlan_id == vlan_id)
    }

    pub fn network_by_id(&self, id: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.id == id)
    }

    /// 1-based position and link of the uplink with `id`.
    pub fn uplink_by_id(&self, id: &str) -> Option<(usize, &UplinkLink)> {
        self.uplinks
            .iter()
            .enumerate()
            .find(|(_, u)| u.id == id)
            .map(|(idx, u)| (idx + 1, u))
    }

    pub fn is_uplink_interface(&self, port: &str) -> bool {
        self.uplinks.iter().any(|u| u.interface == port)
    }

    /// Catalog ports not carrying an uplink, in catalog order.
    pub fn lan_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(move |p| !self.is_uplink_interface(&p.name))
    }
}

#[cfg(test)]
mod tests {
    use super::{PortAssignment, TopologyModel, UplinkKind};

    const SAMPLE: &str = r#"
identity = "branch-01"

[management]
token = "tok"
heartbeat_url = "https://monitor.example.net/hb"

[[ports]]
name = "ether1"
hardware_type = "ether"
default_role = "wan"

[[ports]]
name = "ether2"
hardware_type = "ether"
default_role = "lan"

[[uplinks]]
id = "wan-a"
interface = "ether1"
kind = "static"
address = "203.0.113.2/30"
gateway = "203.0.113.1"

[[networks]]
id = "office"
name = "vlan10"
vlan_id = 10
cidr = "192.168.10.1/24"
dhcp = true

[assignments.ether2]
mode = "trunk"
allowed_vlans = [10]

[dns]
servers = ["1.1.1.1"]
"#;

    #[test]
    fn deserializes_toml_with_defaults() {
        let model: TopologyModel = toml::from_str(SAMPLE).expect("parse");
        assert_eq!(model.uplinks.len(), 1);
        assert!(matches!(
            model.uplinks[0].kind,
            UplinkKind::Static { gateway: Some(_), .. }
        ));
        assert_eq!(
            model.assignments.get("ether2"),
            Some(&PortAssignment::Trunk {
                native_vlan: 1,
                allowed_vlans: vec![10]
            })
        );
        assert!(!model.policy_routing.enabled);
        assert_eq!(model.networks[0].subnet().to_string(), "192.168.10.0/24");
        assert_eq!(model.lan_ports().count(), 1);
    }
}
