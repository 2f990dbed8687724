//! Compiler error taxonomy.
//!
//! - [`ModelError`]: a structural invariant of the topology is violated;
//!   raised by [`crate::validate`] before any planning starts.
//! - [`PlanningError`]: a planner precondition fails while building routes
//!   or VLAN membership.
//! - [`CompileError`]: everything [`crate::compile::compile`] can return,
//!   including emission failures from the script writer.
//!
//! Every variant names the entity and field involved. None are retryable.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{entity}: field '{field}' must not be empty")]
    EmptyField { entity: String, field: String },

    #[error("{entity} '{name}' is not a valid interface name")]
    InvalidName { entity: String, name: String },

    #[error("duplicate port '{name}' in port catalog")]
    DuplicatePort { name: String },

    #[error("duplicate uplink id '{id}'")]
    DuplicateUplinkId { id: String },

    #[error("uplink '{uplink}' references unknown port '{port}'")]
    UnknownUplinkPort { uplink: String, port: String },

    #[error("uplinks '{first}' and '{second}' share physical interface '{interface}'")]
    DuplicateUplinkInterface {
        interface: String,
        first: String,
        second: String,
    },

    #[error("port '{port}' carries uplink '{uplink}' and cannot also be assigned as a LAN port")]
    UplinkInterfaceCollision { port: String, uplink: String },

    #[error("assignment references unknown port '{port}'")]
    UnknownAssignedPort { port: String },

    #[error("duplicate network id '{id}'")]
    DuplicateNetworkId { id: String },

    #[error("duplicate network name '{name}'")]
    DuplicateNetworkName { name: String },

    #[error("networks '{first}' and '{second}' both use VLAN {vlan_id}")]
    DuplicateVlanId {
        vlan_id: u16,
        first: String,
        second: String,
    },

    #[error("network '{network}': VLAN id {vlan_id} is outside 1..=4094")]
    InvalidVlanId { network: String, vlan_id: u16 },

    #[error("network '{network}': VLAN 1 is the bridge's implicit default and cannot be assigned")]
    ReservedVlan { network: String },

    #[error("network '{network}': hotspot requires DHCP to be enabled")]
    HotspotWithoutDhcp { network: String },

    #[error("network '{network}': subnet {cidr} leaves no room for a DHCP pool")]
    SubnetTooSmall { network: String, cidr: String },

    #[error("network '{network}': router address in {cidr} is not a host address")]
    RouterAddressNotHost { network: String, cidr: String },

    #[error("network '{network}': interface name '{name}' is already used by the {owner}")]
    InterfaceNameClash {
        network: String,
        name: String,
        owner: String,
    },

    #[error("networks '{first}' and '{second}' have overlapping subnets")]
    OverlappingNetworks { first: String, second: String },

    #[error("access port '{port}' uses pvid {pvid}, which no network defines")]
    UnknownAccessVlan { port: String, pvid: u16 },

    #[error("trunk port '{port}' allows VLAN {vlan_id}, which no network defines")]
    UnknownTrunkVlan { port: String, vlan_id: u16 },

    #[error("policy routing maps unknown network '{network}'")]
    UnknownPolicyNetwork { network: String },

    #[error("policy routing maps network '{network}' to unknown uplink '{uplink}'")]
    UnknownPolicyUplink { network: String, uplink: String },

    #[error("policy routing has no uplink mapping for network '{network}'")]
    UnmappedPolicyNetwork { network: String },

    #[error("DNS policy must list at least one upstream server")]
    EmptyDnsServers,
}

impl ModelError {
    /// Stable machine-readable code used in verify reports.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::EmptyField { .. } => "empty_field",
            ModelError::InvalidName { .. } => "invalid_name",
            ModelError::DuplicatePort { .. } => "duplicate_port",
            ModelError::DuplicateUplinkId { .. } => "duplicate_uplink_id",
            ModelError::UnknownUplinkPort { .. } => "unknown_uplink_port",
            ModelError::DuplicateUplinkInterface { .. } => "duplicate_uplink_interface",
            ModelError::UplinkInterfaceCollision { .. } => "uplink_interface_collision",
            ModelError::UnknownAssignedPort { .. } => "unknown_assigned_port",
            ModelError::DuplicateNetworkId { .. } => "duplicate_network_id",
            ModelError::DuplicateNetworkName { .. } => "duplicate_network_name",
            ModelError::DuplicateVlanId { .. } => "duplicate_vlan_id",
            ModelError::InvalidVlanId { .. } => "invalid_vlan_id",
            ModelError::ReservedVlan { .. } => "reserved_vlan",
            ModelError::HotspotWithoutDhcp { .. } => "hotspot_without_dhcp",
            ModelError::SubnetTooSmall { .. } => "subnet_too_small",
            ModelError::RouterAddressNotHost { .. } => "router_address_not_host",
            ModelError::InterfaceNameClash { .. } => "interface_name_clash",
            ModelError::OverlappingNetworks { .. } => "overlapping_networks",
            ModelError::UnknownAccessVlan { .. } => "unknown_access_vlan",
            ModelError::UnknownTrunkVlan { .. } => "unknown_trunk_vlan",
            ModelError::UnknownPolicyNetwork { .. } => "unknown_policy_network",
            ModelError::UnknownPolicyUplink { .. } => "unknown_policy_uplink",
            ModelError::UnmappedPolicyNetwork { .. } => "unmapped_policy_network",
            ModelError::EmptyDnsServers => "empty_dns_servers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("static uplink '{uplink}' has no gateway")]
    MissingGateway { uplink: String },

    #[error("static uplink '{uplink}' has no address")]
    MissingAddress { uplink: String },

    #[error("pppoe uplink '{uplink}' has no username")]
    MissingUsername { uplink: String },

    #[error("{count} uplinks supplied but only {max} probe addresses are available")]
    TooManyUplinks { count: usize, max: usize },

    #[error("trunk port '{port}' uses native VLAN {vlan_id}, which no network defines")]
    UnknownNativeVlan { port: String, vlan_id: u16 },

    #[error("access port '{port}' uses pvid {pvid}, which no network defines")]
    UnknownAccessVlan { port: String, pvid: u16 },

    #[error("trunk port '{port}' allows VLAN {vlan_id}, which no network defines")]
    UnknownTrunkVlan { port: String, vlan_id: u16 },

    #[error("network '{network}' is steered to uplink '{uplink}', which has no routing table")]
    PolicyTargetUnrouted { network: String, uplink: String },
}

impl PlanningError {
    pub fn code(&self) -> &'static str {
        match self {
            PlanningError::MissingGateway { .. } => "missing_gateway",
            PlanningError::MissingAddress { .. } => "missing_address",
            PlanningError::MissingUsername { .. } => "missing_username",
            PlanningError::TooManyUplinks { .. } => "too_many_uplinks",
            PlanningError::UnknownNativeVlan { .. } => "unknown_native_vlan",
            PlanningError::UnknownAccessVlan { .. } => "unknown_access_vlan",
            PlanningError::UnknownTrunkVlan { .. } => "unknown_trunk_vlan",
            PlanningError::PolicyTargetUnrouted { .. } => "policy_target_unrouted",
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid topology: {0}")]
    Model(#[from] ModelError),

    #[error("planning failed: {0}")]
    Planning(#[from] PlanningError),

    #[error("emission failed: {0}")]
    Emission(#[from] ros_script_core::WriteError),
}
