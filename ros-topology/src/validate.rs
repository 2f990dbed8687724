//! Structural validation of a [`TopologyModel`].
//!
//! The wizard validates fields one at a time; this module re-checks the
//! cross-entity invariants before any planning runs:
//!
//! - identity and management fields are present
//! - port, uplink, network and interface names are unique and well-formed
//! - network interface names do not clash with ports, the bridge or PPPoE clients
//! - uplinks sit on catalog ports, one per port, never on a LAN assignment
//! - VLAN ids are in range, unique, and not the reserved default VLAN
//! - hotspot networks run DHCP and every DHCP subnet can hold a pool
//! - the router address of a network is a host address of its subnet
//! - network subnets do not overlap
//! - access/trunk assignments only reference defined networks
//! - policy-routing mappings reference known networks and uplinks
//! - the DNS policy names at least one upstream server

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ModelError;
use crate::model::{
    pppoe_interface_name, PortAssignment, TopologyModel, UplinkKind, DEFAULT_VLAN, MAX_VLAN,
};
use crate::profile::EmitterProfile;

/// Knobs that tighten validation beyond the structural minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Require an explicit uplink mapping for every network when policy
    /// routing is enabled, instead of defaulting to the first uplink.
    pub strict_policy_mapping: bool,
}

/// Return the first structural problem, if any.
pub fn validate(
    model: &TopologyModel,
    profile: &EmitterProfile,
    opts: ValidateOptions,
) -> Result<(), ModelError> {
    match model_findings(model, profile, opts).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect every structural problem in the model, in check order.
pub fn model_findings(
    model: &TopologyModel,
    profile: &EmitterProfile,
    opts: ValidateOptions,
) -> Vec<ModelError> {
    let mut out = Vec::new();
    out.extend(required_field_findings(model));
    out.extend(port_findings(model));
    out.extend(uplink_findings(model));
    out.extend(network_findings(model));
    out.extend(interface_clash_findings(model, profile));
    out.extend(assignment_findings(model));
    out.extend(policy_findings(model, opts));
    if model.dns.servers.is_empty() {
        out.push(ModelError::EmptyDnsServers);
    }
    out
}

/// True for names safe to use as RouterOS interface names in emitted scripts.
pub fn is_interface_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= 64
        && first.is_ascii_alphabetic()
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

fn required_field_findings(model: &TopologyModel) -> Vec<ModelError> {
    let mut out = Vec::new();
    let required = [
        ("topology", "identity", model.identity.as_str()),
        ("management", "token", model.management.token.as_str()),
        ("management", "heartbeat_url", model.management.heartbeat_url.as_str()),
    ];
    for (entity, field, value) in required {
        if value.trim().is_empty() {
            out.push(ModelError::EmptyField {
                entity: entity.to_string(),
                field: field.to_string(),
            });
        }
    }
    out
}

fn port_findings(model: &TopologyModel) -> Vec<ModelError> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for port in &model.ports {
        if !is_interface_name(&port.name) {
            out.push(ModelError::InvalidName {
                entity: "port".to_string(),
                name: port.name.clone(),
            });
        }
        if !seen.insert(port.name.as_str()) {
            out.push(ModelError::DuplicatePort {
                name: port.name.clone(),
            });
        }
    }
    out
}

fn uplink_findings(model: &TopologyModel) -> Vec<ModelError> {
    let mut out = Vec::new();
    let mut ids = BTreeSet::new();
    let mut by_interface: BTreeMap<&str, &str> = BTreeMap::new();

    for uplink in &model.uplinks {
        if uplink.id.trim().is_empty() {
            out.push(ModelError::EmptyField {
                entity: "uplink".to_string(),
                field: "id".to_string(),
            });
        }
        if !ids.insert(uplink.id.as_str()) {
            out.push(ModelError::DuplicateUplinkId {
                id: uplink.id.clone(),
            });
        }
        if model.port(&uplink.interface).is_none() {
            out.push(ModelError::UnknownUplinkPort {
                uplink: uplink.id.clone(),
                port: uplink.interface.clone(),
            });
        }
        if let Some(first) = by_interface.get(uplink.interface.as_str()) {
            out.push(ModelError::DuplicateUplinkInterface {
                interface: uplink.interface.clone(),
                first: (*first).to_string(),
                second: uplink.id.clone(),
            });
        } else {
            by_interface.insert(&uplink.interface, &uplink.id);
        }
        if model.assignments.contains_key(&uplink.interface) {
            out.push(ModelError::UplinkInterfaceCollision {
                port: uplink.interface.clone(),
                uplink: uplink.id.clone(),
            });
        }
    }
    out
}

fn network_findings(model: &TopologyModel) -> Vec<ModelError> {
    let mut out = Vec::new();
    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    let mut vlans: BTreeMap<u16, &str> = BTreeMap::new();

    for network in &model.networks {
        if !ids.insert(network.id.as_str()) {
            out.push(ModelError::DuplicateNetworkId {
                id: network.id.clone(),
            });
        }
        if !is_interface_name(&network.name) {
            out.push(ModelError::InvalidName {
                entity: "network".to_string(),
                name: network.name.clone(),
            });
        }
        if !names.insert(network.name.as_str()) {
            out.push(ModelError::DuplicateNetworkName {
                name: network.name.clone(),
            });
        }

        if network.vlan_id == 0 || network.vlan_id > MAX_VLAN {
            out.push(ModelError::InvalidVlanId {
                network: network.name.clone(),
                vlan_id: network.vlan_id,
            });
        } else if network.vlan_id == DEFAULT_VLAN {
            out.push(ModelError::ReservedVlan {
                network: network.name.clone(),
            });
        } else if let Some(first) = vlans.get(&network.vlan_id) {
            out.push(ModelError::DuplicateVlanId {
                vlan_id: network.vlan_id,
                first: (*first).to_string(),
                second: network.name.clone(),
            });
        } else {
            vlans.insert(network.vlan_id, &network.name);
        }

        if network.hotspot && !network.dhcp {
            out.push(ModelError::HotspotWithoutDhcp {
                network: network.name.clone(),
            });
        }
        if network.dhcp && network.cidr.prefix_len() > 30 {
            out.push(ModelError::SubnetTooSmall {
                network: network.name.clone(),
                cidr: network.cidr.to_string(),
            });
        }
        let addr = network.router_address();
        if network.cidr.prefix_len() <= 30
            && (addr == network.cidr.network() || addr == network.cidr.broadcast())
        {
            out.push(ModelError::RouterAddressNotHost {
                network: network.name.clone(),
                cidr: network.cidr.to_string(),
            });
        }
    }

    for (idx, a) in model.networks.iter().enumerate() {
        for b in model.networks.iter().skip(idx + 1) {
            let (sa, sb) = (a.subnet(), b.subnet());
            if sa.contains(&sb.network()) || sb.contains(&sa.network()) {
                out.push(ModelError::OverlappingNetworks {
                    first: a.name.clone(),
                    second: b.name.clone(),
                });
            }
        }
    }
    out
}

/// Network names become `/interface vlan` names and must not shadow an
/// interface the script already creates or that the device already has.
fn interface_clash_findings(model: &TopologyModel, profile: &EmitterProfile) -> Vec<ModelError> {
    let mut taken: BTreeMap<String, String> = BTreeMap::new();
    taken.insert(profile.bridge_name.clone(), "bridge".to_string());
    for port in &model.ports {
        taken
            .entry(port.name.clone())
            .or_insert_with(|| "port".to_string());
    }
    for (idx, uplink) in model.uplinks.iter().enumerate() {
        if matches!(uplink.kind, UplinkKind::Pppoe { .. }) {
            taken
                .entry(pppoe_interface_name(idx + 1))
                .or_insert_with(|| format!("pppoe client of uplink '{}'", uplink.id));
        }
    }

    model
        .networks
        .iter()
        .filter_map(|network| {
            taken
                .get(&network.name)
                .map(|owner| ModelError::InterfaceNameClash {
                    network: network.id.clone(),
                    name: network.name.clone(),
                    owner: owner.clone(),
                })
        })
        .collect()
}

fn assignment_findings(model: &TopologyModel) -> Vec<ModelError> {
    let mut out = Vec::new();
    for (port, assignment) in &model.assignments {
        if model.port(port).is_none() {
            out.push(ModelError::UnknownAssignedPort { port: port.clone() });
        }
        match assignment {
            PortAssignment::Access { pvid } => {
                if model.network_by_vlan(*pvid).is_none() {
                    out.push(ModelError::UnknownAccessVlan {
                        port: port.clone(),
                        pvid: *pvid,
                    });
                }
            }
            PortAssignment::Trunk {
                native_vlan,
                allowed_vlans,
            } => {
                for vlan_id in allowed_vlans {
                    if vlan_id != native_vlan && model.network_by_vlan(*vlan_id).is_none() {
                        out.push(ModelError::UnknownTrunkVlan {
                            port: port.clone(),
                            vlan_id: *vlan_id,
                        });
                    }
                }
            }
        }
    }
    out
}

fn policy_findings(model: &TopologyModel, opts: ValidateOptions) -> Vec<ModelError> {
    let mut out = Vec::new();
    let policy = &model.policy_routing;

    for (network, uplink) in &policy.mapping {
        if model.network_by_id(network).is_none() {
            out.push(ModelError::UnknownPolicyNetwork {
                network: network.clone(),
            });
        }
        if model.uplink_by_id(uplink).is_none() {
            out.push(ModelError::UnknownPolicyUplink {
                network: network.clone(),
                uplink: uplink.clone(),
            });
        }
    }

    let routable = model
        .uplinks
        .iter()
        .filter(|uplink| uplink.kind.is_routable())
        .count();
    if opts.strict_policy_mapping && policy.enabled && routable >= 2 {
        for network in &model.networks {
            if !policy.mapping.contains_key(&network.id) {
                out.push(ModelError::UnmappedPolicyNetwork {
                    network: network.id.clone(),
                });
            }
        }
    }
    out
}
