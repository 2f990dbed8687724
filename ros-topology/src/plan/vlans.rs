//! Port-VLAN resolution.
//!
//! Derives which bridge members must carry each VLAN tagged, and how every
//! assigned LAN port joins the bridge. Access ports attach through their PVID
//! and never appear in a VLAN's tagged set; trunk ports are tagged members of
//! every allowed VLAN except their native one.

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::PlanningError;
use crate::model::{PortAssignment, PortMode, TopologyModel, DEFAULT_VLAN};

/// How one LAN port joins the shared bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgePort {
    pub port: String,
    pub mode: PortMode,
    /// Untagged VLAN: the access PVID or the trunk's native VLAN.
    pub pvid: u16,
}

/// Bridge VLAN table entry for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanMembership {
    pub vlan_id: u16,
    pub network: String,
    /// Bridge first, then trunk ports in assignment order, without duplicates.
    pub tagged: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanTable {
    pub bridge: String,
    pub ports: Vec<BridgePort>,
    pub vlans: Vec<VlanMembership>,
}

impl VlanTable {
    pub fn membership(&self, vlan_id: u16) -> Option<&VlanMembership> {
        self.vlans.iter().find(|m| m.vlan_id == vlan_id)
    }
}

/// Resolve bridge ports and per-VLAN tagged membership.
///
/// Ports carrying an uplink are never bridged. Catalog LAN ports without an
/// assignment are left off the bridge.
pub fn resolve_port_vlans(model: &TopologyModel, bridge: &str) -> Result<VlanTable, PlanningError> {
    let mut members: Vec<IndexSet<String>> = model
        .networks
        .iter()
        .map(|_| IndexSet::from([bridge.to_string()]))
        .collect();
    let mut ports = Vec::new();

    for (port, assignment) in &model.assignments {
        if model.is_uplink_interface(port) {
            log::debug!("port {port} carries an uplink; not bridged");
            continue;
        }
        match assignment {
            PortAssignment::Access { pvid } => {
                if model.network_by_vlan(*pvid).is_none() {
                    return Err(PlanningError::UnknownAccessVlan {
                        port: port.clone(),
                        pvid: *pvid,
                    });
                }
            }
            PortAssignment::Trunk {
                native_vlan,
                allowed_vlans,
            } => {
                if *native_vlan != DEFAULT_VLAN && model.network_by_vlan(*native_vlan).is_none() {
                    return Err(PlanningError::UnknownNativeVlan {
                        port: port.clone(),
                        vlan_id: *native_vlan,
                    });
                }
                for vlan_id in allowed_vlans {
                    if vlan_id == native_vlan {
                        continue;
                    }
                    let idx = model
                        .networks
                        .iter()
                        .position(|n| n.vlan_id == *vlan_id)
                        .ok_or_else(|| PlanningError::UnknownTrunkVlan {
                            port: port.clone(),
                            vlan_id: *vlan_id,
                        })?;
                    members[idx].insert(port.clone());
                }
            }
        }
        ports.push(BridgePort {
            port: port.clone(),
            mode: assignment.mode(),
            pvid: assignment.pvid(),
        });
    }

    for port in model.lan_ports() {
        if !model.assignments.contains_key(&port.name) {
            log::warn!("LAN port {} has no assignment; left off the bridge", port.name);
        }
    }

    let vlans = model
        .networks
        .iter()
        .zip(members)
        .map(|(network, tagged)| VlanMembership {
            vlan_id: network.vlan_id,
            network: network.name.clone(),
            tagged: tagged.into_iter().collect(),
        })
        .collect();

    Ok(VlanTable {
        bridge: bridge.to_string(),
        ports,
        vlans,
    })
}

#[cfg(test)]
mod tests {
    use super::resolve_port_vlans;
    use crate::error::PlanningError;
    use crate::model::{PortAssignment, PortMode};
    use crate::test_support::sample_model;

    #[test]
    fn trunk_ports_are_tagged_and_access_ports_are_not() {
        let mut model = sample_model();
        model.assignments.insert(
            "ether4".to_string(),
            PortAssignment::Trunk {
                native_vlan: 1,
                allowed_vlans: vec![20],
            },
        );
        let table = resolve_port_vlans(&model, "bridge-lan").expect("resolve");

        let office = table.membership(10).expect("vlan 10");
        assert_eq!(office.tagged, vec!["bridge-lan", "ether5"]);
        let guest = table.membership(20).expect("vlan 20");
        assert_eq!(guest.tagged, vec!["bridge-lan", "ether5", "ether4"]);

        let access = table.ports.iter().find(|p| p.port == "ether3").expect("ether3");
        assert_eq!(access.mode, PortMode::Access);
        assert_eq!(access.pvid, 10);
    }

    #[test]
    fn native_vlan_is_skipped_in_tagged_set() {
        let mut model = sample_model();
        model.assignments.insert(
            "ether4".to_string(),
            PortAssignment::Trunk {
                native_vlan: 10,
                allowed_vlans: vec![10, 20, 20],
            },
        );
        let table = resolve_port_vlans(&model, "bridge-lan").expect("resolve");

        assert!(!table
            .membership(10)
            .expect("vlan 10")
            .tagged
            .contains(&"ether4".to_string()));
        let guest = &table.membership(20).expect("vlan 20").tagged;
        assert_eq!(guest.iter().filter(|p| *p == "ether4").count(), 1);
        let bridged = table.ports.iter().find(|p| p.port == "ether4").expect("ether4");
        assert_eq!(bridged.pvid, 10);
    }

    #[test]
    fn networks_without_trunks_still_include_the_bridge() {
        let mut model = sample_model();
        model.assignments.shift_remove("ether5");
        let table = resolve_port_vlans(&model, "br0").expect("resolve");
        for membership in &table.vlans {
            assert_eq!(membership.tagged, vec!["br0"]);
        }
    }

    #[test]
    fn rejects_access_port_on_undefined_vlan() {
        let mut model = sample_model();
        model
            .assignments
            .insert("ether4".to_string(), PortAssignment::Access { pvid: 300 });
        assert_eq!(
            resolve_port_vlans(&model, "bridge-lan"),
            Err(PlanningError::UnknownAccessVlan {
                port: "ether4".to_string(),
                pvid: 300
            })
        );
    }

    #[test]
    fn rejects_trunk_native_vlan_without_network() {
        let mut model = sample_model();
        model.assignments.insert(
            "ether4".to_string(),
            PortAssignment::Trunk {
                native_vlan: 55,
                allowed_vlans: vec![10],
            },
        );
        assert!(matches!(
            resolve_port_vlans(&model, "bridge-lan"),
            Err(PlanningError::UnknownNativeVlan { vlan_id: 55, .. })
        ));
    }
}
