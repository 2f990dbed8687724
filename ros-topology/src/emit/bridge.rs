use ros_script_core::{Command, Section};

use super::EmitContext;
use crate::model::{PortMode, DEFAULT_VLAN};
use crate::plan::BridgePort;

/// VLAN-filtering bridge, its member ports, VLAN interfaces and VLAN table.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let table = &ctx.plan.vlans;
    let mut section = Section::new("bridge");

    section.push(
        Command::add("/interface bridge")
            .arg("name", &table.bridge)
            .flag("vlan-filtering", true),
    );

    for port in &table.ports {
        section.push(
            Command::add("/interface bridge port")
                .arg("bridge", &table.bridge)
                .arg("interface", &port.port)
                .arg("pvid", port.pvid)
                .arg("frame-types", frame_types(port)),
        );
    }

    for network in &ctx.model.networks {
        section.push(
            Command::add("/interface vlan")
                .arg("name", &network.name)
                .arg("interface", &table.bridge)
                .arg("vlan-id", network.vlan_id),
        );
    }

    for membership in &table.vlans {
        section.push(
            Command::add("/interface bridge vlan")
                .arg("bridge", &table.bridge)
                .arg("vlan-ids", membership.vlan_id)
                .list("tagged", &membership.tagged),
        );
    }
    section
}

/// Access ports only take untagged frames; trunks whose native VLAN is the
/// bridge default only take tagged ones.
fn frame_types(port: &BridgePort) -> &'static str {
    match port.mode {
        PortMode::Access => "admit-only-untagged-and-priority-tagged",
        PortMode::Trunk if port.pvid == DEFAULT_VLAN => "admit-only-vlan-tagged",
        PortMode::Trunk => "admit-all",
    }
}
