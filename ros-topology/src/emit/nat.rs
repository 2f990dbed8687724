use ros_script_core::{Command, Section};

use super::EmitContext;

/// Masquerade everything leaving through the WAN list, plus each hotspot subnet.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let mut section = Section::new("nat");
    section.push(
        Command::add("/ip firewall nat")
            .arg("chain", "srcnat")
            .arg("out-interface-list", &ctx.profile.wan_list)
            .arg("action", "masquerade")
            .arg("comment", "masquerade wan"),
    );
    for network in ctx.model.networks.iter().filter(|n| n.hotspot) {
        section.push(
            Command::add("/ip firewall nat")
                .arg("chain", "srcnat")
                .arg("src-address", network.subnet())
                .arg("action", "masquerade")
                .arg("comment", format!("hotspot {}", network.id)),
        );
    }
    section
}
