use ros_script_core::{Command, Section};

use super::EmitContext;

const FILTER: &str = "/ip firewall filter";
const MANGLE: &str = "/ip firewall mangle";

/// Address lists, input filter, local bypass and routing marks.
///
/// The local-to-local accept rule is always the first mangle rule so traffic
/// between LAN segments never picks up a routing mark.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let profile = ctx.profile;
    let local = &profile.local_list;
    let mut section = Section::new("firewall");

    for net in &profile.management_allow_list {
        section.push(
            Command::add("/ip firewall address-list")
                .arg("list", &profile.management_list)
                .arg("address", net),
        );
    }
    for network in &ctx.model.networks {
        section.push(
            Command::add("/ip firewall address-list")
                .arg("list", local)
                .arg("address", network.subnet())
                .arg("comment", &network.id),
        );
    }

    section.push(
        Command::add(FILTER)
            .arg("chain", "input")
            .arg("connection-state", "invalid")
            .arg("action", "drop")
            .arg("comment", "drop invalid"),
    );
    section.push(
        Command::add(FILTER)
            .arg("chain", "input")
            .arg("connection-state", "established,related")
            .arg("action", "accept")
            .arg("comment", "accept established"),
    );
    section.push(
        Command::add(FILTER)
            .arg("chain", "input")
            .arg("src-address-list", &profile.management_list)
            .arg("action", "accept")
            .arg("comment", "accept management"),
    );
    for protocol in ["udp", "tcp"] {
        section.push(
            Command::add(FILTER)
                .arg("chain", "input")
                .arg("protocol", protocol)
                .arg("dst-port", 53)
                .arg("src-address-list", local)
                .arg("action", "accept")
                .arg("comment", format!("accept dns {protocol}")),
        );
    }
    section.push(
        Command::add(FILTER)
            .arg("chain", "input")
            .arg("action", "drop")
            .arg("comment", "default drop"),
    );

    section.push(
        Command::add(MANGLE)
            .arg("chain", "prerouting")
            .arg("src-address-list", local)
            .arg("dst-address-list", local)
            .arg("action", "accept")
            .arg("comment", "local bypass"),
    );
    for mark in &ctx.plan.policy.marks {
        section.push(
            Command::add(MANGLE)
                .arg("chain", "prerouting")
                .arg("in-interface", &mark.interface)
                .arg("dst-address-list", format!("!{local}"))
                .arg("action", "mark-routing")
                .arg("new-routing-mark", &mark.table)
                .flag("passthrough", false)
                .arg("comment", format!("{} via {}", mark.network, mark.uplink)),
        );
    }
    section
}
