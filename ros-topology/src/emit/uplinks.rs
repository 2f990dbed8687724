use ros_script_core::{Command, Section};

use super::EmitContext;
use crate::model::{UplinkKind, UplinkLink};
use crate::plan::Route;

/// Uplink bring-up, WAN list membership, routing tables and failover routes.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let wan_list = &ctx.profile.wan_list;
    let mut section = Section::new("uplinks");

    section.push(Command::add("/interface list").arg("name", wan_list));
    for (pos, uplink) in ctx.model.uplinks.iter().enumerate() {
        let index = pos + 1;
        section.push(bring_up(uplink, index));
        section.push(
            Command::add("/interface list member")
                .arg("list", wan_list)
                .arg("interface", uplink.egress_interface(index)),
        );
    }

    for routes in &ctx.plan.failover.uplinks {
        section.comment(format!("{} via {}", routes.table, routes.uplink));
        section.push(
            Command::add("/routing table")
                .arg("name", &routes.table)
                .keyword("fib"),
        );
        section.extend(routes.routes().map(route_command));
    }
    section
}

fn bring_up(uplink: &UplinkLink, index: usize) -> Command {
    match &uplink.kind {
        UplinkKind::Static { address, .. } => Command::add("/ip address")
            .arg_opt("address", address.as_ref())
            .arg("interface", &uplink.interface)
            .arg("comment", &uplink.id),
        UplinkKind::Pppoe { username, password } => Command::add("/interface pppoe-client")
            .arg("name", uplink.egress_interface(index))
            .arg("interface", &uplink.interface)
            .arg_opt("user", username.as_ref())
            .arg_opt("password", password.as_ref())
            .flag("add-default-route", false)
            .flag("use-peer-dns", false)
            .flag("disabled", false)
            .arg("comment", &uplink.id),
        UplinkKind::Dhcp => Command::add("/ip dhcp-client")
            .arg("interface", &uplink.interface)
            .flag("add-default-route", false)
            .flag("use-peer-dns", false)
            .flag("disabled", false)
            .arg("comment", &uplink.id),
    }
}

fn route_command(route: &Route) -> Command {
    let mut cmd = Command::add("/ip route")
        .arg("dst-address", route.dst)
        .arg("gateway", &route.gateway)
        .arg_opt("routing-table", route.table.as_ref())
        .arg_opt("distance", route.distance)
        .arg_opt("scope", route.scope)
        .arg_opt("target-scope", route.target_scope);
    if route.check_gateway {
        cmd = cmd.arg("check-gateway", "ping");
    }
    cmd.arg("comment", &route.comment)
}
