use colored::Colorize;
use ros_script_core::{format_section_counts, format_summary, Script};

use crate::plan::{Plan, Route};

/// Render the resolved plan for terminal output.
pub fn render_plan_text(plan: &Plan) -> String {
    let mut out = Vec::new();

    out.push(heading("vlans"));
    out.push(format!("bridge={}", plan.vlans.bridge));
    for port in &plan.vlans.ports {
        out.push(format!("- port {} mode={} pvid={}", port.port, port.mode, port.pvid));
    }
    for vlan in &plan.vlans.vlans {
        out.push(format!(
            "- vlan {} network={} tagged={}",
            vlan.vlan_id,
            vlan.network,
            vlan.tagged.join(",")
        ));
    }

    out.push(heading("failover"));
    if plan.failover.uplinks.is_empty() {
        out.push("- none".to_string());
    }
    for uplink in &plan.failover.uplinks {
        out.push(format!(
            "- {} table={} probe={} gateway={}",
            uplink.uplink, uplink.table, uplink.probe, uplink.gateway
        ));
        for route in uplink.routes() {
            out.push(format!("  {}", describe_route(route)));
        }
    }
    for skipped in &plan.failover.skipped {
        out.push(format!("- {skipped} skipped").yellow().to_string());
    }

    out.push(heading("policy"));
    if !plan.policy.active {
        out.push("- inactive".to_string());
    }
    for mark in &plan.policy.marks {
        let source = if mark.explicit { "mapped" } else { "default" };
        out.push(format!(
            "- {} in={} -> {} ({}, {source})",
            mark.network, mark.interface, mark.table, mark.uplink
        ));
    }
    out.join("\n")
}

/// Render summary counts of an emitted script.
pub fn render_script_summary(script: &Script) -> String {
    let mut out = vec![format_summary(script).cyan().to_string()];
    let counts = format_section_counts(script);
    if !counts.is_empty() {
        out.push(counts);
    }
    out.join("\n")
}

fn heading(name: &str) -> String {
    name.bold().to_string()
}

fn describe_route(route: &Route) -> String {
    let mut parts = vec![format!("{} via {}", route.dst, route.gateway)];
    if let Some(table) = &route.table {
        parts.push(format!("table={table}"));
    }
    if let Some(distance) = route.distance {
        parts.push(format!("distance={distance}"));
    }
    if let Some(scope) = route.scope {
        parts.push(format!("scope={scope}"));
    }
    if let Some(target_scope) = route.target_scope {
        parts.push(format!("target-scope={target_scope}"));
    }
    if route.check_gateway {
        parts.push("check-gateway=ping".to_string());
    }
    parts.join(" ")
}
