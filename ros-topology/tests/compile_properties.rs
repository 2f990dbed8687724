use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use ros_script_core::Command;
use ros_topology::compile::{compile, CompileOptions, CompiledScript};
use ros_topology::input::load_model;
use ros_topology::model::{PortAssignment, TopologyModel};
use ros_topology::profile::{embedded_profile, EmitterProfile};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn opts() -> CompileOptions {
    CompileOptions::at(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
}

fn compile_fixture(path: &str) -> (TopologyModel, CompiledScript) {
    let model = load_model(&fixture(path)).expect("load model");
    let out = compile(&model, &embedded_profile(), opts()).expect("compile");
    (model, out)
}

fn routes(out: &CompiledScript) -> Vec<&Command> {
    out.script.commands_at("/ip route")
}

#[test]
fn identical_inputs_produce_identical_text() {
    let (model, first) = compile_fixture("fixtures/dual-wan-policy.toml");
    let second = compile(&model, &embedded_profile(), opts()).expect("compile");
    assert_eq!(first.text, second.text);

    let later = CompileOptions::at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    let third = compile(&model, &embedded_profile(), later).expect("compile");
    let strip = |text: &str| -> Vec<String> {
        text.lines()
            .filter(|l| !l.starts_with("# generated "))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(strip(&first.text), strip(&third.text));
}

#[test]
fn single_static_uplink_scenario() {
    let (_, out) = compile_fixture("fixtures/single-static.toml");

    assert_eq!(out.script.commands_at("/routing table").len(), 1);
    assert!(out.text.contains("/routing table add name=to-wan1 fib\n"));

    let host_routes: Vec<_> = routes(&out)
        .into_iter()
        .filter(|r| r.has("scope", "10"))
        .collect();
    assert_eq!(host_routes.len(), 1);
    assert_eq!(host_routes[0].get("dst-address"), Some("8.8.8.8/32"));
    assert_eq!(host_routes[0].get("gateway"), Some("203.0.113.1"));

    let dhcp = out.script.commands_at("/ip dhcp-server");
    assert_eq!(dhcp.len(), 1);
    assert_eq!(dhcp[0].get("interface"), Some("vlan10"));

    assert!(!out.text.contains("action=mark-routing"));
    assert!(routes(&out).iter().all(|r| !r.get("comment").unwrap_or("").contains("backup")));
}

#[test]
fn dual_wan_policy_scenario() {
    let (_, out) = compile_fixture("fixtures/dual-wan-policy.toml");
    let marks: Vec<_> = out
        .script
        .commands_at("/ip firewall mangle")
        .into_iter()
        .filter(|c| c.has("action", "mark-routing"))
        .collect();

    assert_eq!(marks.len(), 3);
    let to_wan2: Vec<_> = marks
        .iter()
        .filter(|c| c.has("new-routing-mark", "to-wan2"))
        .collect();
    assert_eq!(to_wan2.len(), 1);
    assert_eq!(to_wan2[0].get("in-interface"), Some("vlan20"));
    assert!(marks.iter().all(|c| c.has("passthrough", "no")));
}

#[test]
fn every_vlan_is_tagged_on_exactly_the_trunks_allowing_it() {
    let (model, out) = compile_fixture("fixtures/dual-wan-policy.toml");
    let profile = EmitterProfile::default();
    let entries = out.script.commands_at("/interface bridge vlan");
    assert_eq!(entries.len(), model.networks.len());

    for network in &model.networks {
        let entry = entries
            .iter()
            .find(|c| c.get("vlan-ids") == Some(network.vlan_id.to_string().as_str()))
            .expect("bridge vlan entry");
        let tagged: Vec<&str> = entry.get("tagged").expect("tagged").split(',').collect();

        let mut expected = vec![profile.bridge_name.as_str()];
        for (port, assignment) in &model.assignments {
            if let PortAssignment::Trunk {
                native_vlan,
                allowed_vlans,
            } = assignment
            {
                if allowed_vlans.contains(&network.vlan_id) && *native_vlan != network.vlan_id {
                    expected.push(port.as_str());
                }
            }
        }
        assert_eq!(tagged, expected, "vlan {}", network.vlan_id);
    }
}

#[test]
fn every_table_has_backups_through_all_other_uplinks() {
    let (_, out) = compile_fixture("fixtures/dual-wan-policy.toml");
    let tables = ["to-wan1", "to-wan2"];
    for table in tables {
        let backups: Vec<_> = routes(&out)
            .into_iter()
            .filter(|r| r.has("routing-table", table) && r.get("check-gateway").is_none())
            .collect();
        assert_eq!(backups.len(), tables.len() - 1, "{table}");
    }

    let main_defaults: Vec<_> = routes(&out)
        .into_iter()
        .filter(|r| r.get("routing-table").is_none() && r.has("dst-address", "0.0.0.0/0"))
        .filter_map(|r| r.get("distance"))
        .collect();
    assert_eq!(main_defaults, vec!["1", "2"]);
}

#[test]
fn local_bypass_precedes_every_mark() {
    let (_, out) = compile_fixture("fixtures/dual-wan-policy.toml");
    let bypass = out
        .script
        .position(|c| c.path == "/ip firewall mangle" && c.has("action", "accept"))
        .expect("bypass rule");
    let first_mark = out
        .script
        .position(|c| c.has("action", "mark-routing"))
        .expect("mark rule");
    assert!(bypass < first_mark);
}

#[test]
fn dhcp_uplink_is_brought_up_but_not_routed() {
    let (_, out) = compile_fixture("fixtures/lte-backup.json");

    let clients = out.script.commands_at("/ip dhcp-client");
    assert_eq!(clients.len(), 1);
    assert!(clients[0].has("add-default-route", "no"));
    assert_eq!(out.script.commands_at("/routing table").len(), 1);
    assert!(out.text.contains("interface=pppoe-out1"));
    assert!(!out.text.contains("action=mark-routing"));
}

#[test]
fn upstream_dns_is_handed_out_when_router_does_not_resolve() {
    let (_, out) = compile_fixture("fixtures/dual-wan-policy.toml");
    let networks = out.script.commands_at("/ip dhcp-server network");
    assert_eq!(networks.len(), 2);
    assert!(networks
        .iter()
        .all(|c| c.has("dns-server", "9.9.9.9,1.1.1.1")));
    assert!(out
        .text
        .contains("/ip dns set servers=9.9.9.9,1.1.1.1 allow-remote-requests=no\n"));
}
