use std::net::{IpAddr, Ipv4Addr};

use indexmap::IndexMap;

use crate::model::{
    DnsPolicy, HardwareType, ManagementAccess, Network, PolicyRoutingConfig, Port, PortAssignment,
    PortRole, TopologyModel, UplinkKind, UplinkLink,
};

fn port(name: &str, role: PortRole) -> Port {
    Port {
        name: name.to_string(),
        hardware_type: HardwareType::Ether,
        default_role: role,
    }
}

fn network(id: &str, name: &str, vlan_id: u16, cidr: &str, hotspot: bool) -> Network {
    Network {
        id: id.to_string(),
        name: name.to_string(),
        vlan_id,
        cidr: cidr.parse().expect("cidr"),
        dhcp: true,
        hotspot,
    }
}

/// Dual-uplink branch office: static `wan-a` on ether1, PPPoE `wan-b` on
/// ether2, an office VLAN 10 and a hotspot guest VLAN 20. Policy routing is
/// configured but disabled.
pub(crate) fn sample_model() -> TopologyModel {
    let mut assignments = IndexMap::new();
    assignments.insert("ether3".to_string(), PortAssignment::Access { pvid: 10 });
    assignments.insert(
        "ether5".to_string(),
        PortAssignment::Trunk {
            native_vlan: 1,
            allowed_vlans: vec![10, 20],
        },
    );

    let mut mapping = IndexMap::new();
    mapping.insert("guest".to_string(), "wan-b".to_string());

    TopologyModel {
        identity: "branch-01".to_string(),
        management: ManagementAccess {
            token: "tok-123".to_string(),
            heartbeat_url: "https://monitor.example.net/api/heartbeat".to_string(),
            admin_password: Some("s3cret-pass".to_string()),
        },
        ports: vec![
            port("ether1", PortRole::Wan),
            port("ether2", PortRole::Wan),
            port("ether3", PortRole::Lan),
            port("ether4", PortRole::Lan),
            port("ether5", PortRole::Lan),
        ],
        uplinks: vec![
            UplinkLink {
                id: "wan-a".to_string(),
                interface: "ether1".to_string(),
                kind: UplinkKind::Static {
                    address: Some("203.0.113.2/30".parse().expect("address")),
                    gateway: Some(Ipv4Addr::new(203, 0, 113, 1)),
                },
            },
            UplinkLink {
                id: "wan-b".to_string(),
                interface: "ether2".to_string(),
                kind: UplinkKind::Pppoe {
                    username: Some("branch01@isp".to_string()),
                    password: Some("pppoe-pw".to_string()),
                },
            },
        ],
        networks: vec![
            network("office", "vlan10", 10, "192.168.10.1/24", false),
            network("guest", "vlan20", 20, "192.168.20.1/24", true),
        ],
        assignments,
        policy_routing: PolicyRoutingConfig {
            enabled: false,
            mapping,
        },
        dns: DnsPolicy {
            servers: vec![
                IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
                IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
            ],
            allow_remote_requests: true,
        },
    }
}
