use std::net::{IpAddr, Ipv4Addr};

use ros_script_core::{Command, Section};

use super::EmitContext;
use crate::model::Network;

/// Address pool name for a regular DHCP network.
pub fn pool_name(network: &Network) -> String {
    format!("pool-{}", network.name)
}

/// Address pool name for a hotspot network.
pub fn hotspot_pool_name(network: &Network) -> String {
    format!("hs-pool-{}", network.name)
}

/// DHCP pool ranges covering every host address except the router's.
///
/// Returns one range when the router sits at either end of the host range,
/// two when it sits in the middle, and nothing when no host is left.
pub fn pool_ranges(network: &Network) -> Vec<String> {
    let subnet = network.subnet();
    if subnet.prefix_len() > 30 {
        return Vec::new();
    }
    let first = u32::from(subnet.network()) + 1;
    let last = u32::from(subnet.broadcast()) - 1;
    let router = u32::from(network.router_address());

    let spans = if router < first || router > last {
        vec![(first, last)]
    } else {
        [(first, router.saturating_sub(1)), (router + 1, last)]
            .into_iter()
            .filter(|(start, end)| start <= end)
            .collect()
    };
    spans
        .into_iter()
        .map(|(start, end)| format!("{}-{}", Ipv4Addr::from(start), Ipv4Addr::from(end)))
        .collect()
}

/// Per-network addressing, DHCP service and hotspot.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let mut section = Section::new("networks");
    let dns_servers = handed_out_dns(ctx);

    for network in &ctx.model.networks {
        section.push(
            Command::add("/ip address")
                .arg("address", network.cidr)
                .arg("interface", &network.name)
                .arg("comment", &network.id),
        );
        if !network.dhcp {
            continue;
        }

        let pool = if network.hotspot {
            hotspot_pool_name(network)
        } else {
            pool_name(network)
        };
        section.push(
            Command::add("/ip pool")
                .arg("name", &pool)
                .list("ranges", pool_ranges(network)),
        );
        section.push(
            Command::add("/ip dhcp-server")
                .arg("name", format!("dhcp-{}", network.name))
                .arg("interface", &network.name)
                .arg("address-pool", &pool)
                .arg("lease-time", &ctx.profile.dhcp_lease_time)
                .flag("disabled", false),
        );
        let router = IpAddr::V4(network.router_address());
        section.push(
            Command::add("/ip dhcp-server network")
                .arg("address", network.subnet())
                .arg("gateway", network.router_address())
                .list(
                    "dns-server",
                    dns_servers.as_deref().unwrap_or(std::slice::from_ref(&router)),
                ),
        );

        if network.hotspot {
            let profile_name = format!("hsprof-{}", network.name);
            section.push(
                Command::add("/ip hotspot profile")
                    .arg("name", &profile_name)
                    .arg("hotspot-address", network.router_address())
                    .list("login-by", &ctx.profile.hotspot_login_by),
            );
            section.push(
                Command::add("/ip hotspot")
                    .arg("name", format!("hotspot-{}", network.name))
                    .arg("interface", &network.name)
                    .arg("address-pool", &pool)
                    .arg("profile", &profile_name)
                    .flag("disabled", false),
            );
        }
    }
    section
}

/// Upstream servers handed to clients when the router does not resolve for
/// them; `None` means each network hands out its own router address.
///
/// DHCPv4 only carries IPv4 resolvers, so IPv6 upstreams are left out. With
/// none left, clients fall back to the router address.
fn handed_out_dns(ctx: &EmitContext<'_>) -> Option<Vec<IpAddr>> {
    if ctx.model.dns.allow_remote_requests {
        return None;
    }
    let (v4, v6): (Vec<IpAddr>, Vec<IpAddr>) = ctx
        .model
        .dns
        .servers
        .iter()
        .copied()
        .partition(IpAddr::is_ipv4);
    if !v6.is_empty() {
        log::warn!(
            "{} IPv6 DNS server(s) cannot be handed out over DHCPv4",
            v6.len()
        );
    }
    if v4.is_empty() {
        None
    } else {
        Some(v4)
    }
}
