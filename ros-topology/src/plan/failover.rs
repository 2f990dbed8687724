//! Multi-uplink failover routing.
//!
//! Every routed uplink gets a probe host, a dedicated routing table and a set
//! of routes built on the recursive-route pattern: the probe is pinned to the
//! uplink's gateway with a scope-10 host route, and default routes point at
//! the probe with `check-gateway=ping`. When the probe stops answering, the
//! device withdraws those defaults and the next-lowest distance takes over.
//!
//! Uplink `i` (1-based position in the model) owns table `to-wan{i}` and probe
//! `probes[i-1]`; the main-table default uses `distance=i`, and the backup
//! through uplink `j` inside another uplink's table uses `distance=j+2`.

use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

use crate::error::PlanningError;
use crate::model::{pppoe_interface_name, routing_table_name, UplinkKind, UplinkLink};

/// Scope of the probe host route.
pub const PROBE_ROUTE_SCOPE: u8 = 10;
/// Target scope letting default routes resolve through the probe host route.
pub const RECURSIVE_TARGET_SCOPE: u8 = 11;

/// What to do when more uplinks are supplied than probe addresses exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UplinkOverflow {
    /// Fail with [`PlanningError::TooManyUplinks`].
    #[default]
    Reject,
    /// Plan only the first uplinks and log a warning for the rest.
    Truncate,
}

/// Next hop of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Gateway {
    Address(Ipv4Addr),
    Interface(String),
}

impl Display for Gateway {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Gateway::Address(addr) => write!(f, "{addr}"),
            Gateway::Interface(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub dst: Ipv4Net,
    pub gateway: Gateway,
    /// `None` means the main table.
    pub table: Option<String>,
    pub distance: Option<usize>,
    pub scope: Option<u8>,
    pub target_scope: Option<u8>,
    pub check_gateway: bool,
    pub comment: String,
}

impl Route {
    fn new(dst: Ipv4Net, gateway: Gateway, comment: String) -> Self {
        Self {
            dst,
            gateway,
            table: None,
            distance: None,
            scope: None,
            target_scope: None,
            check_gateway: false,
            comment,
        }
    }
}

/// Routing plan for one uplink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UplinkRoutes {
    /// 1-based position of the uplink in the model.
    pub index: usize,
    pub uplink: String,
    pub table: String,
    pub probe: Ipv4Addr,
    pub gateway: Gateway,
    pub host_route: Route,
    pub table_default: Route,
    pub main_default: Route,
    pub backups: Vec<Route>,
}

impl UplinkRoutes {
    /// All routes in emission order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        [&self.host_route, &self.table_default, &self.main_default]
            .into_iter()
            .chain(self.backups.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailoverPlan {
    pub uplinks: Vec<UplinkRoutes>,
    /// Uplink ids left out of routing (unsupported kind or truncated).
    pub skipped: Vec<String>,
}

impl FailoverPlan {
    /// Routing table of the uplink with `id`, if it was planned.
    pub fn table_for(&self, id: &str) -> Option<&str> {
        self.uplinks
            .iter()
            .find(|u| u.uplink == id)
            .map(|u| u.table.as_str())
    }
}

/// Build failover routes for `uplinks` using one probe per uplink position.
///
/// Fails without producing any routes if an uplink lacks the gateway or
/// credentials its kind needs, or if there are more uplinks than probes and
/// `overflow` is [`UplinkOverflow::Reject`].
pub fn plan_failover(
    uplinks: &[UplinkLink],
    probes: &[Ipv4Addr],
    overflow: UplinkOverflow,
) -> Result<FailoverPlan, PlanningError> {
    let mut skipped = Vec::new();
    let planned = if uplinks.len() > probes.len() {
        match overflow {
            UplinkOverflow::Reject => {
                return Err(PlanningError::TooManyUplinks {
                    count: uplinks.len(),
                    max: probes.len(),
                })
            }
            UplinkOverflow::Truncate => {
                for dropped in &uplinks[probes.len()..] {
                    log::warn!(
                        "uplink {} exceeds the {} supported uplinks; not routed",
                        dropped.id,
                        probes.len()
                    );
                    skipped.push(dropped.id.clone());
                }
                &uplinks[..probes.len()]
            }
        }
    } else {
        uplinks
    };

    let mut gateways = Vec::new();
    for (pos, uplink) in planned.iter().enumerate() {
        let index = pos + 1;
        match uplink_gateway(uplink, index)? {
            Some(gateway) => gateways.push((index, uplink, gateway)),
            None => {
                log::warn!(
                    "uplink {} uses unsupported kind {}; skipped for failover routing",
                    uplink.id,
                    uplink.kind.name()
                );
                skipped.push(uplink.id.clone());
            }
        }
    }

    let mut plan = FailoverPlan {
        uplinks: Vec::with_capacity(gateways.len()),
        skipped,
    };
    for (index, uplink, gateway) in &gateways {
        let table = routing_table_name(*index);
        let probe = probes[*index - 1];
        log::debug!("uplink {} -> table {table}, probe {probe}", uplink.id);

        let mut host_route = Route::new(
            Ipv4Net::from(probe),
            gateway.clone(),
            format!("probe {}", uplink.id),
        );
        host_route.scope = Some(PROBE_ROUTE_SCOPE);

        let mut table_default =
            Route::new(default_destination(), Gateway::Address(probe), format!("{table} default"));
        table_default.table = Some(table.clone());
        table_default.target_scope = Some(RECURSIVE_TARGET_SCOPE);
        table_default.check_gateway = true;

        let mut main_default =
            Route::new(default_destination(), Gateway::Address(probe), format!("{} primary", uplink.id));
        main_default.distance = Some(*index);
        main_default.target_scope = Some(RECURSIVE_TARGET_SCOPE);
        main_default.check_gateway = true;

        let backups = gateways
            .iter()
            .filter(|(other, _, _)| other != index)
            .map(|(other, other_uplink, other_gateway)| {
                let mut backup = Route::new(
                    default_destination(),
                    other_gateway.clone(),
                    format!("{table} backup via {}", other_uplink.id),
                );
                backup.table = Some(table.clone());
                backup.distance = Some(other + 2);
                backup
            })
            .collect();

        plan.uplinks.push(UplinkRoutes {
            index: *index,
            uplink: uplink.id.clone(),
            table,
            probe,
            gateway: gateway.clone(),
            host_route,
            table_default,
            main_default,
            backups,
        });
    }
    Ok(plan)
}

/// `0.0.0.0/0`.
pub fn default_destination() -> Ipv4Net {
    Ipv4Net::new(Ipv4Addr::UNSPECIFIED, 0).unwrap_or_else(|_| Ipv4Net::from(Ipv4Addr::UNSPECIFIED))
}

/// Next hop for the uplink at `index`, or `None` for kinds without failover support.
fn uplink_gateway(uplink: &UplinkLink, index: usize) -> Result<Option<Gateway>, PlanningError> {
    match &uplink.kind {
        UplinkKind::Static { address, gateway } => {
            if address.is_none() {
                return Err(PlanningError::MissingAddress {
                    uplink: uplink.id.clone(),
                });
            }
            let gateway = gateway.ok_or_else(|| PlanningError::MissingGateway {
                uplink: uplink.id.clone(),
            })?;
            Ok(Some(Gateway::Address(gateway)))
        }
        UplinkKind::Pppoe { username, .. } => {
            if username.as_deref().map_or(true, |u| u.trim().is_empty()) {
                return Err(PlanningError::MissingUsername {
                    uplink: uplink.id.clone(),
                });
            }
            Ok(Some(Gateway::Interface(pppoe_interface_name(index))))
        }
        UplinkKind::Dhcp => Ok(None),
    }
}
