//! Planners deriving the intermediate network plan from a topology model.
//!
//! Each planner is a pure function of the model; the policy planner also reads
//! the routing tables produced by the failover planner.

pub mod failover;
pub mod policy;
pub mod vlans;

use serde::Serialize;

use crate::error::PlanningError;
use crate::model::TopologyModel;
use crate::profile::EmitterProfile;

pub use failover::{plan_failover, FailoverPlan, Gateway, Route, UplinkOverflow, UplinkRoutes};
pub use policy::{plan_policy_routing, PolicyPlan, RoutingMark};
pub use vlans::{resolve_port_vlans, BridgePort, VlanMembership, VlanTable};

/// Options that change how plans are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    pub uplink_overflow: UplinkOverflow,
}

/// Combined output of all planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub vlans: VlanTable,
    pub failover: FailoverPlan,
    pub policy: PolicyPlan,
}

/// Run the VLAN, failover and policy planners in order.
pub fn build_plan(
    model: &TopologyModel,
    profile: &EmitterProfile,
    opts: PlanOptions,
) -> Result<Plan, PlanningError> {
    let vlans = resolve_port_vlans(model, &profile.bridge_name)?;
    let failover = plan_failover(&model.uplinks, &profile.probe_addresses, opts.uplink_overflow)?;
    let policy = plan_policy_routing(model, &failover)?;
    log::debug!(
        "planned {} bridge port(s), {} routed uplink(s), {} routing mark(s)",
        vlans.ports.len(),
        failover.uplinks.len(),
        policy.marks.len()
    );
    Ok(Plan {
        vlans,
        failover,
        policy,
    })
}
