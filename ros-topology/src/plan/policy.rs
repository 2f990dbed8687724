//! Policy routing: steer a network's egress traffic into one uplink's table.

use serde::Serialize;

use crate::error::PlanningError;
use crate::model::TopologyModel;
use crate::plan::failover::FailoverPlan;

/// Mangle rule marking traffic that enters `interface` for `table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingMark {
    pub network: String,
    pub interface: String,
    pub uplink: String,
    pub table: String,
    /// False when the network had no mapping and fell back to the first uplink.
    pub explicit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyPlan {
    /// Whether marking rules are in effect at all.
    pub active: bool,
    pub marks: Vec<RoutingMark>,
}

/// Derive one routing mark per network.
///
/// Marks are produced only when policy routing is enabled and the failover
/// plan routes at least two uplinks; otherwise the plan is empty. Unmapped
/// networks go to the first routed uplink.
pub fn plan_policy_routing(
    model: &TopologyModel,
    failover: &FailoverPlan,
) -> Result<PolicyPlan, PlanningError> {
    let policy = &model.policy_routing;
    if !policy.enabled {
        return Ok(PolicyPlan::default());
    }
    if failover.uplinks.len() < 2 {
        log::debug!(
            "policy routing enabled but only {} routed uplink(s); no marks emitted",
            failover.uplinks.len()
        );
        return Ok(PolicyPlan::default());
    }
    let fallback = &failover.uplinks[0];

    let mut marks = Vec::with_capacity(model.networks.len());
    for network in &model.networks {
        let (uplink, table, explicit) = match policy.mapping.get(&network.id) {
            Some(uplink) => {
                let table = failover.table_for(uplink).ok_or_else(|| {
                    PlanningError::PolicyTargetUnrouted {
                        network: network.id.clone(),
                        uplink: uplink.clone(),
                    }
                })?;
                (uplink.clone(), table.to_string(), true)
            }
            None => (fallback.uplink.clone(), fallback.table.clone(), false),
        };
        log::debug!("network {} -> {table} via {uplink}", network.id);
        marks.push(RoutingMark {
            network: network.id.clone(),
            interface: network.name.clone(),
            uplink,
            table,
            explicit,
        });
    }
    Ok(PolicyPlan {
        active: true,
        marks,
    })
}

#[cfg(test)]
mod tests {
    use super::plan_policy_routing;
    use crate::error::PlanningError;
    use crate::model::UplinkKind;
    use crate::plan::failover::{plan_failover, UplinkOverflow};
    use crate::profile::EmitterProfile;
    use crate::test_support::sample_model;

    fn failover_for(model: &crate::model::TopologyModel) -> crate::plan::failover::FailoverPlan {
        plan_failover(
            &model.uplinks,
            &EmitterProfile::default().probe_addresses,
            UplinkOverflow::Reject,
        )
        .expect("failover")
    }

    #[test]
    fn disabled_policy_yields_no_marks() {
        let model = sample_model();
        let plan = plan_policy_routing(&model, &failover_for(&model)).expect("policy");
        assert!(!plan.active);
        assert!(plan.marks.is_empty());
    }

    #[test]
    fn single_uplink_yields_no_marks() {
        let mut model = sample_model();
        model.policy_routing.enabled = true;
        model.uplinks.truncate(1);
        model.policy_routing.mapping.clear();
        let plan = plan_policy_routing(&model, &failover_for(&model)).expect("policy");
        assert!(plan.marks.is_empty());
    }

    #[test]
    fn mapped_and_defaulted_networks_get_one_mark_each() {
        let mut model = sample_model();
        model.policy_routing.enabled = true;
        let plan = plan_policy_routing(&model, &failover_for(&model)).expect("policy");

        assert!(plan.active);
        assert_eq!(plan.marks.len(), 2);
        let office = &plan.marks[0];
        assert_eq!((office.table.as_str(), office.explicit), ("to-wan1", false));
        let guest = &plan.marks[1];
        assert_eq!(guest.interface, "vlan20");
        assert_eq!(guest.table, "to-wan2");
        assert!(guest.explicit);
    }

    #[test]
    fn mapping_to_skipped_uplink_is_rejected() {
        let mut model = sample_model();
        model.policy_routing.enabled = true;
        model.uplinks.push(crate::model::UplinkLink {
            id: "lte".to_string(),
            interface: "ether4".to_string(),
            kind: UplinkKind::Dhcp,
        });
        model
            .policy_routing
            .mapping
            .insert("office".to_string(), "lte".to_string());

        assert_eq!(
            plan_policy_routing(&model, &failover_for(&model)),
            Err(PlanningError::PolicyTargetUnrouted {
                network: "office".to_string(),
                uplink: "lte".to_string(),
            })
        );
    }
}
