//! Script emission: turn a model plus its plan into an ordered RouterOS script.
//!
//! Sections are always emitted in [`SECTION_ORDER`]; each section module owns
//! one `emit` function that reads the shared [`EmitContext`] and returns a
//! finished [`Section`]. Nothing here can fail: every precondition was checked
//! by validation or planning, and text safety is checked by the writer.

mod bridge;
mod dns;
mod firewall;
mod heartbeat;
mod nat;
mod networks;
mod system;
mod uplinks;

use chrono::{DateTime, Utc};
use ros_script_core::{Script, Section};

use crate::model::TopologyModel;
use crate::plan::Plan;
use crate::profile::EmitterProfile;

pub use networks::{hotspot_pool_name, pool_name, pool_ranges};

/// Section names in emission order.
pub const SECTION_ORDER: [&str; 8] = [
    "system",
    "bridge",
    "uplinks",
    "networks",
    "dns",
    "firewall",
    "nat",
    "heartbeat",
];

/// Everything a section emitter may read.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub model: &'a TopologyModel,
    pub profile: &'a EmitterProfile,
    pub plan: &'a Plan,
    /// Written into the generation comment; the only time-dependent output.
    pub generated_at: DateTime<Utc>,
}

/// Build the full script for `ctx`.
pub fn emit_script(ctx: &EmitContext<'_>) -> Script {
    let mut script = Script::new();
    script
        .header
        .push(format!("ros-topology configuration for {}", ctx.model.identity));

    let sections: [fn(&EmitContext<'_>) -> Section; 8] = [
        system::emit,
        bridge::emit,
        uplinks::emit,
        networks::emit,
        dns::emit,
        firewall::emit,
        nat::emit,
        heartbeat::emit,
    ];
    for emit in sections {
        let section = emit(ctx);
        log::debug!(
            "emitted section {} with {} command(s)",
            section.name,
            section.commands().count()
        );
        script.push_section(section);
    }
    script
}

/// Run `f` against the sample model planned with the default profile.
#[cfg(test)]
pub(crate) fn test_context<F: FnOnce(&EmitContext<'_>)>(f: F) {
    test_context_with(crate::test_support::sample_model(), f);
}

#[cfg(test)]
pub(crate) fn test_context_with<F: FnOnce(&EmitContext<'_>)>(model: TopologyModel, f: F) {
    use chrono::TimeZone;

    let profile = EmitterProfile::default();
    let plan = crate::plan::build_plan(&model, &profile, crate::plan::PlanOptions::default())
        .expect("plan");
    let ctx = EmitContext {
        model: &model,
        profile: &profile,
        plan: &plan,
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    };
    f(&ctx);
}
