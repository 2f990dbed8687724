use serde::Serialize;

use crate::model::{PortAssignment, PortRole, TopologyModel};
use crate::plan::{build_plan, Plan, PlanOptions};
use crate::profile::EmitterProfile;
use crate::validate::{model_findings, ValidateOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerifySeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyIssue {
    pub severity: VerifySeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub identity: String,
    pub profile_source: String,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<VerifyIssue>,
}

/// Check a model without emitting anything.
///
/// Structural problems and planning failures are errors; configurations that
/// compile but are probably not what the operator meant are warnings.
pub fn build_verify_report(
    model: &TopologyModel,
    profile: &EmitterProfile,
    profile_source: &str,
    validate_opts: ValidateOptions,
    plan_opts: PlanOptions,
) -> VerifyReport {
    let mut issues: Vec<VerifyIssue> = model_findings(model, profile, validate_opts)
        .iter()
        .map(|finding| err(finding.code(), &finding.to_string()))
        .collect();

    if issues.is_empty() {
        match build_plan(model, profile, plan_opts) {
            Ok(plan) => issues.extend(plan_issues(model, &plan)),
            Err(planning) => issues.push(err(planning.code(), &planning.to_string())),
        }
    }
    issues.extend(uplink_issues(model));
    issues.extend(port_issues(model));
    issues.extend(network_issues(model));
    if model.management.admin_password.is_none() {
        issues.push(warn(
            "missing_admin_password",
            &format!(
                "no admin password set; account '{}' is created without one",
                profile.admin_user
            ),
        ));
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == VerifySeverity::Error)
        .count();
    let warnings = issues
        .iter()
        .filter(|i| i.severity == VerifySeverity::Warning)
        .count();

    VerifyReport {
        identity: model.identity.clone(),
        profile_source: profile_source.to_string(),
        errors,
        warnings,
        issues,
    }
}

pub fn render_verify_text(report: &VerifyReport, verbose: bool) -> String {
    let mut out = Vec::new();
    out.push(format!("verify identity={}", report.identity));
    if verbose {
        out.push(format!("Using profile: {}", report.profile_source));
    }
    out.push(format!(
        "result errors={} warnings={}",
        report.errors, report.warnings
    ));
    out.push("issues".to_string());
    if report.issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in &report.issues {
        let sev = match issue.severity {
            VerifySeverity::Error => "error",
            VerifySeverity::Warning => "warning",
        };
        out.push(format!("- [{sev}] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

fn plan_issues(model: &TopologyModel, plan: &Plan) -> Vec<VerifyIssue> {
    let mut out = Vec::new();
    for uplink in &plan.failover.skipped {
        out.push(warn(
            "unrouted_uplink",
            &format!("uplink '{uplink}' is brought up but has no failover routes"),
        ));
    }
    if model.policy_routing.enabled && !plan.policy.active {
        out.push(warn(
            "policy_routing_inert",
            &format!(
                "policy routing is enabled but only {} uplink(s) are routed; no marks are emitted",
                plan.failover.uplinks.len()
            ),
        ));
    }
    out
}

fn uplink_issues(model: &TopologyModel) -> Vec<VerifyIssue> {
    if model.uplinks.is_empty() {
        return vec![warn(
            "no_uplinks",
            "no uplinks configured; the device will have no default route",
        )];
    }
    Vec::new()
}

fn port_issues(model: &TopologyModel) -> Vec<VerifyIssue> {
    let mut out = Vec::new();
    for port in model.lan_ports() {
        if !model.assignments.contains_key(&port.name) {
            out.push(warn(
                "unassigned_lan_port",
                &format!("LAN port '{}' has no assignment and is left off the bridge", port.name),
            ));
        }
    }
    for name in model.assignments.keys() {
        if model
            .port(name)
            .is_some_and(|port| port.default_role == PortRole::Wan)
        {
            out.push(warn(
                "wan_role_port_bridged",
                &format!("port '{name}' defaults to the WAN role but is assigned to the bridge"),
            ));
        }
    }
    out
}

fn network_issues(model: &TopologyModel) -> Vec<VerifyIssue> {
    let mut out = Vec::new();
    for network in &model.networks {
        let reached = model.assignments.values().any(|assignment| match assignment {
            PortAssignment::Access { pvid } => *pvid == network.vlan_id,
            PortAssignment::Trunk {
                native_vlan,
                allowed_vlans,
            } => *native_vlan == network.vlan_id || allowed_vlans.contains(&network.vlan_id),
        });
        if !reached {
            out.push(warn(
                "network_without_members",
                &format!(
                    "network '{}' (VLAN {}) is not carried by any port",
                    network.id, network.vlan_id
                ),
            ));
        }
    }
    out
}

fn err(code: &str, message: &str) -> VerifyIssue {
    VerifyIssue {
        severity: VerifySeverity::Error,
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn warn(code: &str, message: &str) -> VerifyIssue {
    VerifyIssue {
        severity: VerifySeverity::Warning,
        code: code.to_string(),
        message: message.to_string(),
    }
}
