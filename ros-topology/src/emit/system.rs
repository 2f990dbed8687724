use chrono::SecondsFormat;
use ros_script_core::{Command, Section};

use super::EmitContext;

/// Identity, clock, administrative account and service hardening.
pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let profile = ctx.profile;
    let mut section = Section::new("system");
    section.comment(format!(
        "generated {}",
        ctx.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    section.push(Command::set("/system identity").arg("name", &ctx.model.identity));
    section.push(Command::set("/system clock").arg("time-zone-name", &profile.time_zone));
    if !profile.ntp_servers.is_empty() {
        section.push(
            Command::set("/system ntp client")
                .flag("enabled", true)
                .list("servers", &profile.ntp_servers),
        );
    }

    section.push(
        Command::add("/user")
            .arg("name", &profile.admin_user)
            .arg("group", &profile.admin_group)
            .arg_opt("password", ctx.model.management.admin_password.as_ref()),
    );

    for service in &profile.disabled_services {
        if *service == profile.management_service {
            continue;
        }
        section.push(
            Command::set("/ip service")
                .target(service)
                .flag("disabled", true),
        );
    }
    let mut management = Command::set("/ip service")
        .target(&profile.management_service)
        .flag("disabled", false);
    if !profile.management_allow_list.is_empty() {
        management = management.list("address", &profile.management_allow_list);
    }
    section.push(management);
    section
}
