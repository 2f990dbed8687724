use ros_script_core::{quote_value, Command, Section};

use super::EmitContext;

/// Body of the heartbeat script: one authenticated POST to the monitoring service.
pub fn heartbeat_source(url: &str, token: &str) -> String {
    format!(
        "/tool fetch url={} http-method=post http-header-field={} output=none",
        quote_value(url),
        quote_value(&format!("Authorization: Bearer {token}"))
    )
}

pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let management = &ctx.model.management;
    let name = &ctx.profile.heartbeat_script;
    let mut section = Section::new("heartbeat");

    section.push(
        Command::add("/system script")
            .arg("name", name)
            .arg("policy", "read,write,test")
            .arg(
                "source",
                heartbeat_source(&management.heartbeat_url, &management.token),
            ),
    );
    section.push(
        Command::add("/system scheduler")
            .arg("name", name)
            .arg("interval", &ctx.profile.heartbeat_interval)
            .arg("start-time", "startup")
            .arg("on-event", name),
    );
    section
}
