use ros_script_core::{Command, Section};

use super::EmitContext;

pub(super) fn emit(ctx: &EmitContext<'_>) -> Section {
    let dns = &ctx.model.dns;
    let mut section = Section::new("dns");
    section.push(
        Command::set("/ip dns")
            .list("servers", &dns.servers)
            .flag("allow-remote-requests", dns.allow_remote_requests),
    );
    section
}
