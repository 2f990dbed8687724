use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use ros_topology::compile::{compile, CompileOptions};
use ros_topology::input::load_model;
use ros_topology::plan::UplinkOverflow;
use ros_topology::profile::load_profile_with_source;
use ros_topology::report::render_script_summary;

use crate::cli::CompileArgs;
use crate::path_guard;

pub fn run_compile(args: CompileArgs) -> Result<()> {
    let model = load_model(&args.model)?;
    let (profile, profile_source) = load_profile_with_source(args.profile.as_deref())?;
    log::info!("using profile {profile_source}");

    let opts = CompileOptions {
        generated_at: args.generated_at.unwrap_or_else(Utc::now),
        uplink_overflow: overflow_policy(args.truncate_uplinks),
        strict_policy_mapping: args.strict_policy,
    };
    let compiled = compile(&model, &profile, opts)
        .with_context(|| format!("failed to compile {}", args.model.display()))?;

    match &args.output {
        Some(out_path) => {
            path_guard::guard_script_output(out_path, &args.model, args.profile.as_deref())?;
            fs::write(out_path, &compiled.text)
                .with_context(|| format!("failed to write script {}", out_path.display()))?;
            log::info!("wrote {}", out_path.display());
        }
        None => print!("{}", compiled.text),
    }

    if args.summary {
        eprintln!("{}", render_script_summary(&compiled.script));
    }
    Ok(())
}

pub fn overflow_policy(truncate: bool) -> UplinkOverflow {
    if truncate {
        UplinkOverflow::Truncate
    } else {
        UplinkOverflow::Reject
    }
}
