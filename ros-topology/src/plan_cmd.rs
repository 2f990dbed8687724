use anyhow::{Context, Result};
use ros_topology::input::load_model;
use ros_topology::plan::{build_plan, PlanOptions};
use ros_topology::profile::load_profile_with_source;
use ros_topology::report::render_plan_text;
use ros_topology::validate::{validate, ValidateOptions};

use crate::cli::{OutputFormat, PlanArgs};
use crate::compile_cmd::overflow_policy;

pub fn run_plan(args: PlanArgs) -> Result<()> {
    let model = load_model(&args.model)?;
    let (profile, _) = load_profile_with_source(args.profile.as_deref())?;
    validate(&model, &profile, ValidateOptions::default())
        .with_context(|| format!("invalid topology {}", args.model.display()))?;
    let plan = build_plan(
        &model,
        &profile,
        PlanOptions {
            uplink_overflow: overflow_policy(args.truncate_uplinks),
        },
    )
    .with_context(|| format!("failed to plan {}", args.model.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", render_plan_text(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}
