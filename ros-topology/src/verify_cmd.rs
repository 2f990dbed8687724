use anyhow::{bail, Result};
use ros_topology::input::load_model;
use ros_topology::plan::PlanOptions;
use ros_topology::profile::load_profile_with_source;
use ros_topology::validate::ValidateOptions;
use ros_topology::verify::{build_verify_report, render_verify_text};

use crate::cli::{OutputFormat, VerifyArgs};

pub fn run_verify(args: VerifyArgs, verbose: bool) -> Result<()> {
    let model = load_model(&args.model)?;
    let (profile, profile_source) = load_profile_with_source(args.profile.as_deref())?;
    let report = build_verify_report(
        &model,
        &profile,
        &profile_source,
        ValidateOptions {
            strict_policy_mapping: args.strict_policy,
        },
        PlanOptions::default(),
    );

    match args.format {
        OutputFormat::Text => println!("{}", render_verify_text(&report, verbose)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.errors > 0 {
        bail!("verify failed: {} errors", report.errors);
    }
    if args.strict && report.warnings > 0 {
        bail!("verify failed in strict mode: {} warnings", report.warnings);
    }
    Ok(())
}
