use chrono::{DateTime, Utc};
use ros_script_core::Script;
use serde::Serialize;

use crate::emit::{emit_script, EmitContext};
use crate::error::CompileError;
use crate::model::TopologyModel;
use crate::plan::{build_plan, Plan, PlanOptions, UplinkOverflow};
use crate::profile::EmitterProfile;
use crate::validate::{validate, ValidateOptions};

/// Caller-controlled inputs to a compile run besides the model and profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Timestamp written into the generation comment.
    pub generated_at: DateTime<Utc>,
    pub uplink_overflow: UplinkOverflow,
    pub strict_policy_mapping: bool,
}

impl CompileOptions {
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            uplink_overflow: UplinkOverflow::default(),
            strict_policy_mapping: false,
        }
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            strict_policy_mapping: self.strict_policy_mapping,
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            uplink_overflow: self.uplink_overflow,
        }
    }
}

/// Result of a successful compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledScript {
    pub plan: Plan,
    pub script: Script,
    /// Rendered script text, ready to paste into a device terminal.
    pub text: String,
}

/// Validate, plan, emit and render in one pass.
///
/// Either the whole script is produced or an error is returned; there is no
/// partial output. Identical inputs produce byte-identical text.
pub fn compile(
    model: &TopologyModel,
    profile: &EmitterProfile,
    opts: CompileOptions,
) -> Result<CompiledScript, CompileError> {
    validate(model, profile, opts.validate_options())?;
    let plan = build_plan(model, profile, opts.plan_options())?;
    let script = emit_script(&EmitContext {
        model,
        profile,
        plan: &plan,
        generated_at: opts.generated_at,
    });
    let text = ros_script_core::write(&script)?;
    log::info!(
        "compiled {} into {} command(s)",
        model.identity,
        script.commands().count()
    );
    Ok(CompiledScript { plan, script, text })
}
