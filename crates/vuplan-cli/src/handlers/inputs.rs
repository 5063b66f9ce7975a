//! Layering of defaults, config file and command-line inputs

use vuplan::{LoadPlan, MetricsCalculator, PlanConfig, RawInputs, ScriptOptions};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::InputArgs;

/// Raw inputs after layering: defaults, then config file, then flags
#[must_use]
pub fn merge_inputs(plan_config: &PlanConfig, args: &InputArgs) -> RawInputs {
    let mut raw = RawInputs::default();
    plan_config.apply_to_inputs(&mut raw);

    let overrides = [
        (&mut raw.request_volume, &args.requests),
        (&mut raw.time_unit, &args.unit),
        (&mut raw.avg_response_time_ms, &args.response_time),
        (&mut raw.stress_multiplier, &args.stress),
        (&mut raw.spike_multiplier, &args.spike),
        (&mut raw.smoke_minutes, &args.smoke_minutes),
        (&mut raw.load_minutes, &args.load_minutes),
        (&mut raw.stress_minutes, &args.stress_minutes),
        (&mut raw.spike_minutes, &args.spike_minutes),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            field.clone_from(v);
        }
    }
    raw
}

/// Script options after layering defaults and config file
///
/// Unusable numeric values fall back to the defaults.
#[must_use]
pub fn merge_script_options(plan_config: &PlanConfig) -> ScriptOptions {
    let mut options = ScriptOptions::default();
    plan_config.apply_to_script(&mut options);
    options.sanitized()
}

/// Load the config file, merge inputs and calculate the plan
pub fn resolve_plan(config: &CliConfig, args: &InputArgs) -> CliResult<(LoadPlan, ScriptOptions)> {
    let plan_config = config.load_plan_config()?;
    if config.verbosity.is_verbose() {
        if let Some(path) = config.plan_config_path() {
            Reporter::from_config(config).info(&format!("Using {}", path.display()));
        }
    }
    let raw = merge_inputs(&plan_config, args);
    let plan = MetricsCalculator::new().calculate(&raw.parse());
    tracing::info!(
        base_rps = plan.metrics.base_rps,
        base_vus = plan.metrics.base_vus,
        "resolved load plan"
    );
    Ok((plan, merge_script_options(&plan_config)))
}
