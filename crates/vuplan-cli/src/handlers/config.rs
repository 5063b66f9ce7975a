//! Config command handler

use vuplan::{format_number, PlanConfig, ScriptOptions, TestInputs};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::inputs::{merge_inputs, merge_script_options};
use crate::{ConfigArgs, InputArgs};

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let plan_config = if args.defaults {
        PlanConfig::default()
    } else {
        config.load_plan_config()?
    };

    let source = match (args.defaults, config.plan_config_path()) {
        (false, Some(path)) => path.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    let inputs = merge_inputs(&plan_config, &InputArgs::default()).parse();
    let options = merge_script_options(&plan_config);
    print!("{}", describe_config(config, &source, &inputs, &options));
    Ok(())
}

/// Format the effective configuration
#[must_use]
pub fn describe_config(
    config: &CliConfig,
    source: &str,
    inputs: &TestInputs,
    options: &ScriptOptions,
) -> String {
    let mut out = String::new();
    out.push_str("Current configuration:\n");
    out.push_str(&format!("  Source: {source}\n"));
    out.push_str(&format!("  Verbosity: {:?}\n", config.verbosity));
    out.push_str(&format!("  Color: {:?}\n", config.color));
    out.push_str("Inputs:\n");
    out.push_str(&format!(
        "  Request volume: {} per {}\n",
        format_number(inputs.request_volume),
        inputs.time_unit
    ));
    out.push_str(&format!(
        "  Avg response time: {}ms\n",
        format_number(inputs.avg_response_time_ms)
    ));
    out.push_str(&format!(
        "  Stress multiplier: {}\n",
        format_number(inputs.stress_multiplier)
    ));
    out.push_str(&format!(
        "  Spike multiplier: {}\n",
        format_number(inputs.spike_multiplier)
    ));
    out.push_str(&format!(
        "  Durations (min): smoke {}, load {}, stress {}, spike {}\n",
        format_number(inputs.durations.smoke),
        format_number(inputs.durations.load),
        format_number(inputs.durations.stress),
        format_number(inputs.durations.spike)
    ));
    out.push_str("Script:\n");
    out.push_str(&format!("  Endpoint: {}\n", options.endpoint));
    out.push_str(&format!(
        "  Ramp: up {}m, down {}m\n",
        format_number(options.ramp_up_minutes),
        format_number(options.ramp_down_minutes)
    ));
    out.push_str(&format!(
        "  Thresholds: p95 factor {}, max error rate {}\n",
        format_number(options.p95_factor),
        format_number(options.max_error_rate)
    ));
    out
}
