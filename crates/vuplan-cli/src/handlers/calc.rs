//! Calc command handler

use vuplan::{render_plan_json, render_plan_report, LoadPlan, ScriptOptions};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::inputs::resolve_plan;
use crate::output::Reporter;
use crate::{CalcArgs, ReportFormat};

/// Execute the calc command
pub fn execute_calc(config: &CliConfig, args: &CalcArgs) -> CliResult<()> {
    let (plan, options) = resolve_plan(config, &args.inputs)?;

    if let Some(message) = zero_plan_warning(&plan) {
        Reporter::from_config(config).warning(message);
    }

    print!("{}", render_calc(&plan, &options, args.format));
    Ok(())
}

/// Why every scenario sizes to 0 VUs, if it does
#[must_use]
pub fn zero_plan_warning(plan: &LoadPlan) -> Option<&'static str> {
    if plan.metrics.base_rps == 0.0 {
        Some("No usable request volume or response time; every scenario sizes to 0 VUs")
    } else if plan.metrics.avg_response_time_sec == 0.0 {
        Some("Response time is zero; every scenario sizes to 0 VUs")
    } else {
        None
    }
}

/// Render the plan in the requested format
#[must_use]
pub fn render_calc(plan: &LoadPlan, options: &ScriptOptions, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_plan_report(plan, options),
        ReportFormat::Json => {
            let mut json = render_plan_json(plan);
            json.push('\n');
            json
        }
    }
}
