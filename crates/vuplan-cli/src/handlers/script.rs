//! Script command handler

use vuplan::{LoadPlan, Scenario, ScriptOptions, ScriptTemplateRenderer};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::inputs::resolve_plan;
use crate::output::Reporter;
use crate::ScriptArgs;

/// Execute the script command
pub fn execute_script(config: &CliConfig, args: &ScriptArgs) -> CliResult<()> {
    let (plan, mut options) = resolve_plan(config, &args.inputs)?;
    if let Some(ref endpoint) = args.endpoint {
        options.endpoint.clone_from(endpoint);
    }
    // Checked after layering so a bad `script.endpoint` in the file is caught too
    options.endpoint = validate_endpoint(&options.endpoint)?;

    let scenario = Scenario::from(args.scenario);
    let script = render_script(&plan, options, scenario);

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &script)?;
            let result = plan.scenario(scenario);
            Reporter::from_config(config).success(&format!(
                "Wrote {} script to {} ({} VUs, {} min)",
                scenario,
                path.display(),
                result.vus,
                vuplan::format_number(result.duration_minutes)
            ));
        }
        None => print!("{script}"),
    }
    Ok(())
}

/// Render the script for one scenario
#[must_use]
pub fn render_script(plan: &LoadPlan, options: ScriptOptions, scenario: Scenario) -> String {
    ScriptTemplateRenderer::with_options(options).render(plan, scenario)
}

/// Reject endpoints that would produce an unusable script
pub fn validate_endpoint(endpoint: &str) -> CliResult<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(CliError::invalid_argument("endpoint must not be empty"));
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(CliError::invalid_argument(
            "endpoint must be a single line",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vuplan::{calculate, TestInputs, TimeUnit};

    #[test]
    fn test_render_script_uses_options() {
        let plan = calculate(&TestInputs::new(1989.0, TimeUnit::Hour, 200.0));
        let options = ScriptOptions::new().with_endpoint("http://svc/health");
        let script = render_script(&plan, options, Scenario::Smoke);
        assert!(script.contains("http.get('http://svc/health')"));
        assert!(script.contains("{ duration: '5m', target: 1 }, // Stay at peak"));
    }

    #[test]
    fn test_validate_endpoint() {
        assert_eq!(validate_endpoint("  http://a/ ").unwrap(), "http://a/");
        assert!(validate_endpoint("   ").is_err());
        assert!(validate_endpoint("http://a/\nalert(1)").is_err());
    }
}
