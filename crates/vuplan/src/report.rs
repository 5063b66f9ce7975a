//! Plan reports
//!
//! Text and JSON summaries of a [`LoadPlan`]: the sizing formula, one row
//! per scenario, how each number was derived, and notes on thresholds.

use crate::metrics::{LoadPlan, Scenario, ScenarioResult};
use crate::script::{format_number, format_percent, ScriptOptions};

/// Suggested order and focus for running the scenarios
pub const RECOMMENDATIONS: [&str; 7] = [
    "Run the smoke test first to verify basic functionality",
    "Then the load test to validate performance under normal load",
    "The stress test helps locate the system's breaking point",
    "The spike test validates recovery from sudden bursts",
    "Monitor CPU, memory and database connections during every run",
    "Compare k6's observed http_reqs rate against the expected RPS; a lower rate means the system is saturated",
    "Prefer running tests during low-activity hours",
];

/// How a scenario's numbers follow from the base metrics
pub fn calculation_line(plan: &LoadPlan, result: &ScenarioResult) -> String {
    let base_rps = plan.metrics.base_rps;
    let secs = plan.metrics.avg_response_time_sec;

    match result.scenario {
        Scenario::Load => format!(
            "{:.2} req/s × {:.3}s = {} VUs",
            base_rps, secs, result.vus
        ),
        Scenario::Smoke => format!(
            "{:.2} req/s × 10% = {:.2} req/s → {:.2} × {:.3}s = {} VUs",
            base_rps, result.rps, result.rps, secs, result.vus
        ),
        Scenario::Stress | Scenario::Spike => format!(
            "{:.2} req/s × {} (multiplier) = {:.2} req/s → {:.2} × {:.3}s = {} VUs",
            base_rps,
            format_number(result.multiplier),
            result.rps,
            result.rps,
            secs,
            result.vus
        ),
    }
}

/// Render a plan as text
///
/// Unusable option values are replaced by their defaults, exactly as the
/// script renderer does, so both describe the same thresholds.
pub fn render_plan_report(plan: &LoadPlan, options: &ScriptOptions) -> String {
    let options = options.clone().sanitized();
    let mut output = String::new();
    let inputs = &plan.inputs;
    let metrics = &plan.metrics;

    output.push_str("LOAD TEST PLAN\n");
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    output.push_str(&format!(
        "Input: {} req/{} │ Avg response: {}ms │ Stress: ×{} │ Spike: ×{}\n\n",
        format_number(inputs.request_volume),
        inputs.time_unit,
        format_number(inputs.avg_response_time_ms),
        format_number(inputs.stress_multiplier),
        format_number(inputs.spike_multiplier)
    ));

    output.push_str("Formula: VUs = RPS × response time\n");
    output.push_str(&format!("  RPS:           {:.2} req/s\n", metrics.base_rps));
    output.push_str(&format!(
        "  Response time: {:.3}s\n",
        metrics.avg_response_time_sec
    ));
    output.push_str(&format!("  Base VUs:      {}\n\n", metrics.base_vus));

    output.push_str("Scenarios:\n");
    output.push_str("┌─────────────────┬─────────┬──────────┬────────────┬──────────────┐\n");
    output.push_str("│ Scenario        │ VUs     │ Duration │ RPS        │ Requests     │\n");
    output.push_str("├─────────────────┼─────────┼──────────┼────────────┼──────────────┤\n");
    for result in &plan.scenarios {
        output.push_str(&format!(
            "│ {:<15} │ {:>7} │ {:>7}m │ {:>10.2} │ {:>12} │\n",
            scenario_label(plan, result.scenario),
            result.vus,
            format_number(result.duration_minutes),
            result.rps,
            result.total_requests
        ));
    }
    output.push_str("└─────────────────┴─────────┴──────────┴────────────┴──────────────┘\n\n");

    for result in &plan.scenarios {
        output.push_str(&format!("{}:\n", scenario_label(plan, result.scenario)));
        output.push_str(&format!(
            "  Calculation: {}\n",
            calculation_line(plan, result)
        ));
        output.push_str(&format!("  Objective:   {}\n", result.scenario.objective()));
    }
    output.push('\n');

    let threshold = format_number(plan.p95_threshold_ms(options.p95_factor));
    output.push_str("Thresholds (suggested, adjust to your SLAs):\n");
    output.push_str(&format!(
        "  p(95)<{}ms: 95% of requests faster than {}× the current average ({}ms)\n",
        threshold,
        format_number(options.p95_factor),
        format_number(inputs.avg_response_time_ms)
    ));
    output.push_str(&format!(
        "  rate<{}: fewer than {}% of requests fail (critical systems may want 0.001)\n\n",
        format_number(options.max_error_rate),
        format_percent(options.max_error_rate)
    ));

    output.push_str("Recommendations:\n");
    for line in RECOMMENDATIONS {
        output.push_str(&format!("  • {line}\n"));
    }

    output
}

/// Render a plan as JSON
pub fn render_plan_json(plan: &LoadPlan) -> String {
    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string())
}

fn scenario_label(plan: &LoadPlan, scenario: Scenario) -> String {
    match scenario {
        Scenario::Stress => format!("Stress ({}%)", format_number(plan.stress_percent())),
        Scenario::Spike => format!("Spike ({}%)", format_number(plan.spike_percent())),
        Scenario::Smoke => "Smoke".to_string(),
        Scenario::Load => "Load".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{TestInputs, TimeUnit};
    use crate::metrics::calculate;

    fn reference_plan() -> LoadPlan {
        calculate(&TestInputs::new(1989.0, TimeUnit::Hour, 200.0))
    }

    #[test]
    fn test_report_formula_block() {
        let report = render_plan_report(&reference_plan(), &ScriptOptions::default());
        assert!(report.contains("RPS:           0.55 req/s"));
        assert!(report.contains("Response time: 0.200s"));
        assert!(report.contains("Base VUs:      1"));
        assert!(report.contains("Input: 1989 req/hour"));
    }

    #[test]
    fn test_report_lists_every_scenario() {
        let report = render_plan_report(&reference_plan(), &ScriptOptions::default());
        assert!(report.contains("│ Smoke "));
        assert!(report.contains("│ Load "));
        assert!(report.contains("│ Stress (150%) "));
        assert!(report.contains("│ Spike (200%) "));
        assert!(report.contains(" 995 │\n"));
    }

    #[test]
    fn test_report_thresholds_and_recommendations() {
        let report = render_plan_report(&reference_plan(), &ScriptOptions::default());
        assert!(report.contains("p(95)<300ms"));
        assert!(report.contains("rate<0.01"));
        for line in RECOMMENDATIONS {
            assert!(report.contains(line));
        }
    }

    #[test]
    fn test_calculation_lines() {
        let plan = reference_plan();
        assert_eq!(
            calculation_line(&plan, plan.scenario(Scenario::Load)),
            "0.55 req/s × 0.200s = 1 VUs"
        );
        assert_eq!(
            calculation_line(&plan, plan.scenario(Scenario::Stress)),
            "0.55 req/s × 1.5 (multiplier) = 0.83 req/s → 0.83 × 0.200s = 1 VUs"
        );
        assert!(calculation_line(&plan, plan.scenario(Scenario::Smoke)).contains("× 10%"));
    }

    #[test]
    fn test_zero_plan_report_has_no_nan() {
        let plan = calculate(&TestInputs::new(f64::NAN, TimeUnit::Hour, f64::NAN));
        let report = render_plan_report(&plan, &ScriptOptions::default());
        assert!(!report.contains("NaN"));
        assert!(report.contains("Base VUs:      0"));
    }

    #[test]
    fn test_report_and_script_agree_on_unusable_options() {
        let options = ScriptOptions::new()
            .with_p95_factor(-1.5)
            .with_max_error_rate(-0.5);
        let plan = reference_plan();

        let report = render_plan_report(&plan, &options);
        assert!(!report.contains("-300"));
        assert!(!report.contains("-1.5"));
        assert!(report.contains("p(95)<300ms"));
        assert!(report.contains("rate<0.01: fewer than 1%"));

        let script = crate::script::ScriptTemplateRenderer::with_options(options)
            .render(&plan, Scenario::Load);
        assert!(script.contains("http_req_duration: ['p(95)<300']"));
        assert!(script.contains("http_req_failed: ['rate<0.01']"));
    }

    #[test]
    fn test_report_error_rate_percent() {
        let options = ScriptOptions::new().with_max_error_rate(0.07);
        let report = render_plan_report(&reference_plan(), &options);
        assert!(report.contains("fewer than 7% of requests fail"));
    }

    #[test]
    fn test_render_json() {
        let json = render_plan_json(&reference_plan());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["base_vus"], 1);
        assert_eq!(value["inputs"]["time_unit"], "hour");
        assert_eq!(value["scenarios"][2]["scenario"], "stress");
        assert_eq!(value["scenarios"][1]["total_requests"], 995);
    }
}
