//! k6 script generation
//!
//! Renders a [`LoadPlan`] scenario as a ready-to-run k6 script: a ramp-up
//! stage to half the target VUs, a steady stage at the target, a ramp-down
//! to zero, and latency/error-rate thresholds derived from the observed
//! response time.
//!
//! The output is copied straight into k6, so stage and threshold syntax
//! must stay exactly as k6 expects it.

use crate::metrics::{ceil_count, LoadPlan, Scenario};
use serde::{Deserialize, Serialize};

/// Endpoint placed in the generated `http.get` call
pub const DEFAULT_ENDPOINT: &str = "https://your-endpoint.com/api";

/// Script rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptOptions {
    /// URL the script requests
    pub endpoint: String,
    /// Ramp-up stage length in minutes
    pub ramp_up_minutes: f64,
    /// Ramp-down stage length in minutes
    pub ramp_down_minutes: f64,
    /// p95 latency bound as a multiple of the average response time
    pub p95_factor: f64,
    /// Maximum tolerated failure rate (0.01 = 1%)
    pub max_error_rate: f64,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ramp_up_minutes: 2.0,
            ramp_down_minutes: 2.0,
            p95_factor: 1.5,
            max_error_rate: 0.01,
        }
    }
}

impl ScriptOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set ramp-up and ramp-down lengths
    #[must_use]
    pub fn with_ramp_minutes(mut self, up: f64, down: f64) -> Self {
        self.ramp_up_minutes = up;
        self.ramp_down_minutes = down;
        self
    }

    /// Set the p95 factor
    #[must_use]
    pub fn with_p95_factor(mut self, factor: f64) -> Self {
        self.p95_factor = factor;
        self
    }

    /// Set the maximum error rate
    #[must_use]
    pub fn with_max_error_rate(mut self, rate: f64) -> Self {
        self.max_error_rate = rate;
        self
    }

    /// Replace unusable values with the defaults
    ///
    /// Ramp lengths must be finite and non-negative. The p95 factor must be
    /// finite and positive, and the error rate must lie in `(0, 1]`;
    /// anything else would produce thresholds no request can meet.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: self.endpoint,
            ramp_up_minutes: valid_or(
                self.ramp_up_minutes,
                defaults.ramp_up_minutes,
                |v| v >= 0.0,
            ),
            ramp_down_minutes: valid_or(
                self.ramp_down_minutes,
                defaults.ramp_down_minutes,
                |v| v >= 0.0,
            ),
            p95_factor: valid_or(self.p95_factor, defaults.p95_factor, |v| v > 0.0),
            max_error_rate: valid_or(self.max_error_rate, defaults.max_error_rate, |v| {
                v > 0.0 && v <= 1.0
            }),
        }
    }
}

/// One entry of the k6 `stages` array
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptStage {
    /// Stage length in minutes
    pub duration_minutes: f64,
    /// VU count reached by the end of the stage
    pub target: u64,
    /// Trailing comment
    pub label: &'static str,
}

/// Renders k6 scripts from load plans
#[derive(Debug, Clone, Default)]
pub struct ScriptTemplateRenderer {
    options: ScriptOptions,
}

impl ScriptTemplateRenderer {
    /// Create a renderer with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options
    ///
    /// Unusable option values are replaced by their defaults.
    #[must_use]
    pub fn with_options(options: ScriptOptions) -> Self {
        Self {
            options: options.sanitized(),
        }
    }

    /// Current options
    #[must_use]
    pub const fn options(&self) -> &ScriptOptions {
        &self.options
    }

    /// Ramp-up, steady and ramp-down stages for a scenario
    #[must_use]
    pub fn stages(&self, plan: &LoadPlan, scenario: Scenario) -> [ScriptStage; 3] {
        let result = plan.scenario(scenario);
        [
            ScriptStage {
                duration_minutes: self.options.ramp_up_minutes,
                target: ceil_count(result.vus as f64 * 0.5),
                label: "Ramp-up",
            },
            ScriptStage {
                duration_minutes: result.duration_minutes,
                target: result.vus,
                label: "Stay at peak",
            },
            ScriptStage {
                duration_minutes: self.options.ramp_down_minutes,
                target: 0,
                label: "Ramp-down",
            },
        ]
    }

    /// p95 latency bound in milliseconds
    #[must_use]
    pub fn threshold_ms(&self, plan: &LoadPlan) -> f64 {
        plan.p95_threshold_ms(self.options.p95_factor)
    }

    /// Render the script for a scenario
    pub fn render(&self, plan: &LoadPlan, scenario: Scenario) -> String {
        let threshold = format_number(self.threshold_ms(plan));
        let error_rate = self.options.max_error_rate;

        let mut script = String::new();
        script.push_str("import http from 'k6/http';\n");
        script.push_str("import { check, sleep } from 'k6';\n\n");
        script.push_str("export const options = {\n");
        script.push_str("  stages: [\n");
        for stage in self.stages(plan, scenario) {
            script.push_str(&format!(
                "    {{ duration: '{}m', target: {} }}, // {}\n",
                format_number(stage.duration_minutes),
                stage.target,
                stage.label
            ));
        }
        script.push_str("  ],\n");
        script.push_str("  thresholds: {\n");
        script.push_str(&format!(
            "    http_req_duration: ['p(95)<{threshold}'], // 95% under {threshold}ms\n"
        ));
        script.push_str(&format!(
            "    http_req_failed: ['rate<{}'], // Error rate < {}%\n",
            format_number(error_rate),
            format_percent(error_rate)
        ));
        script.push_str("  },\n");
        script.push_str("};\n\n");
        script.push_str("export default function () {\n");
        script.push_str(&format!(
            "  const res = http.get('{}');\n\n",
            escape_single_quoted(&self.options.endpoint)
        ));
        script.push_str("  check(res, {\n");
        script.push_str("    'status is 200': (r) => r.status === 200,\n");
        script.push_str(&format!(
            "    'response time OK': (r) => r.timings.duration < {threshold},\n"
        ));
        script.push_str("  });\n\n");
        script.push_str("  sleep(1);\n");
        script.push_str("}\n");

        tracing::debug!(%scenario, bytes = script.len(), "rendered k6 script");
        script
    }
}

/// Render the load scenario with default options
#[must_use]
pub fn render_load_script(plan: &LoadPlan) -> String {
    ScriptTemplateRenderer::new().render(plan, Scenario::Load)
}

/// Shortest decimal that round-trips; non-finite values print as `0`
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        // -0.0 would otherwise print as "-0"
        format!("{}", value + 0.0)
    } else {
        "0".to_string()
    }
}

/// A rate as a percentage, without float noise (`0.07` → `7`)
#[must_use]
pub fn format_percent(rate: f64) -> String {
    format_number((rate * 100.0 * 1e6).round() / 1e6)
}

fn valid_or(value: f64, default: f64, accept: impl Fn(f64) -> bool) -> f64 {
    if value.is_finite() && accept(value) {
        value
    } else {
        default
    }
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
