//! vuplan: load-test parameter calculator
//!
//! Sizes k6 load tests from a handful of production numbers:
//!
//! - peak request volume over a time unit
//! - average response time
//! - stress and spike multipliers, and per-scenario durations
//!
//! and renders a ready-to-run k6 script for any scenario.
//!
//! # Example
//!
//! ```rust
//! use vuplan::prelude::*;
//!
//! let inputs = TestInputs::new(1989.0, TimeUnit::Hour, 200.0);
//! let plan = MetricsCalculator::new().calculate(&inputs);
//! assert_eq!(plan.metrics.base_vus, 1);
//!
//! let script = ScriptTemplateRenderer::new().render(&plan, Scenario::Load);
//! assert!(script.contains("http_req_duration: ['p(95)<300']"));
//! ```
//!
//! Malformed numbers never fail a calculation; see [`inputs`] for the
//! coercion rules.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
mod error;
pub mod inputs;
pub mod metrics;
pub mod report;
pub mod script;

pub use config::{DurationOverrides, PlanConfig, ScriptOverrides, CONFIG_FILE_NAME};
pub use error::{VuplanError, VuplanResult};
pub use inputs::{parse_number, Durations, RawInputs, TestInputs, TimeUnit};
pub use metrics::{
    calculate, DerivedMetrics, LoadPlan, MetricsCalculator, Scenario, ScenarioResult,
};
pub use report::{calculation_line, render_plan_json, render_plan_report, RECOMMENDATIONS};
pub use script::{
    format_number, format_percent, render_load_script, ScriptOptions, ScriptStage,
    ScriptTemplateRenderer, DEFAULT_ENDPOINT,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::inputs::{Durations, RawInputs, TestInputs, TimeUnit};
    pub use crate::metrics::{LoadPlan, MetricsCalculator, Scenario, ScenarioResult};
    pub use crate::script::{ScriptOptions, ScriptTemplateRenderer};
}
