//! Derived load-test metrics
//!
//! The sizing rule is Little's law applied to virtual users:
//!
//! ```text
//! VUs = RPS × response time (s)
//! ```
//!
//! Each scenario scales the base RPS by its own multiplier and then applies
//! the same rule. All results are rounded up so a plan never under-provisions.

use crate::error::{VuplanError, VuplanResult};
use crate::inputs::TestInputs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smoke tests run at 10% of normal load
pub const SMOKE_MULTIPLIER: f64 = 0.1;
/// Load tests run at exactly normal load
pub const LOAD_MULTIPLIER: f64 = 1.0;

/// Load-test scenario category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Minimal load to verify basic functionality
    Smoke,
    /// Expected production load
    Load,
    /// Load beyond normal to find the breaking point
    Stress,
    /// Sudden burst of traffic
    Spike,
}

impl Scenario {
    /// All scenarios, in recommended run order
    pub const ALL: [Self; 4] = [Self::Smoke, Self::Load, Self::Stress, Self::Spike];

    /// Lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Load => "load",
            Self::Stress => "stress",
            Self::Spike => "spike",
        }
    }

    /// Display title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Smoke => "Smoke Test",
            Self::Load => "Load Test",
            Self::Stress => "Stress Test",
            Self::Spike => "Spike Test",
        }
    }

    /// What the scenario is meant to show
    #[must_use]
    pub const fn objective(self) -> &'static str {
        match self {
            Self::Smoke => {
                "Verify the system works correctly under very low load before heavier tests."
            }
            Self::Load => {
                "Reproduce the observed production load to confirm the service sustains it."
            }
            Self::Stress => {
                "Push past normal load to find the breaking point or onset of degradation."
            }
            Self::Spike => {
                "Simulate a sudden traffic burst and verify the system absorbs it and recovers."
            }
        }
    }

    /// Index into [`Scenario::ALL`]
    const fn index(self) -> usize {
        match self {
            Self::Smoke => 0,
            Self::Load => 1,
            Self::Stress => 2,
            Self::Spike => 3,
        }
    }

    /// Load multiplier for this scenario under the given inputs
    #[must_use]
    pub fn multiplier(self, inputs: &TestInputs) -> f64 {
        match self {
            Self::Smoke => SMOKE_MULTIPLIER,
            Self::Load => LOAD_MULTIPLIER,
            Self::Stress => inputs.stress_multiplier,
            Self::Spike => inputs.spike_multiplier,
        }
    }

    /// Configured duration for this scenario, in minutes
    #[must_use]
    pub fn duration_minutes(self, inputs: &TestInputs) -> f64 {
        match self {
            Self::Smoke => inputs.durations.smoke,
            Self::Load => inputs.durations.load,
            Self::Stress => inputs.durations.stress,
            Self::Spike => inputs.durations.spike,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = VuplanError;

    fn from_str(s: &str) -> VuplanResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smoke" => Ok(Self::Smoke),
            "load" => Ok(Self::Load),
            "stress" => Ok(Self::Stress),
            "spike" => Ok(Self::Spike),
            _ => Err(VuplanError::unknown_scenario(s)),
        }
    }
}

/// Base metrics, before any scenario multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Requests per second at normal load
    pub base_rps: f64,
    /// Average response time in seconds
    pub avg_response_time_sec: f64,
    /// Virtual users needed to sustain `base_rps`
    pub base_vus: u64,
}

/// Sizing for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Which scenario
    pub scenario: Scenario,
    /// Multiplier applied to the base RPS
    pub multiplier: f64,
    /// Virtual users
    pub vus: u64,
    /// Expected requests per second
    pub rps: f64,
    /// Steady-state duration in minutes
    pub duration_minutes: f64,
    /// Requests issued over the steady-state duration
    pub total_requests: u64,
}

/// Complete output of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPlan {
    /// Inputs the plan was derived from (after coercion)
    pub inputs: TestInputs,
    /// Base metrics
    pub metrics: DerivedMetrics,
    /// One result per scenario, in [`Scenario::ALL`] order
    pub scenarios: [ScenarioResult; 4],
}

impl LoadPlan {
    /// Result for a single scenario
    #[must_use]
    pub fn scenario(&self, scenario: Scenario) -> &ScenarioResult {
        &self.scenarios[scenario.index()]
    }

    /// Stress load as a whole percentage of normal load
    #[must_use]
    pub fn stress_percent(&self) -> f64 {
        saturate(self.inputs.stress_multiplier * 100.0).round()
    }

    /// Spike load as a whole percentage of normal load
    #[must_use]
    pub fn spike_percent(&self) -> f64 {
        saturate(self.inputs.spike_multiplier * 100.0).round()
    }

    /// p95 latency bound suggested for thresholds, in milliseconds
    #[must_use]
    pub fn p95_threshold_ms(&self, factor: f64) -> f64 {
        saturate(self.inputs.avg_response_time_ms * factor)
    }
}

/// Derives [`LoadPlan`]s from [`TestInputs`]
///
/// Stateless: the same inputs always produce the same plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Create a calculator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute base metrics and every scenario
    #[must_use]
    pub fn calculate(&self, inputs: &TestInputs) -> LoadPlan {
        let inputs = inputs.sanitized();
        let metrics = self.derive(&inputs);
        let scenarios = Scenario::ALL.map(|s| self.scenario(&inputs, &metrics, s));

        tracing::debug!(
            base_rps = metrics.base_rps,
            base_vus = metrics.base_vus,
            stress_vus = scenarios[Scenario::Stress.index()].vus,
            spike_vus = scenarios[Scenario::Spike.index()].vus,
            "calculated load plan"
        );

        LoadPlan {
            inputs,
            metrics,
            scenarios,
        }
    }

    /// Base RPS, response time in seconds and base VUs
    #[must_use]
    pub fn derive(&self, inputs: &TestInputs) -> DerivedMetrics {
        let base_rps = saturate(inputs.request_volume / inputs.time_unit.seconds());
        let avg_response_time_sec = saturate(inputs.avg_response_time_ms / 1000.0);

        DerivedMetrics {
            base_rps,
            avg_response_time_sec,
            base_vus: ceil_count(base_rps * avg_response_time_sec),
        }
    }

    /// Sizing for one scenario
    #[must_use]
    pub fn scenario(
        &self,
        inputs: &TestInputs,
        metrics: &DerivedMetrics,
        scenario: Scenario,
    ) -> ScenarioResult {
        let multiplier = scenario.multiplier(inputs);
        let rps = saturate(metrics.base_rps * multiplier);
        let duration_minutes = scenario.duration_minutes(inputs);

        ScenarioResult {
            scenario,
            multiplier,
            vus: ceil_count(rps * metrics.avg_response_time_sec),
            rps,
            duration_minutes,
            total_requests: ceil_count(rps * duration_minutes * 60.0),
        }
    }
}

/// Calculate a plan with the default calculator
#[must_use]
pub fn calculate(inputs: &TestInputs) -> LoadPlan {
    MetricsCalculator::new().calculate(inputs)
}

/// Round up to a whole count; NaN and negatives become 0
pub(crate) fn ceil_count(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        // Saturates at u64::MAX for out-of-range values
        value.ceil() as u64
    }
}

/// Clamp overflow to `f64::MAX`; NaN and negatives become 0
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{Durations, RawInputs, TimeUnit};

    fn reference_inputs() -> TestInputs {
        TestInputs::new(1989.0, TimeUnit::Hour, 200.0)
    }

    #[test]
    fn test_reference_example() {
        let plan = calculate(&reference_inputs());
        assert!((plan.metrics.base_rps - 0.5525).abs() < 1e-9);
        assert_eq!(plan.metrics.avg_response_time_sec, 0.2);
        assert_eq!(plan.metrics.base_vus, 1);
    }

    #[test]
    fn test_reference_scenarios() {
        let plan = calculate(&reference_inputs());

        let smoke = plan.scenario(Scenario::Smoke);
        assert_eq!(smoke.vus, 1);
        assert_eq!(smoke.duration_minutes, 5.0);
        // 0.05525 req/s × 300 s = 16.575
        assert_eq!(smoke.total_requests, 17);

        let load = plan.scenario(Scenario::Load);
        assert_eq!(load.vus, 1);
        // 0.5525 × 1800 = 994.5
        assert_eq!(load.total_requests, 995);

        let stress = plan.scenario(Scenario::Stress);
        assert_eq!(stress.multiplier, 1.5);
        assert_eq!(stress.duration_minutes, 15.0);

        let spike = plan.scenario(Scenario::Spike);
        assert_eq!(spike.multiplier, 2.0);
        assert_eq!(spike.duration_minutes, 10.0);
    }

    #[test]
    fn test_time_units() {
        let per_second = calculate(&TestInputs::new(50.0, TimeUnit::Second, 100.0));
        assert_eq!(per_second.metrics.base_rps, 50.0);
        assert_eq!(per_second.metrics.base_vus, 5);

        let per_day = calculate(&TestInputs::new(86_400.0, TimeUnit::Day, 1000.0));
        assert_eq!(per_day.metrics.base_rps, 1.0);
        assert_eq!(per_day.metrics.base_vus, 1);
    }

    #[test]
    fn test_load_rps_equals_base() {
        let plan = calculate(&TestInputs::new(123_456.0, TimeUnit::Hour, 321.0));
        assert_eq!(plan.scenario(Scenario::Load).rps, plan.metrics.base_rps);
        assert_eq!(plan.scenario(Scenario::Load).vus, plan.metrics.base_vus);
    }

    #[test]
    fn test_smoke_rps_is_tenth_of_base() {
        let plan = calculate(&TestInputs::new(7200.0, TimeUnit::Hour, 250.0));
        assert_eq!(
            plan.scenario(Scenario::Smoke).rps,
            plan.metrics.base_rps * 0.1
        );
    }

    #[test]
    fn test_high_volume_vus() {
        // 360000/h = 100 rps; × 0.25 s = 25 VUs; stress ×3 = 75 VUs
        let inputs = TestInputs::new(360_000.0, TimeUnit::Hour, 250.0).with_stress_multiplier(3.0);
        let plan = calculate(&inputs);
        assert_eq!(plan.metrics.base_vus, 25);
        assert_eq!(plan.scenario(Scenario::Stress).vus, 75);
        assert_eq!(plan.scenario(Scenario::Spike).vus, 50);
        assert_eq!(plan.scenario(Scenario::Smoke).vus, 3);
        assert_eq!(plan.scenario(Scenario::Stress).total_requests, 270_000);
    }

    #[test]
    fn test_custom_durations() {
        let inputs = TestInputs::new(3600.0, TimeUnit::Hour, 100.0).with_durations(Durations {
            smoke: 1.0,
            load: 60.0,
            stress: 20.0,
            spike: 3.0,
        });
        let plan = calculate(&inputs);
        assert_eq!(plan.scenario(Scenario::Load).total_requests, 3600);
        assert_eq!(plan.scenario(Scenario::Spike).total_requests, 360);
    }

    #[test]
    fn test_empty_volume_degrades_to_zero() {
        let raw = RawInputs {
            request_volume: String::new(),
            ..RawInputs::default()
        };
        let plan = calculate(&raw.parse());
        assert_eq!(plan.metrics.base_rps, 0.0);
        assert_eq!(plan.metrics.base_vus, 0);
        for result in &plan.scenarios {
            assert_eq!(result.vus, 0);
            assert_eq!(result.rps, 0.0);
            assert_eq!(result.total_requests, 0);
        }
    }

    #[test]
    fn test_nan_response_time_degrades_to_zero() {
        let mut inputs = reference_inputs();
        inputs.avg_response_time_ms = f64::NAN;
        let plan = calculate(&inputs);
        assert_eq!(plan.metrics.base_rps, 0.0);
        assert_eq!(plan.metrics.avg_response_time_sec, 0.0);
        assert_eq!(plan.metrics.base_vus, 0);
        for result in &plan.scenarios {
            assert_eq!(result.vus, 0);
            assert_eq!(result.rps, 0.0);
            assert_eq!(result.total_requests, 0);
        }
    }

    #[test]
    fn test_empty_response_time_text_degrades_to_zero() {
        let raw = RawInputs {
            avg_response_time_ms: String::new(),
            ..RawInputs::default()
        };
        let plan = calculate(&raw.parse());
        let load = plan.scenario(Scenario::Load);
        assert_eq!(plan.metrics.base_rps, 0.0);
        assert_eq!(load.rps, 0.0);
        assert_eq!(load.total_requests, 0);
    }

    #[test]
    fn test_overflow_saturates_instead_of_collapsing() {
        let base = TestInputs::new(1e308, TimeUnit::Second, 200.0);
        let low = calculate(&base.with_stress_multiplier(1.0));
        let high = calculate(&base.with_stress_multiplier(10.0));

        let low_stress = low.scenario(Scenario::Stress);
        let high_stress = high.scenario(Scenario::Stress);
        assert_eq!(high_stress.rps, f64::MAX);
        assert_eq!(high_stress.vus, u64::MAX);
        assert_eq!(high_stress.total_requests, u64::MAX);
        assert!(low_stress.rps <= high_stress.rps);
        assert!(low_stress.vus <= high_stress.vus);
        assert!(low_stress.total_requests <= high_stress.total_requests);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(f64::NAN), 0.0);
        assert_eq!(saturate(-1.0), 0.0);
        assert_eq!(saturate(2.5), 2.5);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let inputs = reference_inputs().with_stress_multiplier(2.5);
        let calculator = MetricsCalculator::new();
        assert_eq!(calculator.calculate(&inputs), calculator.calculate(&inputs));
    }

    #[test]
    fn test_scenarios_in_run_order() {
        let plan = calculate(&reference_inputs());
        let order: Vec<Scenario> = plan.scenarios.iter().map(|r| r.scenario).collect();
        assert_eq!(order, Scenario::ALL.to_vec());
    }

    #[test]
    fn test_percentages() {
        let plan = calculate(&reference_inputs().with_stress_multiplier(1.25));
        assert_eq!(plan.stress_percent(), 125.0);
        assert_eq!(plan.spike_percent(), 200.0);
        assert_eq!(plan.p95_threshold_ms(1.5), 300.0);
    }

    #[test]
    fn test_scenario_from_str() {
        assert_eq!("Stress".parse::<Scenario>().unwrap(), Scenario::Stress);
        assert!("soak".parse::<Scenario>().is_err());
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
    }

    #[test]
    fn test_ceil_count() {
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(0.0001), 1);
        assert_eq!(ceil_count(2.0), 2);
        assert_eq!(ceil_count(f64::NAN), 0);
        assert_eq!(ceil_count(-4.0), 0);
        assert_eq!(ceil_count(f64::MAX), u64::MAX);
    }
}
