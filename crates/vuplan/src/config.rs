//! Plan configuration file (`vuplan.yaml`)
//!
//! Every field is optional. Values present in the file are layered over the
//! built-in defaults, and command-line values are layered over the file.

use crate::error::{VuplanError, VuplanResult};
use crate::inputs::{RawInputs, TimeUnit};
use crate::script::ScriptOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "vuplan.yaml";

/// Calculator and script settings loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    /// Requests observed over one `time_unit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_volume: Option<f64>,
    /// Unit the volume is counted over
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,
    /// Average response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_time_ms: Option<f64>,
    /// Stress multiplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_multiplier: Option<f64>,
    /// Spike multiplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spike_multiplier: Option<f64>,
    /// Per-scenario durations in minutes
    #[serde(skip_serializing_if = "DurationOverrides::is_empty")]
    pub durations: DurationOverrides,
    /// k6 script settings
    #[serde(skip_serializing_if = "ScriptOverrides::is_empty")]
    pub script: ScriptOverrides,
}

/// Optional per-scenario durations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurationOverrides {
    /// Smoke test minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoke: Option<f64>,
    /// Load test minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<f64>,
    /// Stress test minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<f64>,
    /// Spike test minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spike: Option<f64>,
}

impl DurationOverrides {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Optional script settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptOverrides {
    /// Endpoint URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Ramp-up minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_up_minutes: Option<f64>,
    /// Ramp-down minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_down_minutes: Option<f64>,
    /// p95 bound as a multiple of the average response time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95_factor: Option<f64>,
    /// Maximum error rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_error_rate: Option<f64>,
}

impl ScriptOverrides {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl PlanConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> VuplanResult<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| VuplanError::config(format!("Failed to parse YAML: {e}")))
    }

    /// Load from file
    pub fn load(path: &Path) -> VuplanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "loaded plan configuration");
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> VuplanResult<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| VuplanError::config(format!("Failed to write YAML: {e}")))
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> VuplanResult<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// A config with every field set to the built-in defaults
    #[must_use]
    pub fn starter() -> Self {
        let inputs = RawInputs::default().parse();
        let script = ScriptOptions::default();
        Self {
            request_volume: Some(inputs.request_volume),
            time_unit: Some(inputs.time_unit),
            avg_response_time_ms: Some(inputs.avg_response_time_ms),
            stress_multiplier: Some(inputs.stress_multiplier),
            spike_multiplier: Some(inputs.spike_multiplier),
            durations: DurationOverrides {
                smoke: Some(inputs.durations.smoke),
                load: Some(inputs.durations.load),
                stress: Some(inputs.durations.stress),
                spike: Some(inputs.durations.spike),
            },
            script: ScriptOverrides {
                endpoint: Some(script.endpoint),
                ramp_up_minutes: Some(script.ramp_up_minutes),
                ramp_down_minutes: Some(script.ramp_down_minutes),
                p95_factor: Some(script.p95_factor),
                max_error_rate: Some(script.max_error_rate),
            },
        }
    }

    /// Overlay file values onto raw inputs
    pub fn apply_to_inputs(&self, raw: &mut RawInputs) {
        set_number(&mut raw.request_volume, self.request_volume);
        if let Some(unit) = self.time_unit {
            raw.time_unit = unit.to_string();
        }
        set_number(&mut raw.avg_response_time_ms, self.avg_response_time_ms);
        set_number(&mut raw.stress_multiplier, self.stress_multiplier);
        set_number(&mut raw.spike_multiplier, self.spike_multiplier);
        set_number(&mut raw.smoke_minutes, self.durations.smoke);
        set_number(&mut raw.load_minutes, self.durations.load);
        set_number(&mut raw.stress_minutes, self.durations.stress);
        set_number(&mut raw.spike_minutes, self.durations.spike);
    }

    /// Overlay file values onto script options
    pub fn apply_to_script(&self, options: &mut ScriptOptions) {
        let script = &self.script;
        if let Some(ref endpoint) = script.endpoint {
            options.endpoint.clone_from(endpoint);
        }
        if let Some(v) = script.ramp_up_minutes {
            options.ramp_up_minutes = v;
        }
        if let Some(v) = script.ramp_down_minutes {
            options.ramp_down_minutes = v;
        }
        if let Some(v) = script.p95_factor {
            options.p95_factor = v;
        }
        if let Some(v) = script.max_error_rate {
            options.max_error_rate = v;
        }
    }
}

fn set_number(field: &mut String, value: Option<f64>) {
    if let Some(v) = value {
        *field = v.to_string();
    }
}
