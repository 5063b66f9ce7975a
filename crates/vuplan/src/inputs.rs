//! Calculator inputs and the coercion policy for malformed numbers
//!
//! Values arrive as text (a form field, a CLI flag, a config file entry).
//! Parsing is lenient and never fails:
//!
//! - if request volume or response time is unusable, both become `0`
//! - multipliers and durations fall back to their recommended defaults
//! - an unknown time unit falls back to [`TimeUnit::Hour`]

use crate::error::{VuplanError, VuplanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommended stress multiplier (150% of normal load)
pub const DEFAULT_STRESS_MULTIPLIER: f64 = 1.5;
/// Recommended spike multiplier (200% of normal load)
pub const DEFAULT_SPIKE_MULTIPLIER: f64 = 2.0;

/// Unit the request volume is counted over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Requests per second
    Second,
    /// Requests per hour (peak hour)
    #[default]
    Hour,
    /// Requests per day
    Day,
}

impl TimeUnit {
    /// All units, shortest first
    pub const ALL: [Self; 3] = [Self::Second, Self::Hour, Self::Day];

    /// Number of seconds in one unit
    #[must_use]
    pub const fn seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Hour => 3600.0,
            Self::Day => 86_400.0,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Parse a unit name, falling back to the default for anything unknown
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = VuplanError;

    fn from_str(s: &str) -> VuplanResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" | "sec" | "s" => Ok(Self::Second),
            "hour" | "hours" | "h" => Ok(Self::Hour),
            "day" | "days" | "d" => Ok(Self::Day),
            _ => Err(VuplanError::unknown_time_unit(s)),
        }
    }
}

/// Test durations per scenario, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    /// Smoke test duration
    pub smoke: f64,
    /// Load test duration
    pub load: f64,
    /// Stress test duration
    pub stress: f64,
    /// Spike test duration
    pub spike: f64,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            smoke: 5.0,
            load: 30.0,
            stress: 15.0,
            spike: 10.0,
        }
    }
}

/// Parsed calculator inputs
///
/// Every numeric field is finite and non-negative. Build one with
/// [`TestInputs::new`] or [`RawInputs::parse`]; both enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestInputs {
    /// Requests observed over one `time_unit`
    pub request_volume: f64,
    /// Unit the volume is counted over
    pub time_unit: TimeUnit,
    /// Average response time in milliseconds
    pub avg_response_time_ms: f64,
    /// Load multiplier for the stress scenario
    pub stress_multiplier: f64,
    /// Load multiplier for the spike scenario
    pub spike_multiplier: f64,
    /// Per-scenario durations
    pub durations: Durations,
}

impl Default for TestInputs {
    fn default() -> Self {
        Self {
            request_volume: 1989.0,
            time_unit: TimeUnit::Hour,
            avg_response_time_ms: 200.0,
            stress_multiplier: DEFAULT_STRESS_MULTIPLIER,
            spike_multiplier: DEFAULT_SPIKE_MULTIPLIER,
            durations: Durations::default(),
        }
    }
}

impl TestInputs {
    /// Create inputs with default multipliers and durations
    ///
    /// Volume and response time are only meaningful together: if either is
    /// NaN, infinite or negative, both become `0` and the whole plan sizes
    /// to zero.
    #[must_use]
    pub fn new(request_volume: f64, time_unit: TimeUnit, avg_response_time_ms: f64) -> Self {
        let (request_volume, avg_response_time_ms) =
            if is_usable(request_volume) && is_usable(avg_response_time_ms) {
                (request_volume, avg_response_time_ms)
            } else {
                (0.0, 0.0)
            };
        Self {
            request_volume,
            time_unit,
            avg_response_time_ms,
            ..Self::default()
        }
    }

    /// Set the stress multiplier
    #[must_use]
    pub fn with_stress_multiplier(mut self, multiplier: f64) -> Self {
        self.stress_multiplier = or_default(multiplier, DEFAULT_STRESS_MULTIPLIER);
        self
    }

    /// Set the spike multiplier
    #[must_use]
    pub fn with_spike_multiplier(mut self, multiplier: f64) -> Self {
        self.spike_multiplier = or_default(multiplier, DEFAULT_SPIKE_MULTIPLIER);
        self
    }

    /// Set the per-scenario durations
    #[must_use]
    pub fn with_durations(mut self, durations: Durations) -> Self {
        let defaults = Durations::default();
        self.durations = Durations {
            smoke: or_default(durations.smoke, defaults.smoke),
            load: or_default(durations.load, defaults.load),
            stress: or_default(durations.stress, defaults.stress),
            spike: or_default(durations.spike, defaults.spike),
        };
        self
    }

    /// Re-apply the coercion policy to every field
    ///
    /// Fields are public, so values assigned directly may be NaN or negative.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(
            self.request_volume,
            self.time_unit,
            self.avg_response_time_ms,
        )
        .with_stress_multiplier(self.stress_multiplier)
        .with_spike_multiplier(self.spike_multiplier)
        .with_durations(self.durations)
    }
}

/// Unparsed inputs, one string per form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Request volume
    pub request_volume: String,
    /// Time unit name
    pub time_unit: String,
    /// Average response time (ms)
    pub avg_response_time_ms: String,
    /// Stress multiplier
    pub stress_multiplier: String,
    /// Spike multiplier
    pub spike_multiplier: String,
    /// Smoke duration (minutes)
    pub smoke_minutes: String,
    /// Load duration (minutes)
    pub load_minutes: String,
    /// Stress duration (minutes)
    pub stress_minutes: String,
    /// Spike duration (minutes)
    pub spike_minutes: String,
}

impl Default for RawInputs {
    fn default() -> Self {
        let defaults = TestInputs::default();
        Self {
            request_volume: defaults.request_volume.to_string(),
            time_unit: defaults.time_unit.to_string(),
            avg_response_time_ms: defaults.avg_response_time_ms.to_string(),
            stress_multiplier: defaults.stress_multiplier.to_string(),
            spike_multiplier: defaults.spike_multiplier.to_string(),
            smoke_minutes: defaults.durations.smoke.to_string(),
            load_minutes: defaults.durations.load.to_string(),
            stress_minutes: defaults.durations.stress.to_string(),
            spike_minutes: defaults.durations.spike.to_string(),
        }
    }
}

impl RawInputs {
    /// Parse into [`TestInputs`], coercing anything malformed
    #[must_use]
    pub fn parse(&self) -> TestInputs {
        let inputs = TestInputs::new(
            parse_number(&self.request_volume),
            TimeUnit::parse_or_default(&self.time_unit),
            parse_number(&self.avg_response_time_ms),
        )
        .with_stress_multiplier(parse_number(&self.stress_multiplier))
        .with_spike_multiplier(parse_number(&self.spike_multiplier))
        .with_durations(Durations {
            smoke: parse_number(&self.smoke_minutes),
            load: parse_number(&self.load_minutes),
            stress: parse_number(&self.stress_minutes),
            spike: parse_number(&self.spike_minutes),
        });
        tracing::debug!(?inputs, "parsed calculator inputs");
        inputs
    }
}

/// Parse the leading number of `text`, or NaN if there is none
///
/// Leading whitespace is skipped and trailing garbage ignored, so
/// `"200ms"` parses as `200.0` and `""` as NaN.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Usable (finite, non-negative) value or the given default
fn or_default(value: f64, default: f64) -> f64 {
    if is_usable(value) {
        value
    } else {
        default
    }
}
