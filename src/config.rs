//! # Harness Configuration
//!
//! Every timing parameter of the harness lives here rather than as a magic
//! constant: the controller clock period, the serial half-clock period, the
//! chip-select hold and settle durations, the nominal PWM period, and the
//! acceptance bands used by scenarios. Configurations are plain JSON files.
//!
//! ## Usage
//!
//! ```rust
//! use pwm_bench::config::HarnessConfig;
//!
//! let config = HarnessConfig::default();
//! assert_eq!(config.clk_period_ns, 100);
//! assert_eq!(config.sclk_half_period_ns, 5_000);
//! ```
//!
//! ## Configuration File Format
//!
//! ```json
//! {
//!   "clk_period_ns": 100,
//!   "sclk_half_period_ns": 5000,
//!   "cs_assert_cycles": 1,
//!   "cs_settle_cycles": 600,
//!   "pwm_period_us": 333.33,
//!   "expected_pwm_khz": 3.0,
//!   "freq_tolerance": 0.01,
//!   "duty_bands": { "half": { "min": 49.0, "max": 51.0 } }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Closed acceptance interval for a measured duty cycle, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DutyBand {
    pub min: f64,
    pub max: f64,
}

impl DutyBand {
    pub fn new(min: f64, max: f64) -> Self {
        DutyBand { min, max }
    }

    pub fn contains(&self, duty_pct: f64) -> bool {
        duty_pct >= self.min && duty_pct <= self.max
    }
}

/// Timing and tolerance configuration for a test run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Fundamental simulated time quantum: one controller-clock tick.
    #[serde(default = "default_clk_period_ns")]
    pub clk_period_ns: u64,
    /// Half of the serial clock period; data settles for one half-period
    /// with the serial clock low, then is held through a high half-period.
    #[serde(default = "default_sclk_half_period_ns")]
    pub sclk_half_period_ns: u64,
    /// Controller ticks to hold after asserting chip select, letting the
    /// responder register the assertion.
    #[serde(default = "default_cs_assert_cycles")]
    pub cs_assert_cycles: u32,
    /// Controller ticks to hold after deasserting chip select, covering the
    /// responder's internal latching.
    #[serde(default = "default_cs_settle_cycles")]
    pub cs_settle_cycles: u32,
    /// Nominal period of the observed PWM wave; bounds every duty-cycle
    /// phase deadline.
    #[serde(default = "default_pwm_period_us")]
    pub pwm_period_us: f64,
    /// Target frequency for period measurements.
    #[serde(default = "default_expected_pwm_khz")]
    pub expected_pwm_khz: f64,
    /// Relative frequency tolerance (fraction, not percent).
    #[serde(default = "default_freq_tolerance")]
    pub freq_tolerance: f64,
    /// Named per-scenario duty-cycle acceptance bands.
    #[serde(default)]
    pub duty_bands: HashMap<String, DutyBand>,
}

fn default_clk_period_ns() -> u64 {
    100
}

fn default_sclk_half_period_ns() -> u64 {
    5_000
}

fn default_cs_assert_cycles() -> u32 {
    1
}

fn default_cs_settle_cycles() -> u32 {
    600
}

fn default_pwm_period_us() -> f64 {
    333.33
}

fn default_expected_pwm_khz() -> f64 {
    3.0
}

fn default_freq_tolerance() -> f64 {
    0.01
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            clk_period_ns: default_clk_period_ns(),
            sclk_half_period_ns: default_sclk_half_period_ns(),
            cs_assert_cycles: default_cs_assert_cycles(),
            cs_settle_cycles: default_cs_settle_cycles(),
            pwm_period_us: default_pwm_period_us(),
            expected_pwm_khz: default_expected_pwm_khz(),
            freq_tolerance: default_freq_tolerance(),
            duty_bands: HashMap::new(),
        }
    }
}

impl HarnessConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, HarnessError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Nominal PWM period in nanoseconds, for deadline arithmetic against
    /// simulation time.
    pub fn pwm_period_ns(&self) -> u64 {
        (self.pwm_period_us * 1_000.0).round() as u64
    }

    /// Look up a named duty acceptance band.
    pub fn duty_band(&self, name: &str) -> Option<DutyBand> {
        self.duty_bands.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.clk_period_ns, 100);
        assert_eq!(config.sclk_half_period_ns, 5_000);
        assert_eq!(config.cs_assert_cycles, 1);
        assert_eq!(config.cs_settle_cycles, 600);
        assert_eq!(config.expected_pwm_khz, 3.0);
        assert_eq!(config.freq_tolerance, 0.01);
        assert!(config.duty_bands.is_empty());
    }

    #[test]
    fn test_pwm_period_ns() {
        let config = HarnessConfig::default();
        assert_eq!(config.pwm_period_ns(), 333_330);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = HarnessConfig::from_json(r#"{ "clk_period_ns": 50 }"#).unwrap();
        assert_eq!(config.clk_period_ns, 50);
        assert_eq!(config.cs_settle_cycles, 600);
    }

    #[test]
    fn test_duty_band_lookup() {
        let json = r#"{
            "duty_bands": {
                "half": { "min": 49.0, "max": 51.0 },
                "full": { "min": 99.0, "max": 100.0 }
            }
        }"#;
        let config = HarnessConfig::from_json(json).unwrap();
        let half = config.duty_band("half").unwrap();
        assert!(half.contains(50.0));
        assert!(!half.contains(48.0));
        assert!(config.duty_band("missing").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = HarnessConfig::default();
        config
            .duty_bands
            .insert("zero".to_string(), DutyBand::new(0.0, 1.0));
        let json = serde_json::to_string(&config).unwrap();
        let restored = HarnessConfig::from_json(&json).unwrap();
        assert_eq!(restored.clk_period_ns, config.clk_period_ns);
        assert_eq!(restored.duty_band("zero"), Some(DutyBand::new(0.0, 1.0)));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(HarnessConfig::from_json("{ not json").is_err());
    }
}
