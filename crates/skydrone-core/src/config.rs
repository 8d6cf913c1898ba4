//! Session configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::GeoFix;

/// Bounds the input policy keeps the vehicle's elevation within.
///
/// The vehicle itself never clamps; this policy is applied to control
/// commands before they reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationPolicy {
    pub min: f64,
    pub max: f64,
}

impl Default for ElevationPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ELEVATION,
            max: DEFAULT_MAX_ELEVATION,
        }
    }
}

impl ElevationPolicy {
    /// Clamp a requested delta so `current + delta` stays inside the bounds.
    ///
    /// A vehicle already outside the bounds may still move toward them, but
    /// never further away.
    pub fn clamp_delta(&self, current: f64, delta: f64) -> f64 {
        let target = current + delta;
        if delta > 0.0 {
            (target.min(self.max) - current).max(0.0)
        } else {
            (target.max(self.min) - current).min(0.0)
        }
    }
}

/// Chase camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f64,
    pub height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_CAMERA_DISTANCE,
            height: DEFAULT_CAMERA_HEIGHT,
        }
    }
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Geographic fix the vehicle starts at.
    pub initial_fix: GeoFix,
    pub initial_elevation: f64,
    pub initial_azimuth_deg: f64,
    /// Ground speed while a movement input is held (m/s).
    pub linear_speed: f64,
    /// Degrees turned per discrete turn command.
    pub azimuth_step_deg: f64,
    /// Meters climbed per discrete climb command.
    pub elevation_step: f64,
    pub elevation_policy: ElevationPolicy,
    /// Rotor angular speed (rad/s).
    pub rotor_spin_rate: f64,
    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_fix: GeoFix::new(DEFAULT_INITIAL_LATITUDE, DEFAULT_INITIAL_LONGITUDE),
            initial_elevation: DEFAULT_INITIAL_ELEVATION,
            initial_azimuth_deg: 0.0,
            linear_speed: DEFAULT_LINEAR_SPEED,
            azimuth_step_deg: DEFAULT_AZIMUTH_STEP_DEG,
            elevation_step: DEFAULT_ELEVATION_STEP,
            elevation_policy: ElevationPolicy::default(),
            rotor_spin_rate: DEFAULT_ROTOR_SPIN_RATE,
            camera: CameraConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lat = self.initial_fix.latitude;
        if !lat.is_finite() || lat.abs() >= MAX_MERCATOR_LATITUDE {
            return Err(ConfigError::Invalid(format!(
                "initial latitude {lat} is outside the Mercator domain"
            )));
        }
        if !self.initial_fix.longitude.is_finite() {
            return Err(ConfigError::Invalid("initial longitude must be finite".into()));
        }
        if !self.linear_speed.is_finite() || self.linear_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "linear_speed must be a non-negative number, got {}",
                self.linear_speed
            )));
        }
        let finite = [
            ("initial_elevation", self.initial_elevation),
            ("initial_azimuth_deg", self.initial_azimuth_deg),
            ("azimuth_step_deg", self.azimuth_step_deg),
            ("elevation_step", self.elevation_step),
            ("rotor_spin_rate", self.rotor_spin_rate),
            ("camera.distance", self.camera.distance),
            ("camera.height", self.camera.height),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }
        let policy = self.elevation_policy;
        if !(policy.min.is_finite() && policy.max.is_finite()) || policy.min > policy.max {
            return Err(ConfigError::Invalid(format!(
                "elevation policy [{}, {}] is not a valid range",
                policy.min, policy.max
            )));
        }
        Ok(())
    }
}
