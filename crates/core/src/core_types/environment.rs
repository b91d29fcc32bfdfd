//! Per-cell environmental attributes
//!
//! Attributes arrive from an [`AttributeProvider`](crate::provider::AttributeProvider)
//! as an [`EnvironmentSample`] and are validated into an immutable
//! [`Environment`] when the grid is generated. Wind- and slope-derived
//! coefficients are never stored here; they are recomputed from the burning
//! neighbour relationship on every rate evaluation.

use serde::{Deserialize, Serialize};

/// Raw attribute bundle returned by an attribute provider for one location.
///
/// `combustible` defaults to true and `detected_fire` to false, matching the
/// documented fallbacks for providers that carry no land-cover or satellite
/// fire-detection channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Terrain elevation (m), if the provider has elevation data
    pub elevation: Option<f64>,
    /// Fuel load / vegetation density (0-100 %)
    pub fuel_load: f64,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Relative humidity (0-100 %)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Wind direction (degrees from north)
    pub wind_direction: f64,
    /// Whether the location can carry fire (false for water/rock/firebreak)
    pub combustible: bool,
    /// Whether a satellite fire detection exists at this location
    pub detected_fire: bool,
}

impl Default for EnvironmentSample {
    fn default() -> Self {
        EnvironmentSample {
            elevation: None,
            fuel_load: 50.0,
            temperature: 20.0,
            humidity: 40.0,
            wind_speed: 0.0,
            wind_direction: 0.0,
            combustible: true,
            detected_fire: false,
        }
    }
}

/// Validated, immutable environmental attributes of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub(crate) elevation: Option<f64>,
    pub(crate) fuel_load: f64,
    pub(crate) temperature: f64,
    pub(crate) humidity: f64,
    pub(crate) wind_speed: f64,
    pub(crate) wind_direction: f64,
}

impl Environment {
    /// Validate a provider sample into an `Environment`.
    ///
    /// # Errors
    /// Returns a description of the first malformed attribute: percentages
    /// out of 0-100, negative wind speed, or non-finite values. Malformed
    /// attributes must fail here, at construction, never mid-simulation.
    pub fn from_sample(sample: &EnvironmentSample) -> Result<Self, String> {
        if let Some(elevation) = sample.elevation {
            if !elevation.is_finite() {
                return Err(format!("elevation must be finite, got {elevation}"));
            }
        }
        if !sample.fuel_load.is_finite() || !(0.0..=100.0).contains(&sample.fuel_load) {
            return Err(format!(
                "fuel_load must be within 0-100 %, got {}",
                sample.fuel_load
            ));
        }
        if !sample.temperature.is_finite() {
            return Err(format!(
                "temperature must be finite, got {}",
                sample.temperature
            ));
        }
        if !sample.humidity.is_finite() || !(0.0..=100.0).contains(&sample.humidity) {
            return Err(format!(
                "humidity must be within 0-100 %, got {}",
                sample.humidity
            ));
        }
        if !sample.wind_speed.is_finite() || sample.wind_speed < 0.0 {
            return Err(format!(
                "wind_speed must be non-negative, got {}",
                sample.wind_speed
            ));
        }
        if !sample.wind_direction.is_finite() {
            return Err(format!(
                "wind_direction must be finite, got {}",
                sample.wind_direction
            ));
        }

        Ok(Environment {
            elevation: sample.elevation,
            fuel_load: sample.fuel_load,
            temperature: sample.temperature,
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
            wind_direction: sample.wind_direction,
        })
    }

    /// Terrain elevation (m), if known
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Fuel load / vegetation density (0-100 %)
    pub fn fuel_load(&self) -> f64 {
        self.fuel_load
    }

    /// Ambient temperature (°C)
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Relative humidity (0-100 %)
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Wind speed (m/s)
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Wind direction (degrees from north)
    pub fn wind_direction(&self) -> f64 {
        self.wind_direction
    }
}
