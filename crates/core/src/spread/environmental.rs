//! Combined environmental spread-rate model
//!
//! The richest variant: slope, wind alignment, fuel load and ambient weather
//! combine multiplicatively into a spread rate in m/min,
//! `r = r0 * k_phi * k_theta * k_s^2 * 0.13`, following empirical wildfire
//! research (Rothermel model and derivatives). Drives the full five-phase
//! state machine; only neighbours at phase >= Burning contribute.

use crate::core_types::FireState;
use crate::grid::Cell;
use crate::spread::{
    bearing, fuel_coefficient, wind_alignment, Progression, SpreadRateModel, WIND_GAIN,
};

/// Exponential slope gain in `k_theta = exp(3.553 * t_theta)`
const SLOPE_GAIN: f64 = 3.553;
/// Slope steepening factor inside `tan(1.2 * atan(...))`
const SLOPE_STEEPENING: f64 = 1.2;
/// Calibration factor on the combined rate
const RATE_CALIBRATION: f64 = 0.13;

/// Combined environmental variant: wind, slope, fuel and weather together
#[derive(Debug, Clone, Copy, Default)]
pub struct Environmental;

impl Environmental {
    pub fn new() -> Self {
        Environmental
    }

    /// Slope coefficient `t_theta = tan(1.2 * atan(d_elev / distance))`.
    ///
    /// Degenerate geometry (missing geo-location or elevation on either
    /// cell, or zero horizontal distance) is treated as flat ground.
    fn slope_coefficient(target: &Cell, neighbour: &Cell) -> f64 {
        let (Some(target_geo), Some(neighbour_geo)) = (target.geo_location(), neighbour.geo_location())
        else {
            return 0.0;
        };
        let (Some(target_elev), Some(neighbour_elev)) = (
            target.environment().elevation(),
            neighbour.environment().elevation(),
        ) else {
            return 0.0;
        };

        let distance = neighbour_geo.distance_m(&target_geo).abs();
        if distance <= f64::EPSILON {
            return 0.0;
        }

        let elevation_difference = target_elev - neighbour_elev;
        (SLOPE_STEEPENING * (elevation_difference / distance).atan()).tan()
    }
}

impl SpreadRateModel for Environmental {
    fn rate(&self, target: &Cell, neighbour: &Cell, neighbour_state: FireState) -> f32 {
        if !neighbour.combustible() || !neighbour_state.is_fire_source() {
            return 0.0;
        }

        let env = neighbour.environment();

        let t_theta = Self::slope_coefficient(target, neighbour);
        let k_theta = (SLOPE_GAIN * t_theta).exp();

        let bearing_rad = bearing(neighbour.position(), target.position());
        let c_phi = wind_alignment(env.wind_direction(), bearing_rad);
        let k_phi = (WIND_GAIN * env.wind_speed() * c_phi).exp();

        let k_s = fuel_coefficient(env.fuel_load());

        let w = (env.wind_speed() / 0.836).powf(2.0 / 3.0);
        let r0 = 0.03 * env.temperature() + 0.05 * w - 0.01 * (100.0 - env.humidity()) - 0.3;

        let rate = r0 * k_phi * k_theta * k_s * k_s * RATE_CALIBRATION;
        rate.max(0.0) as f32
    }

    fn progression(&self) -> Progression {
        Progression::Staged
    }

    fn ignition_state(&self) -> FireState {
        FireState::burning()
    }
}
