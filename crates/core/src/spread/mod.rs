//! Spread-rate models
//!
//! One automaton, three interchangeable rate functions: the model converts a
//! cell's environmental covariates and its geometric relationship to a
//! burning neighbour into a per-neighbour fire growth contribution. The
//! variant is selected at grid-construction time; everything else about the
//! propagation protocol is shared.

pub mod environmental;
pub mod fuel;
pub mod wind;

pub use environmental::Environmental;
pub use fuel::FuelDriven;
pub use wind::WindDriven;

use crate::core_types::{FireState, GridPosition};
use crate::grid::Cell;
use nalgebra::Vector2;

/// Empirical wind gain from fire-spread research (Rothermel derivatives)
pub(crate) const WIND_GAIN: f64 = 0.1783;

/// How fire state advances once intensity saturates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Intensity in [0, 1] with an implicit terminal at 1
    Continuous,
    /// Full unburned/igniting/burning/cooling/burned machine
    Staged,
}

/// Per-neighbour spread rate as a function of environmental covariates.
///
/// `rate` must be pure with respect to committed state: it reads the target
/// cell, the neighbour cell and the neighbour's previously-committed fire
/// state, and returns a non-negative contribution. Implementations must be
/// `Sync` so the engine can evaluate the read phase in parallel.
pub trait SpreadRateModel: Send + Sync {
    /// Contribution of `neighbour` to `target`'s fire growth this step
    fn rate(&self, target: &Cell, neighbour: &Cell, neighbour_state: FireState) -> f32;

    /// State-machine shape driven by this model
    fn progression(&self) -> Progression;

    /// State assigned to an ignition origin
    fn ignition_state(&self) -> FireState;
}

/// Bearing of `target` relative to `neighbour` in radians from true north.
///
/// Standard two-argument arctangent on the relative position vector, sign
/// corrected so west-pointing deltas flip the angle.
pub(crate) fn bearing(neighbour: GridPosition, target: GridPosition) -> f64 {
    let delta = Vector2::new(
        f64::from(target.x) - f64::from(neighbour.x),
        f64::from(target.y) - f64::from(neighbour.y),
    );
    (-delta.x).atan2(delta.y)
}

/// Directional wind alignment `c_phi = cos(radians(wind_dir - 180) - bearing)`.
///
/// +1 when the wind blows directly from the neighbour toward the target
/// (downwind spread), -1 for pure upwind.
pub(crate) fn wind_alignment(wind_direction_deg: f64, bearing_rad: f64) -> f64 {
    ((wind_direction_deg - 180.0).to_radians() - bearing_rad).cos()
}

/// Cubic fuel-availability coefficient `k_s = ((fuel_load + 30)/100)^3`
pub(crate) fn fuel_coefficient(fuel_load_percent: f64) -> f64 {
    ((fuel_load_percent + 30.0) / 100.0).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn bearing_is_signed_east_negative_west_positive() {
        let origin = GridPosition::new(5, 5);
        assert_relative_eq!(bearing(origin, GridPosition::new(5, 6)), 0.0);
        assert_relative_eq!(bearing(origin, GridPosition::new(6, 5)), -FRAC_PI_2);
        assert_relative_eq!(bearing(origin, GridPosition::new(4, 5)), FRAC_PI_2);
    }

    #[test]
    fn wind_alignment_peaks_downwind() {
        // Wind direction 90 degrees drives fire toward the cell east of the
        // source, whose bearing is -pi/2.
        let east = wind_alignment(90.0, -FRAC_PI_2);
        let west = wind_alignment(90.0, FRAC_PI_2);
        assert_relative_eq!(east, 1.0, epsilon = 1e-12);
        assert_relative_eq!(west, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn fuel_coefficient_matches_cubic_formula() {
        assert_relative_eq!(fuel_coefficient(0.0), 0.027, epsilon = 1e-12);
        assert_relative_eq!(fuel_coefficient(100.0), 2.197, epsilon = 1e-12);
        assert_relative_eq!(fuel_coefficient(70.0), 1.0, epsilon = 1e-12);
    }
}
