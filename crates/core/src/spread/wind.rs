//! Wind-driven spread-rate model
//!
//! Spread rate grows exponentially with wind speed aligned to the spread
//! direction (`k_phi = exp(0.1783 * wind_speed * c_phi * 1.5)`), and the
//! per-neighbour contribution is square-root dampened and thinned by
//! `1/(1 + wind_speed)` to model wind's simultaneous
//! acceleration-but-thinning effect on local intensity.

use crate::core_types::FireState;
use crate::grid::Cell;
use crate::spread::{bearing, wind_alignment, Progression, SpreadRateModel, WIND_GAIN};

/// Directionality exponent of the standalone wind variant
const ALIGNMENT_EXPONENT: f64 = 1.5;

/// Wind-driven variant: ignores slope and fuel, spreads along the wind
#[derive(Debug, Clone, Copy, Default)]
pub struct WindDriven;

impl WindDriven {
    pub fn new() -> Self {
        WindDriven
    }
}

impl SpreadRateModel for WindDriven {
    fn rate(&self, target: &Cell, neighbour: &Cell, neighbour_state: FireState) -> f32 {
        if !neighbour.combustible() {
            return 0.0;
        }

        let bearing_rad = bearing(neighbour.position(), target.position());
        let c_phi = wind_alignment(neighbour.environment().wind_direction(), bearing_rad);
        let k_phi =
            (WIND_GAIN * neighbour.environment().wind_speed() * c_phi * ALIGNMENT_EXPONENT).exp();

        // The target's own wind thins its local intensity gain.
        let thinning = 1.0 + target.environment().wind_speed();
        (f64::from(neighbour_state.intensity()) * k_phi.sqrt() / thinning) as f32
    }

    fn progression(&self) -> Progression {
        Progression::Continuous
    }

    fn ignition_state(&self) -> FireState {
        FireState::ignition_spark()
    }
}
