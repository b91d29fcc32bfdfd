//! Fuel-load-driven spread-rate model
//!
//! Ignores wind and slope entirely: the contribution of a burning neighbour
//! is its intensity scaled by the cubic fuel coefficient
//! `k_s = ((fuel_load + 30)/100)^3`. Fuel availability has a
//! threshold-then-accelerating effect on combustion rate, hence the cube.

use crate::core_types::FireState;
use crate::grid::Cell;
use crate::spread::{fuel_coefficient, Progression, SpreadRateModel};

/// Fuel-load-driven variant: fire follows the vegetation gradient
#[derive(Debug, Clone, Copy, Default)]
pub struct FuelDriven;

impl FuelDriven {
    pub fn new() -> Self {
        FuelDriven
    }
}

impl SpreadRateModel for FuelDriven {
    fn rate(&self, _target: &Cell, neighbour: &Cell, neighbour_state: FireState) -> f32 {
        if !neighbour.combustible() {
            return 0.0;
        }
        let k_s = fuel_coefficient(neighbour.environment().fuel_load());
        (f64::from(neighbour_state.intensity()) * k_s) as f32
    }

    fn progression(&self) -> Progression {
        Progression::Continuous
    }

    fn ignition_state(&self) -> FireState {
        FireState::ignition_spark()
    }
}
