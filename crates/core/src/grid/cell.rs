//! The atomic terrain unit
//!
//! A cell owns its identity, environmental attributes and combustibility,
//! all immutable after grid generation. Fire state lives in the engine's
//! committed state buffer, not here; `advance` is the single
//! state-transition entry point and is pure with respect to committed state.

use crate::core_types::{Environment, FirePhase, FireState, GeoLocation, GridPosition};
use crate::spread::{Progression, SpreadRateModel};
use serde::{Deserialize, Serialize};

/// One grid unit of terrain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) position: GridPosition,
    pub(crate) geo_location: Option<GeoLocation>,
    pub(crate) environment: Environment,
    pub(crate) combustible: bool,
    pub(crate) detected_fire: bool,
}

/// Read-only view the engine hands a cell for one advance computation.
///
/// `states` is the previous step's committed buffer; the borrow checker
/// enforces that `advance` can only read it.
pub(crate) struct AdvanceContext<'a, M> {
    pub model: &'a M,
    pub cells: &'a [Cell],
    pub states: &'a [FireState],
    pub neighbours: &'a [u32],
    /// `dt / scale` for staged intensity accumulation
    pub dt_over_scale: f32,
}

impl Cell {
    pub fn new(
        position: GridPosition,
        geo_location: Option<GeoLocation>,
        environment: Environment,
        combustible: bool,
        detected_fire: bool,
    ) -> Self {
        Cell {
            position,
            geo_location,
            environment,
            combustible,
            detected_fire,
        }
    }

    /// Grid coordinates
    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Geographic coordinates, if the grid carries a geo reference
    pub fn geo_location(&self) -> Option<GeoLocation> {
        self.geo_location
    }

    /// Environmental attributes
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Whether the cell can ignite and carry fire (false for water/rock/firebreak)
    pub fn combustible(&self) -> bool {
        self.combustible
    }

    /// Whether a satellite fire detection exists at this cell
    pub fn detected_fire(&self) -> bool {
        self.detected_fire
    }

    /// Compute the candidate next state from the committed previous-step
    /// state. Never mutates anything; the engine commits the result.
    pub(crate) fn advance<M: SpreadRateModel>(
        &self,
        state: FireState,
        ctx: &AdvanceContext<'_, M>,
    ) -> FireState {
        match ctx.model.progression() {
            Progression::Continuous => self.advance_continuous(state, ctx),
            Progression::Staged => self.advance_staged(state, ctx),
        }
    }

    fn advance_continuous<M: SpreadRateModel>(
        &self,
        state: FireState,
        ctx: &AdvanceContext<'_, M>,
    ) -> FireState {
        if state.is_burned() || !self.combustible {
            return state;
        }
        // An isolated cell cannot receive fire; the averaging division
        // below must never see a zero neighbour count.
        if ctx.neighbours.is_empty() {
            return state;
        }

        let mut sum = 0.0f32;
        for &neighbour in ctx.neighbours {
            let idx = neighbour as usize;
            sum += ctx.model.rate(self, &ctx.cells[idx], ctx.states[idx]);
        }
        let delta = sum / ctx.neighbours.len() as f32;
        state.accumulate_continuous(delta)
    }

    fn advance_staged<M: SpreadRateModel>(
        &self,
        state: FireState,
        ctx: &AdvanceContext<'_, M>,
    ) -> FireState {
        match state.phase() {
            FirePhase::Unburned => {
                if !self.combustible {
                    return state;
                }
                let mut sum = 0.0f32;
                for &neighbour in ctx.neighbours {
                    let idx = neighbour as usize;
                    sum += ctx.model.rate(self, &ctx.cells[idx], ctx.states[idx]);
                }
                state.accumulate_staged(sum * ctx.dt_over_scale)
            }
            FirePhase::Igniting => state.with_phase(FirePhase::Burning),
            FirePhase::Burning => {
                // No more fuel to acquire: every neighbour is either
                // non-combustible or itself at burning or beyond.
                let spent = ctx.neighbours.iter().all(|&neighbour| {
                    let idx = neighbour as usize;
                    !ctx.cells[idx].combustible
                        || ctx.states[idx].phase() >= FirePhase::Burning
                });
                if spent {
                    state.with_phase(FirePhase::Cooling)
                } else {
                    state
                }
            }
            FirePhase::Cooling => state.with_phase(FirePhase::Burned),
            FirePhase::Burned => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::EnvironmentSample;
    use crate::spread::Environmental;

    fn make_cell(x: u32, combustible: bool) -> Cell {
        let env = Environment::from_sample(&EnvironmentSample {
            combustible,
            ..EnvironmentSample::default()
        })
        .unwrap();
        Cell::new(GridPosition::new(x, 0), None, env, combustible, false)
    }

    fn ctx<'a>(
        model: &'a Environmental,
        cells: &'a [Cell],
        states: &'a [FireState],
        neighbours: &'a [u32],
    ) -> AdvanceContext<'a, Environmental> {
        AdvanceContext {
            model,
            cells,
            states,
            neighbours,
            dt_over_scale: 0.005,
        }
    }

    #[test]
    fn igniting_becomes_burning_unconditionally() {
        let model = Environmental::new();
        let cells = vec![make_cell(0, true)];
        let states = vec![FireState::unburned()];
        let context = ctx(&model, &cells, &states, &[]);

        let igniting = FireState::unburned().accumulate_staged(1.0);
        let next = cells[0].advance(igniting, &context);
        assert_eq!(next.phase(), FirePhase::Burning);
    }

    #[test]
    fn burning_cools_only_when_surroundings_are_spent() {
        let model = Environmental::new();
        let cells = vec![make_cell(0, true), make_cell(1, true), make_cell(2, false)];
        let neighbours = [1u32, 2u32];

        // Neighbour 1 still unburned: keep burning.
        let states = vec![
            FireState::burning(),
            FireState::unburned(),
            FireState::unburned(),
        ];
        let context = ctx(&model, &cells, &states, &neighbours);
        let next = cells[0].advance(FireState::burning(), &context);
        assert_eq!(next.phase(), FirePhase::Burning);

        // Neighbour 1 burning, neighbour 2 non-combustible: cool down.
        let states = vec![
            FireState::burning(),
            FireState::burning(),
            FireState::unburned(),
        ];
        let context = ctx(&model, &cells, &states, &neighbours);
        let next = cells[0].advance(FireState::burning(), &context);
        assert_eq!(next.phase(), FirePhase::Cooling);
    }

    #[test]
    fn cooling_burns_out_on_the_following_step() {
        let model = Environmental::new();
        let cells = vec![make_cell(0, true)];
        let states = vec![FireState::burning().with_phase(FirePhase::Cooling)];
        let context = ctx(&model, &cells, &states, &[]);

        let next = cells[0].advance(states[0], &context);
        assert_eq!(next.phase(), FirePhase::Burned);
    }

    #[test]
    fn non_combustible_cell_never_advances() {
        let model = Environmental::new();
        let cells = vec![make_cell(0, false), make_cell(1, true)];
        let states = vec![FireState::unburned(), FireState::burning()];
        let context = ctx(&model, &cells, &states, &[1u32]);

        let next = cells[0].advance(FireState::unburned(), &context);
        assert_eq!(next, FireState::unburned());
    }
}
