//! Frontier-driven propagation engine
//!
//! Owns the cell arena, the committed fire-state buffer and the active set,
//! and drives the per-step transition protocol:
//!
//! 1. compute a candidate next state for every active cell, reading only the
//!    previous step's committed states (the read phase is embarrassingly
//!    parallel and runs under rayon);
//! 2. commit all candidates at once;
//! 3. rebuild the active set from the committed states;
//! 4. notify the observer and advance the simulated clock;
//! 5. stop when the active set is empty, the iteration cap is reached, or an
//!    external stop flag is raised.
//!
//! The strict compute-then-commit split makes results independent of
//! evaluation order within a step.

use crate::core_types::state::SPREAD_THRESHOLD;
use crate::core_types::{FirePhase, FireState};
use crate::grid::cell::AdvanceContext;
use crate::grid::{Cell, NeighborGraph};
use crate::observer::{StepObserver, StepSnapshot};
use crate::spread::{Progression, SpreadRateModel};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Precision factor of the simulated clock: `dt = 0.005 * scale` minutes
const TIME_STEP_FACTOR: f64 = 0.005;

/// Frontier scheduler and state machine for one grid
#[derive(Debug)]
pub struct PropagationEngine<M> {
    model: M,
    graph: NeighborGraph,
    cells: Vec<Cell>,
    /// Committed fire states, row-major
    states: Vec<FireState>,
    /// Active set, kept sorted for deterministic evaluation order
    frontier: Vec<u32>,
    width: u32,
    height: u32,
    /// Simulated minutes per step
    dt_minutes: f64,
    /// `dt / scale` for staged accumulation
    dt_over_scale: f32,
    elapsed_minutes: f64,
    iteration: u32,
    ignited: bool,
    stop: Option<Arc<AtomicBool>>,
}

impl<M: SpreadRateModel> PropagationEngine<M> {
    /// Take ownership of the cell arena and adjacency for one simulation run
    pub fn new(
        cells: Vec<Cell>,
        graph: NeighborGraph,
        model: M,
        width: u32,
        height: u32,
        cell_size_m: f64,
    ) -> Self {
        debug_assert_eq!(cells.len(), graph.cell_count());
        let states = vec![FireState::unburned(); cells.len()];
        PropagationEngine {
            model,
            graph,
            cells,
            states,
            frontier: Vec::new(),
            width,
            height,
            dt_minutes: TIME_STEP_FACTOR * cell_size_m,
            dt_over_scale: TIME_STEP_FACTOR as f32,
            elapsed_minutes: 0.0,
            iteration: 0,
            ignited: false,
            stop: None,
        }
    }

    /// Committed fire states, row-major `[y * width + x]`
    pub fn states(&self) -> &[FireState] {
        &self.states
    }

    /// The cell arena, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The rate model driving this engine
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether any ignition has been applied since the last reset
    pub fn ignited(&self) -> bool {
        self.ignited
    }

    /// Simulated clock in minutes
    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_minutes
    }

    /// Total steps committed since the last reset
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Install an external stop signal, checked once per iteration
    pub fn set_stop_flag(&mut self, stop: Arc<AtomicBool>) {
        self.stop = Some(stop);
    }

    /// Clear all fire state, the frontier and the simulated clock
    pub fn reset(&mut self) {
        self.states.fill(FireState::unburned());
        self.frontier.clear();
        self.elapsed_minutes = 0.0;
        self.iteration = 0;
        self.ignited = false;
    }

    /// Set every origin to the model's ignition state and build the initial
    /// active set: the origins' neighbours, plus the origins themselves for
    /// staged models.
    pub(crate) fn seed(&mut self, origins: &[u32]) {
        let ignition = self.model.ignition_state();
        let mut frontier = FxHashSet::default();
        for &origin in origins {
            self.states[origin as usize] = ignition;
            frontier.extend(self.graph.neighbours(origin).iter().copied());
            if self.model.progression() == Progression::Staged {
                frontier.insert(origin);
            }
        }
        self.frontier = frontier.into_iter().collect();
        self.frontier.sort_unstable();
        self.ignited = true;
    }

    /// Run the step loop until the frontier empties or `max_iterations` is
    /// reached (`0` means unlimited). Returns the number of steps executed.
    ///
    /// A frontier whose rates are all zero never empties on its own; callers
    /// wanting unbounded runs are responsible for a stop flag.
    pub(crate) fn run(&mut self, max_iterations: u32, observer: &mut dyn StepObserver) -> u32 {
        let mut executed = 0u32;

        while !self.frontier.is_empty() && (max_iterations == 0 || executed < max_iterations) {
            if self
                .stop
                .as_ref()
                .is_some_and(|stop| stop.load(Ordering::Relaxed))
            {
                debug!(iteration = self.iteration, "external stop signal raised");
                break;
            }

            self.step();
            executed += 1;

            observer.on_step(&StepSnapshot {
                iteration: self.iteration,
                elapsed_minutes: self.elapsed_minutes,
                width: self.width,
                height: self.height,
                states: &self.states,
            });
        }

        executed
    }

    /// One complete compute/commit/rebuild cycle
    fn step(&mut self) {
        // Read phase: every candidate is derived from the committed buffer
        // only, so evaluation parallelizes without locking.
        let model = &self.model;
        let cells = &self.cells;
        let states = &self.states;
        let graph = &self.graph;
        let dt_over_scale = self.dt_over_scale;

        let candidates: Vec<(u32, FireState)> = self
            .frontier
            .par_iter()
            .map(|&index| {
                let context = AdvanceContext {
                    model,
                    cells,
                    states,
                    neighbours: graph.neighbours(index),
                    dt_over_scale,
                };
                let cell = &cells[index as usize];
                (index, cell.advance(states[index as usize], &context))
            })
            .collect();

        // Commit phase: apply all candidates simultaneously.
        for &(index, state) in &candidates {
            self.states[index as usize] = state;
        }

        self.rebuild_frontier();

        self.iteration += 1;
        self.elapsed_minutes += self.dt_minutes;
        debug!(
            iteration = self.iteration,
            active = self.frontier.len(),
            "step committed"
        );
    }

    /// Recompute the active set from the freshly committed states
    fn rebuild_frontier(&mut self) {
        let mut next = FxHashSet::default();

        for &index in &self.frontier {
            let state = self.states[index as usize];
            if self.is_spreading(state) {
                next.insert(index);
                for &neighbour in self.graph.neighbours(index) {
                    let cell = &self.cells[neighbour as usize];
                    if cell.combustible() && !self.states[neighbour as usize].is_burned() {
                        next.insert(neighbour);
                    }
                }
            } else if state.phase() == FirePhase::Cooling {
                // Cooling cells must be stepped once more to burn out.
                next.insert(index);
            }
        }

        self.frontier = next.into_iter().collect();
        self.frontier.sort_unstable();
    }

    /// Whether a cell in this state keeps the frontier growing
    fn is_spreading(&self, state: FireState) -> bool {
        match self.model.progression() {
            Progression::Continuous => {
                state.intensity() > SPREAD_THRESHOLD && state.intensity() < 1.0
            }
            Progression::Staged => state.phase() == FirePhase::Burning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Environment, EnvironmentSample, GridPosition};
    use crate::observer::NullObserver;
    use crate::spread::FuelDriven;

    fn uniform_engine(width: u32, height: u32) -> PropagationEngine<FuelDriven> {
        let env = Environment::from_sample(&EnvironmentSample::default()).unwrap();
        let cells = (0..height)
            .flat_map(|y| {
                (0..width)
                    .map(move |x| Cell::new(GridPosition::new(x, y), None, env, true, false))
            })
            .collect();
        let graph = NeighborGraph::build(width, height);
        PropagationEngine::new(cells, graph, FuelDriven::new(), width, height, 100.0)
    }

    #[test]
    fn seeding_activates_the_origin_neighbourhood() {
        let mut engine = uniform_engine(3, 3);
        engine.seed(&[4]); // center of 3x3
        assert!(engine.ignited());
        // Continuous models activate the neighbours, not the origin itself.
        assert_eq!(engine.frontier, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn run_terminates_when_everything_is_burned() {
        let mut engine = uniform_engine(3, 3);
        engine.seed(&[4]);
        let executed = engine.run(0, &mut NullObserver);
        assert!(executed > 0);
        assert!(engine.states().iter().all(FireState::is_burned));
        assert_eq!(engine.iteration(), executed);
    }

    #[test]
    fn iteration_cap_limits_execution() {
        let mut engine = uniform_engine(5, 5);
        engine.seed(&[12]);
        let executed = engine.run(2, &mut NullObserver);
        assert_eq!(executed, 2);
        assert!(!engine.states().iter().all(FireState::is_burned));
    }

    #[test]
    fn stop_flag_halts_the_loop() {
        let mut engine = uniform_engine(5, 5);
        let stop = Arc::new(AtomicBool::new(true));
        engine.set_stop_flag(Arc::clone(&stop));
        engine.seed(&[12]);
        assert_eq!(engine.run(0, &mut NullObserver), 0);
    }

    #[test]
    fn reset_restores_a_clean_grid() {
        let mut engine = uniform_engine(3, 3);
        engine.seed(&[4]);
        engine.run(0, &mut NullObserver);
        engine.reset();
        assert!(!engine.ignited());
        assert_eq!(engine.elapsed_minutes(), 0.0);
        assert!(engine
            .states()
            .iter()
            .all(|state| *state == FireState::unburned()));
    }
}
