//! Grid generation and ignition
//!
//! The grid builds the cell arena and the neighbour graph once, pulling
//! environmental attributes from an injected [`AttributeProvider`], then
//! delegates ignition runs to the [`PropagationEngine`]. Cells and adjacency
//! are never added or removed during simulation; only fire state mutates.

pub mod cell;
pub mod neighbors;

pub use cell::Cell;
pub use neighbors::NeighborGraph;

use crate::core_types::{Environment, FireState, GeoLocation, GridPosition};
use crate::engine::PropagationEngine;
use crate::error::{GenerateError, IgniteError};
use crate::observer::{NullObserver, StepObserver};
use crate::provider::AttributeProvider;
use crate::spread::SpreadRateModel;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Mapping from grid coordinates to geographic coordinates.
///
/// `latitude = north - y * latitude_step`, `longitude = west + x *
/// longitude_step`, both rounded to 6 decimals (about 0.1 m, the precision
/// of the environmental sources).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoReference {
    /// Latitude of row 0 (decimal degrees)
    pub north: f64,
    /// Longitude of column 0 (decimal degrees)
    pub west: f64,
    /// Latitude decrement per row (decimal degrees, positive southward)
    pub latitude_step: f64,
    /// Longitude increment per column (decimal degrees, positive eastward)
    pub longitude_step: f64,
}

impl GeoReference {
    /// Geographic location of a grid coordinate
    pub fn location_of(&self, position: GridPosition) -> GeoLocation {
        GeoLocation::new(
            round6(self.north - f64::from(position.y) * self.latitude_step),
            round6(self.west + f64::from(position.x) * self.longitude_step),
        )
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Grid construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Real-world size of each cell in meters; also sets the simulated
    /// time step (`dt = 0.005 * cell_size_m` minutes)
    pub cell_size_m: f64,
    /// Geographic reference; `None` for purely synthetic grids, which query
    /// the provider with `latitude = -y`, `longitude = x`
    pub geo: Option<GeoReference>,
}

impl GridConfig {
    /// Synthetic grid with a 100 m cell size and no geographic reference
    pub fn new(width: u32, height: u32) -> Self {
        GridConfig {
            width,
            height,
            cell_size_m: 100.0,
            geo: None,
        }
    }

    /// Set the real-world cell size in meters
    pub fn cell_size_m(mut self, cell_size_m: f64) -> Self {
        self.cell_size_m = cell_size_m;
        self
    }

    /// Attach a geographic reference
    pub fn geo(mut self, geo: GeoReference) -> Self {
        self.geo = Some(geo);
        self
    }

    fn validate(&self) -> Result<(), GenerateError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerateError::InvalidConfig(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.cell_size_m.is_finite() || self.cell_size_m <= 0.0 {
            return Err(GenerateError::InvalidConfig(format!(
                "cell_size_m must be finite and positive, got {}",
                self.cell_size_m
            )));
        }
        if let Some(geo) = &self.geo {
            for (name, value) in [
                ("north", geo.north),
                ("west", geo.west),
                ("latitude_step", geo.latitude_step),
                ("longitude_step", geo.longitude_step),
            ] {
                if !value.is_finite() {
                    return Err(GenerateError::InvalidConfig(format!(
                        "geo reference {name} must be finite, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A generated terrain grid bound to one spread-rate model
#[derive(Debug)]
pub struct Grid<M> {
    config: GridConfig,
    engine: PropagationEngine<M>,
}

impl<M: SpreadRateModel> Grid<M> {
    /// Build all cells from the attribute provider and construct the
    /// neighbour graph and propagation engine.
    ///
    /// # Errors
    /// - [`GenerateError::InvalidConfig`] for unusable dimensions or geo
    ///   reference;
    /// - [`GenerateError::DataUnavailable`] when the provider fails for any
    ///   cell (fatal, never deferred to mid-simulation);
    /// - [`GenerateError::InvalidAttributes`] when a sample fails validation.
    pub fn generate<P: AttributeProvider>(
        config: GridConfig,
        provider: &P,
        model: M,
    ) -> Result<Self, GenerateError> {
        config.validate()?;

        let started = Instant::now();
        let cell_count = (config.width as usize) * (config.height as usize);
        let mut cells = Vec::with_capacity(cell_count);

        for y in 0..config.height {
            for x in 0..config.width {
                let position = GridPosition::new(x, y);
                let geo_location = config.geo.as_ref().map(|geo| geo.location_of(position));
                let (latitude, longitude) = match geo_location {
                    Some(location) => (location.latitude, location.longitude),
                    None => (-f64::from(y), f64::from(x)),
                };

                let sample = provider
                    .get_environment(latitude, longitude)
                    .map_err(|source| GenerateError::DataUnavailable { position, source })?;
                let environment = Environment::from_sample(&sample)
                    .map_err(|reason| GenerateError::InvalidAttributes { position, reason })?;

                cells.push(Cell::new(
                    position,
                    geo_location,
                    environment,
                    sample.combustible,
                    sample.detected_fire,
                ));
            }
        }

        let graph = NeighborGraph::build(config.width, config.height);
        let engine = PropagationEngine::new(
            cells,
            graph,
            model,
            config.width,
            config.height,
            config.cell_size_m,
        );

        info!(
            width = config.width,
            height = config.height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "grid generated"
        );

        Ok(Grid { config, engine })
    }

    /// Grid width in cells
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Grid height in cells
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Construction parameters
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The cell at a grid coordinate, if in bounds
    pub fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.index_of(position)
            .map(|index| &self.engine.cells()[index as usize])
    }

    /// The committed fire state at a grid coordinate, if in bounds
    pub fn state(&self, position: GridPosition) -> Option<FireState> {
        self.index_of(position)
            .map(|index| self.engine.states()[index as usize])
    }

    /// All committed fire states, row-major `[y * width + x]`
    pub fn states(&self) -> &[FireState] {
        self.engine.states()
    }

    /// Simulated clock in minutes since ignition
    pub fn elapsed_minutes(&self) -> f64 {
        self.engine.elapsed_minutes()
    }

    /// Fraction of combustible cells that have reached the terminal state
    pub fn burned_fraction(&self) -> f64 {
        let cells = self.engine.cells();
        let states = self.engine.states();
        let combustible = cells.iter().filter(|cell| cell.combustible()).count();
        if combustible == 0 {
            return 0.0;
        }
        let burned = cells
            .iter()
            .zip(states)
            .filter(|(cell, state)| cell.combustible() && state.is_burned())
            .count();
        burned as f64 / combustible as f64
    }

    /// Cells carrying a satellite fire detection
    pub fn detected_fire_cells(&self) -> Vec<GridPosition> {
        self.engine
            .cells()
            .iter()
            .filter(|cell| cell.detected_fire())
            .map(Cell::position)
            .collect()
    }

    /// Install an external stop signal, checked once per iteration
    pub fn set_stop_flag(&mut self, stop: Arc<AtomicBool>) {
        self.engine.set_stop_flag(stop);
    }

    /// Clear all fire state so the grid can be ignited again
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Ignite at `origin` and run to termination or the iteration cap
    /// (`max_iterations == 0` means unlimited). Returns the number of steps
    /// executed.
    ///
    /// Natural termination assumes the model yields a positive rate somewhere
    /// on the frontier: under conditions where the rate is uniformly zero
    /// (e.g. a staged model with a non-positive base rate) a burning origin
    /// keeps the frontier alive indefinitely, so pass a cap or a stop flag
    /// rather than `max_iterations == 0`.
    ///
    /// # Errors
    /// - [`IgniteError::InvalidCoordinate`] when `origin` is out of bounds;
    /// - [`IgniteError::NotCombustible`] when `origin` can never ignite;
    /// - [`IgniteError::AlreadyTerminated`] when fire state has already
    ///   progressed; call [`Grid::reset`] first.
    pub fn ignite(
        &mut self,
        origin: GridPosition,
        max_iterations: u32,
    ) -> Result<u32, IgniteError> {
        self.ignite_observed(origin, max_iterations, &mut NullObserver)
    }

    /// Like [`Grid::ignite`], notifying `observer` once per committed step
    pub fn ignite_observed(
        &mut self,
        origin: GridPosition,
        max_iterations: u32,
        observer: &mut dyn StepObserver,
    ) -> Result<u32, IgniteError> {
        let index = self.index_of(origin).ok_or(IgniteError::InvalidCoordinate {
            position: origin,
            width: self.config.width,
            height: self.config.height,
        })?;
        if !self.engine.cells()[index as usize].combustible() {
            return Err(IgniteError::NotCombustible(origin));
        }
        if self.engine.ignited() {
            return Err(IgniteError::AlreadyTerminated);
        }

        info!(x = origin.x, y = origin.y, max_iterations, "igniting");
        self.engine.seed(&[index]);
        let executed = self.engine.run(max_iterations, observer);
        info!(
            iterations = executed,
            burned = self.burned_fraction(),
            "ignition run finished"
        );
        Ok(executed)
    }

    /// Seed every cell carrying a satellite fire detection and run.
    ///
    /// # Errors
    /// [`IgniteError::NoDetectedFire`] when no combustible cell carries a
    /// detection; [`IgniteError::AlreadyTerminated`] on a dirty grid.
    pub fn ignite_detected(&mut self, max_iterations: u32) -> Result<u32, IgniteError> {
        if self.engine.ignited() {
            return Err(IgniteError::AlreadyTerminated);
        }
        let seeds: Vec<u32> = self
            .engine
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.detected_fire() && cell.combustible())
            .map(|(index, _)| index as u32)
            .collect();
        if seeds.is_empty() {
            return Err(IgniteError::NoDetectedFire);
        }

        info!(seeds = seeds.len(), max_iterations, "igniting from detections");
        self.engine.seed(&seeds);
        Ok(self.engine.run(max_iterations, &mut NullObserver))
    }

    fn index_of(&self, position: GridPosition) -> Option<u32> {
        (position.x < self.config.width && position.y < self.config.height)
            .then_some(position.y * self.config.width + position.x)
    }
}
