//! Core value types shared across the simulation

pub mod environment;
pub mod geo;
pub mod state;

pub use environment::{Environment, EnvironmentSample};
pub use geo::GeoLocation;
pub use state::{FirePhase, FireState};

use serde::{Deserialize, Serialize};

/// Integer grid coordinates of a cell, unique per grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub fn new(x: u32, y: u32) -> Self {
        GridPosition { x, y }
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
