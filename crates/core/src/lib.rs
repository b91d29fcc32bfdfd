//! Wildfire Spread Simulation Core
//!
//! Simulates wildfire spread over a discretized terrain grid: a
//! frontier-driven cellular automaton advances per-cell fire state using
//! multi-factor empirical rate models (wind alignment, slope, fuel load,
//! ambient weather) with a strict two-phase compute/commit discipline, so
//! results are deterministic regardless of evaluation order.
//!
//! ## Structure
//!
//! - [`grid`] — cell arena, Moore-neighbourhood adjacency, generation from
//!   an attribute provider, ignition entry points
//! - [`spread`] — the three interchangeable spread-rate models (wind-driven,
//!   fuel-load-driven, combined environmental)
//! - [`engine`] — the frontier scheduler driving the step protocol
//! - [`provider`] — the environmental attribute interface plus synthetic
//!   providers for tests and demos
//! - [`observer`] — per-step snapshot hook for rendering/telemetry
//!
//! Remote data acquisition, rendering and input handling live outside this
//! crate, behind [`provider::AttributeProvider`] and
//! [`observer::StepObserver`].

pub mod core_types;
pub mod engine;
pub mod error;
pub mod grid;
pub mod observer;
pub mod provider;
pub mod spread;

pub use core_types::{
    Environment, EnvironmentSample, FirePhase, FireState, GeoLocation, GridPosition,
};
pub use engine::PropagationEngine;
pub use error::{GenerateError, IgniteError};
pub use grid::{Cell, GeoReference, Grid, GridConfig, NeighborGraph};
pub use observer::{NullObserver, StepObserver, StepSnapshot};
pub use provider::{AttributeError, AttributeProvider, PatchworkFuelProvider, UniformProvider};
pub use spread::{Environmental, FuelDriven, Progression, SpreadRateModel, WindDriven};
