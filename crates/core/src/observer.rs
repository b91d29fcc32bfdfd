//! Step observation hook
//!
//! The engine notifies an injected observer once per completed step with the
//! committed state. The call is fire-and-forget: no return value is
//! consumed and observer behaviour never feeds back into simulation
//! correctness. Rendering and telemetry layers plug in here.

use crate::core_types::FireState;
use serde::Serialize;

/// Committed state of one completed step
#[derive(Debug, Serialize)]
pub struct StepSnapshot<'a> {
    /// 1-based index of the completed step
    pub iteration: u32,
    /// Simulated clock, advanced by a fixed time step per iteration.
    /// Derived metadata only, never a scheduling primitive.
    pub elapsed_minutes: f64,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Committed fire states, row-major `[y * width + x]`
    pub states: &'a [FireState],
}

/// Receiver for per-step committed snapshots
pub trait StepObserver {
    /// Called once per completed step, after the commit phase
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>);
}

/// Observer that discards every snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn on_step(&mut self, _snapshot: &StepSnapshot<'_>) {}
}
