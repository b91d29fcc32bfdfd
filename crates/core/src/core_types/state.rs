//! Per-cell fire state
//!
//! Two representations share one type: the continuous models track an
//! intensity in [0, 1] with the phase derived from it, while the staged
//! environmental model drives the full five-phase machine. In both, the
//! (phase, intensity) pair is monotonic non-decreasing over a cell's
//! lifetime.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Intensity below which a continuous cell is not considered actively
/// spreading (matches the original active-fire threshold of 1e-4).
pub(crate) const SPREAD_THRESHOLD: f32 = 1e-4;

/// Discrete burn phase, ordered from untouched to burned out
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FirePhase {
    /// No fire has reached the cell
    Unburned,
    /// Accumulating intensity from burning neighbours
    Igniting,
    /// Actively burning and propagating
    Burning,
    /// Out of reachable fuel, burning down
    Cooling,
    /// Terminal: fully burned
    Burned,
}

/// Fire state of one cell: accumulated intensity plus discrete phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireState {
    pub(crate) phase: FirePhase,
    pub(crate) intensity: f32,
}

impl FireState {
    /// The untouched state every cell starts in
    pub fn unburned() -> Self {
        FireState {
            phase: FirePhase::Unburned,
            intensity: 0.0,
        }
    }

    /// Initial state of a continuous-model ignition origin (intensity 0.1)
    pub fn ignition_spark() -> Self {
        FireState {
            phase: FirePhase::Igniting,
            intensity: 0.1,
        }
    }

    /// Initial state of a staged-model ignition origin (actively burning)
    pub fn burning() -> Self {
        FireState {
            phase: FirePhase::Burning,
            intensity: 1.0,
        }
    }

    /// Current burn phase
    pub fn phase(&self) -> FirePhase {
        self.phase
    }

    /// Accumulated intensity in [0, 1]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether the cell has reached the terminal burned state
    pub fn is_burned(&self) -> bool {
        self.phase == FirePhase::Burned
    }

    /// Whether the cell is a fire source for rate evaluation
    /// (staged models only take contributions from phases >= Burning)
    pub(crate) fn is_fire_source(&self) -> bool {
        self.phase >= FirePhase::Burning
    }

    /// Add continuous intensity, deriving the phase from the capped result
    pub(crate) fn accumulate_continuous(self, delta: f32) -> Self {
        let intensity = (self.intensity + delta).min(1.0);
        let phase = if intensity >= 1.0 {
            FirePhase::Burned
        } else if intensity > 0.0 {
            FirePhase::Igniting
        } else {
            FirePhase::Unburned
        };
        FireState { phase, intensity }
    }

    /// Add staged intensity while unburned; reaching 1 means ignition
    pub(crate) fn accumulate_staged(self, delta: f32) -> Self {
        let intensity = (self.intensity + delta).min(1.0);
        let phase = if intensity >= 1.0 {
            FirePhase::Igniting
        } else {
            FirePhase::Unburned
        };
        FireState { phase, intensity }
    }

    /// Step into a later phase, keeping the saturated intensity
    pub(crate) fn with_phase(self, phase: FirePhase) -> Self {
        FireState {
            phase,
            intensity: self.intensity,
        }
    }
}

impl PartialOrd for FireState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.phase.cmp(&other.phase) {
            Ordering::Equal => self.intensity.partial_cmp(&other.intensity),
            ordering => Some(ordering),
        }
    }
}
