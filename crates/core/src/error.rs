//! Error types for grid generation and ignition
//!
//! Degenerate geometry during rate computation (zero great-circle distance,
//! empty neighbour lists, missing elevation) is recovered locally as a zero
//! contribution and deliberately has no error type here.

use crate::core_types::GridPosition;
use crate::provider::AttributeError;

/// Errors that can occur while generating a grid
#[derive(Debug)]
pub enum GenerateError {
    /// Grid dimensions or geographic reference are unusable
    InvalidConfig(String),
    /// The attribute provider failed for a cell; fatal at generation time
    DataUnavailable {
        position: GridPosition,
        source: AttributeError,
    },
    /// A provider sample carried a malformed attribute
    InvalidAttributes {
        position: GridPosition,
        reason: String,
    },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidConfig(msg) => write!(f, "Invalid grid configuration: {msg}"),
            GenerateError::DataUnavailable { position, source } => {
                write!(f, "Environmental data unavailable for cell {position}: {source}")
            }
            GenerateError::InvalidAttributes { position, reason } => {
                write!(f, "Malformed attributes for cell {position}: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::DataUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can occur when igniting a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgniteError {
    /// Origin lies outside the grid bounds
    InvalidCoordinate {
        position: GridPosition,
        width: u32,
        height: u32,
    },
    /// Origin is a water/rock/firebreak cell and can never ignite
    NotCombustible(GridPosition),
    /// Fire state has already progressed; re-ignition requires an explicit reset
    AlreadyTerminated,
    /// No satellite fire detection exists to seed from
    NoDetectedFire,
}

impl std::fmt::Display for IgniteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgniteError::InvalidCoordinate {
                position,
                width,
                height,
            } => write!(
                f,
                "Ignition origin {position} is outside the {width}x{height} grid"
            ),
            IgniteError::NotCombustible(position) => {
                write!(f, "Ignition origin {position} is not combustible")
            }
            IgniteError::AlreadyTerminated => {
                write!(f, "Grid already carries fire state; call reset() before re-igniting")
            }
            IgniteError::NoDetectedFire => {
                write!(f, "No cell carries a satellite fire detection")
            }
        }
    }
}

impl std::error::Error for IgniteError {}
