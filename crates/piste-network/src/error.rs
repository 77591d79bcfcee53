//! Network construction errors.

use thiserror::Error;

use piste_core::{LiftId, TrailId};

/// Errors produced while building a [`SkiNetwork`][crate::SkiNetwork].
///
/// Queries against a built network never fail: unknown or invalidated ids
/// simply yield `None` / empty results.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("trail path needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("trail path has a non-finite coordinate at point {0}")]
    NonFinitePoint(usize),

    #[error("trail width must be positive, got {0}")]
    InvalidWidth(f32),

    #[error("lift {0} has coincident bottom and top stations")]
    DegenerateLift(LiftId),

    #[error("lift capacity must be positive, got {0}")]
    InvalidCapacity(f32),

    #[error("trail {0} not found in network")]
    TrailNotFound(TrailId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
