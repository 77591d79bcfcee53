use thiserror::Error;

use piste_core::{AgentId, LiftId, LodgeId, TrailId};

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("{name} must be positive and finite, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },

    #[error("motion configuration error: {0}")]
    Config(String),

    #[error("{0} does not exist or has been removed")]
    UnknownTrail(TrailId),

    #[error("{0} does not exist or has been removed")]
    UnknownLift(LiftId),

    #[error("{0} does not exist")]
    UnknownLodge(LodgeId),

    #[error("{0} has no motion state")]
    AgentNotFound(AgentId),
}

pub type MotionResult<T> = Result<T, MotionError>;
