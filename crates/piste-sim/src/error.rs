use thiserror::Error;

use piste_agent::AgentError;
use piste_core::{AgentId, CoreError};
use piste_decision::DecisionError;
use piste_motion::MotionError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{0} is not part of this simulation")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error(transparent)]
    Motion(#[from] MotionError),
}

pub type SimResult<T> = Result<T, SimError>;
