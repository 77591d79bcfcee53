use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("skill list has {got} entries, expected one per agent ({expected})")]
    SkillCountMismatch { expected: usize, got: usize },

    #[error("personality spread must be in [0, 1), got {0}")]
    InvalidSpread(f32),
}

pub type AgentResult<T> = Result<T, AgentError>;
