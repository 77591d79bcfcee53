//! Errors raised while validating run-level configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tick_duration_secs must be positive and finite, got {0}")]
    InvalidTickDuration(f32),

    #[error("num_threads must be at least 1 when set")]
    ZeroThreads,
}

pub type CoreResult<T> = Result<T, CoreError>;
