use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f32),

    #[error("{name} must be in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("weight `{name}` must be non-negative and finite, got {value}")]
    InvalidWeight { name: &'static str, value: f32 },

    #[error("lookahead discount table must be non-empty, within (0, 1] and strictly decreasing: {0:?}")]
    InvalidDiscounts(Vec<f32>),

    #[error("preference weight for {skill} on {class} must be in (0, 1], got {value}")]
    InvalidPreference { skill: &'static str, class: &'static str, value: f32 },

    #[error("decision configuration error: {0}")]
    Config(String),
}

pub type DecisionResult<T> = Result<T, DecisionError>;
