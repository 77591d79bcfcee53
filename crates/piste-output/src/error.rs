//! Errors from output backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("writing CSV row: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
