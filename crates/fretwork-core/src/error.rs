//! Error types for fretwork

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FretworkError {
    #[error("Empty input")]
    EmptyPattern,
    #[error("Invalid step token: '{0}'")]
    BadStepToken(String),
    #[error("Unknown scale: {0}")]
    UnknownScale(String),
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

pub type Result<T> = std::result::Result<T, FretworkError>;
