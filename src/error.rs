//! Error types for significance testing
//!
//! Two outcomes are kept apart: a test that was configured wrongly fails with
//! [`SignificanceError::InvalidArgument`] before it can ever run, while a test
//! that simply found nothing returns `Ok(None)`. Failures inside the numeric
//! primitives surface as [`SignificanceError::Computation`].

use thiserror::Error;

/// Errors that can occur while configuring or running significance tests
#[derive(Error, Debug)]
pub enum SignificanceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Computation failed: {0:#}")]
    Computation(anyhow::Error),
}

impl From<anyhow::Error> for SignificanceError {
    fn from(err: anyhow::Error) -> Self {
        SignificanceError::Computation(err)
    }
}

/// Result type for significance testing operations
pub type Result<T> = std::result::Result<T, SignificanceError>;
