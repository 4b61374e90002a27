//! Step source error types.

use thiserror::Error;

/// Errors returned by a [`StepSource`](super::StepSource) query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StepSourceError {
    /// The source answered but has no samples for today.
    #[error("no step data available for today")]
    NoData,

    /// The source could not be reached.
    #[error("step source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with something that is not a step count.
    #[error("invalid step data: {0}")]
    InvalidData(String),
}

impl StepSourceError {
    /// Returns true if the query succeeded but found nothing.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}
