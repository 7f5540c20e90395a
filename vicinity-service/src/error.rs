//! Errors surfaced by the comparison service.

use thiserror::Error;
use vicinity_core::{ComparisonRequestError, DirectoryError};

/// Errors returned by `compare_neighborhoods`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    /// The request was malformed, or too few neighborhoods survived
    /// resolution to compare.
    #[error("invalid comparison request: {0}")]
    InvalidRequest(#[from] ComparisonRequestError),
    /// A collaborator failed in a way that prevents any comparison.
    #[error("comparison failed")]
    Failed {
        /// Underlying collaborator error.
        #[source]
        source: DirectoryError,
    },
}

impl ComparisonError {
    /// Report whether the error stems from caller input rather than a
    /// collaborator.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Failure to construct a [`BlockingComparisonService`](crate::BlockingComparisonService).
#[derive(Debug, Error)]
pub enum ServiceBuildError {
    /// The internal Tokio runtime could not be created.
    #[error("failed to build Tokio runtime: {source}")]
    Runtime {
        /// I/O error reported by the runtime builder.
        #[source]
        source: std::io::Error,
    },
}
