//! Error types emitted by the Vicinity CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use vicinity_core::ComparisonRequestError;
use vicinity_data::DataError;
use vicinity_service::{ComparisonError, ServiceBuildError};

/// Errors emitted by the Vicinity CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation, or help was requested.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Opening the comparison request file failed.
    #[error("failed to open comparison request at {path:?}: {source}")]
    OpenRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The comparison request JSON could not be decoded.
    #[error("failed to parse comparison request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The comparison request decoded but failed validation.
    #[error("comparison request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: ComparisonRequestError,
    },
    /// Loading the neighborhood dataset failed.
    #[error("failed to load dataset: {0}")]
    Dataset(#[source] DataError),
    /// Loading the metric catalogue failed.
    #[error("failed to load metric catalogue: {0}")]
    Catalogue(#[source] DataError),
    /// The comparison service could not be constructed.
    #[error(transparent)]
    BuildService(#[from] ServiceBuildError),
    /// The comparison itself failed.
    #[error(transparent)]
    Compare(#[from] ComparisonError),
    /// Serialising the comparison result failed.
    #[error("failed to serialise comparison result: {0}")]
    SerialiseResult(#[source] serde_json::Error),
    /// Writing the comparison output failed.
    #[error("failed to write comparison output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
