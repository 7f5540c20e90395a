//! Errors raised while loading datasets and metric catalogues.

use camino::Utf8PathBuf;
use thiserror::Error;
use vicinity_core::RegistryError;

/// Errors raised while loading datasets and metric catalogues.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("failed to read {path}")]
    Read {
        /// File that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document was not valid JSON of the expected shape.
    #[error("failed to decode {origin}")]
    Decode {
        /// File path, or `"inline JSON"` for in-memory documents.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A catalogue entry was malformed or had an invalid range.
    #[error("metric '{key}' in the catalogue is invalid")]
    InvalidMetric {
        /// Catalogue key of the offending entry.
        key: String,
        /// Decoding or validation failure.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded catalogue violated a registry invariant.
    #[error("metric catalogue rejected")]
    Registry(#[from] RegistryError),
}

pub(crate) const INLINE_ORIGIN: &str = "inline JSON";
