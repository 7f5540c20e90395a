//! Load custom metric catalogues from JSON.
//!
//! A catalogue document maps metric keys to definitions:
//!
//! ```json
//! {
//!   "noise_level": {
//!     "label": "Noise Level",
//!     "description": "Average daytime noise in decibels",
//!     "min": 30, "max": 90,
//!     "format": "score",
//!     "directionality": "lower_is_better"
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use camino::Utf8Path;
use serde_json::Value;
use vicinity_core::{MetricDefinition, MetricRegistry};

use crate::error::INLINE_ORIGIN;
use crate::{DataError, fs};

/// Decode and validate a catalogue from a JSON string.
///
/// # Examples
/// ```
/// use vicinity_core::Directionality;
/// use vicinity_data::parse_catalogue;
///
/// let registry = parse_catalogue(r#"{
///     "noise_level": {
///         "label": "Noise Level", "min": 30, "max": 90,
///         "format": "score", "directionality": "lower_is_better"
///     }
/// }"#)?;
/// let noise = registry.lookup("noise_level").expect("loaded");
/// assert_eq!(noise.directionality(), Directionality::LowerIsBetter);
/// # Ok::<(), vicinity_data::DataError>(())
/// ```
///
/// # Errors
/// Returns [`DataError::Decode`] for malformed JSON,
/// [`DataError::InvalidMetric`] naming the first bad entry, and
/// [`DataError::Registry`] when the keys break registry invariants.
pub fn parse_catalogue(json: &str) -> Result<MetricRegistry, DataError> {
    decode(json, INLINE_ORIGIN)
}

/// Read, decode and validate a catalogue file.
///
/// # Errors
/// Returns [`DataError::Read`] when the file cannot be read, otherwise the
/// errors of [`parse_catalogue`].
pub fn load_catalogue(path: &Utf8Path) -> Result<MetricRegistry, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_owned(),
        source,
    })?;
    decode(&contents, path.as_str())
}

fn decode(json: &str, origin: &str) -> Result<MetricRegistry, DataError> {
    let entries: BTreeMap<String, Value> =
        serde_json::from_str(json).map_err(|source| DataError::Decode {
            origin: origin.to_owned(),
            source,
        })?;
    let definitions = entries
        .into_iter()
        .map(|(key, value)| match serde_json::from_value::<MetricDefinition>(value) {
            Ok(definition) => Ok((key, definition)),
            Err(source) => Err(DataError::InvalidMetric { key, source }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MetricRegistry::from_definitions(definitions)?)
}
