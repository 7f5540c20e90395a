//! Raw metric values for a single neighborhood.

use std::collections::BTreeMap;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::NeighborhoodId;

/// Mapping from metric key to raw value for one neighborhood.
///
/// Produced fresh by the metrics store for each comparison; the engine keeps
/// it only for the duration of a call.
///
/// # Examples
/// ```
/// use vicinity_core::MetricSnapshot;
///
/// let snapshot = MetricSnapshot::from_iter([("walk_score", 82.0), ("crime_rate", f64::NAN)]);
/// assert_eq!(snapshot.value("walk_score"), Some(82.0));
/// assert_eq!(snapshot.value("crime_rate"), None);
/// assert_eq!(snapshot.value("median_age"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MetricSnapshot {
    values: BTreeMap<String, f64>,
}

impl MetricSnapshot {
    /// Construct an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a raw value.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Add a value while returning `self` for chaining.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Return the usable value for `key`.
    ///
    /// Non-finite values are reported as missing so they cannot poison
    /// averages or comparisons.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        let raw = *self.values.get(key)?;
        if raw.is_finite() {
            Some(raw)
        } else {
            debug!("Ignoring non-finite value {raw} for metric '{key}'");
            None
        }
    }

    /// Return the stored value for `key` without filtering.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Iterate over every stored value in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Report whether the snapshot holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

/// A resolved neighborhood together with its fetched snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeighborhoodSnapshot {
    /// Name as requested by the caller.
    pub name: String,
    /// Directory identifier the snapshot was fetched with.
    pub id: NeighborhoodId,
    /// Raw metric values.
    pub metrics: MetricSnapshot,
}

impl NeighborhoodSnapshot {
    /// Pair a name and identifier with a snapshot.
    pub fn new(
        name: impl Into<String>,
        id: impl Into<NeighborhoodId>,
        metrics: MetricSnapshot,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            metrics,
        }
    }

    /// Shorthand for [`MetricSnapshot::value`].
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.metrics.value(key)
    }
}
