//! Read-only catalogue of known metrics.
//!
//! [`MetricRegistry::standard`] exposes the statically initialised catalogue
//! shared by every comparison. The type offers no mutation API; alternative
//! catalogues are separate immutable values built with
//! [`MetricRegistry::from_definitions`].

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, LazyLock};

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MetricDefinition, MetricDefinitionError};

mod catalogue;

static STANDARD: LazyLock<MetricRegistry> =
    LazyLock::new(|| MetricRegistry::from_static(catalogue::STANDARD_METRICS));

/// Errors returned by [`MetricRegistry::from_definitions`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A metric key was empty or whitespace.
    #[error("metric keys must not be blank")]
    BlankKey,
    /// The same key was supplied twice.
    #[error("metric key '{key}' is defined more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// A definition failed range validation.
    #[error("metric '{key}' has an invalid definition: {source}")]
    InvalidDefinition {
        /// Key of the offending definition.
        key: String,
        /// Validation failure.
        #[source]
        source: MetricDefinitionError,
    },
}

/// Immutable lookup table from metric key to [`MetricDefinition`].
///
/// Cloning is cheap; clones share the same table.
///
/// # Examples
/// ```
/// use vicinity_core::{Directionality, MetricRegistry};
///
/// let registry = MetricRegistry::standard();
/// let price = registry.lookup("median_home_price").expect("built-in metric");
/// assert_eq!(price.directionality(), Directionality::LowerIsBetter);
/// assert!(registry.lookup("unknown").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRegistry {
    definitions: Arc<BTreeMap<String, MetricDefinition>>,
}

impl MetricRegistry {
    /// The built-in real-estate catalogue.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    fn from_static(entries: &[(&str, MetricDefinition)]) -> Self {
        let mut definitions = BTreeMap::new();
        for (key, definition) in entries {
            definitions
                .entry((*key).to_owned())
                .or_insert_with(|| definition.clone());
        }
        Self {
            definitions: Arc::new(definitions),
        }
    }

    /// Validate and build a registry from runtime-supplied definitions.
    ///
    /// # Errors
    /// Returns [`RegistryError::BlankKey`] for empty keys and
    /// [`RegistryError::DuplicateKey`] when a key repeats.
    pub fn from_definitions<I, K>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, MetricDefinition)>,
        K: Into<String>,
    {
        let mut definitions = BTreeMap::new();
        for (raw_key, definition) in entries {
            let key = raw_key.into();
            if key.trim().is_empty() {
                return Err(RegistryError::BlankKey);
            }
            if definitions.contains_key(&key) {
                return Err(RegistryError::DuplicateKey { key });
            }
            definitions.insert(key, definition);
        }
        Ok(Self {
            definitions: Arc::new(definitions),
        })
    }

    /// Validate raw range data and build a registry.
    ///
    /// Convenience for loaders that have not yet constructed definitions.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidDefinition`] wrapping the range
    /// failure, or the errors of [`MetricRegistry::from_definitions`].
    pub fn try_from_results<I, K>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, Result<MetricDefinition, MetricDefinitionError>)>,
        K: Into<String>,
    {
        let validated = entries
            .into_iter()
            .map(|(raw_key, definition)| {
                let key = raw_key.into();
                match definition {
                    Ok(definition) => Ok((key, definition)),
                    Err(source) => Err(RegistryError::InvalidDefinition { key, source }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_definitions(validated)
    }

    /// Look up a metric by key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&MetricDefinition> {
        self.definitions.get(key)
    }

    /// Iterate over all definitions in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricDefinition)> {
        self.definitions
            .iter()
            .map(|(key, definition)| (key.as_str(), definition))
    }

    /// Number of known metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Report whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Partition caller-supplied keys into known and unknown metrics.
    ///
    /// Both partitions keep the caller's order and drop repeats. The raw key
    /// sequence is retained verbatim for steps that depend on request order.
    #[must_use]
    pub fn select<I, K>(&self, keys: I) -> MetricSelection
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let requested: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_owned()).collect();
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for key in &requested {
            if !seen.insert(key.clone()) {
                continue;
            }
            match self.lookup(key) {
                Some(definition) => accepted.push(SelectedMetric {
                    key: key.clone(),
                    definition: definition.clone(),
                }),
                None => {
                    warn!("Ignoring unknown metric key '{key}'");
                    rejected.push(key.clone());
                }
            }
        }
        MetricSelection {
            requested,
            accepted,
            rejected,
        }
    }
}

/// A requested metric that the registry recognised.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectedMetric {
    /// Registry key.
    pub key: String,
    /// Definition copied from the registry.
    pub definition: MetricDefinition,
}

/// Outcome of [`MetricRegistry::select`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricSelection {
    requested: Vec<String>,
    accepted: Vec<SelectedMetric>,
    rejected: Vec<String>,
}

impl MetricSelection {
    /// The keys exactly as the caller supplied them.
    #[must_use]
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    /// Known metrics in request order.
    #[must_use]
    pub fn accepted(&self) -> &[SelectedMetric] {
        &self.accepted
    }

    /// Unknown keys in request order.
    #[must_use]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Definition of an accepted metric.
    #[must_use]
    pub fn definition(&self, key: &str) -> Option<&MetricDefinition> {
        self.accepted
            .iter()
            .find(|metric| metric.key == key)
            .map(|metric| &metric.definition)
    }

    /// Copy the accepted definitions into a keyed map.
    #[must_use]
    pub fn definitions(&self) -> BTreeMap<String, MetricDefinition> {
        self.accepted
            .iter()
            .map(|metric| (metric.key.clone(), metric.definition.clone()))
            .collect()
    }

    /// Split into accepted metrics and rejected keys.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SelectedMetric>, Vec<String>) {
        (self.accepted, self.rejected)
    }
}
