//! JSON-backed neighborhood directory and metrics store.
//!
//! A dataset document groups neighborhoods by region:
//!
//! ```json
//! {
//!   "regions": {
//!     "metro": [
//!       { "id": "n-1", "name": "Downtown", "metrics": { "walk_score": 91 } },
//!       { "id": "n-2", "name": "Harbour", "metrics": null }
//!     ]
//!   }
//! }
//! ```
//!
//! A `null` (or absent) `metrics` entry lists the neighborhood in the
//! directory but makes its snapshot fetch fail, which the comparison service
//! treats as a dropped neighborhood.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use camino::Utf8Path;
use log::warn;
use serde::Deserialize;
use vicinity_core::{
    DirectoryError, MetricSnapshot, MetricsStore, MetricsStoreError, NeighborhoodDirectory,
    NeighborhoodEntry, NeighborhoodId, Region,
};

use crate::error::INLINE_ORIGIN;
use crate::{DataError, fs};

#[derive(Debug, Deserialize)]
struct RawDataset {
    regions: BTreeMap<Region, Vec<RawNeighborhood>>,
}

#[derive(Debug, Deserialize)]
struct RawNeighborhood {
    id: NeighborhoodId,
    name: String,
    #[serde(default)]
    metrics: Option<MetricSnapshot>,
}

/// In-memory dataset implementing both collaborator traits.
///
/// # Examples
/// ```
/// use vicinity_data::Dataset;
///
/// let dataset = Dataset::from_json(r#"{
///     "regions": { "metro": [
///         { "id": "n-1", "name": "Downtown", "metrics": { "walk_score": 91 } },
///         { "id": "n-2", "name": "Westside", "metrics": { "walk_score": 73 } }
///     ] }
/// }"#)?;
/// assert_eq!(dataset.region_count(), 1);
/// # Ok::<(), vicinity_data::DataError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    directory: BTreeMap<Region, Vec<NeighborhoodEntry>>,
    snapshots: HashMap<NeighborhoodId, Option<MetricSnapshot>>,
}

impl Dataset {
    /// Decode a dataset from a JSON string.
    ///
    /// # Errors
    /// Returns [`DataError::Decode`] when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: RawDataset = serde_json::from_str(json).map_err(|source| DataError::Decode {
            origin: INLINE_ORIGIN.to_owned(),
            source,
        })?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDataset) -> Self {
        let mut dataset = Self::default();
        for (region, neighborhoods) in raw.regions {
            let mut entries = Vec::with_capacity(neighborhoods.len());
            for neighborhood in neighborhoods {
                if dataset.snapshots.contains_key(&neighborhood.id) {
                    warn!(
                        "Dataset lists neighborhood id '{}' more than once; keeping the first snapshot",
                        neighborhood.id
                    );
                } else {
                    dataset
                        .snapshots
                        .insert(neighborhood.id.clone(), neighborhood.metrics);
                }
                entries.push(NeighborhoodEntry::new(neighborhood.id, neighborhood.name));
            }
            dataset.directory.insert(region, entries);
        }
        dataset
    }

    /// Number of regions in the dataset.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.directory.len()
    }

    /// Iterate over region names in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.directory.keys()
    }
}

#[async_trait]
impl NeighborhoodDirectory for Dataset {
    async fn list_neighborhoods(
        &self,
        region: &Region,
    ) -> Result<Vec<NeighborhoodEntry>, DirectoryError> {
        self.directory
            .get(region)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownRegion {
                region: region.clone(),
            })
    }
}

#[async_trait]
impl MetricsStore for Dataset {
    async fn get_snapshot(&self, id: &NeighborhoodId) -> Result<MetricSnapshot, MetricsStoreError> {
        self.snapshots
            .get(id)
            .and_then(Option::as_ref)
            .cloned()
            .ok_or_else(|| MetricsStoreError::MissingSnapshot { id: id.clone() })
    }
}

/// Read and decode a dataset file.
///
/// # Errors
/// Returns [`DataError::Read`] when the file cannot be read and
/// [`DataError::Decode`] when its contents are malformed.
pub fn load_dataset(path: &Utf8Path) -> Result<Dataset, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_owned(),
        source,
    })?;
    let raw: RawDataset = serde_json::from_str(&contents).map_err(|source| DataError::Decode {
        origin: path.to_string(),
        source,
    })?;
    Ok(Dataset::from_raw(raw))
}
