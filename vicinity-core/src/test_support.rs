//! In-memory collaborators used by unit and behaviour tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{
    DirectoryError, MetricSnapshot, MetricsStore, MetricsStoreError, NeighborhoodDirectory,
    NeighborhoodEntry, NeighborhoodId, Region,
};

/// In-memory `NeighborhoodDirectory` keyed by region.
#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    regions: HashMap<Region, Vec<NeighborhoodEntry>>,
}

impl MemoryDirectory {
    /// Add an entry to `region`, keeping insertion order.
    #[must_use]
    pub fn with_entry(mut self, region: impl Into<Region>, entry: NeighborhoodEntry) -> Self {
        self.regions.entry(region.into()).or_default().push(entry);
        self
    }
}

#[async_trait]
impl NeighborhoodDirectory for MemoryDirectory {
    async fn list_neighborhoods(
        &self,
        region: &Region,
    ) -> Result<Vec<NeighborhoodEntry>, DirectoryError> {
        self.regions
            .get(region)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownRegion {
                region: region.clone(),
            })
    }
}

/// Directory that always fails with [`DirectoryError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FailingDirectory {
    message: String,
}

impl FailingDirectory {
    /// Fail every listing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl NeighborhoodDirectory for FailingDirectory {
    async fn list_neighborhoods(
        &self,
        _region: &Region,
    ) -> Result<Vec<NeighborhoodEntry>, DirectoryError> {
        Err(DirectoryError::Unavailable {
            message: self.message.clone(),
        })
    }
}

/// In-memory `MetricsStore` that counts fetches and can inject failures.
#[derive(Debug, Default)]
pub struct MemoryMetricsStore {
    snapshots: HashMap<NeighborhoodId, MetricSnapshot>,
    failures: HashMap<NeighborhoodId, MetricsStoreError>,
    calls: AtomicUsize,
}

impl MemoryMetricsStore {
    /// Serve `snapshot` for `id`.
    #[must_use]
    pub fn with_snapshot(mut self, id: impl Into<NeighborhoodId>, snapshot: MetricSnapshot) -> Self {
        self.snapshots.insert(id.into(), snapshot);
        self
    }

    /// Fail every fetch for `id` with `error`.
    #[must_use]
    pub fn with_failure(mut self, id: impl Into<NeighborhoodId>, error: MetricsStoreError) -> Self {
        self.failures.insert(id.into(), error);
        self
    }

    /// Number of `get_snapshot` calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricsStore for MemoryMetricsStore {
    async fn get_snapshot(&self, id: &NeighborhoodId) -> Result<MetricSnapshot, MetricsStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.get(id) {
            return Err(error.clone());
        }
        self.snapshots
            .get(id)
            .cloned()
            .ok_or_else(|| MetricsStoreError::MissingSnapshot { id: id.clone() })
    }
}

/// Build a directory and store for one region.
///
/// Neighborhoods receive identifiers `n-1`, `n-2`, ... in the order given.
pub fn seeded<I, N>(region: &str, neighborhoods: I) -> (MemoryDirectory, MemoryMetricsStore)
where
    I: IntoIterator<Item = (N, MetricSnapshot)>,
    N: Into<String>,
{
    let mut directory = MemoryDirectory::default();
    let mut store = MemoryMetricsStore::default();
    for (position, (name, snapshot)) in neighborhoods.into_iter().enumerate() {
        let id = NeighborhoodId::new(format!("n-{}", position.saturating_add(1)));
        directory = directory.with_entry(region, NeighborhoodEntry::new(id.clone(), name));
        store = store.with_snapshot(id, snapshot);
    }
    (directory, store)
}
