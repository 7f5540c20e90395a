//! Resolve neighborhood names and fetch their snapshots concurrently.
//!
//! The resolver lists the region once, matches requested names against the
//! listing, then fans out one [`MetricsStore::get_snapshot`] call per resolved
//! neighborhood. Fetches run with bounded concurrency and are joined in
//! request order, so the output is deterministic regardless of which fetch
//! finishes first.
//!
//! Any per-neighborhood problem (unknown name, failed fetch, expired
//! deadline) drops only that neighborhood. Only a failure to list the region
//! aborts resolution.

use std::collections::HashMap;

use futures_util::stream::{self, StreamExt};
use log::warn;
use vicinity_core::{
    DirectoryError, DropReason, DroppedNeighborhood, MetricSnapshot, MetricsStore,
    NeighborhoodDirectory, NeighborhoodEntry, NeighborhoodId, NeighborhoodSnapshot, Region,
};

use crate::ResolverConfig;

/// Snapshots that resolved, plus the neighborhoods that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// Fetched snapshots in request order.
    pub snapshots: Vec<NeighborhoodSnapshot>,
    /// Dropped neighborhoods in request order.
    pub dropped: Vec<DroppedNeighborhood>,
}

/// Name-to-snapshot resolver over a directory and a metrics store.
#[derive(Debug, Clone)]
pub struct SnapshotResolver<D, S> {
    directory: D,
    store: S,
    config: ResolverConfig,
}

impl<D, S> SnapshotResolver<D, S>
where
    D: NeighborhoodDirectory,
    S: MetricsStore,
{
    /// Create a resolver with the default configuration.
    pub fn new(directory: D, store: S) -> Self {
        Self::with_config(directory, store, ResolverConfig::default())
    }

    /// Create a resolver with explicit configuration.
    pub const fn with_config(directory: D, store: S, config: ResolverConfig) -> Self {
        Self {
            directory,
            store,
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub(crate) const fn set_config(&mut self, config: ResolverConfig) {
        self.config = config;
    }

    /// Resolve `names` within `region` and fetch their snapshots.
    ///
    /// # Errors
    /// Returns the directory's error when the region cannot be listed. Store
    /// failures never surface here; they become [`DroppedNeighborhood`]
    /// entries.
    pub async fn resolve(
        &self,
        region: &Region,
        names: &[String],
    ) -> Result<Resolution, DirectoryError> {
        let listing = self.directory.list_neighborhoods(region).await?;
        let lookup = index_by_name(&listing);

        let outcomes: Vec<Result<NeighborhoodSnapshot, DroppedNeighborhood>> =
            stream::iter(names.iter().map(|name| self.resolve_one(&lookup, name)))
                .buffered(self.config.max_concurrent_fetches.get())
                .collect()
                .await;

        let mut resolution = Resolution::default();
        for outcome in outcomes {
            match outcome {
                Ok(snapshot) => resolution.snapshots.push(snapshot),
                Err(dropped) => resolution.dropped.push(dropped),
            }
        }
        Ok(resolution)
    }

    async fn resolve_one(
        &self,
        lookup: &HashMap<&str, &NeighborhoodId>,
        name: &str,
    ) -> Result<NeighborhoodSnapshot, DroppedNeighborhood> {
        let Some(id) = lookup.get(name).copied() else {
            warn!("Dropping neighborhood '{name}': not found in directory");
            return Err(DroppedNeighborhood::new(name, DropReason::Unresolved));
        };
        match self.fetch(id).await {
            Ok(metrics) => Ok(NeighborhoodSnapshot::new(name, id.clone(), metrics)),
            Err(reason) => {
                match &reason {
                    DropReason::FetchFailed { message } => {
                        warn!("Dropping neighborhood '{name}' ({id}): {message}");
                    }
                    DropReason::TimedOut => {
                        warn!("Dropping neighborhood '{name}' ({id}): snapshot fetch timed out");
                    }
                    DropReason::Unresolved => {}
                }
                Err(DroppedNeighborhood::new(name, reason))
            }
        }
    }

    async fn fetch(&self, id: &NeighborhoodId) -> Result<MetricSnapshot, DropReason> {
        let request = self.store.get_snapshot(id);
        let outcome = match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_elapsed| DropReason::TimedOut)?,
            None => request.await,
        };
        outcome.map_err(|err| DropReason::FetchFailed {
            message: err.to_string(),
        })
    }
}

/// Map names to identifiers; the first entry wins when a name repeats.
fn index_by_name(listing: &[NeighborhoodEntry]) -> HashMap<&str, &NeighborhoodId> {
    let mut lookup = HashMap::with_capacity(listing.len());
    for entry in listing {
        lookup.entry(entry.name.as_str()).or_insert(&entry.id);
    }
    lookup
}
