//! Fetch raw metric snapshots for resolved neighborhoods.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{MetricSnapshot, NeighborhoodId};

/// Errors from [`MetricsStore::get_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsStoreError {
    /// The store holds no snapshot for the identifier.
    #[error("no metrics snapshot for neighborhood '{id}'")]
    MissingSnapshot {
        /// Identifier that was requested.
        id: NeighborhoodId,
    },
    /// The backing store could not be reached or answered badly.
    #[error("metrics store unavailable: {message}")]
    Unavailable {
        /// Backend-specific description.
        message: String,
    },
}

/// Read-only source of per-neighborhood metric snapshots.
///
/// Implementations are called concurrently, once per resolved neighborhood,
/// and own any retry policy. The engine never caches what they return.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Return the current snapshot for `id`.
    async fn get_snapshot(&self, id: &NeighborhoodId) -> Result<MetricSnapshot, MetricsStoreError>;
}

#[async_trait]
impl<T> MetricsStore for Arc<T>
where
    T: MetricsStore + ?Sized,
{
    async fn get_snapshot(&self, id: &NeighborhoodId) -> Result<MetricSnapshot, MetricsStoreError> {
        (**self).get_snapshot(id).await
    }
}
