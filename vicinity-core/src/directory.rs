//! Resolve human-facing neighborhood names within a region.
//!
//! The [`NeighborhoodDirectory`] trait is the seam to whatever system knows
//! which neighborhoods exist. The comparison service lists a region once per
//! request and matches names against the returned entries.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{NeighborhoodEntry, Region};

/// Errors from [`NeighborhoodDirectory::list_neighborhoods`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory does not know the region.
    #[error("unknown region '{region}'")]
    UnknownRegion {
        /// Region that was looked up.
        region: Region,
    },
    /// The backing directory could not be reached or answered badly.
    #[error("neighborhood directory unavailable: {message}")]
    Unavailable {
        /// Backend-specific description.
        message: String,
    },
}

/// List the neighborhoods of a region.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use vicinity_core::{DirectoryError, NeighborhoodDirectory, NeighborhoodEntry, Region};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl NeighborhoodDirectory for Fixed {
///     async fn list_neighborhoods(
///         &self,
///         _region: &Region,
///     ) -> Result<Vec<NeighborhoodEntry>, DirectoryError> {
///         Ok(vec![NeighborhoodEntry::new("n-1", "Downtown")])
///     }
/// }
/// ```
#[async_trait]
pub trait NeighborhoodDirectory: Send + Sync {
    /// Return every neighborhood known for `region`, in directory order.
    async fn list_neighborhoods(
        &self,
        region: &Region,
    ) -> Result<Vec<NeighborhoodEntry>, DirectoryError>;
}

#[async_trait]
impl<T> NeighborhoodDirectory for Arc<T>
where
    T: NeighborhoodDirectory + ?Sized,
{
    async fn list_neighborhoods(
        &self,
        region: &Region,
    ) -> Result<Vec<NeighborhoodEntry>, DirectoryError> {
        (**self).list_neighborhoods(region).await
    }
}
