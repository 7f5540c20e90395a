//! Core domain types for the Vicinity neighborhood comparison engine.
//!
//! The crate holds everything that can be computed without I/O: the metric
//! registry, per-neighborhood snapshots, normalisation onto a common `0..=100`
//! goodness scale, best-value selection, and the recommendation synthesiser.
//! The collaborator traits ([`NeighborhoodDirectory`] and [`MetricsStore`])
//! describe the data sources the comparison service fans out to; this crate
//! never calls them itself.
//!
//! # Examples
//!
//! ```
//! use vicinity_core::{MetricRegistry, MetricSnapshot, NeighborhoodSnapshot, compare_snapshots};
//!
//! let selection = MetricRegistry::standard().select(["median_home_price"]);
//! let snapshots = vec![
//!     NeighborhoodSnapshot::new(
//!         "Downtown",
//!         "n-1",
//!         MetricSnapshot::from_iter([("median_home_price", 450_000.0)]),
//!     ),
//!     NeighborhoodSnapshot::new(
//!         "Westside",
//!         "n-2",
//!         MetricSnapshot::from_iter([("median_home_price", 400_000.0)]),
//!     ),
//! ];
//! let result = compare_snapshots("metro".into(), selection, snapshots, Vec::new());
//! let recommendation = result.recommendation.expect("a neighborhood can be scored");
//! assert_eq!(recommendation.neighborhood, "Westside");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod best_value;
mod comparison;
mod directory;
mod metric;
mod neighborhood;
mod normalise;
pub mod registry;
mod snapshot;
mod store;
mod synthesis;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use best_value::select_best_values;
pub use comparison::{
    ComparisonRequest, ComparisonRequestError, ComparisonResult, DropReason, DroppedNeighborhood,
    MIN_NEIGHBORHOODS, compare_snapshots,
};
pub use directory::{DirectoryError, NeighborhoodDirectory};
pub use metric::{Directionality, MetricDefinition, MetricDefinitionError, MetricFormat};
pub use neighborhood::{NeighborhoodEntry, NeighborhoodId, Region};
pub use normalise::{SCORE_MAX, SCORE_MIN, normalise};
pub use registry::{MetricRegistry, MetricSelection, RegistryError, SelectedMetric};
pub use snapshot::{MetricSnapshot, NeighborhoodSnapshot};
pub use store::{MetricsStore, MetricsStoreError};
pub use synthesis::{
    BALANCED_FALLBACK_REASON, NeighborhoodScore, Recommendation, Synthesis, synthesise,
};
