//! Facade crate for the Vicinity neighborhood comparison engine.
//!
//! This crate re-exports the core domain types and exposes the comparison
//! service and the file-backed dataset collaborator behind feature flags.

#![forbid(unsafe_code)]

pub use vicinity_core::{
    BALANCED_FALLBACK_REASON, ComparisonRequest, ComparisonRequestError, ComparisonResult,
    DirectoryError, Directionality, DropReason, DroppedNeighborhood, MIN_NEIGHBORHOODS,
    MetricDefinition, MetricDefinitionError, MetricFormat, MetricRegistry, MetricSelection,
    MetricSnapshot, MetricsStore, MetricsStoreError, NeighborhoodDirectory, NeighborhoodEntry,
    NeighborhoodId, NeighborhoodScore, NeighborhoodSnapshot, Recommendation, Region,
    RegistryError, SCORE_MAX, SCORE_MIN, SelectedMetric, Synthesis, compare_snapshots, normalise,
    select_best_values, synthesise,
};

#[cfg(feature = "test-support")]
pub use vicinity_core::test_support;

#[cfg(feature = "service")]
pub use vicinity_service::{
    BlockingComparisonService, ComparisonError, ComparisonService, ResolverConfig,
    ServiceBuildError,
};

#[cfg(feature = "dataset")]
pub use vicinity_data::{DataError, Dataset, load_catalogue, load_dataset, parse_catalogue};
