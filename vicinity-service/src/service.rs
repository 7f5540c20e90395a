//! The `compare_neighborhoods` entry point.

use log::debug;
use vicinity_core::{
    ComparisonRequest, ComparisonRequestError, ComparisonResult, DirectoryError, MIN_NEIGHBORHOODS,
    MetricRegistry, MetricsStore, NeighborhoodDirectory, Region, compare_snapshots,
};

use crate::{ComparisonError, ResolverConfig, SnapshotResolver};

/// Compares neighborhoods by fetching their snapshots and synthesising a
/// recommendation.
///
/// The service holds no per-request state; one instance can serve any number
/// of concurrent comparisons.
///
/// # Examples
/// ```
/// use vicinity_core::MetricSnapshot;
/// use vicinity_core::test_support::seeded;
/// use vicinity_service::ComparisonService;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(async {
/// let (directory, store) = seeded("metro", [
///     ("Downtown", MetricSnapshot::new().with_value("median_home_price", 450_000.0)),
///     ("Westside", MetricSnapshot::new().with_value("median_home_price", 400_000.0)),
/// ]);
/// let service = ComparisonService::new(directory, store);
/// let result = service
///     .compare_neighborhoods("metro", ["Downtown", "Westside"], ["median_home_price"])
///     .await?;
/// assert_eq!(result.best_values["median_home_price"], 400_000.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonService<D, S> {
    resolver: SnapshotResolver<D, S>,
    registry: MetricRegistry,
}

impl<D, S> ComparisonService<D, S>
where
    D: NeighborhoodDirectory,
    S: MetricsStore,
{
    /// Create a service over the standard metric catalogue.
    pub fn new(directory: D, store: S) -> Self {
        Self {
            resolver: SnapshotResolver::new(directory, store),
            registry: MetricRegistry::standard().clone(),
        }
    }

    /// Replace the metric catalogue.
    #[must_use]
    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the resolver configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.resolver.set_config(config);
        self
    }

    /// Active metric catalogue.
    #[must_use]
    pub const fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Validate the inputs and compare the named neighborhoods.
    ///
    /// Metric keys are used in the order given; repeats and unknown keys are
    /// tolerated (unknown keys are reported in
    /// [`ComparisonResult::rejected_metric_keys`]).
    ///
    /// # Errors
    /// See [`ComparisonService::compare`]. Invalid input is rejected before
    /// any collaborator is called.
    ///
    /// # Panics
    /// As [`ComparisonService::compare`]: requires a Tokio runtime when a
    /// fetch timeout is configured.
    pub async fn compare_neighborhoods<N, M>(
        &self,
        region: impl Into<Region>,
        neighborhoods: N,
        metrics: M,
    ) -> Result<ComparisonResult, ComparisonError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let request = ComparisonRequest::new(region, neighborhoods, metrics)?;
        self.compare(&request).await
    }

    /// Compare the neighborhoods of an already validated request.
    ///
    /// # Errors
    /// Returns [`ComparisonError::InvalidRequest`] with
    /// [`ComparisonRequestError::InsufficientNeighborhoods`] when fewer than
    /// two neighborhoods survive resolution (an unknown region resolves
    /// none), and [`ComparisonError::Failed`] when the directory is
    /// unavailable.
    ///
    /// # Panics
    /// Panics when polled outside a Tokio runtime with a fetch timeout
    /// configured, since the deadline relies on Tokio's timer.
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, ComparisonError> {
        let resolution = match self
            .resolver
            .resolve(request.region(), request.neighborhoods())
            .await
        {
            Ok(resolution) => resolution,
            Err(DirectoryError::UnknownRegion { region }) => {
                debug!("Region '{region}' is not listed; no neighborhoods resolve");
                return Err(ComparisonRequestError::InsufficientNeighborhoods { found: 0 }.into());
            }
            Err(source) => return Err(ComparisonError::Failed { source }),
        };

        let found = resolution.snapshots.len();
        if found < MIN_NEIGHBORHOODS {
            debug!(
                "Only {found} of {} neighborhoods resolved in '{}'",
                request.neighborhoods().len(),
                request.region()
            );
            return Err(ComparisonRequestError::InsufficientNeighborhoods { found }.into());
        }

        let selection = self.registry.select(request.metrics());
        Ok(compare_snapshots(
            request.region().clone(),
            selection,
            resolution.snapshots,
            resolution.dropped,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};
    use vicinity_core::test_support::{
        FailingDirectory, MemoryDirectory, MemoryMetricsStore, seeded,
    };
    use vicinity_core::{
        DirectoryError, Directionality, MetricDefinition, MetricFormat, MetricSnapshot,
    };

    use super::*;

    #[fixture]
    fn collaborators() -> (MemoryDirectory, MemoryMetricsStore) {
        seeded(
            "metro",
            [
                ("Downtown", MetricSnapshot::new().with_value("noise", 70.0)),
                ("Westside", MetricSnapshot::new().with_value("noise", 45.0)),
            ],
        )
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_requests_never_reach_collaborators(
        collaborators: (MemoryDirectory, MemoryMetricsStore),
    ) {
        let (directory, store) = collaborators;
        let store = Arc::new(store);
        let service = ComparisonService::new(directory, Arc::clone(&store));
        let err = service
            .compare_neighborhoods("metro", ["Downtown"], ["walk_score"])
            .await
            .expect_err("one neighborhood is not enough");
        assert_eq!(
            err,
            ComparisonError::InvalidRequest(ComparisonRequestError::InsufficientNeighborhoods {
                found: 1
            })
        );
        let err = service
            .compare_neighborhoods("metro", ["Downtown", "Westside"], Vec::<String>::new())
            .await
            .expect_err("metrics are required");
        assert_eq!(
            err,
            ComparisonError::InvalidRequest(ComparisonRequestError::NoMetrics)
        );
        assert_eq!(store.calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn directory_failures_keep_their_cause() {
        let service = ComparisonService::new(
            FailingDirectory::new("directory offline"),
            MemoryMetricsStore::default(),
        );
        let err = service
            .compare_neighborhoods("metro", ["Downtown", "Westside"], ["walk_score"])
            .await
            .expect_err("directory is down");
        assert_eq!(err.to_string(), "comparison failed");
        let source = std::error::Error::source(&err).expect("cause is preserved");
        assert!(source.to_string().contains("directory offline"));
        assert!(matches!(
            err,
            ComparisonError::Failed {
                source: DirectoryError::Unavailable { .. }
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_regions_resolve_no_neighborhoods(
        collaborators: (MemoryDirectory, MemoryMetricsStore),
    ) {
        let (directory, store) = collaborators;
        let store = Arc::new(store);
        let service = ComparisonService::new(directory, Arc::clone(&store));
        let err = service
            .compare_neighborhoods("suburbia", ["Downtown", "Westside"], ["walk_score"])
            .await
            .expect_err("no neighborhood is listed in suburbia");
        assert_eq!(
            err,
            ComparisonError::InvalidRequest(ComparisonRequestError::InsufficientNeighborhoods {
                found: 0
            })
        );
        assert!(err.is_invalid_request());
        assert_eq!(store.calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn custom_registry_replaces_the_standard_catalogue(
        collaborators: (MemoryDirectory, MemoryMetricsStore),
    ) {
        let (directory, store) = collaborators;
        let registry = MetricRegistry::from_definitions([(
            "noise",
            MetricDefinition::new(
                "Noise Level",
                "Average daytime noise in decibels",
                30.0,
                90.0,
                MetricFormat::Score,
                Directionality::LowerIsBetter,
            ),
        )])
        .expect("valid catalogue");
        let service = ComparisonService::new(directory, store).with_registry(registry);
        let result = service
            .compare_neighborhoods("metro", ["Downtown", "Westside"], ["noise", "walk_score"])
            .await
            .expect("comparison succeeds");
        assert_eq!(result.rejected_metric_keys, ["walk_score"]);
        let recommendation = result.recommendation.expect("noise is scorable");
        assert_eq!(recommendation.neighborhood, "Westside");
        assert_eq!(
            recommendation.reasons.first().map(String::as_str),
            Some("Best noise level among compared neighborhoods")
        );
    }
}
