//! Synchronous facade over [`ComparisonService`].
//!
//! Callers without an async runtime (scripts, the CLI, synchronous UI glue)
//! get the same behaviour through a blocking call. The bridge owns a
//! `current_thread` Tokio runtime reused across calls.
//!
//! # Runtime behaviour
//!
//! Inside an existing multi-threaded Tokio runtime the call hands the
//! blocking section to [`tokio::task::block_in_place`] and drives the future
//! on that runtime's handle. Outside any runtime the stored runtime is used.
//! Calling from a `current_thread` runtime is unsupported: Tokio panics when
//! a runtime is entered from within another runtime's task, so such callers
//! should use [`ComparisonService`] directly.

use std::fmt;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};
use vicinity_core::{
    ComparisonRequest, ComparisonResult, MetricRegistry, MetricsStore, NeighborhoodDirectory,
    Region,
};

use crate::{ComparisonError, ComparisonService, ResolverConfig, ServiceBuildError};

/// Blocking wrapper around [`ComparisonService`].
///
/// # Examples
/// ```
/// use vicinity_core::MetricSnapshot;
/// use vicinity_core::test_support::seeded;
/// use vicinity_service::BlockingComparisonService;
///
/// let (directory, store) = seeded("metro", [
///     ("Downtown", MetricSnapshot::new().with_value("walk_score", 88.0)),
///     ("Westside", MetricSnapshot::new().with_value("walk_score", 64.0)),
/// ]);
/// let service = BlockingComparisonService::new(directory, store)?;
/// let result = service.compare_neighborhoods("metro", ["Downtown", "Westside"], ["walk_score"])?;
/// assert_eq!(
///     result.recommendation.map(|r| r.neighborhood).as_deref(),
///     Some("Downtown"),
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BlockingComparisonService<D, S> {
    inner: ComparisonService<D, S>,
    runtime: Runtime,
}

impl<D, S> fmt::Debug for BlockingComparisonService<D, S>
where
    D: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingComparisonService")
            .field("inner", &self.inner)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl<D, S> BlockingComparisonService<D, S>
where
    D: NeighborhoodDirectory,
    S: MetricsStore,
{
    /// Create a blocking service over the standard metric catalogue.
    ///
    /// # Errors
    /// Returns [`ServiceBuildError::Runtime`] when the Tokio runtime cannot be
    /// built.
    pub fn new(directory: D, store: S) -> Result<Self, ServiceBuildError> {
        Self::from_service(ComparisonService::new(directory, store))
    }

    /// Wrap an existing asynchronous service.
    ///
    /// # Errors
    /// Returns [`ServiceBuildError::Runtime`] when the Tokio runtime cannot be
    /// built.
    pub fn from_service(inner: ComparisonService<D, S>) -> Result<Self, ServiceBuildError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ServiceBuildError::Runtime { source })?;
        Ok(Self { inner, runtime })
    }

    /// Replace the metric catalogue.
    #[must_use]
    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.inner = self.inner.with_registry(registry);
        self
    }

    /// Replace the resolver configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.inner = self.inner.with_config(config);
        self
    }

    /// Borrow the wrapped asynchronous service.
    #[must_use]
    pub const fn inner(&self) -> &ComparisonService<D, S> {
        &self.inner
    }

    /// Blocking counterpart of [`ComparisonService::compare_neighborhoods`].
    ///
    /// # Errors
    /// Propagates every error of the asynchronous call.
    pub fn compare_neighborhoods<N, M>(
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
        self.compare(&request)
    }

    /// Blocking counterpart of [`ComparisonService::compare`].
    ///
    /// # Errors
    /// Propagates every error of the asynchronous call.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, ComparisonError> {
        let future = self.inner.compare(request);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
