//! Tuning knobs for the snapshot fan-out.

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default upper bound on in-flight snapshot fetches.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: NonZeroUsize = NonZeroUsize::MIN.saturating_add(7);

/// Default per-fetch deadline in seconds.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`SnapshotResolver`](crate::SnapshotResolver).
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
/// use vicinity_service::ResolverConfig;
///
/// let config = ResolverConfig::default()
///     .with_max_concurrent_fetches(NonZeroUsize::MIN)
///     .with_fetch_timeout(Some(Duration::from_millis(250)));
/// assert_eq!(config.max_concurrent_fetches.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of snapshot fetches awaited at once.
    pub max_concurrent_fetches: NonZeroUsize,
    /// Deadline applied to each fetch; `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch_timeout: Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
        }
    }
}

impl ResolverConfig {
    /// Set the fetch concurrency limit.
    #[must_use]
    pub const fn with_max_concurrent_fetches(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    /// Set or clear the per-fetch deadline.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
