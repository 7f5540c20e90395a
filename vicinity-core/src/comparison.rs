//! Request validation and the assembled comparison result.

use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    MetricDefinition, MetricSelection, NeighborhoodScore, NeighborhoodSnapshot, Recommendation,
    Region, select_best_values, synthesise,
};

/// Smallest number of distinct neighborhoods a comparison accepts.
pub const MIN_NEIGHBORHOODS: usize = 2;

/// Reasons a comparison request is rejected before any data is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonRequestError {
    /// Fewer than [`MIN_NEIGHBORHOODS`] distinct neighborhoods were available.
    #[error("at least 2 distinct neighborhoods are required, found {found}")]
    InsufficientNeighborhoods {
        /// Number of distinct neighborhoods actually available.
        found: usize,
    },
    /// No metric keys were supplied.
    #[error("at least one metric key is required")]
    NoMetrics,
}

/// A validated request to compare neighborhoods within a region.
///
/// Neighborhood names are de-duplicated keeping first occurrence. Metric keys
/// are kept verbatim, repeats included, because reason backfill depends on
/// the caller's ordering.
///
/// # Examples
/// ```
/// use vicinity_core::{ComparisonRequest, ComparisonRequestError};
///
/// let request = ComparisonRequest::new(
///     "metro",
///     ["Downtown", "Westside", "Downtown"],
///     ["median_home_price"],
/// )?;
/// assert_eq!(request.neighborhoods(), ["Downtown", "Westside"]);
///
/// let err = ComparisonRequest::new("metro", ["Downtown", "Downtown"], ["walk_score"])
///     .expect_err("one distinct neighborhood is not enough");
/// assert_eq!(err, ComparisonRequestError::InsufficientNeighborhoods { found: 1 });
/// # Ok::<(), ComparisonRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComparisonRequest {
    region: Region,
    neighborhoods: Vec<String>,
    metrics: Vec<String>,
}

impl ComparisonRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    /// Returns [`ComparisonRequestError::InsufficientNeighborhoods`] when
    /// fewer than two distinct names remain and
    /// [`ComparisonRequestError::NoMetrics`] when no metric key is given. The
    /// neighborhood check runs first.
    pub fn new<N, M>(
        region: impl Into<Region>,
        neighborhoods: N,
        metrics: M,
    ) -> Result<Self, ComparisonRequestError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let neighborhoods: Vec<String> = neighborhoods
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();
        if neighborhoods.len() < MIN_NEIGHBORHOODS {
            return Err(ComparisonRequestError::InsufficientNeighborhoods {
                found: neighborhoods.len(),
            });
        }
        let metrics: Vec<String> = metrics.into_iter().map(Into::into).collect();
        if metrics.is_empty() {
            return Err(ComparisonRequestError::NoMetrics);
        }
        Ok(Self {
            region: region.into(),
            neighborhoods,
            metrics,
        })
    }

    /// Region the neighborhoods belong to.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Distinct neighborhood names in request order.
    #[must_use]
    pub fn neighborhoods(&self) -> &[String] {
        &self.neighborhoods
    }

    /// Metric keys exactly as supplied.
    #[must_use]
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawComparisonRequest {
    region: Region,
    neighborhoods: Vec<String>,
    metrics: Vec<String>,
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ComparisonRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawComparisonRequest::deserialize(deserializer)?;
        Self::new(raw.region, raw.neighborhoods, raw.metrics).map_err(serde::de::Error::custom)
    }
}

/// Why a requested neighborhood was left out of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum DropReason {
    /// The name was not listed in the region's directory.
    Unresolved,
    /// The metrics store reported an error.
    FetchFailed {
        /// Rendered store error.
        message: String,
    },
    /// The snapshot fetch exceeded the configured timeout.
    TimedOut,
}

/// A requested neighborhood that did not make it into the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DroppedNeighborhood {
    /// Name as requested.
    pub name: String,
    /// What went wrong.
    pub reason: DropReason,
}

impl DroppedNeighborhood {
    /// Record a dropped neighborhood.
    pub fn new(name: impl Into<String>, reason: DropReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

/// Everything a caller needs to render a comparison.
///
/// A plain value: it borrows nothing and holds no handles to collaborators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonResult {
    /// Region that was compared.
    pub region: Region,
    /// Snapshots of the neighborhoods that resolved, in request order.
    pub snapshots: Vec<NeighborhoodSnapshot>,
    /// Definitions of the requested metrics the registry recognised.
    pub metric_definitions: BTreeMap<String, MetricDefinition>,
    /// Requested keys the registry did not recognise.
    pub rejected_metric_keys: Vec<String>,
    /// Most favourable raw value per metric; `0` for neutral metrics.
    pub best_values: BTreeMap<String, f64>,
    /// Per-neighborhood score breakdown in snapshot order.
    pub scores: Vec<NeighborhoodScore>,
    /// The recommended neighborhood, when any could be scored.
    pub recommendation: Option<Recommendation>,
    /// Requested neighborhoods excluded from the comparison.
    pub dropped: Vec<DroppedNeighborhood>,
}

impl ComparisonResult {
    /// Find the snapshot for a neighborhood by name.
    #[must_use]
    pub fn snapshot(&self, name: &str) -> Option<&NeighborhoodSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.name == name)
    }
}

/// Run the pure part of a comparison over already-fetched snapshots.
///
/// This is what the comparison service calls once fetches complete; it is
/// exposed so callers holding snapshots in memory can skip the collaborators.
#[must_use]
pub fn compare_snapshots(
    region: Region,
    selection: MetricSelection,
    snapshots: Vec<NeighborhoodSnapshot>,
    dropped: Vec<DroppedNeighborhood>,
) -> ComparisonResult {
    let best_values = select_best_values(&selection, &snapshots);
    let synthesis = synthesise(&selection, &snapshots);
    let metric_definitions = selection.definitions();
    let (_, rejected_metric_keys) = selection.into_parts();
    ComparisonResult {
        region,
        snapshots,
        metric_definitions,
        rejected_metric_keys,
        best_values,
        scores: synthesis.scores,
        recommendation: synthesis.recommendation,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 0)]
    #[case(&["Solo"], 1)]
    #[case(&["Solo", "Solo", "Solo"], 1)]
    fn rejects_too_few_distinct_neighborhoods(#[case] names: &[&str], #[case] found: usize) {
        let err = ComparisonRequest::new("metro", names.iter().copied(), ["walk_score"])
            .expect_err("request should be rejected");
        assert_eq!(
            err,
            ComparisonRequestError::InsufficientNeighborhoods { found }
        );
    }

    #[rstest]
    fn rejects_missing_metrics() {
        let err = ComparisonRequest::new("metro", ["A", "B"], Vec::<String>::new())
            .expect_err("request should be rejected");
        assert_eq!(err, ComparisonRequestError::NoMetrics);
    }

    #[rstest]
    fn neighborhood_check_precedes_metric_check() {
        let err = ComparisonRequest::new("metro", ["A"], Vec::<String>::new())
            .expect_err("request should be rejected");
        assert!(matches!(
            err,
            ComparisonRequestError::InsufficientNeighborhoods { .. }
        ));
    }

    #[rstest]
    fn metric_keys_keep_repeats_and_order() {
        let request = ComparisonRequest::new(
            "metro",
            ["A", "B"],
            ["walk_score", "crime_rate", "walk_score"],
        )
        .expect("valid request");
        assert_eq!(request.metrics(), ["walk_score", "crime_rate", "walk_score"]);
        assert_eq!(request.region().as_str(), "metro");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_validates_the_request() {
        let json = r#"{"region":"metro","neighborhoods":["A"],"metrics":["walk_score"]}"#;
        let err = serde_json::from_str::<ComparisonRequest>(json)
            .expect_err("single neighborhood must be rejected");
        assert!(err.to_string().contains("distinct neighborhoods"));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn drop_reasons_serialise_with_a_kind_tag() {
        let dropped = DroppedNeighborhood::new(
            "Harbour",
            DropReason::FetchFailed {
                message: "store offline".into(),
            },
        );
        let value = serde_json::to_value(&dropped).expect("serialise");
        assert_eq!(value["reason"]["kind"], "fetch_failed");
        assert_eq!(value["reason"]["message"], "store offline");
    }
}
