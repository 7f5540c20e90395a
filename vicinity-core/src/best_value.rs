//! Determine the most favourable raw value per requested metric.

use std::collections::BTreeMap;

use crate::{Directionality, MetricSelection, NeighborhoodSnapshot};

/// Sentinel recorded for neutral metrics, meaning "not computed".
const NEUTRAL_SENTINEL: f64 = 0.0;

/// Collect the best raw value for every accepted metric.
///
/// Higher-is-better metrics keep the maximum, lower-is-better metrics the
/// minimum. Neutral metrics map to `0.0`. A directional metric that no
/// neighborhood reports is left out of the map.
///
/// # Examples
/// ```
/// use vicinity_core::{MetricRegistry, MetricSnapshot, NeighborhoodSnapshot, select_best_values};
///
/// let selection = MetricRegistry::standard().select(["median_home_price", "median_age"]);
/// let snapshots = [
///     NeighborhoodSnapshot::new("Downtown", "n-1", MetricSnapshot::from_iter([
///         ("median_home_price", 450_000.0),
///         ("median_age", 31.0),
///     ])),
///     NeighborhoodSnapshot::new("Westside", "n-2", MetricSnapshot::from_iter([
///         ("median_home_price", 400_000.0),
///     ])),
/// ];
/// let best = select_best_values(&selection, &snapshots);
/// assert_eq!(best.get("median_home_price"), Some(&400_000.0));
/// assert_eq!(best.get("median_age"), Some(&0.0));
/// ```
#[must_use]
pub fn select_best_values(
    selection: &MetricSelection,
    snapshots: &[NeighborhoodSnapshot],
) -> BTreeMap<String, f64> {
    let mut best_values = BTreeMap::new();
    for metric in selection.accepted() {
        let direction = metric.definition.directionality();
        if direction == Directionality::Neutral {
            best_values.insert(metric.key.clone(), NEUTRAL_SENTINEL);
            continue;
        }
        let best = snapshots
            .iter()
            .filter_map(|snapshot| snapshot.value(&metric.key))
            .reduce(|incumbent, candidate| {
                if direction.prefers(candidate, incumbent) {
                    candidate
                } else {
                    incumbent
                }
            });
        if let Some(value) = best {
            best_values.insert(metric.key.clone(), value);
        }
    }
    best_values
}
