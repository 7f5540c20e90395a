//! Map raw metric values onto a shared `0..=100` goodness axis.

use crate::{Directionality, MetricDefinition};

/// Lowest normalised score.
pub const SCORE_MIN: f64 = 0.0;

/// Highest normalised score.
pub const SCORE_MAX: f64 = 100.0;

/// Normalise `value` against the declared range of `definition`.
///
/// Higher-is-better metrics map `min` to `0` and `max` to `100`;
/// lower-is-better metrics invert that. Values outside the declared range are
/// clamped so a single outlier cannot skew an average.
///
/// Returns `None` for neutral metrics, which have no notion of goodness, and
/// for non-finite inputs.
///
/// # Examples
/// ```
/// use vicinity_core::{MetricRegistry, normalise};
///
/// let registry = MetricRegistry::standard();
/// let growth = registry.lookup("price_growth").expect("built-in metric");
/// assert_eq!(normalise(5.0, growth), Some(37.5));
///
/// let price = registry.lookup("median_home_price").expect("built-in metric");
/// assert_eq!(normalise(400_000.0, price), Some(60.0));
/// assert_eq!(normalise(2_000_000.0, price), Some(0.0));
///
/// let age = registry.lookup("median_age").expect("built-in metric");
/// assert_eq!(normalise(35.0, age), None);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "normalisation rescales a float onto the score axis"
)]
pub fn normalise(value: f64, definition: &MetricDefinition) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let position = (value - definition.min()) / definition.span() * SCORE_MAX;
    let score = match definition.directionality() {
        Directionality::HigherIsBetter => position,
        Directionality::LowerIsBetter => SCORE_MAX - position,
        Directionality::Neutral => return None,
    };
    Some(score.clamp(SCORE_MIN, SCORE_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricFormat;
    use rstest::{fixture, rstest};

    #[fixture]
    fn safety() -> MetricDefinition {
        MetricDefinition::new(
            "Safety Score",
            "",
            0.0,
            100.0,
            MetricFormat::Score,
            Directionality::HigherIsBetter,
        )
    }

    #[fixture]
    fn commute() -> MetricDefinition {
        MetricDefinition::new(
            "Commute Time",
            "",
            0.0,
            90.0,
            MetricFormat::Count,
            Directionality::LowerIsBetter,
        )
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(45.5, 45.5)]
    #[case(100.0, 100.0)]
    #[case(-20.0, 0.0)]
    #[case(140.0, 100.0)]
    fn higher_is_better_scales_and_clamps(
        safety: MetricDefinition,
        #[case] raw: f64,
        #[case] expected: f64,
    ) {
        let score = normalise(raw, &safety).expect("directional metric");
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(45.0, 50.0)]
    #[case(90.0, 0.0)]
    #[case(200.0, 0.0)]
    fn lower_is_better_inverts(commute: MetricDefinition, #[case] raw: f64, #[case] expected: f64) {
        let score = normalise(raw, &commute).expect("directional metric");
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn non_finite_values_are_not_scored(safety: MetricDefinition) {
        assert_eq!(normalise(f64::NAN, &safety), None);
        assert_eq!(normalise(f64::INFINITY, &safety), None);
    }
}
