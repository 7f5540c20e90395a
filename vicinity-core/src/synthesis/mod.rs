//! Turn per-metric comparisons into a ranked, explained recommendation.
//!
//! Each neighborhood's directional metrics are normalised and averaged into
//! an integer score. A metric on which a neighborhood strictly beats every
//! other compared neighborhood becomes a *strength*. The highest-scoring
//! neighborhood is recommended with its strengths as reasons, topped up with
//! qualitative statements when strengths are sparse.

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MetricDefinition, MetricSelection, NeighborhoodSnapshot, SCORE_MAX, normalise};

/// Reason used when neither strengths nor qualitative statements apply.
pub const BALANCED_FALLBACK_REASON: &str = "Best overall balance of your selected metrics.";

/// Fewer strengths than this triggers qualitative backfill.
const MIN_STRENGTHS: usize = 2;

/// Number of leading requested metrics considered for backfill.
const BACKFILL_METRICS: usize = 3;

/// Qualitative bands, checked in order; scores at or below the last band are
/// not worth mentioning.
const QUALIFIER_BANDS: [(f64, &str); 3] = [(80.0, "excellent"), (60.0, "very good"), (40.0, "good")];

/// Score summary for one compared neighborhood.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeighborhoodScore {
    /// Neighborhood name.
    pub name: String,
    /// Rounded average normalised score, or `None` when no metric could be
    /// scored.
    pub score: Option<u8>,
    /// Number of metrics contributing to the average.
    pub scored_metrics: u32,
    /// Strength statements in metric order.
    pub strengths: Vec<String>,
}

/// The recommended neighborhood and why it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recommendation {
    /// Name of the recommended neighborhood.
    pub neighborhood: String,
    /// Rounded average normalised score in `0..=100`.
    pub score: u8,
    /// Human-readable justifications; never empty.
    pub reasons: Vec<String>,
}

/// Output of [`synthesise`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Synthesis {
    /// One entry per snapshot, in input order.
    pub scores: Vec<NeighborhoodScore>,
    /// Present when at least one neighborhood could be scored.
    pub recommendation: Option<Recommendation>,
}

/// Score every neighborhood and pick a recommendation.
///
/// Neutral metrics and missing values neither help nor hurt. The winner is
/// the first neighborhood, in input order, holding the strictly highest
/// score. The function never fails: when nothing can be scored the result
/// simply carries no recommendation.
///
/// # Examples
/// ```
/// use vicinity_core::{MetricRegistry, MetricSnapshot, NeighborhoodSnapshot, synthesise};
///
/// let selection = MetricRegistry::standard().select(["safety_score", "price_growth"]);
/// let snapshots = [
///     NeighborhoodSnapshot::new("A", "a", MetricSnapshot::from_iter([
///         ("safety_score", 90.0), ("price_growth", 5.0),
///     ])),
///     NeighborhoodSnapshot::new("B", "b", MetricSnapshot::from_iter([
///         ("safety_score", 70.0), ("price_growth", 8.0),
///     ])),
/// ];
/// let synthesis = synthesise(&selection, &snapshots);
/// let recommendation = synthesis.recommendation.expect("scored");
/// assert_eq!(recommendation.neighborhood, "A");
/// assert_eq!(recommendation.score, 64);
/// ```
#[must_use]
pub fn synthesise(selection: &MetricSelection, snapshots: &[NeighborhoodSnapshot]) -> Synthesis {
    let scores: Vec<NeighborhoodScore> = snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| score_neighborhood(selection, index, snapshot, snapshots))
        .collect();

    let winner = pick_winner(&scores);
    let recommendation = winner.and_then(|index| {
        let score = scores.get(index)?;
        let snapshot = snapshots.get(index)?;
        let points = score.score?;
        let reasons = build_reasons(selection, snapshot, &score.strengths);
        info!(
            "Recommending '{}' with score {points} ({} reasons)",
            snapshot.name,
            reasons.len()
        );
        Some(Recommendation {
            neighborhood: snapshot.name.clone(),
            score: points,
            reasons,
        })
    });
    if recommendation.is_none() {
        debug!("No neighborhood had a scorable metric; no recommendation produced");
    }

    Synthesis {
        scores,
        recommendation,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "score accumulation sums normalised floats"
)]
fn score_neighborhood(
    selection: &MetricSelection,
    position: usize,
    snapshot: &NeighborhoodSnapshot,
    all: &[NeighborhoodSnapshot],
) -> NeighborhoodScore {
    let mut total = 0.0_f64;
    let mut scored_metrics = 0_u32;
    let mut strengths = Vec::new();

    for metric in selection.accepted() {
        if metric.definition.is_neutral() {
            continue;
        }
        let Some(value) = snapshot.value(&metric.key) else {
            continue;
        };
        if let Some(normalised) = normalise(value, &metric.definition) {
            total += normalised;
            scored_metrics = scored_metrics.saturating_add(1);
        }
        if beats_all_others(position, all, &metric.key, value, &metric.definition) {
            strengths.push(strength_statement(&metric.definition));
        }
    }

    NeighborhoodScore {
        name: snapshot.name.clone(),
        score: average(total, scored_metrics),
        scored_metrics,
        strengths,
    }
}

/// A strength needs a strict win over every other neighborhood reporting the
/// metric; when nobody else reports it the win is uncontested.
fn beats_all_others(
    position: usize,
    all: &[NeighborhoodSnapshot],
    key: &str,
    value: f64,
    definition: &MetricDefinition,
) -> bool {
    let direction = definition.directionality();
    all.iter()
        .enumerate()
        .filter(|(index, _)| *index != position)
        .filter_map(|(_, other)| other.value(key))
        .all(|other_value| direction.prefers(value, other_value))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the rounded average is clamped to 0..=100 before narrowing"
)]
fn average(total: f64, count: u32) -> Option<u8> {
    if count == 0 {
        return None;
    }
    let mean = (total / f64::from(count)).round().clamp(0.0, SCORE_MAX);
    Some(mean as u8)
}

fn pick_winner(scores: &[NeighborhoodScore]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (index, entry) in scores.iter().enumerate() {
        let Some(score) = entry.score else {
            continue;
        };
        match best {
            Some((_, incumbent)) if score <= incumbent => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

fn build_reasons(
    selection: &MetricSelection,
    winner: &NeighborhoodSnapshot,
    strengths: &[String],
) -> Vec<String> {
    let mut reasons = strengths.to_vec();
    if reasons.len() < MIN_STRENGTHS {
        for key in selection.requested().iter().take(BACKFILL_METRICS) {
            let Some(definition) = selection.definition(key) else {
                continue;
            };
            let Some(score) = winner
                .value(key)
                .and_then(|value| normalise(value, definition))
            else {
                continue;
            };
            let Some(qualifier) = qualifier_for(score) else {
                continue;
            };
            let reason = format!("Has {qualifier} {}", lowercase_label(definition));
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
    }
    if reasons.is_empty() {
        reasons.push(BALANCED_FALLBACK_REASON.to_owned());
    }
    reasons
}

fn qualifier_for(score: f64) -> Option<&'static str> {
    QUALIFIER_BANDS
        .iter()
        .find(|(threshold, _)| score > *threshold)
        .map(|(_, qualifier)| *qualifier)
}

fn strength_statement(definition: &MetricDefinition) -> String {
    format!(
        "Best {} among compared neighborhoods",
        lowercase_label(definition)
    )
}

fn lowercase_label(definition: &MetricDefinition) -> String {
    definition.label().to_lowercase()
}
