//! Metric definitions: display metadata, declared range and directionality.
//!
//! A [`MetricDefinition`] is the single source of truth for how a raw value is
//! interpreted. The engine never infers ranges or direction from observed
//! data.

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether larger raw values are favourable, unfavourable or neither.
///
/// # Examples
/// ```
/// use vicinity_core::Directionality;
///
/// assert!(Directionality::HigherIsBetter.prefers(2.0, 1.0));
/// assert!(Directionality::LowerIsBetter.prefers(1.0, 2.0));
/// assert!(!Directionality::Neutral.prefers(2.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Directionality {
    /// Larger values are better (e.g. a safety score).
    HigherIsBetter,
    /// Smaller values are better (e.g. a median price).
    LowerIsBetter,
    /// Displayed only; never ranked or scored.
    Neutral,
}

impl Directionality {
    /// Report whether `candidate` is strictly better than `incumbent`.
    ///
    /// Ties are never a preference and neutral metrics prefer nothing.
    #[must_use]
    pub fn prefers(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::HigherIsBetter => candidate > incumbent,
            Self::LowerIsBetter => candidate < incumbent,
            Self::Neutral => false,
        }
    }

    /// Report whether the metric is excluded from ranking.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Return the directionality as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "higher_is_better",
            Self::LowerIsBetter => "lower_is_better",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hint carried through for callers; ignored by the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MetricFormat {
    /// Monetary amount.
    Currency,
    /// Percentage points.
    Percentage,
    /// Bounded index or rating.
    Score,
    /// Dimensionless ratio.
    Ratio,
    /// Whole-number tally.
    Count,
}

impl MetricFormat {
    /// Return the format as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Score => "score",
            Self::Ratio => "ratio",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for MetricFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`MetricDefinition::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricDefinitionError {
    /// One of the bounds was NaN or infinite.
    #[error("metric range bounds must be finite (min {min}, max {max})")]
    NonFiniteBound {
        /// Declared lower bound.
        min: f64,
        /// Declared upper bound.
        max: f64,
    },
    /// The declared range was empty or inverted.
    #[error("metric range must satisfy min < max (min {min}, max {max})")]
    EmptyRange {
        /// Declared lower bound.
        min: f64,
        /// Declared upper bound.
        max: f64,
    },
}

/// Static description of a metric.
///
/// Construction guarantees finite bounds with `min < max`, so normalisation
/// never divides by zero.
///
/// # Examples
/// ```
/// use vicinity_core::{Directionality, MetricDefinition, MetricFormat};
///
/// let growth = MetricDefinition::try_new(
///     "Price Growth",
///     "Year-over-year change in median sale price",
///     -10.0,
///     30.0,
///     MetricFormat::Percentage,
///     Directionality::HigherIsBetter,
/// )?;
/// assert_eq!(growth.span(), 40.0);
/// # Ok::<(), vicinity_core::MetricDefinitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawMetricDefinition")
)]
pub struct MetricDefinition {
    label: Cow<'static, str>,
    description: Cow<'static, str>,
    min: f64,
    max: f64,
    format: MetricFormat,
    directionality: Directionality,
}

impl MetricDefinition {
    /// Build a definition at compile time.
    ///
    /// Used for the statically initialised catalogue, where an invalid range
    /// fails constant evaluation and therefore the build.
    ///
    /// # Panics
    /// Panics when either bound is not finite or when `min >= max`. In a
    /// `const` context this surfaces as a compile error.
    #[must_use]
    pub const fn new(
        label: &'static str,
        description: &'static str,
        min: f64,
        max: f64,
        format: MetricFormat,
        directionality: Directionality,
    ) -> Self {
        assert!(
            min.is_finite() && max.is_finite(),
            "metric range bounds must be finite"
        );
        assert!(min < max, "metric range must satisfy min < max");
        Self {
            label: Cow::Borrowed(label),
            description: Cow::Borrowed(description),
            min,
            max,
            format,
            directionality,
        }
    }

    /// Validate and construct a definition at runtime.
    ///
    /// # Errors
    /// Returns [`MetricDefinitionError::NonFiniteBound`] when a bound is NaN
    /// or infinite and [`MetricDefinitionError::EmptyRange`] when
    /// `min >= max`.
    pub fn try_new(
        label: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        min: f64,
        max: f64,
        format: MetricFormat,
        directionality: Directionality,
    ) -> Result<Self, MetricDefinitionError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(MetricDefinitionError::NonFiniteBound { min, max });
        }
        if min >= max {
            return Err(MetricDefinitionError::EmptyRange { min, max });
        }
        Ok(Self {
            label: label.into(),
            description: description.into(),
            min,
            max,
            format,
            directionality,
        })
    }

    /// Display label, e.g. `"Median Home Price"`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Longer description for tooltips and reports.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Declared upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Width of the declared range; always positive.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "range width is a float subtraction"
    )]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Presentation hint.
    #[must_use]
    pub const fn format(&self) -> MetricFormat {
        self.format
    }

    /// Whether larger values are better, worse or neither.
    #[must_use]
    pub const fn directionality(&self) -> Directionality {
        self.directionality
    }

    /// Report whether the metric is excluded from ranking.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.directionality.is_neutral()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMetricDefinition {
    label: String,
    #[serde(default)]
    description: String,
    min: f64,
    max: f64,
    format: MetricFormat,
    directionality: Directionality,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMetricDefinition> for MetricDefinition {
    type Error = MetricDefinitionError;

    fn try_from(raw: RawMetricDefinition) -> Result<Self, Self::Error> {
        Self::try_new(
            raw.label,
            raw.description,
            raw.min,
            raw.max,
            raw.format,
            raw.directionality,
        )
    }
}
