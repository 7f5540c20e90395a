//! Built-in real-estate metric catalogue.
//!
//! Every entry is built with the `const` constructor, so an invalid range is
//! rejected when the crate compiles.

use crate::{Directionality, MetricDefinition, MetricFormat};

pub(super) const STANDARD_METRICS: &[(&str, MetricDefinition)] = &[
    (
        "median_home_price",
        MetricDefinition::new(
            "Median Home Price",
            "Median sale price of homes sold during the period",
            0.0,
            1_000_000.0,
            MetricFormat::Currency,
            Directionality::LowerIsBetter,
        ),
    ),
    (
        "price_per_sqft",
        MetricDefinition::new(
            "Price per Square Foot",
            "Median sale price divided by finished living area",
            0.0,
            1_500.0,
            MetricFormat::Currency,
            Directionality::LowerIsBetter,
        ),
    ),
    (
        "price_growth",
        MetricDefinition::new(
            "Price Growth",
            "Year-over-year change in median sale price",
            -10.0,
            30.0,
            MetricFormat::Percentage,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "avg_days_on_market",
        MetricDefinition::new(
            "Days on Market",
            "Average number of days between listing and sale",
            0.0,
            180.0,
            MetricFormat::Count,
            Directionality::LowerIsBetter,
        ),
    ),
    (
        "list_to_sale_ratio",
        MetricDefinition::new(
            "List-to-Sale Ratio",
            "Final sale price as a fraction of the list price",
            0.8,
            1.2,
            MetricFormat::Ratio,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "rental_yield",
        MetricDefinition::new(
            "Rental Yield",
            "Gross annual rent as a percentage of purchase price",
            0.0,
            15.0,
            MetricFormat::Percentage,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "safety_score",
        MetricDefinition::new(
            "Safety Score",
            "Composite public-safety index",
            0.0,
            100.0,
            MetricFormat::Score,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "crime_rate",
        MetricDefinition::new(
            "Crime Rate",
            "Reported incidents per 1,000 residents",
            0.0,
            100.0,
            MetricFormat::Ratio,
            Directionality::LowerIsBetter,
        ),
    ),
    (
        "school_rating",
        MetricDefinition::new(
            "School Rating",
            "Average rating of assigned public schools",
            0.0,
            10.0,
            MetricFormat::Score,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "walk_score",
        MetricDefinition::new(
            "Walk Score",
            "Walkability to everyday amenities",
            0.0,
            100.0,
            MetricFormat::Score,
            Directionality::HigherIsBetter,
        ),
    ),
    (
        "commute_time",
        MetricDefinition::new(
            "Commute Time",
            "Average one-way commute in minutes",
            0.0,
            90.0,
            MetricFormat::Count,
            Directionality::LowerIsBetter,
        ),
    ),
    (
        "median_age",
        MetricDefinition::new(
            "Median Age",
            "Median age of residents",
            0.0,
            100.0,
            MetricFormat::Count,
            Directionality::Neutral,
        ),
    ),
    (
        "population_density",
        MetricDefinition::new(
            "Population Density",
            "Residents per square mile",
            0.0,
            50_000.0,
            MetricFormat::Count,
            Directionality::Neutral,
        ),
    ),
    (
        "total_listings",
        MetricDefinition::new(
            "Total Listings",
            "Active listings at the end of the period",
            0.0,
            5_000.0,
            MetricFormat::Count,
            Directionality::Neutral,
        ),
    ),
];
