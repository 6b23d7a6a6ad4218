use anyhow::Result;
use polars::{frame::DataFrame, prelude::NamedFrom, series::Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    map::{Metric, TractSet},
    stats::{aggregate_by, pearson, Aggregation, Direction, Strength},
};

/// A median-income range `[min, max)`; an open bracket has no `max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBracket {
    pub label: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl IncomeBracket {
    pub fn new(label: &str, min: f64, max: Option<f64>) -> Self {
        Self { label: label.to_string(), min, max }
    }

    /// Missing or zero incomes belong to no bracket.
    pub fn contains(&self, income: f64) -> bool {
        income > 0.0 && income >= self.min && self.max.is_none_or(|max| income < max)
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Under $35k", 0.0, Some(35_000.0)),
            Self::new("$35k-$60k", 35_000.0, Some(60_000.0)),
            Self::new("$60k-$100k", 60_000.0, Some(100_000.0)),
            Self::new("$100k-$150k", 100_000.0, Some(150_000.0)),
            Self::new("$150k+", 150_000.0, None),
        ]
    }
}

/// Aggregate tracts by median-income bracket. A tract goes to the first bracket containing it.
pub fn income_table(tracts: &TractSet, brackets: &[IncomeBracket]) -> Aggregation {
    let labels: Vec<&str> = brackets.iter().map(|b| b.label.as_str()).collect();
    let aggregation = aggregate_by(tracts, &labels, |tract| {
        let income = tract.income()?;
        brackets.iter().position(|bracket| bracket.contains(income))
    });

    debug!(
        "[analysis::income_table] {} tracts bracketed, {} without income",
        aggregation.classified(), aggregation.unclassified
    );
    aggregation
}

/// Correlation between median income and one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub metric: Metric,
    pub label: String,
    pub r: f64,
    pub strength: Strength,
    pub direction: Direction,
    /// Tracts with a positive income
    pub n: usize,
}

/// Correlate median income against every metric, over tracts with income > 0.
pub fn income_correlations(tracts: &TractSet) -> Result<Vec<CorrelationRow>> {
    let with_income: Vec<_> = tracts.iter()
        .filter_map(|tract| tract.income().map(|income| (income, tract)))
        .collect();
    let incomes: Vec<f64> = with_income.iter().map(|(income, _)| *income).collect();

    Metric::ALL.iter()
        .map(|&metric| {
            let values: Vec<f64> = with_income.iter()
                .map(|(_, tract)| tract.value(metric))
                .map(|v| if v.is_finite() { v } else { 0.0 })
                .collect();
            let r = pearson(&incomes, &values)?;

            Ok(CorrelationRow {
                metric,
                label: metric.label().to_string(),
                r,
                strength: Strength::classify(r),
                direction: Direction::of(r),
                n: incomes.len(),
            })
        })
        .collect()
}

/// Tabulate correlation rows for export.
pub fn correlation_table(rows: &[CorrelationRow]) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        Series::new("metric".into(), rows.iter().map(|r| r.metric.key()).collect::<Vec<&str>>()).into(),
        Series::new("r".into(), rows.iter().map(|r| r.r).collect::<Vec<f64>>()).into(),
        Series::new("strength".into(), rows.iter().map(|r| r.strength.to_string()).collect::<Vec<String>>()).into(),
        Series::new("direction".into(), rows.iter().map(|r| r.direction.to_string()).collect::<Vec<String>>()).into(),
        Series::new("n".into(), rows.iter().map(|r| r.n as u32).collect::<Vec<u32>>()).into(),
    ])?)
}
