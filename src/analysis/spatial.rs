use serde::Serialize;

use crate::{
    map::{Metric, PlaceCategory, TractSet},
    stats::SummaryStats,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub label: String,
    pub stats: SummaryStats,
}

/// Spread of every metric across tracts.
pub fn metric_summaries(tracts: &TractSet) -> Vec<MetricSummary> {
    Metric::ALL.iter()
        .map(|&metric| MetricSummary {
            metric,
            label: metric.label().to_string(),
            stats: SummaryStats::from_data(&tracts.values(metric)),
        })
        .collect()
}

/// Fraction of all places falling in each category; zeros when there are no places.
pub fn category_share(tracts: &TractSet) -> Vec<(PlaceCategory, f64)> {
    let totals: Vec<(PlaceCategory, f64)> = PlaceCategory::ALL.iter()
        .map(|&category| {
            let sum = tracts.iter()
                .map(|tract| tract.count(category))
                .filter(|v| v.is_finite())
                .sum::<f64>();
            (category, sum)
        })
        .collect();

    let grand_total: f64 = totals.iter().map(|(_, sum)| sum).sum();
    totals.into_iter()
        .map(|(category, sum)| (category, if grand_total > 0.0 { sum / grand_total } else { 0.0 }))
        .collect()
}
