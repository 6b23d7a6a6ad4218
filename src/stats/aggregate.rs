use polars::{frame::DataFrame, prelude::{Column, NamedFrom}, series::Series};
use serde::Serialize;

use crate::map::{GeoId, Tract, TractSet};

/// The parts of a tract a category table lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractSummary {
    pub geo_id: GeoId,
    pub overall: f64,
    pub total_places: f64,
}

/// Counts, sums and averages for one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryAggregate {
    pub label: String,
    pub count: usize,
    pub total_places_sum: f64,
    pub total_places_avg: f64,
    pub traditional_sum: f64,
    pub traditional_avg: f64,
    pub community_sum: f64,
    pub community_avg: f64,
    pub modern_sum: f64,
    pub modern_avg: f64,
    pub overall_index_avg: f64,
    pub traditional_index_avg: f64,
    pub community_index_avg: f64,
    pub modern_index_avg: f64,
    pub tracts: Vec<TractSummary>,
}

/// Running sums for one bucket.
#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    total_places: f64,
    traditional: f64,
    community: f64,
    modern: f64,
    overall_index: f64,
    traditional_index: f64,
    community_index: f64,
    modern_index: f64,
    tracts: Vec<TractSummary>,
}

impl Accumulator {
    fn add(&mut self, tract: &Tract) {
        let total = finite_or_zero(tract.total());
        self.count += 1;
        self.total_places += total;
        self.traditional += finite_or_zero(tract.traditional_count);
        self.community += finite_or_zero(tract.community_count);
        self.modern += finite_or_zero(tract.modern_count);
        self.overall_index += finite_or_zero(tract.overall);
        self.traditional_index += finite_or_zero(tract.traditional);
        self.community_index += finite_or_zero(tract.community);
        self.modern_index += finite_or_zero(tract.modern);
        self.tracts.push(TractSummary {
            geo_id: tract.geo_id.clone(),
            overall: tract.overall,
            total_places: total,
        });
    }

    fn finish(self, label: &str) -> CategoryAggregate {
        let avg = |sum: f64| if self.count == 0 { 0.0 } else { sum / self.count as f64 };

        CategoryAggregate {
            label: label.to_string(),
            count: self.count,
            total_places_sum: self.total_places,
            total_places_avg: avg(self.total_places),
            traditional_sum: self.traditional,
            traditional_avg: avg(self.traditional),
            community_sum: self.community,
            community_avg: avg(self.community),
            modern_sum: self.modern,
            modern_avg: avg(self.modern),
            overall_index_avg: avg(self.overall_index),
            traditional_index_avg: avg(self.traditional_index),
            community_index_avg: avg(self.community_index),
            modern_index_avg: avg(self.modern_index),
            tracts: self.tracts,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Per-category aggregates, in label order, plus the number of tracts no label claimed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregation {
    pub buckets: Vec<CategoryAggregate>,
    pub unclassified: usize,
}

impl Aggregation {
    pub fn get(&self, label: &str) -> Option<&CategoryAggregate> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }

    /// Tracts claimed by some bucket.
    pub fn classified(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.count).sum()
    }

    pub fn to_dataframe(&self) -> anyhow::Result<DataFrame> {
        let b = &self.buckets;

        Ok(DataFrame::new(vec![
            Series::new("category".into(), b.iter().map(|c| c.label.clone()).collect::<Vec<String>>()).into(),
            Series::new("tracts".into(), b.iter().map(|c| c.count as u32).collect::<Vec<u32>>()).into(),
            column("total_places_sum", b, |c| c.total_places_sum),
            column("total_places_avg", b, |c| c.total_places_avg),
            column("traditional_avg", b, |c| c.traditional_avg),
            column("community_avg", b, |c| c.community_avg),
            column("modern_avg", b, |c| c.modern_avg),
            column("third_place_index_avg", b, |c| c.overall_index_avg),
            column("traditional_index_avg", b, |c| c.traditional_index_avg),
            column("community_index_avg", b, |c| c.community_index_avg),
            column("modern_index_avg", b, |c| c.modern_index_avg),
        ])?)
    }
}

fn column(name: &str, buckets: &[CategoryAggregate], f: impl Fn(&CategoryAggregate) -> f64) -> Column {
    Series::new(name.into(), buckets.iter().map(f).collect::<Vec<f64>>()).into()
}

/// Group tracts into `labels` with a single pass.
/// `classify` returns the index of the tract's label; `None` or an out-of-range index leaves the
/// tract unclassified. Empty buckets report zero averages.
pub fn aggregate_by<L, F>(tracts: &TractSet, labels: &[L], classify: F) -> Aggregation
where
    L: AsRef<str>,
    F: Fn(&Tract) -> Option<usize>,
{
    let mut accumulators: Vec<Accumulator> = labels.iter().map(|_| Accumulator::default()).collect();
    let mut unclassified = 0;

    for tract in tracts {
        match classify(tract).and_then(|i| accumulators.get_mut(i)) {
            Some(acc) => acc.add(tract),
            None => unclassified += 1,
        }
    }

    let buckets = accumulators.into_iter().zip(labels)
        .map(|(acc, label)| acc.finish(label.as_ref()))
        .collect();

    Aggregation { buckets, unclassified }
}
