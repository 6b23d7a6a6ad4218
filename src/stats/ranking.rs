use std::collections::HashMap;

use polars::{frame::DataFrame, prelude::NamedFrom, series::Series};
use serde::Serialize;

use crate::map::{GeoId, IndexLayer, TractSet};

/// A tract's position in the overall ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub geo_id: GeoId,
    pub overall: f64,
    pub traditional: f64,
    pub community: f64,
    pub modern: f64,
}

/// Tracts sorted by overall index, highest first.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
    positions: HashMap<GeoId, usize>,
}

impl Ranking {
    /// Rank tracts by overall index (descending). Ties keep input order.
    pub fn build(tracts: &TractSet) -> Self {
        let mut sorted: Vec<(usize, RankingEntry)> = tracts.iter().enumerate()
            .map(|(source, tract)| (source, RankingEntry {
                geo_id: tract.geo_id.clone(),
                overall: tract.overall,
                traditional: tract.traditional,
                community: tract.community,
                modern: tract.modern,
            }))
            .collect();

        // sort_by is stable; NaN sorts last.
        sorted.sort_by(|(_, a), (_, b)| sort_key(b.overall).total_cmp(&sort_key(a.overall)));

        // A duplicated GEOID is ranked by the tract TractSet indexes for it.
        let mut positions = HashMap::with_capacity(sorted.len());
        for (i, (source, entry)) in sorted.iter().enumerate() {
            if tracts.position(&entry.geo_id) == Some(*source) {
                positions.insert(entry.geo_id.clone(), i);
            }
        }

        let entries = sorted.into_iter().map(|(_, entry)| entry).collect();
        Self { entries, positions }
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline] pub fn entries(&self) -> &[RankingEntry] { &self.entries }

    /// 1-based rank of a tract.
    pub fn rank(&self, geo_id: &GeoId) -> Option<usize> {
        self.positions.get(geo_id).map(|i| i + 1)
    }

    pub fn top(&self, n: usize) -> &[RankingEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn to_dataframe(&self) -> anyhow::Result<DataFrame> {
        let rank: Vec<u32> = (1..=self.entries.len() as u32).collect();
        let geo_ids: Vec<&str> = self.entries.iter().map(|e| e.geo_id.id()).collect();

        Ok(DataFrame::new(vec![
            Series::new("rank".into(), rank).into(),
            Series::new("geo_id".into(), geo_ids).into(),
            Series::new("third_place_index".into(), self.entries.iter().map(|e| e.overall).collect::<Vec<f64>>()).into(),
            Series::new("traditional_index".into(), self.entries.iter().map(|e| e.traditional).collect::<Vec<f64>>()).into(),
            Series::new("community_index".into(), self.entries.iter().map(|e| e.community).collect::<Vec<f64>>()).into(),
            Series::new("modern_index".into(), self.entries.iter().map(|e| e.modern).collect::<Vec<f64>>()).into(),
        ])?)
    }
}

#[inline]
fn sort_key(value: f64) -> f64 {
    if value.is_nan() { f64::NEG_INFINITY } else { value }
}

/// Raw per-index values in original tract order, used for histograms.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Distributions {
    pub overall: Vec<f64>,
    pub traditional: Vec<f64>,
    pub community: Vec<f64>,
    pub modern: Vec<f64>,
}

impl Distributions {
    pub fn build(tracts: &TractSet) -> Self {
        Self {
            overall: tracts.iter().map(|t| t.overall).collect(),
            traditional: tracts.iter().map(|t| t.traditional).collect(),
            community: tracts.iter().map(|t| t.community).collect(),
            modern: tracts.iter().map(|t| t.modern).collect(),
        }
    }

    pub fn values(&self, layer: IndexLayer) -> &[f64] {
        match layer {
            IndexLayer::Overall => &self.overall,
            IndexLayer::Traditional => &self.traditional,
            IndexLayer::Community => &self.community,
            IndexLayer::Modern => &self.modern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tract;

    fn tracts(values: &[(&str, f64)]) -> TractSet {
        TractSet::new(values.iter()
            .map(|&(id, overall)| Tract { geo_id: id.into(), overall, modern: overall / 2.0, ..Default::default() })
            .collect())
    }

    #[test]
    fn sorted_descending_with_ranks() {
        let ranking = Ranking::build(&tracts(&[("a", 0.8), ("b", 0.3), ("c", 0.5)]));
        let order: Vec<f64> = ranking.entries().iter().map(|e| e.overall).collect();
        assert_eq!(order, vec![0.8, 0.5, 0.3]);
        assert_eq!(ranking.rank(&"c".into()), Some(2));
        assert_eq!(ranking.rank(&"a".into()), Some(1));
        assert_eq!(ranking.rank(&"zzz".into()), None);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranking = Ranking::build(&tracts(&[("a", 0.4), ("b", 0.9), ("c", 0.4), ("d", 0.4)]));
        let ids: Vec<&str> = ranking.entries().iter().map(|e| e.geo_id.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn rank_counts_strictly_greater() {
        let set = tracts(&[("a", 0.1), ("b", 0.7), ("c", 0.3), ("d", 0.9), ("e", 0.5)]);
        let ranking = Ranking::build(&set);
        for tract in set.iter() {
            let greater = set.iter().filter(|t| t.overall > tract.overall).count();
            assert_eq!(ranking.rank(&tract.geo_id), Some(greater + 1));
        }
        for pair in ranking.entries().windows(2) { assert!(pair[0].overall >= pair[1].overall) }
    }

    #[test]
    fn top_clamps_and_distributions_keep_order() {
        let set = tracts(&[("a", 0.2), ("b", 0.6)]);
        let ranking = Ranking::build(&set);
        assert_eq!(ranking.top(5).len(), 2);
        assert_eq!(ranking.top(1)[0].geo_id.id(), "b");

        let dist = Distributions::build(&set);
        assert_eq!(dist.values(IndexLayer::Overall), &[0.2, 0.6]);
        assert_eq!(dist.values(IndexLayer::Modern), &[0.1, 0.3]);
    }

    #[test]
    fn nan_sorts_last() {
        let values: Vec<(String, f64)> = (0..2000)
            .map(|i| (format!("t{i}"), if i % 3 == 0 { f64::NAN } else { ((i * 37) % 101) as f64 / 100.0 }))
            .collect();
        let set = TractSet::new(values.iter()
            .map(|(id, overall)| Tract { geo_id: id.as_str().into(), overall: *overall, ..Default::default() })
            .collect());
        let ranking = Ranking::build(&set);

        let finite: Vec<f64> = ranking.entries().iter().map(|e| e.overall).take_while(|v| !v.is_nan()).collect();
        assert_eq!(finite.len(), 2000 - 667);
        for pair in finite.windows(2) { assert!(pair[0] >= pair[1]) }
        assert!(ranking.entries()[finite.len()..].iter().all(|e| e.overall.is_nan()));
    }

    #[test]
    fn duplicate_geoid_ranks_indexed_tract() {
        let set = tracts(&[("a", 0.2), ("b", 0.5), ("a", 0.9)]);
        let ranking = Ranking::build(&set);
        assert_eq!(ranking.len(), 3);
        // The indexed "a" is the first one (0.2), which sits third.
        assert_eq!(set.get(&"a".into()).map(|t| t.overall), Some(0.2));
        assert_eq!(ranking.rank(&"a".into()), Some(3));
        assert_eq!(ranking.rank(&"b".into()), Some(2));
    }

    #[test]
    fn ranking_table() {
        let df = Ranking::build(&tracts(&[("a", 0.2), ("b", 0.6)])).to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 6);
    }
}
