use std::collections::HashMap;

use geo::MultiPolygon;

use super::{GeoId, Metric, PlaceCategory};

/// A census tract with its index values, place counts and demographics.
#[derive(Debug, Clone, Default)]
pub struct Tract {
    pub geo_id: GeoId,
    pub overall: f64,
    pub traditional: f64,
    pub community: f64,
    pub modern: f64,
    pub traditional_count: f64, // Modeled counts, may be fractional
    pub community_count: f64,
    pub modern_count: f64,
    pub total_places: Option<f64>,
    pub density_category: Option<String>,
    pub median_income: Option<f64>,
    pub population_density: Option<f64>,
    pub total_population: Option<f64>,
    pub pct_bachelors: Option<f64>,
    pub geometry: Option<MultiPolygon<f64>>,
}

impl Tract {
    /// Total places, falling back to the sum of the category counts.
    pub fn total(&self) -> f64 {
        self.total_places
            .unwrap_or(self.traditional_count + self.community_count + self.modern_count)
    }

    pub fn count(&self, category: PlaceCategory) -> f64 {
        match category {
            PlaceCategory::Traditional => self.traditional_count,
            PlaceCategory::Community => self.community_count,
            PlaceCategory::Modern => self.modern_count,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Overall => self.overall,
            Metric::Traditional => self.traditional,
            Metric::Community => self.community,
            Metric::Modern => self.modern,
            Metric::TraditionalCount => self.traditional_count,
            Metric::CommunityCount => self.community_count,
            Metric::ModernCount => self.modern_count,
            Metric::TotalPlaces => self.total(),
        }
    }

    /// Median income if known and positive.
    pub fn income(&self) -> Option<f64> {
        self.median_income.filter(|income| income.is_finite() && *income > 0.0)
    }
}

/// All loaded tracts, in file order, with a GEOID index.
#[derive(Debug, Clone, Default)]
pub struct TractSet {
    tracts: Vec<Tract>,
    index: HashMap<GeoId, u32>, // Map between geo_ids and contiguous indices.
}

impl TractSet {
    /// Build a set from tracts. For a duplicated GEOID the first tract in file order is the one indexed.
    pub fn new(tracts: Vec<Tract>) -> Self {
        let mut index = HashMap::with_capacity(tracts.len());
        for (i, tract) in tracts.iter().enumerate() {
            index.entry(tract.geo_id.clone()).or_insert(i as u32);
        }

        Self { tracts, index }
    }

    #[inline] pub fn len(&self) -> usize { self.tracts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.tracts.is_empty() }

    #[inline] pub fn tracts(&self) -> &[Tract] { &self.tracts }

    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, Tract> { self.tracts.iter() }

    pub fn get(&self, geo_id: &GeoId) -> Option<&Tract> {
        self.index.get(geo_id).map(|&i| &self.tracts[i as usize])
    }

    pub fn contains(&self, geo_id: &GeoId) -> bool { self.index.contains_key(geo_id) }

    /// Position of the indexed tract for `geo_id`.
    pub fn position(&self, geo_id: &GeoId) -> Option<usize> {
        self.index.get(geo_id).map(|&i| i as usize)
    }

    /// Values of one metric, in tract order.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.tracts.iter().map(|tract| tract.value(metric)).collect()
    }
}

impl<'a> IntoIterator for &'a TractSet {
    type Item = &'a Tract;
    type IntoIter = std::slice::Iter<'a, Tract>;

    fn into_iter(self) -> Self::IntoIter { self.tracts.iter() }
}
