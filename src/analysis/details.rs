use serde::Serialize;

use crate::{
    analysis::{place_types, places_breakdown, PlaceTypeBreakdown},
    common::{format_currency, format_density, format_number, format_percent},
    config::AnalysisConfig,
    map::{GeoId, IndexLayer, PlaceCategory, PlaceSet, Tract},
    stats::{Distributions, Histogram, Ranking},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicItem {
    pub label: String,
    pub value: String,
}

/// Histogram of the active layer with the selected tract's value marked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionView {
    pub layer: IndexLayer,
    pub title: String,
    pub value: f64,
    pub histogram: Histogram,
    pub selected_bin: Option<usize>,
}

impl DistributionView {
    pub fn build(distributions: &Distributions, layer: IndexLayer, value: f64, bins: usize) -> Self {
        let histogram = Histogram::build(distributions.values(layer), bins);
        Self {
            layer,
            title: layer.title().to_string(),
            value,
            selected_bin: histogram.bin_of(value),
            histogram,
        }
    }
}

/// Everything the tract panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractDetails {
    pub geo_id: GeoId,
    pub density_category: String,
    pub overall: f64,
    pub traditional: f64,
    pub community: f64,
    pub modern: f64,
    pub rank: Option<usize>,
    pub total_tracts: usize,
    pub demographics: Vec<DemographicItem>,
    pub places: Vec<(PlaceCategory, u32)>,
    /// None until places have loaded.
    pub place_types: Option<PlaceTypeBreakdown>,
    pub distribution: DistributionView,
}

impl TractDetails {
    pub fn build(
        tract: &Tract,
        ranking: &Ranking,
        distributions: &Distributions,
        places: Option<&PlaceSet>,
        layer: IndexLayer,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            geo_id: tract.geo_id.clone(),
            density_category: tract.density_category.clone().unwrap_or_else(|| "N/A".to_string()),
            overall: tract.overall,
            traditional: tract.traditional,
            community: tract.community,
            modern: tract.modern,
            rank: ranking.rank(&tract.geo_id),
            total_tracts: ranking.len(),
            demographics: demographic_items(tract),
            places: places_breakdown(tract),
            place_types: places.map(|places| place_types(tract, places, config.place_buffer_deg)),
            distribution: DistributionView::build(
                distributions,
                layer,
                tract.value(layer.metric()),
                config.histogram_bins,
            ),
        }
    }
}

/// Demographic rows for the panel; fields absent from the data are left out.
pub fn demographic_items(tract: &Tract) -> Vec<DemographicItem> {
    let items: [(&str, Option<f64>, fn(Option<f64>) -> String); 5] = [
        ("Population Density", tract.population_density, format_density),
        ("Total Population", tract.total_population, |v| format_number(v, 0)),
        ("Total Places", tract.total_places, |v| format_number(v, 0)),
        ("Median Household Income", tract.median_income, format_currency),
        ("Bachelor's Degree or Higher", tract.pct_bachelors, format_percent),
    ];

    items.into_iter()
        .filter(|(_, value, _)| value.is_some())
        .map(|(label, value, format)| DemographicItem { label: label.to_string(), value: format(value) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TractSet;

    fn sample() -> TractSet {
        TractSet::new(vec![
            Tract {
                geo_id: "a".into(),
                overall: 0.8,
                traditional: 0.36,
                traditional_count: 10.0,
                median_income: Some(52_000.0),
                total_population: Some(4_210.0),
                pct_bachelors: Some(0.0),
                ..Default::default()
            },
            Tract { geo_id: "b".into(), overall: 0.3, ..Default::default() },
            Tract { geo_id: "c".into(), overall: 0.5, density_category: Some("Urban".into()), ..Default::default() },
        ])
    }

    #[test]
    fn demographics_skip_absent_fields() {
        let set = sample();
        let items = demographic_items(set.get(&"a".into()).unwrap());
        let got: Vec<(&str, &str)> = items.iter().map(|i| (i.label.as_str(), i.value.as_str())).collect();
        assert_eq!(got, vec![
            ("Total Population", "4,210"),
            ("Median Household Income", "$52,000"),
            ("Bachelor's Degree or Higher", "N/A"),
        ]);
    }

    #[test]
    fn details_include_rank_and_distribution() {
        let set = sample();
        let ranking = Ranking::build(&set);
        let distributions = Distributions::build(&set);
        let config = AnalysisConfig::default();

        let c = set.get(&"c".into()).unwrap();
        let details = TractDetails::build(c, &ranking, &distributions, None, IndexLayer::Overall, &config);
        assert_eq!(details.rank, Some(2));
        assert_eq!(details.total_tracts, 3);
        assert_eq!(details.density_category, "Urban");
        assert!(details.place_types.is_none());
        assert_eq!(details.distribution.selected_bin, Some(10));
        assert_eq!(details.distribution.histogram.bins().len(), 20);

        let a = set.get(&"a".into()).unwrap();
        let details = TractDetails::build(a, &ranking, &distributions, Some(&PlaceSet::default()), IndexLayer::Traditional, &config);
        assert_eq!(details.density_category, "N/A");
        assert_eq!(details.distribution.value, 0.36);
        assert_eq!(details.distribution.selected_bin, Some(7));
        assert_eq!(details.distribution.title, "Traditional Index");
        assert!(details.place_types.as_ref().unwrap().estimated);
    }
}
