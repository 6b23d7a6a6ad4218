use thirdplace::*;

const TRACTS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature",
      "properties": { "GEOID": "48201000100", "third_place_index": 0.72, "traditional_index": 0.6,
                      "community_index": 0.5, "modern_index": 0.2, "traditional_count": 5,
                      "community_count": 2, "modern_count": 1, "density_category": "Urban",
                      "median_income": 85000, "total_population": 4210, "population_density": 6120.4 },
      "geometry": { "type": "Polygon",
                    "coordinates": [[[-95.40, 29.70], [-95.39, 29.70], [-95.39, 29.71], [-95.40, 29.71], [-95.40, 29.70]]] } },
    { "type": "Feature",
      "properties": { "GEOID": "48201000200", "third_place_index": 0.31, "traditional_count": 1,
                      "community_count": 1, "modern_count": 0, "density_category": "Suburban",
                      "median_income": "42000" },
      "geometry": { "type": "Polygon",
                    "coordinates": [[[-95.30, 29.80], [-95.29, 29.80], [-95.29, 29.81], [-95.30, 29.81], [-95.30, 29.80]]] } },
    { "type": "Feature",
      "properties": { "GEOID": "48201000300", "third_place_index": 0.55, "traditional_count": 3,
                      "community_count": 0, "modern_count": 1, "density_category": "Urban",
                      "median_income": 120000 },
      "geometry": { "type": "MultiPolygon",
                    "coordinates": [[[[-95.20, 29.60], [-95.19, 29.60], [-95.19, 29.61], [-95.20, 29.61], [-95.20, 29.60]]]] } },
    { "type": "Feature",
      "properties": { "GEOID": "48201000400", "third_place_index": 0.10, "density_category": "Rural",
                      "median_income": null },
      "geometry": null }
  ]
}"#;

const PLACES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "name": "Bean There", "category": "traditional", "osm_value": "cafe", "tract_id": "48201000100" },
      "geometry": { "type": "Point", "coordinates": [-95.395, 29.705] } },
    { "type": "Feature", "properties": { "category": "traditional", "osm_value": "restaurant", "tract_id": "48201000100" },
      "geometry": { "type": "Point", "coordinates": [-95.396, 29.704] } },
    { "type": "Feature", "properties": { "category": "traditional", "osm_value": "restaurant", "GEOID": "48201000100" },
      "geometry": { "type": "Point", "coordinates": [-95.394, 29.706] } },
    { "type": "Feature", "properties": { "category": "community", "osm_value": "place_of_worship", "tract_id": "48201000100" },
      "geometry": { "type": "Point", "coordinates": [-95.393, 29.707] } },
    { "type": "Feature", "properties": { "category": "traditional", "osm_value": "cafe" },
      "geometry": { "type": "Point", "coordinates": [-95.195, 29.605] } },
    { "type": "Feature", "properties": { "category": "nightlife", "osm_value": "club" },
      "geometry": { "type": "Point", "coordinates": [-95.195, 29.605] } },
    { "type": "Feature", "properties": { "category": "modern", "osm_value": "coworking_space" },
      "geometry": null }
  ]
}"#;

fn tracts() -> TractSet { TractSet::from_geojson_str(TRACTS).unwrap() }

fn places() -> PlaceSet { PlaceSet::from_geojson_str(PLACES).unwrap() }

fn id(s: &str) -> GeoId { GeoId::from(s) }

#[test]
fn loads_and_skips_unusable_places() {
    assert_eq!(tracts().len(), 4);
    let places = places();
    assert_eq!(places.len(), 5);
    assert_eq!(places.category_counts().get(&PlaceCategory::Traditional), Some(&4));
    assert_eq!(places.places()[0].name.as_deref(), Some("Bean There"));
}

#[test]
fn ranking_orders_by_overall_index() {
    let ranking = Ranking::build(&tracts());
    let order: Vec<&str> = ranking.entries().iter().map(|e| e.geo_id.id()).collect();
    assert_eq!(order, vec!["48201000100", "48201000300", "48201000200", "48201000400"]);
    assert_eq!(ranking.rank(&id("48201000300")), Some(2));
    assert_eq!(ranking.rank(&id("48201999999")), None);
}

#[test]
fn density_and_income_tables() {
    let tracts = tracts();
    let config = AnalysisConfig::default();

    let density = density_table(&tracts, &config.density_categories);
    let urban = density.get("Urban").unwrap();
    assert_eq!(urban.count, 2);
    assert!((urban.overall_index_avg - 0.635).abs() < 1e-9);
    assert_eq!(urban.traditional_sum, 8.0);
    assert_eq!(density.get("Urban Core").unwrap().count, 0);
    assert_eq!(density.get("Urban Core").unwrap().overall_index_avg, 0.0);
    assert_eq!(density.unclassified, 0);

    let income = income_table(&tracts, &config.income_brackets);
    let counts: Vec<usize> = income.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![0, 1, 1, 1, 0]);
    assert_eq!(income.unclassified, 1);
    assert_eq!(income.get("$35k-$60k").unwrap().tracts[0].geo_id, id("48201000200"));
}

#[test]
fn correlations_use_tracts_with_income() {
    let rows = income_correlations(&tracts()).unwrap();
    assert_eq!(rows.len(), Metric::ALL.len());
    for row in &rows {
        assert_eq!(row.n, 3);
        assert!((-1.0..=1.0).contains(&row.r));
    }
    let overall = rows.iter().find(|r| r.metric == Metric::Overall).unwrap();
    assert_eq!(overall.direction, Direction::Positive);
}

#[test]
fn place_types_from_linked_places() {
    let tracts = tracts();
    let types = place_types(tracts.get(&id("48201000100")).unwrap(), &places(), 0.002);

    assert!(!types.estimated);
    assert_eq!((types.traditional, types.community, types.modern, types.total), (5, 2, 1, 8));
    let got: Vec<(&str, u32)> = types.entries.iter().map(|e| (e.label.as_str(), e.count)).collect();
    assert_eq!(got, vec![("Restaurant", 3), ("Cafe", 2), ("Place Of Worship", 2)]);
}

#[test]
fn place_types_from_bounding_box() {
    let tracts = tracts();
    let tract = tracts.get(&id("48201000300")).unwrap();
    assert_eq!(places_in_tract(tract, &places(), 0.002).len(), 1);

    let types = place_types(tract, &places(), 0.002);
    assert!(!types.estimated);
    assert_eq!(types.entries.len(), 1);
    assert_eq!(types.entries[0].label, "Cafe");
    assert_eq!(types.entries[0].count, 3);
}

#[test]
fn place_types_estimated_without_matches() {
    let tracts = tracts();
    let types = place_types(tracts.get(&id("48201000200")).unwrap(), &places(), 0.002);
    assert!(types.estimated);
    let got: Vec<(&str, u32)> = types.entries.iter().map(|e| (e.label.as_str(), e.count)).collect();
    assert_eq!(got, vec![("Restaurants", 1), ("Places of Worship", 1)]);
}

#[test]
fn uncategorised_places_do_not_count_as_matches() {
    let places = PlaceSet::from_geojson_str(r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature", "properties": { "category": "nightlife", "osm_value": "club", "tract_id": "48201000200" },
          "geometry": { "type": "Point", "coordinates": [-95.295, 29.805] } }
      ]
    }"#).unwrap();
    assert!(places.is_empty());

    let tracts = tracts();
    let types = place_types(tracts.get(&id("48201000200")).unwrap(), &places, 0.002);
    assert!(types.estimated);
    assert_eq!(types.entries.len(), 2);
}

#[test]
fn store_handles_places_before_tracts() {
    let mut store = Store::new(AppState::new(AnalysisConfig::default()));
    assert!(store.dispatch(Action::SelectTract(id("48201000100"))).is_empty());

    store.dispatch(Action::PlacesLoaded(places()));
    store.dispatch(Action::TractsLoaded(tracts()));
    store.dispatch(Action::SetActiveLayer(IndexLayer::from_layer_id("traditional-score")));
    let changes = store.dispatch(Action::SelectTract(id("48201000100")));
    assert_eq!(changes, vec![Change::Selection(Some(id("48201000100")))]);

    let details = store.state().details().unwrap();
    assert_eq!(details.rank, Some(1));
    assert_eq!(details.total_tracts, 4);
    assert_eq!(details.density_category, "Urban");
    assert!(details.demographics.iter().any(|d| d.label == "Median Household Income" && d.value == "$85,000"));
    assert_eq!(details.place_types.as_ref().map(|t| t.total), Some(8));
    assert_eq!(details.distribution.layer, IndexLayer::Traditional);
    assert_eq!(details.distribution.selected_bin, Some(12));
}

#[test]
fn density_table_exports_to_csv() {
    let mut df = density_table(&tracts(), &AnalysisConfig::default().density_categories)
        .to_dataframe().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("density.csv");
    write_csv(&mut df, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("category,tracts,total_places_sum"));
    assert!(lines.next().unwrap().starts_with("Rural,1,"));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn config_overrides_density_labels() {
    let config = Config::from_toml_str(r#"
        [analysis]
        density_categories = ["Urban", "Rural"]
    "#).unwrap();
    let table = density_table(&tracts(), &config.analysis.density_categories);
    assert_eq!(table.buckets.len(), 2);
    assert_eq!(table.unclassified, 1);
    assert_eq!(config.analysis.histogram_bins, 20);
}
