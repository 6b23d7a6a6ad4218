use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};

use crate::{common::*, map::{GeoId, Place, PlaceCategory, PlaceSet, Tract, TractSet}};

impl TractSet {
    /// Read tracts from a GeoJSON file.
    pub fn from_geojson_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read tracts file: {}", path.display()))?;
        Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("Failed to load tracts from {}", path.display()))
    }

    #[inline]
    pub fn from_geojson_str(text: &str) -> Result<Self> { Self::from_geojson_bytes(text.as_bytes()) }

    /// Read tracts from GeoJSON bytes. Every feature must carry a GEOID.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let features = read_features(bytes)?;

        let tracts = features.iter().enumerate()
            .map(|(i, feature)| {
                let props = properties(feature);
                let geo_id = prop_str(&props, "GEOID")
                    .ok_or_else(|| anyhow!("[TractSet::from_geojson] Feature {i} has no GEOID"))?;
                let geometry = parse_area_geometry(feature)
                    .with_context(|| format!("[TractSet::from_geojson] Bad geometry for tract {geo_id}"))?;

                Ok(Tract {
                    geo_id: GeoId::from(geo_id),
                    overall: prop_f64(&props, "third_place_index").unwrap_or(0.0),
                    traditional: prop_f64(&props, "traditional_index").unwrap_or(0.0),
                    community: prop_f64(&props, "community_index").unwrap_or(0.0),
                    modern: prop_f64(&props, "modern_index").unwrap_or(0.0),
                    traditional_count: prop_f64(&props, "traditional_count").unwrap_or(0.0),
                    community_count: prop_f64(&props, "community_count").unwrap_or(0.0),
                    modern_count: prop_f64(&props, "modern_count").unwrap_or(0.0),
                    total_places: prop_f64(&props, "total_places"),
                    density_category: prop_str(&props, "density_category"),
                    median_income: prop_f64(&props, "median_income"),
                    population_density: prop_f64(&props, "population_density"),
                    total_population: prop_f64(&props, "total_population"),
                    pct_bachelors: prop_f64(&props, "pct_bachelors"),
                    geometry,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("[TractSet::from_geojson] loaded {} tracts", tracts.len());
        Ok(TractSet::new(tracts))
    }
}

impl PlaceSet {
    /// Read places from a GeoJSON file.
    pub fn from_geojson_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read places file: {}", path.display()))?;
        Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("Failed to load places from {}", path.display()))
    }

    #[inline]
    pub fn from_geojson_str(text: &str) -> Result<Self> { Self::from_geojson_bytes(text.as_bytes()) }

    /// Read places from GeoJSON bytes.
    /// Features without a Point geometry or a known category are skipped.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let features = read_features(bytes)?;
        let mut places = Vec::with_capacity(features.len());
        let (mut no_point, mut no_category) = (0usize, 0usize);

        for feature in &features {
            let props = properties(feature);

            let Some(location) = parse_point_geometry(feature) else {
                no_point += 1;
                continue;
            };
            let Some(category) = prop_str(&props, "category").and_then(|c| PlaceCategory::from_str(&c)) else {
                no_category += 1;
                continue;
            };

            places.push(Place {
                name: prop_str(&props, "name"),
                category,
                sub_type: prop_str(&props, "osm_value"),
                tract_id: prop_str(&props, "tract_id")
                    .or_else(|| prop_str(&props, "GEOID"))
                    .map(GeoId::from),
                location,
            });
        }

        if no_point > 0 { warn!("[PlaceSet::from_geojson] skipped {no_point} features without point geometry") }
        if no_category > 0 { warn!("[PlaceSet::from_geojson] skipped {no_category} features with unknown category") }
        debug!("[PlaceSet::from_geojson] building R-tree over {} places", places.len());
        info!("[PlaceSet::from_geojson] loaded {} places", places.len());

        Ok(PlaceSet::new(places))
    }
}
