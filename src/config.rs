//! Dashboard configuration.
//!
//! Every section falls back to the Houston defaults when omitted, so an empty
//! TOML file is a valid configuration.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{analysis::IncomeBracket, map::IndexLayer};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataPaths,
    pub map: MapView,
    pub colors: ColorScales,
    pub analysis: AnalysisConfig,
}

/// Locations of the two input feature collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub tracts: PathBuf,
    pub places: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            tracts: PathBuf::from("data/houston_tpi.geojson"),
            places: PathBuf::from("data/houston_places.geojson"),
        }
    }
}

/// Initial camera for the basemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    /// [lon, lat]
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    /// Tilt in degrees, used while 3D buildings are shown
    pub pitch: f64,
    pub bearing: f64,
    pub style: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [-95.3698, 29.7604],
            zoom: 10.0,
            min_zoom: 9.0,
            pitch: 45.0,
            bearing: 0.0,
            style: "mapbox://styles/mapbox/light-v11".to_string(),
        }
    }
}

/// Five-step choropleth scales, low to high
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScales {
    pub overall: Vec<String>,
    pub traditional: Vec<String>,
    pub community: Vec<String>,
    pub modern: Vec<String>,
}

impl Default for ColorScales {
    fn default() -> Self {
        let scale = |layer: IndexLayer| layer.default_colors().iter().map(|c| c.to_string()).collect();
        Self {
            overall: scale(IndexLayer::Overall),
            traditional: scale(IndexLayer::Traditional),
            community: scale(IndexLayer::Community),
            modern: scale(IndexLayer::Modern),
        }
    }
}

/// Parameters of the analysis panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-width bins over [0, 1] for distribution charts
    pub histogram_bins: usize,
    /// Padding in degrees around a tract's bounds when matching places spatially
    pub place_buffer_deg: f64,
    /// Density categories in display order
    pub density_categories: Vec<String>,
    /// Income brackets in display order
    pub income_brackets: Vec<IncomeBracket>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 20,
            place_buffer_deg: 0.002, // roughly 200m
            density_categories: ["Rural", "Suburban", "Urban", "Urban Core"]
                .iter().map(|s| s.to_string()).collect(),
            income_brackets: IncomeBracket::defaults(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("[Config::from_toml_str] Invalid TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("[Config::to_toml_string] Failed to serialize configuration")
    }

    fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        ensure!(analysis.histogram_bins > 0, "[Config] histogram_bins must be positive");
        ensure!(
            analysis.place_buffer_deg.is_finite() && analysis.place_buffer_deg >= 0.0,
            "[Config] place_buffer_deg must be a non-negative number"
        );
        for bracket in &analysis.income_brackets {
            if let Some(max) = bracket.max {
                ensure!(bracket.min < max, "[Config] income bracket '{}' has min >= max", bracket.label);
            }
        }
        Ok(())
    }
}
