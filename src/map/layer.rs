use serde::Serialize;

use crate::config::ColorScales;

/// Choropleth layer shown on the map, one per index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLayer {
    #[default]
    Overall,
    Traditional,
    Community,
    Modern,
}

/// Everything the UI needs to know about a layer, kept in one table.
struct LayerInfo {
    layer_id: &'static str,
    property: &'static str,
    title: &'static str,
    colors: [&'static str; 5],
}

const LAYERS: [LayerInfo; 4] = [
    LayerInfo {
        layer_id: "overall-index",
        property: "third_place_index",
        title: "Third Place Index",
        colors: ["#e5f5f9", "#99d8c9", "#41b6c4", "#2c7fb8", "#253494"],
    },
    LayerInfo {
        layer_id: "traditional-score",
        property: "traditional_index",
        title: "Traditional Index",
        colors: ["#fff5eb", "#fed8b1", "#fc8d59", "#e67e22", "#d35400"],
    },
    LayerInfo {
        layer_id: "community-score",
        property: "community_index",
        title: "Community Index",
        colors: ["#eafaf1", "#a9dfbf", "#7dcea0", "#2ecc71", "#1e8449"],
    },
    LayerInfo {
        layer_id: "modern-score",
        property: "modern_index",
        title: "Modern Index",
        colors: ["#fde0dd", "#fa9fb5", "#f768a1", "#c51b8a", "#7a0177"],
    },
];

const LEGEND_LABELS: [&str; 5] = ["Very Low", "Low", "Medium", "High", "Very High"];
const LEGEND_VALUES: [&str; 5] = ["0", "0.2", "0.4", "0.6", "0.8+"];
const STOPS: [f64; 5] = [0.0, 0.2, 0.4, 0.6, 0.8];

/// One row of the map legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
    pub value: String,
}

impl IndexLayer {
    pub const ALL: [IndexLayer; 4] = [
        IndexLayer::Overall,
        IndexLayer::Traditional,
        IndexLayer::Community,
        IndexLayer::Modern,
    ];

    fn info(&self) -> &'static LayerInfo {
        match self {
            IndexLayer::Overall => &LAYERS[0],
            IndexLayer::Traditional => &LAYERS[1],
            IndexLayer::Community => &LAYERS[2],
            IndexLayer::Modern => &LAYERS[3],
        }
    }

    /// Unknown ids fall back to the overall layer.
    pub fn from_layer_id(id: &str) -> Self {
        Self::ALL.into_iter()
            .find(|layer| layer.layer_id() == id)
            .unwrap_or_default()
    }

    /// Parse a short name ("overall", "traditional", ...) or a layer id.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overall" | "overall-index" => Some(IndexLayer::Overall),
            "traditional" | "traditional-score" => Some(IndexLayer::Traditional),
            "community" | "community-score" => Some(IndexLayer::Community),
            "modern" | "modern-score" => Some(IndexLayer::Modern),
            _ => None,
        }
    }

    #[inline] pub fn layer_id(&self) -> &'static str { self.info().layer_id }

    /// Tract property holding this layer's value.
    #[inline] pub fn property(&self) -> &'static str { self.info().property }

    #[inline] pub fn title(&self) -> &'static str { self.info().title }

    #[inline] pub fn default_colors(&self) -> [&'static str; 5] { self.info().colors }

    #[inline]
    pub fn metric(&self) -> Metric {
        match self {
            IndexLayer::Overall => Metric::Overall,
            IndexLayer::Traditional => Metric::Traditional,
            IndexLayer::Community => Metric::Community,
            IndexLayer::Modern => Metric::Modern,
        }
    }

    /// Configured scale for this layer, or the default overall scale if it is too short.
    pub fn colors<'a>(&self, scales: &'a ColorScales) -> Vec<&'a str> {
        let scale = match self {
            IndexLayer::Overall => &scales.overall,
            IndexLayer::Traditional => &scales.traditional,
            IndexLayer::Community => &scales.community,
            IndexLayer::Modern => &scales.modern,
        };

        if scale.len() < 5 {
            tracing::warn!("[IndexLayer::colors] invalid color scale for layer '{}', using default", self.layer_id());
            return IndexLayer::Overall.default_colors().to_vec();
        }
        scale.iter().take(5).map(String::as_str).collect()
    }

    /// Linear interpolation stops for the choropleth fill.
    pub fn color_stops(&self, scales: &ColorScales) -> Vec<(f64, String)> {
        STOPS.iter().copied()
            .zip(self.colors(scales))
            .map(|(stop, color)| (stop, color.to_string()))
            .collect()
    }

    pub fn legend(&self, scales: &ColorScales) -> Vec<LegendEntry> {
        self.colors(scales).into_iter().enumerate()
            .map(|(i, color)| LegendEntry {
                color: color.to_string(),
                label: LEGEND_LABELS[i].to_string(),
                value: LEGEND_VALUES[i].to_string(),
            })
            .collect()
    }
}

/// Per-tract quantities the analyses operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Overall,
    Traditional,
    Community,
    Modern,
    TraditionalCount,
    CommunityCount,
    ModernCount,
    TotalPlaces,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Overall,
        Metric::Traditional,
        Metric::Community,
        Metric::Modern,
        Metric::TraditionalCount,
        Metric::CommunityCount,
        Metric::ModernCount,
        Metric::TotalPlaces,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Overall => "third_place_index",
            Metric::Traditional => "traditional_index",
            Metric::Community => "community_index",
            Metric::Modern => "modern_index",
            Metric::TraditionalCount => "traditional_count",
            Metric::CommunityCount => "community_count",
            Metric::ModernCount => "modern_count",
            Metric::TotalPlaces => "total_places",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Overall => "Third Place Index",
            Metric::Traditional => "Traditional Index",
            Metric::Community => "Community Index",
            Metric::Modern => "Modern Index",
            Metric::TraditionalCount => "Traditional Places",
            Metric::CommunityCount => "Community Places",
            Metric::ModernCount => "Modern Places",
            Metric::TotalPlaces => "Total Places",
        }
    }
}
