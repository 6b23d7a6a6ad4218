use serde::Serialize;

/// Classification of third-place sub-types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Traditional,    // Restaurants, cafes, bars
    Community,      // Worship, community centers, libraries
    Modern,         // Coworking, marketplaces
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 3] = [
        PlaceCategory::Traditional,
        PlaceCategory::Community,
        PlaceCategory::Modern,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            PlaceCategory::Traditional => "traditional",
            PlaceCategory::Community => "community",
            PlaceCategory::Modern => "modern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traditional" => Some(PlaceCategory::Traditional),
            "community" => Some(PlaceCategory::Community),
            "modern" => Some(PlaceCategory::Modern),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlaceCategory::Traditional => "Traditional",
            PlaceCategory::Community => "Community",
            PlaceCategory::Modern => "Modern",
        }
    }

    /// Marker color, shared by the map layers and the charts.
    pub fn color(&self) -> &'static str {
        match self {
            PlaceCategory::Traditional => "#d35400",
            PlaceCategory::Community => "#2ecc71",
            PlaceCategory::Modern => "#c51b8a",
        }
    }
}
