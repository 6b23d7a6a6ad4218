use geo::{BoundingRect, Coord, Rect};
use serde::Serialize;
use tracing::debug;

use crate::{
    map::{Place, PlaceCategory, PlaceSet, Tract},
    stats::{allocate, fallback_split, round_half_up},
};

/// Human-readable name for an OSM value: "place_of_worship" -> "Place Of Worship".
pub fn display_name(osm_value: &str) -> String {
    osm_value.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Places belonging to a tract.
/// Places linked by tract id win; otherwise fall back to places inside the tract's
/// bounding box padded by `buffer` degrees.
pub fn places_in_tract<'a>(tract: &Tract, places: &'a PlaceSet, buffer: f64) -> Vec<&'a Place> {
    let linked: Vec<&Place> = places.in_tract(&tract.geo_id).collect();
    if !linked.is_empty() { return linked }

    let Some(bounds) = tract.geometry.as_ref().and_then(|g| g.bounding_rect()) else {
        return Vec::new();
    };
    let padded = Rect::new(
        Coord { x: bounds.min().x - buffer, y: bounds.min().y - buffer },
        Coord { x: bounds.max().x + buffer, y: bounds.max().y + buffer },
    );

    let found = places.query_bbox(&padded);
    debug!("[analysis::places_in_tract] {} places within bounds of tract {}", found.len(), tract.geo_id);
    found
}

/// Whole-number place counts per category, for the breakdown chart.
pub fn places_breakdown(tract: &Tract) -> Vec<(PlaceCategory, u32)> {
    PlaceCategory::ALL.iter()
        .map(|&category| (category, whole_count(tract.count(category))))
        .collect()
}

fn whole_count(count: f64) -> u32 {
    if count.is_finite() { round_half_up(count).max(0.0) as u32 } else { 0 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceTypeEntry {
    pub label: String,
    pub count: u32,
    pub category: PlaceCategory,
}

/// Detailed place types for a tract, scaled to its official category counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlaceTypeBreakdown {
    /// Sorted by count, highest first.
    pub entries: Vec<PlaceTypeEntry>,
    pub traditional: u32,
    pub community: u32,
    pub modern: u32,
    /// Sum of the category counts (not of the entries).
    pub total: u32,
    /// True when the heuristic split was used because no places matched.
    pub estimated: bool,
    /// Units the allocator could not remove; see `Allocation::unapplied`.
    pub unapplied: u32,
}

/// Break a tract's official place counts down into specific place types.
pub fn place_types(tract: &Tract, places: &PlaceSet, buffer: f64) -> PlaceTypeBreakdown {
    let official = |category| whole_count(tract.count(category));
    let mut breakdown = PlaceTypeBreakdown {
        traditional: official(PlaceCategory::Traditional),
        community: official(PlaceCategory::Community),
        modern: official(PlaceCategory::Modern),
        ..Default::default()
    };
    breakdown.total = breakdown.traditional + breakdown.community + breakdown.modern;
    if breakdown.total == 0 { return breakdown }

    let matched = places_in_tract(tract, places, buffer);

    if matched.is_empty() {
        breakdown.estimated = true;
        for category in PlaceCategory::ALL {
            breakdown.entries.extend(
                fallback_split(category, official(category)).into_iter()
                    .map(|t| PlaceTypeEntry { label: t.label, count: t.count, category })
            );
        }
    } else {
        for category in PlaceCategory::ALL {
            let samples = sample_types(&matched, category);
            let allocation = allocate(&samples, official(category));
            breakdown.unapplied += allocation.unapplied;
            breakdown.entries.extend(
                allocation.entries.into_iter()
                    .map(|t| PlaceTypeEntry { label: t.label, count: t.count, category })
            );
        }
    }

    breakdown.entries.retain(|entry| entry.count > 0);
    breakdown.entries.sort_by(|a, b| b.count.cmp(&a.count));
    breakdown
}

/// Count matched places of one category by display name, in first-seen order.
fn sample_types(places: &[&Place], category: PlaceCategory) -> Vec<(String, u32)> {
    let mut samples: Vec<(String, u32)> = Vec::new();
    for place in places.iter().filter(|p| p.category == category) {
        let Some(sub_type) = place.sub_type.as_deref() else { continue };
        let name = display_name(sub_type);
        match samples.iter_mut().find(|(label, _)| *label == name) {
            Some((_, count)) => *count += 1,
            None => samples.push((name, 1)),
        }
    }
    samples
}
