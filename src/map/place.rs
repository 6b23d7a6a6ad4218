use std::collections::BTreeMap;

use geo::{Point, Rect};
use rstar::{RTree, RTreeObject, AABB};

use super::{GeoId, PlaceCategory};

/// A point of interest classified as a third place.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: Option<String>,
    pub category: PlaceCategory,
    pub sub_type: Option<String>, // OSM value, e.g. "place_of_worship"
    pub tract_id: Option<GeoId>,
    pub location: Point<f64>,     // (lon, lat)
}

/// A place location in an R-tree, associated with a Place by index.
#[derive(Debug, Clone)]
struct PlacePoint {
    idx: usize, // Index of corresponding Place in places
    coord: [f64; 2],
}

impl RTreeObject for PlacePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { AABB::from_point(self.coord) }
}

/// All loaded places, in file order, with a spatial index over their locations.
#[derive(Debug, Clone)]
pub struct PlaceSet {
    places: Vec<Place>,
    rtree: RTree<PlacePoint>,
}

impl Default for PlaceSet {
    fn default() -> Self { Self::new(Vec::new()) }
}

impl PlaceSet {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                places.iter().enumerate()
                    .map(|(idx, place)| PlacePoint { idx, coord: [place.location.x(), place.location.y()] })
                    .collect()
            ),
            places,
        }
    }

    #[inline] pub fn len(&self) -> usize { self.places.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.places.is_empty() }

    #[inline] pub fn places(&self) -> &[Place] { &self.places }

    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, Place> { self.places.iter() }

    /// Places linked to a tract by id, in file order.
    pub fn in_tract<'a>(&'a self, geo_id: &GeoId) -> impl Iterator<Item = &'a Place> + use<'a> {
        let geo_id = geo_id.clone();
        self.places.iter().filter(move |place| place.tract_id.as_ref() == Some(&geo_id))
    }

    /// Places whose location lies inside `rect` (edges inclusive), in file order.
    pub fn query_bbox(&self, rect: &Rect<f64>) -> Vec<&Place> {
        let envelope = AABB::from_corners(rect.min().into(), rect.max().into());
        let mut indices: Vec<usize> = self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|point| point.idx)
            .collect();
        indices.sort_unstable();
        indices.into_iter().map(|i| &self.places[i]).collect()
    }

    pub fn by_category(&self, category: PlaceCategory) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(move |place| place.category == category)
    }

    pub fn category_counts(&self) -> BTreeMap<PlaceCategory, usize> {
        let mut counts: BTreeMap<PlaceCategory, usize> = PlaceCategory::ALL.iter().map(|&c| (c, 0)).collect();
        for place in &self.places {
            *counts.entry(place.category).or_default() += 1;
        }
        counts
    }
}
