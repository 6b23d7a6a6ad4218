use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Point, Polygon};
use serde_json::{Map, Value};

/// Parse GeoJSON bytes and return the features of the top-level FeatureCollection.
pub(crate) fn read_features(bytes: &[u8]) -> Result<Vec<Value>> {
    let mut value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[io::geojson] Expected a FeatureCollection, found {}", value["type"]);
    }

    match value.get_mut("features").map(Value::take) {
        Some(Value::Array(features)) => Ok(features),
        _ => bail!("[io::geojson] FeatureCollection has no 'features' array"),
    }
}

/// Property object of a feature (empty if missing or null).
pub(crate) fn properties(feature: &Value) -> Map<String, Value> {
    feature.get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Numeric property, accepting numbers or numeric strings. Null, blank and non-finite values are None.
pub(crate) fn prop_f64(props: &Map<String, Value>, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Text property, accepting strings or numbers (GEOIDs are sometimes stored as integers).
pub(crate) fn prop_str(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a Polygon or MultiPolygon geometry. Other geometry types yield None.
pub(crate) fn parse_area_geometry(feature: &Value) -> Result<Option<MultiPolygon<f64>>> {
    let Some(geometry) = feature.get("geometry").and_then(Value::as_object) else {
        return Ok(None);
    };
    let coords = geometry.get("coordinates").and_then(Value::as_array);

    match (geometry.get("type").and_then(Value::as_str), coords) {
        (Some("Polygon"), Some(rings)) => Ok(Some(MultiPolygon(vec![parse_polygon_coords(rings)?]))),
        (Some("MultiPolygon"), Some(polygons)) => {
            let polygons = polygons.iter()
                .filter_map(Value::as_array)
                .map(|rings| parse_polygon_coords(rings))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(MultiPolygon(polygons)))
        }
        _ => Ok(None),
    }
}

/// Read a Point geometry as (lon, lat).
pub(crate) fn parse_point_geometry(feature: &Value) -> Option<Point<f64>> {
    let geometry = feature.get("geometry")?.as_object()?;
    if geometry.get("type")?.as_str()? != "Point" { return None }

    let coords = geometry.get("coordinates")?.as_array()?;
    let x = coords.first()?.as_f64()?;
    let y = coords.get(1)?.as_f64()?;
    Some(Point::new(x, y))
}

/// Parse GeoJSON Polygon coordinates: [exterior, hole, hole, ...].
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter()
        .map(|ring| {
            ring.as_array()
                .ok_or_else(|| anyhow!("[io::geojson] Invalid Polygon: ring must be an array"))
                .and_then(|coords| parse_ring_coords(coords))
        });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("[io::geojson] Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len() + 1);

    for coord_pair in coords {
        if let Some(coord_array) = coord_pair.as_array() {
            if coord_array.len() >= 2 {
                let x = coord_array[0].as_f64()
                    .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: x must be a number"))?;
                let y = coord_array[1].as_f64()
                    .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: y must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
