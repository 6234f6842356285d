//! Static vector geometry loaded from GeoJSON feature collections.
//!
//! Natural Earth coastline and admin-0 country exports are supported.
//! Only line and polygon geometries are kept; polygon rings are treated
//! as outlines.

use std::collections::BTreeMap;
use std::path::Path;

use norad_core::types::GeoPoint;
use serde::Deserialize;
use serde_json::Value;

/// Errors raised while loading a geometry file.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a FeatureCollection, found {0:?}")]
    NotFeatureCollection(String),
}

/// One feature: a set of polylines plus its string attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub parts: Vec<Vec<GeoPoint>>,
    pub attributes: BTreeMap<String, String>,
}

impl Shape {
    /// Display name, looked up over the usual Natural Earth attribute keys.
    pub fn name(&self) -> Option<&str> {
        ["NAME", "ADMIN", "name"]
            .iter()
            .find_map(|k| self.attributes.get(*k))
            .map(String::as_str)
    }

    /// Whether this country is drawn with the highlight palette.
    pub fn is_highlighted(&self) -> bool {
        self.attributes
            .values()
            .any(|v| v.to_uppercase().contains("RUSSIA") || v == "RUS")
    }

    /// Total number of vertices across all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(Vec::len).sum()
    }
}

/// Both feature sets used by the static map layer.
#[derive(Debug, Clone, Default)]
pub struct MapGeometry {
    pub coastlines: Vec<Shape>,
    pub countries: Vec<Shape>,
}

impl MapGeometry {
    /// Load both files. A file that fails to load is logged and left empty
    /// so the map still renders with whatever is available.
    pub fn load(coastlines: &Path, countries: &Path) -> Self {
        Self {
            coastlines: load_or_warn(coastlines, "coastline"),
            countries: load_or_warn(countries, "country"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coastlines.is_empty() && self.countries.is_empty()
    }
}

fn load_or_warn(path: &Path, label: &str) -> Vec<Shape> {
    match load_shapes(path) {
        Ok(shapes) => {
            let vertices: usize = shapes.iter().map(Shape::vertex_count).sum();
            log::info!(
                "loaded {} {label} features ({vertices} vertices) from {}",
                shapes.len(),
                path.display()
            );
            shapes
        }
        Err(e) => {
            log::warn!("{label} geometry unavailable ({}): {e}", path.display());
            Vec::new()
        }
    }
}

/// Load a GeoJSON FeatureCollection from disk.
pub fn load_shapes(path: &Path) -> Result<Vec<Shape>, GeometryError> {
    let text = std::fs::read_to_string(path)?;
    parse_shapes(&text)
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<Value>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

/// Parse a GeoJSON FeatureCollection. Features without a supported
/// geometry are skipped.
pub fn parse_shapes(text: &str) -> Result<Vec<Shape>, GeometryError> {
    let raw: RawCollection = serde_json::from_str(text)?;
    if raw.kind != "FeatureCollection" {
        return Err(GeometryError::NotFeatureCollection(raw.kind));
    }

    let mut shapes = Vec::with_capacity(raw.features.len());
    for feature in raw.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        let parts = match geometry_parts(geometry) {
            Ok(parts) if !parts.is_empty() => parts,
            Ok(_) => continue,
            Err(e) => {
                log::debug!("skipping malformed feature geometry: {e}");
                continue;
            }
        };

        let attributes = feature
            .properties
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        shapes.push(Shape { parts, attributes });
    }
    Ok(shapes)
}

type Line = Vec<Vec<f64>>;

/// Flatten a geometry object into polylines.
fn geometry_parts(mut geometry: Value) -> Result<Vec<Vec<GeoPoint>>, serde_json::Error> {
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let coords = geometry
        .get_mut("coordinates")
        .map(Value::take)
        .unwrap_or(Value::Null);

    let lines: Vec<Line> = match kind.as_str() {
        "LineString" => vec![serde_json::from_value(coords)?],
        "MultiLineString" | "Polygon" => serde_json::from_value(coords)?,
        "MultiPolygon" => {
            let polygons: Vec<Vec<Line>> = serde_json::from_value(coords)?;
            polygons.into_iter().flatten().collect()
        }
        _ => Vec::new(),
    };

    Ok(lines
        .into_iter()
        .map(|line| {
            line.into_iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| GeoPoint::new(pos[1], pos[0]))
                .collect::<Vec<_>>()
        })
        .filter(|part| !part.is_empty())
        .collect())
}
