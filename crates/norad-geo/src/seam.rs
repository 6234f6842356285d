//! Antimeridian handling.
//!
//! Two distinct tests: projected paths split on large screen-space jumps,
//! static geometry splits on raw longitude jumps before projection.

use glam::Vec2;
use norad_core::types::GeoPoint;

/// Split a projected polyline wherever consecutive x-coordinates jump by
/// more than half the surface width. Runs shorter than two points are
/// dropped since they cannot be stroked.
pub fn split_on_seam(points: &[Vec2], width: f32) -> Vec<Vec<Vec2>> {
    let mut segments = Vec::new();
    if points.len() < 2 {
        return segments;
    }

    let limit = width / 2.0;
    let mut current = vec![points[0]];
    for pair in points.windows(2) {
        if (pair[1].x - pair[0].x).abs() > limit {
            if current.len() >= 2 {
                segments.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
        current.push(pair[1]);
    }
    if current.len() >= 2 {
        segments.push(current);
    }
    segments
}

/// Split a geographic polyline wherever consecutive longitudes differ by
/// more than 180 degrees. Every run is returned, including singletons.
pub fn split_at_antimeridian(coords: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    let mut runs = Vec::new();
    let Some(&first) = coords.first() else {
        return runs;
    };

    let mut current = vec![first];
    for pair in coords.windows(2) {
        if (pair[1].lon - pair[0].lon).abs() > 180.0 {
            runs.push(std::mem::take(&mut current));
        }
        current.push(pair[1]);
    }
    runs.push(current);
    runs
}
