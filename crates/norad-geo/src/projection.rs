//! Geographic projection: converts lat/lon to surface pixel coordinates.
//!
//! Uses a plain equirectangular (plate carrée) mapping stretched over the
//! whole viewport. Longitude -180 maps to x = 0, latitude 90 to y = 0.

use glam::Vec2;
use norad_core::types::{GeoPoint, Viewport};

/// Equirectangular projection sized to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    width: f64,
    height: f64,
}

impl Equirectangular {
    /// Create a projection for the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width as f64,
            height: viewport.height as f64,
        }
    }

    /// Project a geographic point to surface coordinates (pixels).
    ///
    /// Computed in f64 and narrowed once; fractional positions are kept so
    /// seam detection and anti-aliased strokes see the exact value.
    pub fn project(&self, p: GeoPoint) -> Vec2 {
        let x = (p.lon + 180.0) / 360.0 * self.width;
        let y = (90.0 - p.lat) / 180.0 * self.height;
        Vec2::new(x as f32, y as f32)
    }

    /// Project every point of a sequence.
    pub fn project_all(&self, points: &[GeoPoint]) -> Vec<Vec2> {
        points.iter().map(|&p| self.project(p)).collect()
    }

    /// Inverse mapping, used by tests and debugging overlays.
    pub fn unproject(&self, v: Vec2) -> GeoPoint {
        let lon = v.x as f64 / self.width * 360.0 - 180.0;
        let lat = 90.0 - v.y as f64 / self.height * 180.0;
        GeoPoint::new(lat, lon)
    }

    /// Surface width in pixels.
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    /// Surface height in pixels.
    pub fn height(&self) -> f32 {
        self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj(w: u32, h: u32) -> Equirectangular {
        Equirectangular::new(Viewport::new(w, h).unwrap())
    }

    #[test]
    fn test_projection_corners() {
        let p = proj(1280, 720);

        let nw = p.project(GeoPoint::new(90.0, -180.0));
        assert_eq!(nw, Vec2::new(0.0, 0.0));

        let se = p.project(GeoPoint::new(-90.0, 180.0));
        assert_eq!(se, Vec2::new(1280.0, 720.0));

        let center = p.project(GeoPoint::new(0.0, 0.0));
        assert_eq!(center, Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_projection_keeps_fraction() {
        let p = proj(1280, 720);
        // Washington DC
        let v = p.project(GeoPoint::new(38.9, -77.0));
        let expected_x = (-77.0 + 180.0) / 360.0 * 1280.0;
        let expected_y = (90.0 - 38.9) / 180.0 * 720.0;
        assert!((v.x as f64 - expected_x).abs() < 1e-3, "x: {} vs {expected_x}", v.x);
        assert!((v.y as f64 - expected_y).abs() < 1e-3, "y: {} vs {expected_y}", v.y);
        assert!(v.x.fract() != 0.0, "fractional x should be preserved");
    }

    #[test]
    fn test_projection_roundtrip() {
        let p = proj(1920, 1080);
        let g = GeoPoint::new(55.75, 37.62);
        let back = p.unproject(p.project(g));
        assert!((g.lat - back.lat).abs() < 1e-3, "lat: {} vs {}", g.lat, back.lat);
        assert!((g.lon - back.lon).abs() < 1e-3, "lon: {} vs {}", g.lon, back.lon);
    }
}
