//! Patrol aircraft flying closed loops over the map.

use std::f64::consts::TAU;

use glam::Vec2;
use norad_core::constants::*;
use norad_core::types::GeoPoint;
use norad_geo::geodesic::normalize_lon;
use norad_geo::Equirectangular;
use norad_render::glow::layer_alpha;
use norad_render::{draw_glow_line, draw_glow_point, Canvas, GlowRing};
use rand::Rng;

use super::Entity;

const BLIP_RADIUS: f32 = 3.0;
const BLIP_GLOW_LAYERS: u32 = 3;
const TAG_GLOW_LAYERS: u32 = 2;
/// Leader line end, relative to the blip. The tag box hangs below it.
const TAG_ANCHOR: Vec2 = Vec2::new(10.0, -8.0);
const TAG_SIZE: Vec2 = Vec2::new(10.0, 6.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub center: GeoPoint,
    pub radius_deg: f64,
    pub period: f64,
    t0: f64,
    waypoints: Vec<GeoPoint>,
    path: Vec<Vec2>,
}

impl Aircraft {
    pub fn new(
        center: GeoPoint,
        radius_deg: f64,
        period: f64,
        t0: f64,
        projection: &Equirectangular,
    ) -> Self {
        let waypoints: Vec<GeoPoint> = (0..AIRCRAFT_LOOP_SAMPLES)
            .map(|i| {
                let theta = TAU * i as f64 / AIRCRAFT_LOOP_SAMPLES as f64;
                GeoPoint::new(
                    center.lat + radius_deg * theta.sin(),
                    normalize_lon(center.lon + radius_deg * theta.cos()),
                )
            })
            .collect();
        let path = projection.project_all(&waypoints);
        Self {
            center,
            radius_deg,
            period,
            t0,
            waypoints,
            path,
        }
    }

    /// A patrol with a random center, loop radius and period.
    pub fn random(rng: &mut impl Rng, t0: f64, projection: &Equirectangular) -> Self {
        let center = GeoPoint::new(
            rng.gen_range(AIRCRAFT_LAT_RANGE.0..=AIRCRAFT_LAT_RANGE.1),
            rng.gen_range(-180.0..180.0),
        );
        let radius = rng.gen_range(AIRCRAFT_RADIUS_DEG.0..=AIRCRAFT_RADIUS_DEG.1);
        let period = rng.gen_range(AIRCRAFT_LOOP_SECS.0..=AIRCRAFT_LOOP_SECS.1);
        Self::new(center, radius, period, t0, projection)
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Screen position at `now`.
    pub fn position(&self, now: f64) -> Vec2 {
        let idx = (self.progress(now) * (self.path.len() - 1) as f64) as usize;
        self.path[idx.min(self.path.len() - 1)]
    }
}

impl Entity for Aircraft {
    fn t0(&self) -> f64 {
        self.t0
    }

    fn duration(&self) -> f64 {
        self.period
    }

    /// Fraction of the current lap, in `[0, 1)`.
    fn progress(&self, now: f64) -> f64 {
        ((now - self.t0) / self.period).rem_euclid(1.0)
    }

    fn alive(&self, _now: f64) -> bool {
        true
    }

    fn draw(&self, canvas: &mut Canvas, now: f64) {
        let head = self.position(now);
        let rings: Vec<GlowRing> = (1..=BLIP_GLOW_LAYERS)
            .rev()
            .map(|i| {
                GlowRing::new(
                    BLIP_RADIUS + 2.0 * i as f32,
                    AIRCRAFT_GLOW,
                    layer_alpha(i, BLIP_GLOW_LAYERS),
                )
            })
            .collect();
        draw_glow_point(canvas, head, BLIP_RADIUS, AIRCRAFT, &rings);

        let anchor = head + TAG_ANCHOR;
        let tag = [
            head,
            anchor,
            anchor + Vec2::new(TAG_SIZE.x, 0.0),
            anchor + TAG_SIZE,
            anchor + Vec2::new(0.0, TAG_SIZE.y),
            anchor,
        ];
        draw_glow_line(canvas, &tag, AIRCRAFT, AIRCRAFT_GLOW, 1.0, TAG_GLOW_LAYERS);
    }

    fn reproject(&mut self, projection: &Equirectangular) {
        self.path = projection.project_all(&self.waypoints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norad_core::types::Viewport;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn projection() -> Equirectangular {
        Equirectangular::new(Viewport::default())
    }

    #[test]
    fn test_loop_wraps_longitude() {
        let a = Aircraft::new(GeoPoint::new(10.0, 175.0), 10.0, 30.0, 0.0, &projection());
        assert_eq!(a.waypoints().len(), AIRCRAFT_LOOP_SAMPLES);
        assert!(a.waypoints().iter().all(|p| (-180.0..180.0).contains(&p.lon)));
        // theta = 0 lands at lon 185 -> -175.
        assert!((a.waypoints()[0].lon + 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_wraps_and_never_dies() {
        let a = Aircraft::new(GeoPoint::new(0.0, 0.0), 5.0, 20.0, 0.0, &projection());
        assert_eq!(a.progress(5.0), 0.25);
        assert_eq!(a.progress(25.0), 0.25);
        assert!(a.alive(1e6));
        assert_eq!(a.position(0.0), a.path()[0]);
        assert_eq!(a.position(20.0), a.path()[0]);
    }

    #[test]
    fn test_random_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let a = Aircraft::random(&mut rng, 0.0, &projection());
            assert!((-60.0..=60.0).contains(&a.center.lat));
            assert!((3.0..=12.0).contains(&a.radius_deg));
            assert!((20.0..=60.0).contains(&a.period));
        }
    }

    #[test]
    fn test_reproject_scales_path() {
        let mut a = Aircraft::new(GeoPoint::new(20.0, 40.0), 6.0, 30.0, 0.0, &projection());
        let before = a.path()[0];
        a.reproject(&Equirectangular::new(Viewport::new(1920, 1080).unwrap()));
        assert!((a.path()[0] - before * 1.5).length() < 1e-3);
    }

    #[test]
    fn test_draw_blip() {
        let a = Aircraft::new(GeoPoint::new(0.0, 0.0), 5.0, 20.0, 0.0, &projection());
        let mut canvas = Canvas::new(Viewport::default());
        a.draw(&mut canvas, 0.0);
        let head = a.position(0.0);
        assert_eq!(canvas.frame.get(head.x.round() as i32, head.y.round() as i32), Some(AIRCRAFT));
    }

    #[test]
    fn test_tag_box_hangs_below_anchor() {
        // Loop start at lon 0, lat 0 sits on a whole pixel.
        let a = Aircraft::new(GeoPoint::new(0.0, -5.0), 5.0, 20.0, 0.0, &projection());
        let mut canvas = Canvas::new(Viewport::default());
        a.draw(&mut canvas, 0.0);

        let anchor = a.position(0.0) + TAG_ANCHOR;
        let pixel = |p: Vec2| canvas.frame.get(p.x.round() as i32, p.y.round() as i32);
        let right_edge_below = anchor + Vec2::new(TAG_SIZE.x, TAG_SIZE.y / 2.0);
        let right_edge_above = anchor + Vec2::new(TAG_SIZE.x, -TAG_SIZE.y / 2.0);
        assert_eq!(pixel(right_edge_below), Some(AIRCRAFT));
        assert_eq!(pixel(anchor + TAG_SIZE), Some(AIRCRAFT));
        assert_ne!(pixel(right_edge_above), Some(AIRCRAFT));
    }
}
