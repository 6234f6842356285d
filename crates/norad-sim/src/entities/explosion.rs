//! Impact explosions: expanding staggered rings and a short central flash.

use glam::Vec2;
use norad_core::constants::*;
use norad_core::types::{Color, GeoPoint};
use norad_geo::Equirectangular;
use norad_render::{draw_glow_ring, raster, BlendMode, Canvas, GlowRing};

use super::Entity;

/// Halo offsets from the ring radius and their base alpha, outer first.
const HALOS: [(f32, f64); 2] = [(8.0, 20.0), (4.0, 40.0)];
const HALO_WIDTH: f32 = 3.0;

/// Geometry of one expanding ring at a given explosion progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingState {
    /// Local progress of this ring, 0..=1.
    pub ring_p: f64,
    pub radius: f32,
    pub thickness: f32,
    /// Global fade `1 - sqrt(progress)`.
    pub fade: f64,
}

impl RingState {
    /// State of ring `index` at explosion `progress`, or `None` when the
    /// ring has not started yet or has faded out.
    pub fn at(progress: f64, index: u32) -> Option<Self> {
        let delay = index as f64 * EXPLOSION_RING_DELAY;
        if progress < delay {
            return None;
        }
        let ring_p = ((progress - delay) / (1.0 - delay)).clamp(0.0, 1.0);
        let fade = 1.0 - progress.clamp(0.0, 1.0).sqrt();
        let alpha = (255.0 * fade * (1.0 - ring_p.powf(0.7))) as i32;
        if alpha <= 0 {
            return None;
        }
        let radius =
            (ring_p * EXPLOSION_MAX_RADIUS as f64 * (1.0 + index as f64 * EXPLOSION_RING_SCALE)) as f32;
        let thickness = ((3.0 * (1.0 - ring_p)) as i32).max(1) as f32;
        Some(Self {
            ring_p,
            radius,
            thickness,
            fade,
        })
    }

    pub fn color(&self) -> Color {
        let m = self.fade;
        Color::new((255.0 * m).min(255.0) as u8, (50.0 * m) as u8, (50.0 * m) as u8)
    }

    pub fn halo_color(&self) -> Color {
        let m = self.fade;
        Color::new((180.0 * m) as u8, (20.0 * m) as u8, (20.0 * m) as u8)
    }
}

/// Central flash at a given explosion progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub radius: i32,
    pub alpha: u8,
}

impl Flash {
    /// `None` once `progress` reaches the flash window end.
    pub fn at(progress: f64) -> Option<Self> {
        if !(0.0..EXPLOSION_FLASH_PROGRESS).contains(&progress) {
            return None;
        }
        let flash_p = progress / EXPLOSION_FLASH_PROGRESS;
        Some(Self {
            radius: (10.0 + 20.0 * flash_p) as i32,
            alpha: (255.0 * (1.0 - flash_p)) as u8,
        })
    }

    /// Radius of the opaque core disc, if the flash is large enough for one.
    pub fn core_radius(&self) -> Option<i32> {
        (self.radius > 5).then(|| ((self.radius as f64 * 0.3) as i32).max(2))
    }
}

/// A detonation at a target site.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub site: GeoPoint,
    center: Vec2,
    t0: f64,
}

impl Explosion {
    pub fn new(site: GeoPoint, t0: f64, projection: &Equirectangular) -> Self {
        Self {
            site,
            center: projection.project(site),
            t0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Whether the central flash is showing at `now`.
    pub fn flash_visible(&self, now: f64) -> bool {
        Flash::at(self.progress(now)).is_some()
    }
}

impl Entity for Explosion {
    fn t0(&self) -> f64 {
        self.t0
    }

    fn duration(&self) -> f64 {
        EXPLOSION_DURATION_SECS
    }

    fn alive(&self, now: f64) -> bool {
        self.progress(now) <= 1.0
    }

    fn draw(&self, canvas: &mut Canvas, now: f64) {
        let p = self.progress(now);
        if !(0.0..=1.0).contains(&p) {
            return;
        }

        for index in 0..EXPLOSION_RINGS {
            let Some(ring) = RingState::at(p, index) else {
                continue;
            };
            let halos = HALOS.map(|(offset, a)| {
                GlowRing::new(ring.radius + offset, ring.halo_color(), (a * ring.fade) as u8)
            });
            draw_glow_ring(
                canvas,
                self.center,
                ring.radius,
                ring.thickness,
                ring.color(),
                HALO_WIDTH,
                &halos,
            );
        }

        if let Some(flash) = Flash::at(p) {
            raster::disc(&mut canvas.glow, self.center, flash.radius as f32, FLASH_GLOW);
            canvas.merge_glow(BlendMode::Additive, flash.alpha);
            if let Some(core) = flash.core_radius() {
                raster::disc(&mut canvas.frame, self.center, core as f32, RED_BRIGHT);
            }
        }
    }

    fn reproject(&mut self, projection: &Equirectangular) {
        self.center = projection.project(self.site);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norad_core::types::Viewport;

    fn explosion() -> Explosion {
        Explosion::new(GeoPoint::new(0.0, 0.0), 0.0, &Equirectangular::new(Viewport::default()))
    }

    #[test]
    fn test_lifetime() {
        let e = explosion();
        assert_eq!(e.center(), Vec2::new(640.0, 360.0));
        assert!(e.alive(0.0));
        assert!(e.alive(2.5));
        assert!(!e.alive(2.51));
    }

    #[test]
    fn test_flash_window() {
        let e = explosion();
        assert!(e.flash_visible(0.0));
        assert!(e.flash_visible(0.74));
        assert!(!e.flash_visible(0.75));
        assert!(!e.flash_visible(2.0));

        let start = Flash::at(0.0).unwrap();
        assert_eq!(start, Flash { radius: 10, alpha: 255 });
        assert_eq!(start.core_radius(), Some(3));
        let mid = Flash::at(0.15).unwrap();
        assert!((19..=20).contains(&mid.radius));
        assert!(mid.alpha <= 128);
        assert!(Flash::at(0.29).unwrap().radius < 30);
    }

    #[test]
    fn test_rings_staggered() {
        assert!(RingState::at(0.1, 0).is_some());
        assert!(RingState::at(0.1, 1).is_none(), "ring 1 starts at 0.15");
        assert!(RingState::at(0.2, 1).is_some());
        assert!(RingState::at(0.44, 3).is_none());

        let ring = RingState::at(0.5, 0).unwrap();
        assert_eq!(ring.radius, 30.0);
        assert_eq!(ring.thickness, 1.0);
        let outer = RingState::at(0.5, 2).unwrap();
        assert!(outer.ring_p < ring.ring_p);
    }

    #[test]
    fn test_rings_fade_out() {
        for index in 0..EXPLOSION_RINGS {
            assert!(RingState::at(1.0, index).is_none());
        }
        let early = RingState::at(0.1, 0).unwrap();
        let late = RingState::at(0.6, 0).unwrap();
        assert!(late.fade < early.fade);
        assert!(late.color().r < early.color().r);
    }

    #[test]
    fn test_draw_flash_core() {
        let e = explosion();
        let mut canvas = Canvas::new(Viewport::default());
        e.draw(&mut canvas, 0.0);
        assert_eq!(canvas.frame.get(640, 360), Some(RED_BRIGHT));
        assert!(canvas.glow.is_clear());

        let mut late = Canvas::new(Viewport::default());
        e.draw(&mut late, 3.0);
        assert_eq!(late.frame.get(640, 360), Some(Color::default()));
    }
}
