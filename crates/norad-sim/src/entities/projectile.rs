//! Land-based and submarine-launched projectiles.

use glam::Vec2;
use norad_core::constants::*;
use norad_core::enums::{ImpactState, ProjectileKind, Side};
use norad_core::types::{Color, GeoPoint};
use norad_geo::{sample_arc, split_on_seam, Equirectangular};
use norad_render::{draw_glow_point, draw_glow_trail, raster, Canvas, GlowRing, GlowStroke};

use super::{Entity, Projectile};

/// Endpoints, launch time, projected path and impact flag of one flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub t0: f64,
    path: Vec<Vec2>,
    surface_width: f32,
    impact: ImpactState,
}

impl Trajectory {
    pub fn new(start: GeoPoint, end: GeoPoint, t0: f64, projection: &Equirectangular) -> Self {
        Self {
            start,
            end,
            t0,
            path: sample_arc(start, end, ARC_SAMPLES, projection),
            surface_width: projection.width(),
            impact: ImpactState::InFlight,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        (now - self.t0) / MISSILE_FLIGHT_SECS
    }

    pub fn alive(&self, now: f64) -> bool {
        self.progress(now) <= PROJECTILE_EXPIRY_PROGRESS
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Number of path points drawn at `now`; never below 2.
    pub fn visible_len(&self, now: f64) -> usize {
        let n = self.path.len();
        let p = self.progress(now).clamp(0.0, 1.0);
        let k = (p * (n.saturating_sub(1)) as f64).round() as usize;
        k.max(2).min(n)
    }

    /// Current head position.
    pub fn head(&self, now: f64) -> Vec2 {
        self.path[self.visible_len(now) - 1]
    }

    /// Seam-split runs of the visible prefix.
    pub fn visible_segments(&self, now: f64) -> Vec<Vec<Vec2>> {
        split_on_seam(&self.path[..self.visible_len(now)], self.surface_width)
    }

    pub fn impact_state(&self) -> ImpactState {
        self.impact
    }

    /// True exactly when the flight has arrived and no explosion exists yet.
    pub fn impact_due(&self, now: f64) -> bool {
        self.impact == ImpactState::InFlight && self.progress(now) >= 1.0
    }

    pub fn mark_impacted(&mut self) {
        self.impact = ImpactState::Impacted;
    }

    /// Regenerate the path for a new projection. `t0` and the impact flag
    /// are kept, so the animation resumes at the same point.
    pub fn reproject(&mut self, projection: &Equirectangular) {
        self.path = sample_arc(self.start, self.end, ARC_SAMPLES, projection);
        self.surface_width = projection.width();
    }
}

/// Radius of the pulsing target marker at `now`.
pub fn target_pulse_radius(now: f64) -> f32 {
    (2.0 + ((now * 8.0).sin() + 1.0) * 2.0).round() as f32
}

/// Colors for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub trail: Color,
    pub blip: Color,
    pub icon: Color,
    pub target: Color,
    side: Side,
}

impl Palette {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Blue => Self {
                trail: CYAN,
                blip: CYAN,
                icon: CYAN,
                target: CYAN,
                side,
            },
            Side::Red => Self {
                trail: RED,
                blip: RED_BRIGHT,
                icon: RED_BRIGHT,
                target: RED,
                side,
            },
        }
    }

    /// Trail halo color for glow level `a`.
    pub fn trail_glow(&self, a: u8) -> Color {
        match self.side {
            Side::Blue => Color::new(0, a, a.saturating_add(20)),
            Side::Red => Color::new(a.saturating_add(20), a / 3, 0),
        }
    }

    /// Head blip halo color for glow level `a`.
    pub fn blip_glow(&self, a: u8) -> Color {
        match self.side {
            Side::Blue => Color::new(0, a, a.saturating_add(20)),
            Side::Red => Color::new(a.saturating_add(40), a / 4, 0),
        }
    }
}

/// Trail, head blip and target marker shared by both projectile kinds.
fn draw_flight(canvas: &mut Canvas, trajectory: &Trajectory, palette: &Palette, now: f64) {
    let strokes: Vec<GlowStroke> = TRAIL_GLOW
        .iter()
        .map(|&(extra_width, a)| GlowStroke {
            extra_width,
            color: palette.trail_glow(a),
        })
        .collect();
    for segment in trajectory.visible_segments(now) {
        draw_glow_trail(canvas, &segment, palette.trail, ARC_THICKNESS, &strokes);
    }

    let rings: Vec<GlowRing> = BLIP_GLOW
        .iter()
        .map(|&(extra, a)| GlowRing::new(BLIP_RADIUS + extra, palette.blip_glow(a), 255))
        .collect();
    draw_glow_point(canvas, trajectory.head(now), BLIP_RADIUS, palette.blip, &rings);
}

fn draw_target_marker(canvas: &mut Canvas, trajectory: &Trajectory, color: Color, now: f64) {
    if trajectory.progress(now).clamp(0.0, 1.0) > TARGET_MARKER_PROGRESS {
        if let Some(&end) = trajectory.path().last() {
            raster::ring(&mut canvas.frame, end, target_pulse_radius(now), 1.0, color);
        }
    }
}

// --- Land-based ---

/// Land-to-land projectile with a dim launch-site dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    trajectory: Trajectory,
}

impl Missile {
    pub fn new(start: GeoPoint, end: GeoPoint, t0: f64, projection: &Equirectangular) -> Self {
        Self {
            trajectory: Trajectory::new(start, end, t0, projection),
        }
    }
}

impl Entity for Missile {
    fn t0(&self) -> f64 {
        self.trajectory.t0
    }

    fn duration(&self) -> f64 {
        MISSILE_FLIGHT_SECS
    }

    fn alive(&self, now: f64) -> bool {
        self.trajectory.alive(now)
    }

    fn draw(&self, canvas: &mut Canvas, now: f64) {
        let palette = Palette::for_side(Side::Blue);
        draw_flight(canvas, &self.trajectory, &palette, now);
        raster::disc(&mut canvas.frame, self.trajectory.path()[0], START_MARKER_RADIUS, CYAN_DIM);
        draw_target_marker(canvas, &self.trajectory, palette.target, now);
    }

    fn reproject(&mut self, projection: &Equirectangular) {
        self.trajectory.reproject(projection);
    }
}

impl Projectile for Missile {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::Land
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn trajectory_mut(&mut self) -> &mut Trajectory {
        &mut self.trajectory
    }
}

// --- Submarine-launched ---

/// Hull outline, offsets from the launch point.
const HULL: [(f32, f32); 8] = [
    (-12.0, 0.0),
    (-10.0, -3.0),
    (-6.0, -4.0),
    (6.0, -4.0),
    (10.0, -3.0),
    (12.0, 0.0),
    (10.0, 2.0),
    (-10.0, 2.0),
];

/// Conning tower outline.
const TOWER: [(f32, f32); 4] = [(-2.0, -4.0), (-2.0, -7.0), (2.0, -7.0), (2.0, -4.0)];

/// Periscope segment.
const PERISCOPE: [(f32, f32); 2] = [(0.0, -7.0), (0.0, -9.0)];

/// Projectile launched from an ocean position, colored by side.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmarineMissile {
    trajectory: Trajectory,
    side: Side,
}

impl SubmarineMissile {
    pub fn new(
        start: GeoPoint,
        end: GeoPoint,
        t0: f64,
        side: Side,
        projection: &Equirectangular,
    ) -> Self {
        Self {
            trajectory: Trajectory::new(start, end, t0, projection),
            side,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn palette(&self) -> Palette {
        Palette::for_side(self.side)
    }

    fn draw_hull(canvas: &mut Canvas, at: Vec2, color: Color) {
        let offset = |pts: &[(f32, f32)]| -> Vec<Vec2> {
            pts.iter().map(|&(dx, dy)| at + Vec2::new(dx, dy)).collect()
        };
        raster::polygon(&mut canvas.frame, &offset(&HULL), 1.0, color);
        raster::polygon(&mut canvas.frame, &offset(&TOWER), 1.0, color);
        raster::polyline(&mut canvas.frame, &offset(&PERISCOPE), 1.0, color);
    }
}

impl Entity for SubmarineMissile {
    fn t0(&self) -> f64 {
        self.trajectory.t0
    }

    fn duration(&self) -> f64 {
        MISSILE_FLIGHT_SECS
    }

    fn alive(&self, now: f64) -> bool {
        self.trajectory.alive(now)
    }

    fn draw(&self, canvas: &mut Canvas, now: f64) {
        let palette = self.palette();
        draw_flight(canvas, &self.trajectory, &palette, now);
        Self::draw_hull(canvas, self.trajectory.path()[0], palette.icon);
        draw_target_marker(canvas, &self.trajectory, palette.target, now);
    }

    fn reproject(&mut self, projection: &Equirectangular) {
        self.trajectory.reproject(projection);
    }
}

impl Projectile for SubmarineMissile {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::Submarine
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn trajectory_mut(&mut self) -> &mut Trajectory {
        &mut self.trajectory
    }
}
