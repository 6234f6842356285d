//! Display constants and tuning parameters.

use crate::types::{Color, NamedSite};

/// Target frame rate (Hz).
pub const TARGET_FPS: u32 = 60;

/// Default windowed surface size.
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;

/// Default borderless "fullscreen" surface size.
pub const DEFAULT_FULLSCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_FULLSCREEN_HEIGHT: u32 = 1080;

/// Largest accepted surface dimension.
pub const MAX_VIEWPORT_DIM: u32 = 8192;

// --- Launch intensity ---

/// Default seconds between land-based launches.
pub const DEFAULT_LAUNCH_INTERVAL: f64 = 2.5;

/// Default seconds between submarine launches.
pub const DEFAULT_SUB_LAUNCH_INTERVAL: f64 = 4.0;

/// Lower bound for any launch interval (seconds).
pub const MIN_LAUNCH_INTERVAL: f64 = 0.3;

/// Upper bound for any launch interval (seconds).
pub const MAX_LAUNCH_INTERVAL: f64 = 10.0;

/// Interval multiplier applied on "intensity up".
pub const INTENSITY_UP_FACTOR: f64 = 0.7;

/// Interval multiplier applied on "intensity down".
pub const INTENSITY_DOWN_FACTOR: f64 = 1.4;

// --- Burst ---

/// Land launches per burst.
pub const BURST_LAND_COUNT: usize = 5;

/// Submarine launches per burst.
pub const BURST_SUB_COUNT: usize = 3;

/// Upper bound (exclusive) of the random `t0` offset in a burst (seconds).
pub const BURST_JITTER_SECS: f64 = 0.5;

// --- Projectiles ---

/// Flight time of every projectile (seconds).
pub const MISSILE_FLIGHT_SECS: f64 = 12.0;

/// Number of geodesic intervals per path; a path holds `ARC_SAMPLES + 1` points.
pub const ARC_SAMPLES: usize = 220;

/// Projectiles are removed once progress exceeds this.
pub const PROJECTILE_EXPIRY_PROGRESS: f64 = 1.05;

/// Progress after which the pulsing target marker is drawn.
pub const TARGET_MARKER_PROGRESS: f64 = 0.85;

/// Core trail stroke width (pixels).
pub const ARC_THICKNESS: f32 = 2.0;

/// Head blip radius (pixels).
pub const BLIP_RADIUS: f32 = 4.0;

/// Launch-site dot radius (pixels).
pub const START_MARKER_RADIUS: f32 = 3.0;

/// Trail glow strokes: (extra width, glow level). Outer first.
pub const TRAIL_GLOW: [(f32, u8); 3] = [(6.0, 30), (4.0, 50), (2.0, 80)];

/// Head blip glow discs: (extra radius, glow level). Outer first.
pub const BLIP_GLOW: [(f32, u8); 2] = [(6.0, 40), (3.0, 80)];

// --- Explosions ---

/// Explosion animation length (seconds).
pub const EXPLOSION_DURATION_SECS: f64 = 2.5;

/// Largest radius reached by the first ring (pixels).
pub const EXPLOSION_MAX_RADIUS: f32 = 60.0;

/// Number of expanding rings.
pub const EXPLOSION_RINGS: u32 = 4;

/// Start offset between consecutive rings (fraction of duration).
pub const EXPLOSION_RING_DELAY: f64 = 0.15;

/// Radius growth per ring index.
pub const EXPLOSION_RING_SCALE: f64 = 0.3;

/// The central flash is visible while progress is below this.
pub const EXPLOSION_FLASH_PROGRESS: f64 = 0.3;

// --- Aircraft patrols ---

/// Default number of patrolling aircraft.
pub const DEFAULT_AIRCRAFT_COUNT: usize = 12;

/// Samples per patrol loop.
pub const AIRCRAFT_LOOP_SAMPLES: usize = 240;

/// Patrol loop radius range (degrees).
pub const AIRCRAFT_RADIUS_DEG: (f64, f64) = (3.0, 12.0);

/// Patrol loop period range (seconds).
pub const AIRCRAFT_LOOP_SECS: (f64, f64) = (20.0, 60.0);

/// Latitude band for patrol centers (degrees).
pub const AIRCRAFT_LAT_RANGE: (f64, f64) = (-60.0, 60.0);

// --- Map layer ---

/// Graticule spacing (degrees).
pub const GRID_LAT_STEP: i32 = 15;
pub const GRID_LON_STEP: i32 = 30;

/// Graticule opacity.
pub const GRID_ALPHA: u8 = 25;

/// Glow layers per map feature class.
pub const COASTLINE_GLOW_LAYERS: u32 = 5;
pub const BORDER_GLOW_LAYERS: u32 = 3;
pub const HIGHLIGHT_GLOW_LAYERS: u32 = 5;

// --- CRT post-processing ---

/// Row spacing of scanlines (pixels).
pub const SCANLINE_SPACING: u32 = 3;

/// Scanline opacity.
pub const SCANLINE_ALPHA: u8 = 30;

/// Base noise opacity (doubled in the full preset).
pub const NOISE_ALPHA: u8 = 12;

/// Vignette opacity scale.
pub const VIGNETTE_STRENGTH: f64 = 160.0;

/// Vignette falloff exponent.
pub const VIGNETTE_EXPONENT: f64 = 1.8;

/// Chromatic aberration channel offset (pixels).
pub const ABERRATION_OFFSET: u32 = 2;

/// Phosphor bloom strength in the full preset.
pub const BLOOM_INTENSITY: f64 = 1.2;

/// Bloom downscale factor.
pub const BLOOM_DOWNSCALE: u32 = 4;

/// Flicker amplitude in the full preset.
pub const FLICKER_INTENSITY: f64 = 0.02;

/// Brightness below which flicker darkens the frame.
pub const FLICKER_THRESHOLD: f64 = 0.95;

/// Upper bound for the `--curvature` barrel strength.
pub const MAX_CURVATURE: f64 = 1.0;

// --- Palette ---

pub const BLACK: Color = Color::new(0, 0, 0);
pub const CYAN: Color = Color::new(0, 255, 255);
pub const CYAN_DIM: Color = Color::new(0, 180, 180);
pub const CYAN_GLOW: Color = Color::new(0, 60, 80);
pub const RED: Color = Color::new(255, 50, 50);
pub const RED_BRIGHT: Color = Color::new(255, 100, 100);
pub const FLASH_GLOW: Color = Color::new(255, 200, 200);
pub const BORDER: Color = Color::new(0, 140, 160);
pub const BORDER_GLOW: Color = Color::new(0, 40, 50);
pub const HIGHLIGHT: Color = Color::new(255, 80, 80);
pub const HIGHLIGHT_GLOW: Color = Color::new(120, 30, 30);
pub const GRID: Color = Color::new(0, 100, 120);
pub const AIRCRAFT: Color = Color::new(0, 102, 102);
pub const AIRCRAFT_GLOW: Color = Color::new(0, 30, 40);

// --- Sites ---

/// Western targets (Americas and the North Atlantic rim).
pub static WESTERN_TARGETS: [NamedSite; 5] = [
    NamedSite::new("Washington DC", 38.9, -77.0),
    NamedSite::new("New York", 40.71, -74.0),
    NamedSite::new("Los Angeles", 34.05, -118.24),
    NamedSite::new("Reykjavik", 64.13, -21.89),
    NamedSite::new("Buenos Aires", -34.6, -58.38),
];

/// Eastern targets (Europe, Russia, Asia, Oceania).
pub static EASTERN_TARGETS: [NamedSite; 7] = [
    NamedSite::new("Moscow", 55.75, 37.62),
    NamedSite::new("London", 51.5, -0.12),
    NamedSite::new("Tokyo", 35.68, 139.76),
    NamedSite::new("Beijing", 39.9, 116.4),
    NamedSite::new("Sydney", -33.86, 151.2),
    NamedSite::new("Delhi", 28.61, 77.21),
    NamedSite::new("Stockholm", 59.33, 18.07),
];

/// Ocean launch positions for submarine projectiles.
pub static SUBMARINE_POINTS: [NamedSite; 12] = [
    NamedSite::new("North Atlantic", 35.0, -45.0),
    NamedSite::new("Mid Atlantic", 45.0, -30.0),
    NamedSite::new("Iceland Gap", 60.0, -20.0),
    NamedSite::new("North Pacific", 40.0, 160.0),
    NamedSite::new("Central Pacific", 25.0, -155.0),
    NamedSite::new("Northeast Pacific", 50.0, -140.0),
    NamedSite::new("Indian Ocean", 10.0, 65.0),
    NamedSite::new("South Indian Ocean", -30.0, 40.0),
    NamedSite::new("Barents Sea", 70.0, 40.0),
    NamedSite::new("Bering Sea", 55.0, 170.0),
    NamedSite::new("Caribbean", 15.0, -60.0),
    NamedSite::new("South Atlantic", -45.0, -60.0),
];

/// Every land site (western then eastern), the pool for land launches.
pub fn land_sites() -> impl Iterator<Item = &'static NamedSite> {
    WESTERN_TARGETS.iter().chain(EASTERN_TARGETS.iter())
}
