//! Fundamental geographic, screen and color types.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A point on the Earth's surface in degrees.
/// Latitude in [-90, 90], longitude in [-180, 180].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates lie inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A named geographic site used as a launch point or target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedSite {
    pub name: &'static str,
    pub point: GeoPoint,
}

impl NamedSite {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self {
            name,
            point: GeoPoint::new(lat, lon),
        }
    }
}

/// Pixel dimensions of the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport. Each dimension must lie in `1..=MAX_VIEWPORT_DIM`.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let valid = 1..=crate::constants::MAX_VIEWPORT_DIM;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_WIDTH,
            height: crate::constants::DEFAULT_HEIGHT,
        }
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to [0, 1]), truncating.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * f) as u8,
            g: (self.g as f64 * f) as u8,
            b: (self.b as f64 * f) as u8,
        }
    }

    /// Pack into a 0RGB `u32` as used by the frame buffer.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from a 0RGB `u32`; the top byte is ignored.
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }
}
