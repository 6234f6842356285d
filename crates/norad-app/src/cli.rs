//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use norad_core::constants::*;
use norad_core::enums::CrtPreset;
use norad_core::error::ConfigError;
use norad_core::types::Viewport;
use norad_sim::SimConfig;

#[derive(Debug, Parser)]
#[command(author, version, about = "NORAD-style strategic display", long_about = None)]
pub struct Args {
    /// Start in a window instead of fullscreen.
    #[arg(short, long)]
    pub windowed: bool,
    /// Window width in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,
    /// Window height in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_FULLSCREEN_WIDTH)]
    pub fullscreen_width: u32,
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_FULLSCREEN_HEIGHT)]
    pub fullscreen_height: u32,
    /// CRT preset: 0 off, 1 light, 2 full.
    #[arg(long, value_name = "PRESET", default_value_t = 1)]
    pub crt: u8,
    /// RNG seed. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Coastline GeoJSON.
    #[arg(long, value_name = "PATH", default_value = "data/ne_110m_coastline.geojson")]
    pub coastlines: PathBuf,
    /// Country borders GeoJSON.
    #[arg(long, value_name = "PATH", default_value = "data/ne_110m_admin_0_countries.geojson")]
    pub countries: PathBuf,
    /// Number of patrol aircraft (0 disables them).
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_AIRCRAFT_COUNT)]
    pub aircraft: usize,
    /// Barrel distortion strength (0.0 to 1.0), applied with the full CRT preset.
    #[arg(long, value_name = "STRENGTH")]
    pub curvature: Option<f64>,
}

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub fullscreen: bool,
    pub windowed: Viewport,
    pub fullscreen_size: Viewport,
    pub crt_preset: CrtPreset,
    pub seed: Option<u64>,
    pub coastlines: PathBuf,
    pub countries: PathBuf,
    pub aircraft_count: usize,
    pub curvature: Option<f64>,
}

impl TryFrom<Args> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Self {
            fullscreen: !args.windowed,
            windowed: Viewport::new(args.width, args.height)?,
            fullscreen_size: Viewport::new(args.fullscreen_width, args.fullscreen_height)?,
            crt_preset: CrtPreset::try_from(args.crt)?,
            seed: args.seed,
            coastlines: args.coastlines,
            countries: args.countries,
            aircraft_count: args.aircraft,
            curvature: args.curvature.map(validate_curvature).transpose()?,
        })
    }
}

fn validate_curvature(strength: f64) -> Result<f64, ConfigError> {
    if strength.is_finite() && (0.0..=MAX_CURVATURE).contains(&strength) {
        Ok(strength)
    } else {
        Err(ConfigError::InvalidCurvature(strength))
    }
}

impl AppConfig {
    /// Surface size for the current mode.
    pub fn viewport(&self, fullscreen: bool) -> Viewport {
        if fullscreen {
            self.fullscreen_size
        } else {
            self.windowed
        }
    }

    pub fn sim_config(&self, seed: u64, viewport: Viewport) -> SimConfig {
        SimConfig {
            seed,
            aircraft_count: self.aircraft_count,
            viewport,
            crt_preset: self.crt_preset,
        }
    }
}
