//! Enumeration types used throughout the display.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One-shot impact flag carried by every projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactState {
    /// Still travelling (or just arrived and not yet processed).
    #[default]
    InFlight,
    /// Impact processed; an explosion has been spawned.
    Impacted,
}

/// Which side launched a submarine projectile. Selects its palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Cyan palette; targets the eastern sites.
    #[default]
    Blue,
    /// Red palette; targets the western sites.
    Red,
}

/// Projectile class, used for spawn bookkeeping and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Land,
    Submarine,
}

/// CRT post-processing preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrtPreset {
    /// No post-processing.
    Off,
    /// Noise, scanlines and vignette.
    #[default]
    Light,
    /// Bloom, aberration, flicker, heavy noise, double scanlines, vignette.
    Full,
}

impl CrtPreset {
    pub const ALL: [CrtPreset; 3] = [CrtPreset::Off, CrtPreset::Light, CrtPreset::Full];

    /// Next preset in the Off -> Light -> Full -> Off cycle.
    pub fn next(self) -> Self {
        match self {
            CrtPreset::Off => CrtPreset::Light,
            CrtPreset::Light => CrtPreset::Full,
            CrtPreset::Full => CrtPreset::Off,
        }
    }

    /// Command-line index (0, 1, 2).
    pub fn index(self) -> u8 {
        match self {
            CrtPreset::Off => 0,
            CrtPreset::Light => 1,
            CrtPreset::Full => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CrtPreset::Off => "OFF",
            CrtPreset::Light => "LIGHT",
            CrtPreset::Full => "FULL",
        }
    }
}

impl TryFrom<u8> for CrtPreset {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        CrtPreset::ALL
            .get(index as usize)
            .copied()
            .ok_or(ConfigError::InvalidCrtPreset(index))
    }
}
