//! Events emitted by the simulation for logging and diagnostics.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GeoPoint;

/// Facts produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DisplayEvent {
    /// A projectile was launched.
    Launched {
        kind: ProjectileKind,
        side: Side,
        origin: GeoPoint,
        target: GeoPoint,
        t0: f64,
    },
    /// A projectile reached its target and spawned an explosion.
    Impact { kind: ProjectileKind, target: GeoPoint },
    /// A burst was triggered.
    Burst { land: usize, submarine: usize },
    /// Launch intervals changed.
    IntensityChanged {
        land_interval: f64,
        submarine_interval: f64,
    },
    /// The CRT preset changed.
    CrtPresetChanged { preset: CrtPreset },
    /// All paths were regenerated for a new viewport.
    Resized { width: u32, height: u32 },
}
