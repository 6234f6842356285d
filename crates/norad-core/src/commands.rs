//! Control commands produced by the input layer.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All operator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlCommand {
    /// Leave the frame loop.
    Quit,

    // --- Launch intensity ---
    /// Shorten both launch intervals.
    IntensityUp,
    /// Lengthen both launch intervals.
    IntensityDown,
    /// Restore the default launch intervals.
    IntensityReset,
    /// Launch a fixed batch of land and submarine projectiles.
    Burst,

    // --- Presentation ---
    /// Switch between windowed and fullscreen surfaces.
    ToggleFullscreen,
    /// Advance to the next CRT preset.
    CycleCrtPreset,
}

impl ControlCommand {
    /// Whether the command is handled by the presentation layer rather
    /// than the simulation state.
    pub fn is_presentation(self) -> bool {
        matches!(self, ControlCommand::Quit | ControlCommand::ToggleFullscreen)
    }
}
