//! Keyboard mapping.

use minifb::Key;
use norad_core::commands::ControlCommand;

/// Command bound to `key`, if any.
pub fn command_for_key(key: Key) -> Option<ControlCommand> {
    let command = match key {
        Key::Escape | Key::Q => ControlCommand::Quit,
        Key::Up => ControlCommand::IntensityUp,
        Key::Down => ControlCommand::IntensityDown,
        Key::R => ControlCommand::IntensityReset,
        Key::Space => ControlCommand::Burst,
        Key::F => ControlCommand::ToggleFullscreen,
        Key::C => ControlCommand::CycleCrtPreset,
        _ => return None,
    };
    Some(command)
}

/// Map a batch of freshly pressed keys, in order, dropping unbound keys.
pub fn commands_for_keys(keys: &[Key]) -> Vec<ControlCommand> {
    keys.iter().copied().filter_map(command_for_key).collect()
}
