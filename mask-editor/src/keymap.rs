/// Keyboard bindings
///
/// The only place key codes exist. Window input is translated into typed
/// [`Command`]s here; the core never sees a key.

use eframe::egui;
use mask_editor_core::command::Command;
use mask_editor_core::tool::Direction;

/// Key binding definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: egui::Key,
    pub command: Command,
    /// Fire again on key auto-repeat
    pub repeats: bool,
}

impl KeyBinding {
    pub const fn new(key: egui::Key, command: Command) -> Self {
        Self { key, command, repeats: false }
    }

    pub const fn repeating(key: egui::Key, command: Command) -> Self {
        Self { key, command, repeats: true }
    }
}

/// Default key map
pub const KEY_MAP: &[KeyBinding] = &[
    KeyBinding::new(egui::Key::F, Command::NewFrame),
    KeyBinding::new(egui::Key::P, Command::NewPoint),
    KeyBinding::new(egui::Key::Space, Command::ToggleFullscreen),
    KeyBinding::repeating(egui::Key::U, Command::Undo),
    KeyBinding::repeating(egui::Key::R, Command::Redo),
    KeyBinding::new(egui::Key::Delete, Command::DeleteSelected),
    KeyBinding::new(egui::Key::Backspace, Command::DeleteSelected),
    KeyBinding::repeating(egui::Key::ArrowLeft, Command::Nudge(Direction::Left)),
    KeyBinding::repeating(egui::Key::ArrowUp, Command::Nudge(Direction::Up)),
    KeyBinding::repeating(egui::Key::ArrowRight, Command::Nudge(Direction::Right)),
    KeyBinding::repeating(egui::Key::ArrowDown, Command::Nudge(Direction::Down)),
    KeyBinding::new(egui::Key::S, Command::Save),
    KeyBinding::new(egui::Key::L, Command::Load),
    KeyBinding::new(egui::Key::M, Command::CycleMode),
    KeyBinding::new(egui::Key::E, Command::ToggleFrameNudge),
];

/// Look up the command bound to a key press
///
/// Presses with Ctrl/Alt/Cmd held are left to the window.
pub fn command_for_key(key: egui::Key, modifiers: egui::Modifiers, repeat: bool) -> Option<Command> {
    if modifiers.ctrl || modifiers.alt || modifiers.command {
        return None;
    }
    KEY_MAP
        .iter()
        .find(|binding| binding.key == key && (binding.repeats || !repeat))
        .map(|binding| binding.command)
}

/// Drain this frame's key presses into commands, in the order they arrived
pub fn commands_from_input(input: &egui::InputState) -> Vec<Command> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat,
                modifiers,
                ..
            } => command_for_key(*key, *modifiers, *repeat),
            _ => None,
        })
        .collect()
}
