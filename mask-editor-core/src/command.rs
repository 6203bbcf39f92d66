/// Editor commands
///
/// The shell translates raw keys into these; the core never sees key codes.

use crate::tool::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Place a new frame with its top-left at the pointer
    NewFrame,
    /// Add a mask point at the pointer to the highlighted frame
    NewPoint,
    Undo,
    Redo,
    /// Erase the highlighted mask point or frame
    DeleteSelected,
    Nudge(Direction),
    Save,
    Load,
    CycleMode,
    ToggleFrameNudge,
    /// Window concern; handled by the shell
    ToggleFullscreen,
}

impl Command {
    /// Whether the command is followed by an autosave
    pub fn autosaves(self) -> bool {
        matches!(
            self,
            Command::NewFrame | Command::NewPoint | Command::DeleteSelected | Command::Nudge(_)
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Command::NewFrame => "New frame",
            Command::NewPoint => "New point",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::DeleteSelected => "Delete",
            Command::Nudge(_) => "Nudge",
            Command::Save => "Save",
            Command::Load => "Load",
            Command::CycleMode => "Cycle mode",
            Command::ToggleFrameNudge => "Toggle frame nudge",
            Command::ToggleFullscreen => "Toggle fullscreen",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosaving_commands() {
        assert!(Command::NewFrame.autosaves());
        assert!(Command::Nudge(Direction::Left).autosaves());
        assert!(!Command::Undo.autosaves());
        assert!(!Command::Save.autosaves());
        assert!(!Command::Load.autosaves());
    }
}
