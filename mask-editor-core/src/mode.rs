//! Render mode cycling
//!
//! Purely a display concern: which canvases are drawn and whether the live
//! cursor cross-hair is shown. The transform engine does not depend on it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Editing on the design canvas, live canvas shown as an outline
    #[default]
    Design,
    /// Editing with the live output rendered alongside
    DesignLive,
    /// Live output only
    Live,
}

impl RenderMode {
    /// Next mode in the Design → Design/Live → Live cycle
    pub fn cycle(self) -> Self {
        match self {
            RenderMode::Design => RenderMode::DesignLive,
            RenderMode::DesignLive => RenderMode::Live,
            RenderMode::Live => RenderMode::Design,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RenderMode::Design => "Design",
            RenderMode::DesignLive => "Design / Live",
            RenderMode::Live => "Live",
        }
    }

    /// Whether the live cursor cross-hair may be drawn
    pub fn shows_live_cursor(self) -> bool {
        self != RenderMode::Live
    }

    /// Whether the live canvas background and grid are drawn
    pub fn shows_live_canvas(self) -> bool {
        self == RenderMode::Design
    }
}
