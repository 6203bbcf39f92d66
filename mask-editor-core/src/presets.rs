//! Layout presets
//!
//! Every numeric layout constant the editor needs: window and canvas
//! geometry, new-frame and minimum sizes, handle sizes, nudge step and
//! history limits. Presets are read-only once the editor is running.

use crate::canvas::Canvas;
use crate::error::Result;
use crate::hit_test::HandleSizes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration collaborator for the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presets {
    pub window_width: f64,
    pub window_height: f64,
    pub start_fullscreen: bool,

    pub design_canvas_x: f64,
    pub design_canvas_y: f64,
    pub design_canvas_width: f64,
    pub design_canvas_height: f64,

    pub live_canvas_x: f64,
    pub live_canvas_y: f64,
    pub live_canvas_width: f64,
    pub live_canvas_height: f64,

    pub num_grid_lines_x: u32,
    pub num_grid_lines_y: u32,

    /// Size of frames created with the new-frame command
    pub new_mask_frame_width: f64,
    pub new_mask_frame_height: f64,

    /// Floor for frame width/height while scaling
    pub min_mask_frame_size: f64,

    pub corner_handle_size: f64,
    pub mask_point_radius: f64,

    /// Distance moved by one nudge
    pub nudge_step: f64,

    /// Minimum time between two autosaves, in milliseconds
    pub autosave_interval_ms: u64,

    /// Optional cap on undo history; unbounded when absent
    pub max_undo_depth: Option<usize>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            start_fullscreen: false,

            design_canvas_x: 20.0,
            design_canvas_y: 40.0,
            design_canvas_width: 600.0,
            design_canvas_height: 337.5,

            live_canvas_x: 660.0,
            live_canvas_y: 40.0,
            live_canvas_width: 600.0,
            live_canvas_height: 337.5,

            num_grid_lines_x: 15,
            num_grid_lines_y: 8,

            new_mask_frame_width: 100.0,
            new_mask_frame_height: 100.0,
            min_mask_frame_size: 10.0,

            corner_handle_size: 10.0,
            mask_point_radius: 5.0,

            nudge_step: 1.0,
            autosave_interval_ms: 2000,
            max_undo_depth: None,
        }
    }
}

impl Presets {
    /// Load presets from a JSON file
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn design_canvas(&self) -> Canvas {
        Canvas::new(
            self.design_canvas_x,
            self.design_canvas_y,
            self.design_canvas_width,
            self.design_canvas_height,
        )
        .with_grid(self.num_grid_lines_x, self.num_grid_lines_y)
    }

    pub fn live_canvas(&self) -> Canvas {
        Canvas::new(
            self.live_canvas_x,
            self.live_canvas_y,
            self.live_canvas_width,
            self.live_canvas_height,
        )
        .with_grid(self.num_grid_lines_x, self.num_grid_lines_y)
    }

    pub fn handle_sizes(&self) -> HandleSizes {
        HandleSizes {
            corner: self.corner_handle_size,
            mask_point_radius: self.mask_point_radius,
        }
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }
}
