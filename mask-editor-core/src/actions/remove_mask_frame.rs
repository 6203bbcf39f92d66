//! Remove mask frame action
//!
//! Deletes a frame (and with it all of its mask points). Rollback puts it
//! back at the same z-index.

use crate::action::Action;
use crate::document::MaskLayout;
use crate::mask_frame::MaskFrame;
use uuid::Uuid;

/// Action that removes a mask frame from the layout
pub struct RemoveMaskFrameAction {
    frame_id: Uuid,

    /// Removed frame and its z-index (set after execution)
    removed: Option<(usize, MaskFrame)>,
}

impl RemoveMaskFrameAction {
    pub fn new(frame_id: Uuid) -> Self {
        Self {
            frame_id,
            removed: None,
        }
    }
}

impl Action for RemoveMaskFrameAction {
    fn execute(&mut self, layout: &mut MaskLayout) {
        self.removed = layout.remove_frame(&self.frame_id);
    }

    fn rollback(&mut self, layout: &mut MaskLayout) {
        if let Some((index, frame)) = self.removed.take() {
            layout.insert_frame(index, frame);
        }
    }

    fn description(&self) -> String {
        match &self.removed {
            Some((_, frame)) if !frame.mask_points().is_empty() => format!(
                "Delete mask frame with {} point(s)",
                frame.mask_points().len()
            ),
            _ => "Delete mask frame".to_string(),
        }
    }
}
