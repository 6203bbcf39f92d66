//! Add mask frame action
//!
//! Handles placing a new mask frame on top of the layout.

use crate::action::Action;
use crate::document::MaskLayout;
use crate::mask_frame::MaskFrame;
use uuid::Uuid;

/// Action that adds a mask frame to the layout
pub struct AddMaskFrameAction {
    /// The frame to add
    frame: MaskFrame,

    /// ID of the created frame (set after execution)
    created_frame_id: Option<Uuid>,
}

impl AddMaskFrameAction {
    pub fn new(frame: MaskFrame) -> Self {
        Self {
            frame,
            created_frame_id: None,
        }
    }

    /// ID of the frame this action places
    pub fn frame_id(&self) -> Uuid {
        self.frame.id
    }
}

impl Action for AddMaskFrameAction {
    fn execute(&mut self, layout: &mut MaskLayout) {
        let frame_id = layout.add_frame(self.frame.clone());
        self.created_frame_id = Some(frame_id);
    }

    fn rollback(&mut self, layout: &mut MaskLayout) {
        if let Some(frame_id) = self.created_frame_id.take() {
            layout.remove_frame(&frame_id);
        }
    }

    fn description(&self) -> String {
        "Add mask frame".to_string()
    }
}
