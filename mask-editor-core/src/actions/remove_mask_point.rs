//! Remove mask point action

use crate::action::Action;
use crate::document::MaskLayout;
use crate::mask_frame::MaskPoint;
use uuid::Uuid;

/// Action that erases one mask point from a frame
pub struct RemoveMaskPointAction {
    frame_id: Uuid,
    index: usize,

    /// The erased point (set after execution)
    removed: Option<MaskPoint>,
}

impl RemoveMaskPointAction {
    pub fn new(frame_id: Uuid, index: usize) -> Self {
        Self {
            frame_id,
            index,
            removed: None,
        }
    }
}

impl Action for RemoveMaskPointAction {
    fn execute(&mut self, layout: &mut MaskLayout) {
        self.removed = layout
            .get_frame_mut(&self.frame_id)
            .and_then(|frame| frame.remove_mask_point(self.index));
    }

    fn rollback(&mut self, layout: &mut MaskLayout) {
        if let Some(point) = self.removed.take() {
            if let Some(frame) = layout.get_frame_mut(&self.frame_id) {
                frame.insert_mask_point(self.index, point);
            }
        }
    }

    fn description(&self) -> String {
        "Delete mask point".to_string()
    }
}
