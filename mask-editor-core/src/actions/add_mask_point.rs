//! Add mask point action

use crate::action::Action;
use crate::document::MaskLayout;
use crate::mask_frame::MaskPoint;
use uuid::Uuid;

/// Action that appends a mask point to a frame
///
/// The point is clamped into the frame when it is added.
pub struct AddMaskPointAction {
    frame_id: Uuid,
    point: MaskPoint,

    /// Index the point landed at (set after execution)
    created_index: Option<usize>,
}

impl AddMaskPointAction {
    pub fn new(frame_id: Uuid, point: MaskPoint) -> Self {
        Self {
            frame_id,
            point,
            created_index: None,
        }
    }
}

impl Action for AddMaskPointAction {
    fn execute(&mut self, layout: &mut MaskLayout) {
        if let Some(frame) = layout.get_frame_mut(&self.frame_id) {
            self.created_index = Some(frame.add_mask_point(self.point));
        }
    }

    fn rollback(&mut self, layout: &mut MaskLayout) {
        if let Some(index) = self.created_index.take() {
            if let Some(frame) = layout.get_frame_mut(&self.frame_id) {
                frame.remove_mask_point(index);
            }
        }
    }

    fn description(&self) -> String {
        "Add mask point".to_string()
    }
}
