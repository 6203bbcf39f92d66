//! Transform frame action
//!
//! Records a frame's geometry before and after a drag or nudge so the change
//! can be undone as one step.

use crate::action::Action;
use crate::document::MaskLayout;
use crate::mask_frame::FrameGeometry;
use uuid::Uuid;

/// What kind of edit produced the geometry change (for descriptions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Translate,
    Scale,
    MoveMaskPoint,
    NudgeFrame,
    NudgeMaskPoint,
}

/// Action that sets a frame's geometry
pub struct TransformFrameAction {
    frame_id: Uuid,
    kind: TransformKind,
    old: FrameGeometry,
    new: FrameGeometry,
}

impl TransformFrameAction {
    pub fn new(frame_id: Uuid, kind: TransformKind, old: FrameGeometry, new: FrameGeometry) -> Self {
        Self {
            frame_id,
            kind,
            old,
            new,
        }
    }
}

impl Action for TransformFrameAction {
    fn execute(&mut self, layout: &mut MaskLayout) {
        if let Some(frame) = layout.get_frame_mut(&self.frame_id) {
            frame.apply_geometry(&self.new);
        }
    }

    fn rollback(&mut self, layout: &mut MaskLayout) {
        if let Some(frame) = layout.get_frame_mut(&self.frame_id) {
            frame.apply_geometry(&self.old);
        }
    }

    fn description(&self) -> String {
        match self.kind {
            TransformKind::Translate => "Move mask frame",
            TransformKind::Scale => "Resize mask frame",
            TransformKind::MoveMaskPoint => "Move mask point",
            TransformKind::NudgeFrame => "Nudge mask frame",
            TransformKind::NudgeMaskPoint => "Nudge mask point",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::mask_frame::MaskFrame;
    use kurbo::Rect;

    #[test]
    fn test_transform_frame_action() {
        let mut layout = MaskLayout::new(
            Canvas::new(0.0, 0.0, 100.0, 100.0),
            Canvas::new(0.0, 0.0, 100.0, 100.0),
        );
        let frame_id = layout.add_frame(MaskFrame::new(10.0, 10.0, 20.0, 20.0, 5.0));
        let old = layout.get_frame(&frame_id).unwrap().geometry();
        let new = FrameGeometry {
            x: 40.0,
            y: 50.0,
            width: 30.0,
            height: 10.0,
            mask_points: Vec::new(),
        };

        let mut action = TransformFrameAction::new(frame_id, TransformKind::Scale, old, new);
        action.execute(&mut layout);
        assert_eq!(
            layout.get_frame(&frame_id).unwrap().rect(),
            Rect::new(40.0, 50.0, 70.0, 60.0)
        );

        action.rollback(&mut layout);
        assert_eq!(
            layout.get_frame(&frame_id).unwrap().rect(),
            Rect::new(10.0, 10.0, 30.0, 30.0)
        );
        assert_eq!(action.description(), "Resize mask frame");
    }
}
