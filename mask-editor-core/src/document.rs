//! The persisted object graph
//!
//! A MaskLayout holds both canvases and every mask frame. Frame order is
//! z-order: the last frame is drawn on top and hit-tested first.

use crate::canvas::Canvas;
use crate::mask_frame::MaskFrame;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canvases and mask frames being edited
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskLayout {
    /// Editable coordinate space
    pub design_canvas: Canvas,

    /// Output coordinate space mirroring the design canvas
    pub live_canvas: Canvas,

    /// Mask frames in z-order (back to front)
    #[serde(default)]
    frames: Vec<MaskFrame>,
}

impl MaskLayout {
    pub fn new(design_canvas: Canvas, live_canvas: Canvas) -> Self {
        Self {
            design_canvas,
            live_canvas,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[MaskFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get_frame(&self, id: &Uuid) -> Option<&MaskFrame> {
        self.frames.iter().find(|f| &f.id == id)
    }

    pub fn get_frame_mut(&mut self, id: &Uuid) -> Option<&mut MaskFrame> {
        self.frames.iter_mut().find(|f| &f.id == id)
    }

    pub fn frame_index(&self, id: &Uuid) -> Option<usize> {
        self.frames.iter().position(|f| &f.id == id)
    }

    /// Frames front to back, the order pointer hits are resolved in
    pub fn frames_front_to_back(&self) -> impl Iterator<Item = &MaskFrame> {
        self.frames.iter().rev()
    }

    pub(crate) fn frames_mut(&mut self) -> impl Iterator<Item = &mut MaskFrame> {
        self.frames.iter_mut()
    }

    /// Append a frame on top of the stack
    pub(crate) fn add_frame(&mut self, frame: MaskFrame) -> Uuid {
        let id = frame.id;
        self.frames.push(frame);
        id
    }

    /// Insert a frame at a z-index (clamped to the stack size)
    pub(crate) fn insert_frame(&mut self, index: usize, frame: MaskFrame) {
        let index = index.min(self.frames.len());
        self.frames.insert(index, frame);
    }

    /// Remove a frame, returning it with the z-index it occupied
    pub(crate) fn remove_frame(&mut self, id: &Uuid) -> Option<(usize, MaskFrame)> {
        let index = self.frame_index(id)?;
        Some((index, self.frames.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MaskLayout {
        MaskLayout::new(
            Canvas::new(0.0, 0.0, 100.0, 100.0),
            Canvas::new(200.0, 0.0, 100.0, 100.0),
        )
    }

    #[test]
    fn test_add_and_remove_frames() {
        let mut layout = layout();
        let a = layout.add_frame(MaskFrame::new(0.0, 0.0, 10.0, 10.0, 5.0));
        let b = layout.add_frame(MaskFrame::new(5.0, 5.0, 10.0, 10.0, 5.0));
        assert_eq!(layout.frame_count(), 2);

        let order: Vec<Uuid> = layout.frames_front_to_back().map(|f| f.id).collect();
        assert_eq!(order, vec![b, a]);

        let (index, removed) = layout.remove_frame(&a).unwrap();
        assert_eq!(index, 0);
        assert_eq!(removed.id, a);

        layout.insert_frame(index, removed);
        assert_eq!(layout.frame_index(&a), Some(0));
    }

    #[test]
    fn test_serialization_skips_transient_state() {
        let mut layout = layout();
        let id = layout.add_frame(MaskFrame::new(0.0, 0.0, 10.0, 10.0, 5.0));
        layout
            .get_frame_mut(&id)
            .unwrap()
            .set_transform_state(crate::tool::TransformState::Translating);

        let json = serde_json::to_string(&layout).unwrap();
        let restored: MaskLayout = serde_json::from_str(&json).unwrap();
        let frame = restored.get_frame(&id).unwrap();
        assert!(!frame.transform_state().is_active());
        assert_eq!(frame.rect(), kurbo::Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
