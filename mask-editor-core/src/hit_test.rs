//! Hit testing for highlighting and transform selection
//!
//! Resolves the pointer to a single frame and the sub-element under it.
//! Frames are tested front to back (last added first). Within a frame the
//! most specific element wins: mask point, then corner handle, then body.

use crate::document::MaskLayout;
use crate::mask_frame::MaskFrame;
use crate::tool::{Corner, TransformState};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The part of a frame under the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// Inside the rectangle, away from handles
    Body,
    /// Within a corner handle's hot-zone
    Corner(Corner),
    /// Within a mask point's handle
    MaskPoint(usize),
}

impl HitTarget {
    /// The transform a drag starting on this target performs
    pub fn transform_state(self) -> TransformState {
        match self {
            HitTarget::Body => TransformState::Translating,
            HitTarget::Corner(corner) => TransformState::Scaling(corner),
            HitTarget::MaskPoint(index) => TransformState::Masking(index),
        }
    }
}

/// Result of a hit test against the whole layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub frame_id: Uuid,
    pub target: HitTarget,
}

/// Sizes of the interactive handles drawn on frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleSizes {
    /// Side of the square hot-zone centred on each corner
    pub corner: f64,
    /// Pick radius around each mask point
    pub mask_point_radius: f64,
}

impl Default for HandleSizes {
    fn default() -> Self {
        Self {
            corner: 10.0,
            mask_point_radius: 5.0,
        }
    }
}

/// Hit test a single frame
///
/// Corner hot-zones extend past the frame edge, so a miss on the body can
/// still hit a corner.
pub fn hit_test_frame(frame: &MaskFrame, point: Point, handles: HandleSizes) -> Option<HitTarget> {
    if let Some(index) = frame.mask_point_at(point, handles.mask_point_radius) {
        return Some(HitTarget::MaskPoint(index));
    }
    if let Some(corner) = frame.corner_at(point, handles.corner) {
        return Some(HitTarget::Corner(corner));
    }
    if frame.contains(point) {
        return Some(HitTarget::Body);
    }
    None
}

/// Hit test every frame in the layout, topmost first
pub fn hit_test_layout(layout: &MaskLayout, point: Point, handles: HandleSizes) -> Option<Highlight> {
    layout.frames_front_to_back().find_map(|frame| {
        hit_test_frame(frame, point, handles).map(|target| Highlight {
            frame_id: frame.id,
            target,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::mask_frame::MaskPoint;

    fn layout() -> MaskLayout {
        MaskLayout::new(
            Canvas::new(0.0, 0.0, 500.0, 500.0),
            Canvas::new(0.0, 0.0, 500.0, 500.0),
        )
    }

    #[test]
    fn test_point_beats_corner_beats_body() {
        let frame = MaskFrame::new(100.0, 100.0, 50.0, 50.0, 10.0)
            .with_mask_points([MaskPoint::new(102.0, 102.0)]);
        let handles = HandleSizes::default();

        assert_eq!(
            hit_test_frame(&frame, Point::new(102.0, 102.0), handles),
            Some(HitTarget::MaskPoint(0))
        );
        assert_eq!(
            hit_test_frame(&frame, Point::new(149.0, 151.0), handles),
            Some(HitTarget::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_frame(&frame, Point::new(125.0, 125.0), handles),
            Some(HitTarget::Body)
        );
        assert_eq!(hit_test_frame(&frame, Point::new(10.0, 10.0), handles), None);
    }

    #[test]
    fn test_topmost_frame_wins() {
        let mut layout = layout();
        let _bottom = layout.add_frame(MaskFrame::new(0.0, 0.0, 100.0, 100.0, 10.0));
        let top = layout.add_frame(MaskFrame::new(50.0, 50.0, 100.0, 100.0, 10.0));

        let hit = hit_test_layout(&layout, Point::new(75.0, 75.0), HandleSizes::default());
        assert_eq!(
            hit,
            Some(Highlight {
                frame_id: top,
                target: HitTarget::Body
            })
        );
    }

    #[test]
    fn test_target_transform_state() {
        assert_eq!(HitTarget::Body.transform_state(), TransformState::Translating);
        assert_eq!(
            HitTarget::Corner(Corner::TopLeft).transform_state(),
            TransformState::Scaling(Corner::TopLeft)
        );
        assert_eq!(HitTarget::MaskPoint(2).transform_state(), TransformState::Masking(2));
    }
}
