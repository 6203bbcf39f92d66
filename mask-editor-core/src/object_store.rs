//! Object store
//!
//! Owns the mask frames (through the [`ActionExecutor`]) and everything that
//! decides which of them the pointer and keyboard act on: the highlight, the
//! frame-nudge mode and the in-progress transform.
//!
//! ## Checkpoints
//!
//! Every discrete edit (add, erase, nudge, new point) executes exactly one
//! action and so is one undo step. Pointer drags are edited live and only
//! become undoable when [`ObjectStore::end_transform`] captures the
//! transform checkpoint: one action holding the geometry from before the
//! drag and the geometry after it.
//!
//! Discrete edits and undo/redo are refused while a transform is in
//! progress; the frame being dragged must not change underneath the pointer.

use crate::action::ActionExecutor;
use crate::actions::{
    AddMaskFrameAction, AddMaskPointAction, RemoveMaskFrameAction, RemoveMaskPointAction,
    TransformFrameAction, TransformKind,
};
use crate::document::MaskLayout;
use crate::hit_test::{hit_test_layout, HandleSizes, Highlight, HitTarget};
use crate::mask_frame::{FrameGeometry, MaskFrame, MaskPoint};
use crate::presets::Presets;
use crate::tool::{Direction, TransformState};
use kurbo::Point;
use uuid::Uuid;

/// The frame currently being dragged and its geometry before the drag
struct ActiveTransform {
    frame_id: Uuid,
    state: TransformState,
    baseline: FrameGeometry,
}

pub struct ObjectStore {
    executor: ActionExecutor,
    handles: HandleSizes,
    nudge_step: f64,

    /// What the pointer is over, as of the last highlight update
    highlight: Option<Highlight>,

    /// Pointer position of the last highlight update
    last_pointer: Option<Point>,

    /// Nudges move whole frames when set, single mask points otherwise
    frame_nudge_enabled: bool,

    active_transform: Option<ActiveTransform>,
}

impl ObjectStore {
    pub fn new(layout: MaskLayout, presets: &Presets) -> Self {
        let mut executor = ActionExecutor::new(layout);
        executor.set_max_undo_depth(presets.max_undo_depth);
        Self {
            executor,
            handles: presets.handle_sizes(),
            nudge_step: presets.nudge_step,
            highlight: None,
            last_pointer: None,
            frame_nudge_enabled: true,
            active_transform: None,
        }
    }

    pub fn layout(&self) -> &MaskLayout {
        self.executor.layout()
    }

    pub fn frames(&self) -> &[MaskFrame] {
        self.executor.layout().frames()
    }

    pub fn frame(&self, id: &Uuid) -> Option<&MaskFrame> {
        self.executor.layout().get_frame(id)
    }

    /// Mutable frame access for live transform previews
    ///
    /// Only the frame being transformed should be changed through this; its
    /// final geometry is recorded by [`ObjectStore::end_transform`].
    pub fn frame_mut(&mut self, id: &Uuid) -> Option<&mut MaskFrame> {
        self.executor.layout_mut().get_frame_mut(id)
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn handle_sizes(&self) -> HandleSizes {
        self.handles
    }

    pub fn is_transforming(&self) -> bool {
        self.active_transform.is_some()
    }

    /// ID of the frame being transformed, if any
    pub fn transforming_frame(&self) -> Option<Uuid> {
        self.active_transform.as_ref().map(|t| t.frame_id)
    }

    /// Recompute what the pointer is over
    ///
    /// Skipped while a transform is in progress so the dragged element stays
    /// highlighted. Never changes geometry.
    pub fn update_highlights(&mut self, mouse_x: f64, mouse_y: f64) {
        if self.is_transforming() {
            return;
        }
        let pointer = Point::new(mouse_x, mouse_y);
        self.last_pointer = Some(pointer);
        let handles = self.handles;
        let highlight = hit_test_layout(self.executor.layout(), pointer, handles);

        for frame in self.executor.layout_mut().frames_mut() {
            if highlight.is_some_and(|h| h.frame_id == frame.id) {
                frame.update_highlights(pointer, handles.corner, handles.mask_point_radius);
            } else {
                frame.clear_highlights();
            }
        }
        self.highlight = highlight;
    }

    fn clear_highlights(&mut self) {
        self.highlight = None;
        for frame in self.executor.layout_mut().frames_mut() {
            frame.clear_highlights();
        }
    }

    /// Re-resolve the highlight at the last pointer position
    ///
    /// Frames and point indices may have changed under the pointer, so a
    /// stale highlight must not be reused.
    fn refresh_highlights(&mut self) {
        match self.last_pointer {
            Some(pointer) => self.update_highlights(pointer.x, pointer.y),
            None => self.clear_highlights(),
        }
    }

    /// Start transforming whatever is highlighted
    ///
    /// Body → translate, corner → scale, mask point → mask edit. Returns the
    /// frame's handle, or `None` if nothing is under the pointer. A stale
    /// transform is ended first so at most one frame is ever mid-transform.
    pub fn begin_transform(&mut self) -> Option<Uuid> {
        if self.is_transforming() {
            self.end_transform();
        }
        let highlight = self.highlight?;
        let frame = self.executor.layout_mut().get_frame_mut(&highlight.frame_id)?;

        frame.set_transform_state(highlight.target.transform_state());
        let state = frame.transform_state();
        if !state.is_active() {
            return None;
        }

        log::debug!("Begin {:?} on frame {}", state, highlight.frame_id);
        self.active_transform = Some(ActiveTransform {
            frame_id: highlight.frame_id,
            state,
            baseline: frame.geometry(),
        });
        Some(highlight.frame_id)
    }

    /// Finish the active transform and capture its undo checkpoint
    ///
    /// Safe to call when nothing is being transformed.
    pub fn end_transform(&mut self) {
        let Some(active) = self.active_transform.take() else {
            return;
        };
        if let Some(frame) = self.executor.layout_mut().get_frame_mut(&active.frame_id) {
            frame.set_transform_state(TransformState::NoTransform);
        }
        log::debug!("End {:?} on frame {}", active.state, active.frame_id);
        self.capture_transform_checkpoint(active);
    }

    /// Record a finished drag as one undoable action
    ///
    /// Nothing is recorded if the drag left the geometry unchanged.
    fn capture_transform_checkpoint(&mut self, active: ActiveTransform) {
        let Some(current) = self.frame(&active.frame_id).map(MaskFrame::geometry) else {
            return;
        };
        if current == active.baseline {
            return;
        }
        let kind = match active.state {
            TransformState::Scaling(_) => TransformKind::Scale,
            TransformState::Masking(_) => TransformKind::MoveMaskPoint,
            TransformState::Translating | TransformState::NoTransform => TransformKind::Translate,
        };
        self.executor.execute(Box::new(TransformFrameAction::new(
            active.frame_id,
            kind,
            active.baseline,
            current,
        )));
    }

    /// Take ownership of a new frame and place it on top
    pub fn add(&mut self, frame: MaskFrame) -> Option<Uuid> {
        if self.refuse_while_transforming("add") {
            return None;
        }
        let action = AddMaskFrameAction::new(frame);
        let frame_id = action.frame_id();
        self.executor.execute(Box::new(action));
        Some(frame_id)
    }

    /// Delete the highlighted item
    ///
    /// A highlighted mask point is erased on its own; a highlighted body or
    /// corner erases the whole frame. Returns false if nothing was deleted.
    pub fn erase(&mut self) -> bool {
        if self.refuse_while_transforming("erase") {
            return false;
        }
        let Some(highlight) = self.highlight else {
            return false;
        };
        if self.frame(&highlight.frame_id).is_none() {
            return false;
        }
        match highlight.target {
            HitTarget::MaskPoint(index) => self
                .executor
                .execute(Box::new(RemoveMaskPointAction::new(highlight.frame_id, index))),
            HitTarget::Body | HitTarget::Corner(_) => self
                .executor
                .execute(Box::new(RemoveMaskFrameAction::new(highlight.frame_id))),
        }
        self.clear_highlights();
        true
    }

    /// Move the highlighted frame, or mask point, one step
    ///
    /// With frame-nudge enabled the highlighted frame moves along with its
    /// points. Otherwise only a highlighted mask point moves, kept inside its
    /// frame. Returns false if nothing moved.
    pub fn nudge(&mut self, direction: Direction) -> bool {
        if self.refuse_while_transforming("nudge") {
            return false;
        }
        let Some(highlight) = self.highlight else {
            return false;
        };
        let Some(frame) = self.frame(&highlight.frame_id) else {
            return false;
        };

        let delta = direction.delta(self.nudge_step);
        let mut moved = frame.clone();
        let kind = if self.frame_nudge_enabled {
            moved.translate_by(delta);
            TransformKind::NudgeFrame
        } else {
            match highlight.target {
                HitTarget::MaskPoint(index) if moved.move_mask_point_by(index, delta) => {
                    TransformKind::NudgeMaskPoint
                }
                _ => return false,
            }
        };

        let old = frame.geometry();
        let new = moved.geometry();
        if old == new {
            return false;
        }
        self.executor.execute(Box::new(TransformFrameAction::new(
            highlight.frame_id,
            kind,
            old,
            new,
        )));
        true
    }

    pub fn toggle_frame_nudge(&mut self) {
        self.frame_nudge_enabled = !self.frame_nudge_enabled;
        log::debug!("Frame nudge enabled: {}", self.frame_nudge_enabled);
    }

    pub fn frame_nudge_enabled(&self) -> bool {
        self.frame_nudge_enabled
    }

    /// Attach a mask point at `(x, y)` to the highlighted frame
    pub fn create_mask_point_at(&mut self, x: f64, y: f64) -> bool {
        if self.refuse_while_transforming("add point") {
            return false;
        }
        let Some(highlight) = self.highlight else {
            return false;
        };
        if self.frame(&highlight.frame_id).is_none() {
            return false;
        }
        self.executor.execute(Box::new(AddMaskPointAction::new(
            highlight.frame_id,
            MaskPoint::new(x, y),
        )));
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.refuse_while_transforming("undo") {
            return false;
        }
        let undone = self.executor.undo();
        if undone {
            self.refresh_highlights();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if self.refuse_while_transforming("redo") {
            return false;
        }
        let redone = self.executor.redo();
        if redone {
            self.refresh_highlights();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.executor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.executor.can_redo()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.executor.undo_description()
    }

    pub fn redo_description(&self) -> Option<String> {
        self.executor.redo_description()
    }

    /// Replace the whole object graph (after loading); history is dropped
    pub fn replace_layout(&mut self, layout: MaskLayout) {
        self.active_transform = None;
        self.highlight = None;
        self.executor.replace_layout(layout);
    }

    fn refuse_while_transforming(&self, what: &str) -> bool {
        if self.is_transforming() {
            log::debug!("Ignoring {} during a transform", what);
            true
        } else {
            false
        }
    }
}
