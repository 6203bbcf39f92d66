//! Editor and transform controller
//!
//! The top-level state holder. Each frame the shell feeds it the pointer
//! position and pointer/keyboard events; the editor turns them into calls on
//! the [`ObjectStore`] and on the selected [`MaskFrame`]'s transform API.
//!
//! When a drag starts the editor caches the offset between the pointer and
//! the grabbed anchor (top-left for a move, the dragged corner for a scale,
//! the mask point for a mask edit). Every subsequent move subtracts that
//! offset, so the anchor tracks the pointer instead of jumping to it.

use crate::command::Command;
use crate::document::MaskLayout;
use crate::file_io::{Autosaver, ProjectStorage};
use crate::geometry::{clamp, clamp_min};
use crate::mask_frame::MaskFrame;
use crate::mode::RenderMode;
use crate::object_store::ObjectStore;
use crate::presets::Presets;
use crate::tool::{Corner, TransformState};
use kurbo::{Point, Vec2};
use uuid::Uuid;

pub struct Editor<S: ProjectStorage> {
    presets: Presets,
    store: ObjectStore,
    storage: S,
    autosaver: Autosaver,
    mode: RenderMode,

    mouse: Point,

    /// Pointer minus grabbed anchor, captured on pointer-down
    mouse_offset: Vec2,

    /// Frame being dragged; a handle into the store, cleared on release
    selected_frame: Option<Uuid>,

    /// Corner being dragged while scaling
    selected_corner: Option<Corner>,

    /// Last persistence failure, shown to the operator
    last_error: Option<String>,
}

impl<S: ProjectStorage> Editor<S> {
    /// Create an editor with empty canvases laid out from `presets`
    pub fn new(presets: Presets, storage: S) -> Self {
        let layout = MaskLayout::new(presets.design_canvas(), presets.live_canvas());
        let store = ObjectStore::new(layout, &presets);
        let autosaver = Autosaver::new(presets.autosave_interval());
        Self {
            presets,
            store,
            storage,
            autosaver,
            mode: RenderMode::default(),
            mouse: Point::ZERO,
            mouse_offset: Vec2::ZERO,
            selected_frame: None,
            selected_corner: None,
            last_error: None,
        }
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn layout(&self) -> &MaskLayout {
        self.store.layout()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn mouse_position(&self) -> Point {
        self.mouse
    }

    pub fn selected_frame(&self) -> Option<Uuid> {
        self.selected_frame
    }

    pub fn selected_corner(&self) -> Option<Corner> {
        self.selected_corner
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse = Point::new(x, y);
    }

    /// Per-frame housekeeping: highlights and deferred autosaves
    pub fn update(&mut self) {
        if self.is_transforming() {
            return;
        }
        self.store.update_highlights(self.mouse.x, self.mouse.y);
        if self.autosaver.poll() {
            self.write_autosave();
        }
    }

    /// Whether a drag is currently changing a frame
    pub fn is_transforming(&self) -> bool {
        self.selected_frame
            .and_then(|id| self.store.frame(&id))
            .is_some_and(|frame| frame.transform_state().is_active())
    }

    /// Start a drag on whatever is under the pointer
    pub fn pointer_down(&mut self) {
        if !self.is_transforming() {
            self.store.update_highlights(self.mouse.x, self.mouse.y);
        }
        self.selected_frame = self.store.begin_transform();
        if self.selected_frame.is_some() {
            self.set_mouse_offset_from_selected_frame();
        }
    }

    /// Apply the current pointer position to the active drag
    pub fn pointer_drag(&mut self) {
        let Some(frame_id) = self.selected_frame else {
            return;
        };
        let Some(state) = self.store.frame(&frame_id).map(MaskFrame::transform_state) else {
            return;
        };
        if let TransformState::Scaling(_) = state {
            self.scale_selected_frame(frame_id);
            return;
        }

        let target = self.mouse - self.mouse_offset;
        if let Some(frame) = self.store.frame_mut(&frame_id) {
            match state {
                TransformState::Translating => frame.set_position(target.x, target.y),
                TransformState::Masking(_) => {
                    frame.set_selected_mask_point_position(target.x, target.y)
                }
                TransformState::Scaling(_) | TransformState::NoTransform => {}
            }
        }
    }

    /// End the drag, capture its undo checkpoint and autosave
    ///
    /// Always safe, even if nothing was grabbed.
    pub fn pointer_release(&mut self) {
        self.selected_frame = None;
        self.selected_corner = None;
        self.store.end_transform();
        self.autosave_objects();
    }

    /// Run one typed command
    pub fn respond_to_command(&mut self, command: Command) {
        log::debug!("Command: {:?}", command);
        match command {
            Command::NewFrame => self.create_new_mask_frame(),
            Command::NewPoint => {
                self.store.create_mask_point_at(self.mouse.x, self.mouse.y);
            }
            Command::Undo => {
                if !self.store.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            Command::Redo => {
                if !self.store.redo() {
                    log::debug!("Nothing to redo");
                }
            }
            Command::DeleteSelected => {
                self.store.erase();
            }
            Command::Nudge(direction) => {
                self.store.nudge(direction);
            }
            Command::Save => self.save_objects(),
            Command::Load => self.load_objects(),
            Command::CycleMode => self.cycle_mode(),
            Command::ToggleFrameNudge => self.store.toggle_frame_nudge(),
            Command::ToggleFullscreen => {
                log::debug!("Fullscreen is handled by the window");
            }
        }
        if command.autosaves() {
            self.autosave_objects();
        }
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.cycle();
    }

    /// Pointer position mirrored into the live canvas
    ///
    /// Only while the pointer is over the design canvas and the mode shows
    /// the cross-hair.
    pub fn live_cursor(&self) -> Option<Point> {
        let layout = self.store.layout();
        if !self.mode.shows_live_cursor() || !layout.design_canvas.contains(self.mouse) {
            return None;
        }
        Some(layout.design_canvas.map_point(self.mouse, &layout.live_canvas))
    }

    /// One-line status for the window: mode, nudge target, undo step and
    /// the last persistence error
    pub fn status(&self) -> String {
        let mut status = format!(
            "{}  |  Nudge: {}",
            self.mode.display_name(),
            if self.store.frame_nudge_enabled() { "frame" } else { "point" },
        );
        if let Some(undo) = self.store.undo_description() {
            status.push_str(&format!("  |  Undo: {}", undo));
        }
        if let Some(error) = &self.last_error {
            status.push_str(&format!("  |  {}", error));
        }
        status
    }

    /// Replace the object graph with the stored one
    ///
    /// Failures are reported and leave the current graph untouched.
    pub fn load_objects(&mut self) {
        if self.store.is_transforming() {
            log::debug!("Ignoring load during a transform");
            return;
        }
        match self.storage.load() {
            Ok(layout) => {
                self.selected_frame = None;
                self.selected_corner = None;
                self.store.replace_layout(layout);
                self.last_error = None;
            }
            Err(e) => self.report_error("Load", e),
        }
    }

    pub fn save_objects(&mut self) {
        match self.storage.save(self.store.layout(), false) {
            Ok(()) => self.last_error = None,
            Err(e) => self.report_error("Save", e),
        }
    }

    /// Request a debounced autosave
    ///
    /// Deferred while a drag is in progress.
    pub fn autosave_objects(&mut self) {
        if self.is_transforming() {
            return;
        }
        if self.autosaver.request() {
            self.write_autosave();
        }
    }

    /// Write a deferred autosave now, ignoring the debounce interval
    pub fn flush_autosave(&mut self) {
        if self.autosaver.take_pending() {
            self.write_autosave();
        }
    }

    fn write_autosave(&mut self) {
        if let Err(e) = self.storage.save(self.store.layout(), true) {
            self.report_error("Autosave", e);
        }
    }

    fn report_error(&mut self, what: &str, error: crate::error::MaskEditorError) {
        log::error!("{} failed: {}", what, error);
        self.last_error = Some(format!("{} failed: {}", what, error));
    }

    fn create_new_mask_frame(&mut self) {
        let frame = MaskFrame::new(
            self.mouse.x,
            self.mouse.y,
            self.presets.new_mask_frame_width,
            self.presets.new_mask_frame_height,
            self.presets.min_mask_frame_size,
        );
        self.store.add(frame);
    }

    fn set_mouse_offset_from_selected_frame(&mut self) {
        let Some(frame) = self.selected_frame.and_then(|id| self.store.frame(&id)) else {
            return;
        };
        let anchor = match frame.transform_state() {
            TransformState::Translating => Some(frame.position()),
            TransformState::Scaling(corner) => {
                self.selected_corner = Some(corner);
                Some(frame.corner_position(corner))
            }
            TransformState::Masking(_) => frame.selected_mask_point().map(|p| p.position()),
            TransformState::NoTransform => None,
        };
        self.mouse_offset = anchor.map_or(Vec2::ZERO, |anchor| self.mouse - anchor);
    }

    /// Resize the selected frame so the dragged corner follows the pointer
    ///
    /// The pointer is first held inside the design canvas (shifted by the
    /// grab offset), then the candidate size is measured from the anchored
    /// edges and floored to the frame's smallest legal size.
    fn scale_selected_frame(&mut self, frame_id: Uuid) {
        let Some(corner) = self.selected_corner else {
            return;
        };
        let design = self.store.layout().design_canvas.clone();
        let offset = self.mouse_offset;
        let Some(frame) = self.store.frame_mut(&frame_id) else {
            return;
        };

        let mouse_x = clamp(self.mouse.x, design.x + offset.x, design.right() + offset.x);
        let mouse_y = clamp(self.mouse.y, design.y + offset.y, design.bottom() + offset.y);
        let (x, y) = (frame.x(), frame.y());
        let (width, height) = (frame.width(), frame.height());

        let (new_width, new_height) = match corner {
            Corner::TopLeft => (
                (x + width + offset.x) - mouse_x,
                (y + height + offset.y) - mouse_y,
            ),
            Corner::TopRight => (
                mouse_x - (x + offset.x),
                (y + height + offset.y) - mouse_y,
            ),
            Corner::BottomRight => (mouse_x - (x + offset.x), mouse_y - (y + offset.y)),
            Corner::BottomLeft => (
                (x + width + offset.x) - mouse_x,
                mouse_y - (y + offset.y),
            ),
        };

        let new_width = clamp_min(new_width, frame.smallest_legal_width(corner));
        let new_height = clamp_min(new_height, frame.smallest_legal_height(corner));
        frame.set_size(new_width, new_height, corner);
    }
}
