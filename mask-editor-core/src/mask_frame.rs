//! Mask frames and mask points
//!
//! A MaskFrame is a rectangle in design space that owns an ordered list of
//! mask points. While the pointer is dragging it, the frame carries a
//! [`TransformState`] that gates which of its mutators have any effect.

use crate::canvas::Canvas;
use crate::geometry::{clamp_min, clamp_point};
use crate::tool::{Corner, TransformState};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single editable vertex of a mask, in absolute design-space coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskPoint {
    pub x: f64,
    pub y: f64,
}

impl MaskPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for MaskPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Snapshot of everything a transform can change on a frame
///
/// Used as the before/after pair of undoable transform actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub mask_points: Vec<MaskPoint>,
}

/// A resizable rectangular container of mask points
///
/// Deserialization goes through [`MaskFrameData`] so loaded frames obey the
/// same size floor and point containment as constructed ones.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "MaskFrameData")]
pub struct MaskFrame {
    /// Unique identifier
    pub id: Uuid,

    x: f64,
    y: f64,
    width: f64,
    height: f64,

    /// Smallest width/height the frame may be scaled down to
    min_size: f64,

    /// Mask polygon, in drawing order
    #[serde(default)]
    mask_points: Vec<MaskPoint>,

    #[serde(skip)]
    transform_state: TransformState,

    #[serde(skip)]
    highlighted_corner: Option<Corner>,

    #[serde(skip)]
    highlighted_mask_point: Option<usize>,
}

/// Persisted form of a [`MaskFrame`], before validation
#[derive(Deserialize)]
struct MaskFrameData {
    id: Uuid,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    min_size: f64,
    #[serde(default)]
    mask_points: Vec<MaskPoint>,
}

impl From<MaskFrameData> for MaskFrame {
    fn from(data: MaskFrameData) -> Self {
        let mut frame = MaskFrame::new(data.x, data.y, data.width, data.height, data.min_size)
            .with_mask_points(data.mask_points);
        frame.id = data.id;
        frame
    }
}

impl MaskFrame {
    /// Create a new frame with its top-left at `(x, y)`
    ///
    /// Width and height are floored to `min_size`.
    pub fn new(x: f64, y: f64, width: f64, height: f64, min_size: f64) -> Self {
        let min_size = clamp_min(min_size, 1.0);
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width: clamp_min(width, min_size),
            height: clamp_min(height, min_size),
            min_size,
            mask_points: Vec::new(),
            transform_state: TransformState::NoTransform,
            highlighted_corner: None,
            highlighted_mask_point: None,
        }
    }

    /// Attach mask points at construction time (clamped into the frame)
    pub fn with_mask_points(mut self, points: impl IntoIterator<Item = MaskPoint>) -> Self {
        for point in points {
            self.add_mask_point(point);
        }
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Absolute position of one of the four corners
    pub fn corner_position(&self, corner: Corner) -> Point {
        let rect = self.rect();
        match corner {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
        }
    }

    pub fn mask_points(&self) -> &[MaskPoint] {
        &self.mask_points
    }

    pub fn transform_state(&self) -> TransformState {
        self.transform_state
    }

    /// Enter or leave a transform
    ///
    /// A `Masking` state naming a point that does not exist is refused and
    /// leaves the frame idle.
    pub fn set_transform_state(&mut self, state: TransformState) {
        self.transform_state = match state {
            TransformState::Masking(index) if index >= self.mask_points.len() => {
                TransformState::NoTransform
            }
            other => other,
        };
    }

    /// The mask point being dragged, if the frame is masking
    pub fn selected_mask_point(&self) -> Option<&MaskPoint> {
        match self.transform_state {
            TransformState::Masking(index) => self.mask_points.get(index),
            _ => None,
        }
    }

    /// Move the frame's top-left to `(x, y)`, carrying its mask points along
    ///
    /// Ignored unless the frame is translating.
    pub fn set_position(&mut self, x: f64, y: f64) {
        if self.transform_state != TransformState::Translating {
            return;
        }
        let delta = Point::new(x, y) - self.position();
        self.translate_by(delta);
    }

    /// Resize while keeping the corner opposite `corner` fixed
    ///
    /// Ignored unless the frame is scaling. Sizes below the smallest legal
    /// size for `corner` are raised to it.
    pub fn set_size(&mut self, width: f64, height: f64, corner: Corner) {
        if !matches!(self.transform_state, TransformState::Scaling(_)) {
            return;
        }
        let width = clamp_min(width, self.smallest_legal_width(corner));
        let height = clamp_min(height, self.smallest_legal_height(corner));

        if corner.moves_left_edge() {
            self.x = self.x + self.width - width;
        }
        if corner.moves_top_edge() {
            self.y = self.y + self.height - height;
        }
        self.width = width;
        self.height = height;
    }

    /// Move the selected mask point, keeping it inside the frame
    ///
    /// Ignored unless the frame is masking.
    pub fn set_selected_mask_point_position(&mut self, x: f64, y: f64) {
        if let TransformState::Masking(index) = self.transform_state {
            let rect = self.rect();
            if let Some(point) = self.mask_points.get_mut(index) {
                *point = clamp_point(Point::new(x, y), rect).into();
            }
        }
    }

    /// Smallest width the frame may take while `corner` is dragged
    ///
    /// The anchored vertical edge stays put, so every mask point must still
    /// fit between it and the moving edge.
    pub fn smallest_legal_width(&self, corner: Corner) -> f64 {
        let extent = if corner.moves_left_edge() {
            let right = self.x + self.width;
            self.mask_points
                .iter()
                .map(|p| right - p.x)
                .fold(0.0, f64::max)
        } else {
            self.mask_points
                .iter()
                .map(|p| p.x - self.x)
                .fold(0.0, f64::max)
        };
        clamp_min(extent, self.min_size)
    }

    /// Smallest height the frame may take while `corner` is dragged
    pub fn smallest_legal_height(&self, corner: Corner) -> f64 {
        let extent = if corner.moves_top_edge() {
            let bottom = self.y + self.height;
            self.mask_points
                .iter()
                .map(|p| bottom - p.y)
                .fold(0.0, f64::max)
        } else {
            self.mask_points
                .iter()
                .map(|p| p.y - self.y)
                .fold(0.0, f64::max)
        };
        clamp_min(extent, self.min_size)
    }

    /// Whether a point lies on the frame body (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        let rect = self.rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    /// The corner whose square hot-zone of side `handle_size` contains `point`
    pub fn corner_at(&self, point: Point, handle_size: f64) -> Option<Corner> {
        let half = handle_size / 2.0;
        Corner::all().iter().copied().find(|&corner| {
            let c = self.corner_position(corner);
            (point.x - c.x).abs() <= half && (point.y - c.y).abs() <= half
        })
    }

    /// Index of the topmost mask point within `radius` of `point`
    pub fn mask_point_at(&self, point: Point, radius: f64) -> Option<usize> {
        self.mask_points
            .iter()
            .rposition(|p| p.position().distance(point) <= radius)
    }

    /// Recompute the highlighted corner and mask point for the pointer
    pub fn update_highlights(&mut self, pointer: Point, corner_handle_size: f64, point_radius: f64) {
        self.highlighted_corner = self.corner_at(pointer, corner_handle_size);
        self.highlighted_mask_point = self.mask_point_at(pointer, point_radius);
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted_corner = None;
        self.highlighted_mask_point = None;
    }

    /// Corner under the pointer as of the last highlight update
    pub fn highlighted_corner(&self) -> Option<Corner> {
        self.highlighted_corner
    }

    pub fn highlighted_mask_point(&self) -> Option<usize> {
        self.highlighted_mask_point
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            mask_points: self.mask_points.clone(),
        }
    }

    pub(crate) fn apply_geometry(&mut self, geometry: &FrameGeometry) {
        self.x = geometry.x;
        self.y = geometry.y;
        self.width = geometry.width;
        self.height = geometry.height;
        self.mask_points = geometry.mask_points.clone();
        if let TransformState::Masking(index) = self.transform_state {
            if index >= self.mask_points.len() {
                self.transform_state = TransformState::NoTransform;
            }
        }
    }

    /// Move the frame and its mask points without any state check
    pub(crate) fn translate_by(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
        for point in &mut self.mask_points {
            point.x += delta.x;
            point.y += delta.y;
        }
    }

    /// Append a mask point (clamped into the frame) and return its index
    pub(crate) fn add_mask_point(&mut self, point: MaskPoint) -> usize {
        let point = clamp_point(point.position(), self.rect()).into();
        self.mask_points.push(point);
        self.mask_points.len() - 1
    }

    pub(crate) fn insert_mask_point(&mut self, index: usize, point: MaskPoint) {
        let index = index.min(self.mask_points.len());
        self.mask_points.insert(index, point);
    }

    pub(crate) fn remove_mask_point(&mut self, index: usize) -> Option<MaskPoint> {
        if index >= self.mask_points.len() {
            return None;
        }
        self.highlighted_mask_point = None;
        Some(self.mask_points.remove(index))
    }

    /// Offset one mask point, keeping it inside the frame
    pub(crate) fn move_mask_point_by(&mut self, index: usize, delta: Vec2) -> bool {
        let rect = self.rect();
        match self.mask_points.get_mut(index) {
            Some(point) => {
                *point = clamp_point(point.position() + delta, rect).into();
                true
            }
            None => false,
        }
    }

    /// The frame's rectangle mirrored into live space
    pub fn live_rect(&self, design: &Canvas, live: &Canvas) -> Rect {
        design.map_rect(self.rect(), live)
    }

    /// The frame's mask points mirrored into live space
    pub fn live_mask_points(&self, design: &Canvas, live: &Canvas) -> Vec<Point> {
        self.mask_points
            .iter()
            .map(|p| design.map_point(p.position(), live))
            .collect()
    }
}
