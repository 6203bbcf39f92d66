/// Transform state for interactive frame editing
///
/// Defines what a pointer drag does to the frame it grabbed, which corner a
/// scale is dragging, and the four nudge directions.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four corner handles of a mask frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// The corner that stays fixed while this one is dragged
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }

    /// Whether dragging this corner moves the left edge
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Whether dragging this corner moves the top edge
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// All corners, in hit-test order
    pub fn all() -> &'static [Corner] {
        &[
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomRight,
            Corner::BottomLeft,
        ]
    }
}

/// What an in-progress pointer drag is doing to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformState {
    /// Not being manipulated
    #[default]
    NoTransform,
    /// Moving the whole frame
    Translating,
    /// Resizing from the given corner; the opposite corner stays put
    Scaling(Corner),
    /// Moving the mask point at the given index
    Masking(usize),
}

impl TransformState {
    pub fn is_active(self) -> bool {
        self != TransformState::NoTransform
    }
}

/// Keyboard nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Offset for a nudge of `step` units in this direction
    pub fn delta(self, step: f64) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Right => Vec2::new(step, 0.0),
            Direction::Down => Vec2::new(0.0, step),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}
