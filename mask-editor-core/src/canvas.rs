//! Design and live canvases
//!
//! A canvas is a positioned rectangle with a grid overlay. The core only reads
//! its bounds: to constrain scaling, to hit-test the pointer and to map
//! design-space coordinates into live space.

use crate::geometry::map_range;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A rectangular coordinate space on screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Left edge in window coordinates
    pub x: f64,
    /// Top edge in window coordinates
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Number of vertical grid lines drawn over the canvas
    #[serde(default)]
    pub grid_lines_x: u32,
    /// Number of horizontal grid lines drawn over the canvas
    #[serde(default)]
    pub grid_lines_y: u32,
}

impl Canvas {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            grid_lines_x: 0,
            grid_lines_y: 0,
        }
    }

    /// Set the grid line counts
    pub fn with_grid(mut self, grid_lines_x: u32, grid_lines_y: u32) -> Self {
        self.grid_lines_x = grid_lines_x;
        self.grid_lines_y = grid_lines_y;
        self
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Whether a point lies strictly inside the canvas (edges excluded)
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }

    /// Map a point in this canvas linearly into `target`
    pub fn map_point(&self, point: Point, target: &Canvas) -> Point {
        Point::new(
            map_range(point.x, self.x, self.right(), target.x, target.right()),
            map_range(point.y, self.y, self.bottom(), target.y, target.bottom()),
        )
    }

    /// Map a rectangle in this canvas linearly into `target`
    pub fn map_rect(&self, rect: Rect, target: &Canvas) -> Rect {
        let p0 = self.map_point(Point::new(rect.x0, rect.y0), target);
        let p1 = self.map_point(Point::new(rect.x1, rect.y1), target);
        Rect::from_points(p0, p1)
    }

    /// X positions of the vertical grid lines, evenly spaced between the edges
    pub fn grid_xs(&self) -> Vec<f64> {
        let step = self.width / (self.grid_lines_x + 1) as f64;
        (1..=self.grid_lines_x).map(|i| self.x + step * i as f64).collect()
    }

    /// Y positions of the horizontal grid lines
    pub fn grid_ys(&self) -> Vec<f64> {
        let step = self.height / (self.grid_lines_y + 1) as f64;
        (1..=self.grid_lines_y).map(|i| self.y + step * i as f64).collect()
    }
}
