//! Numeric range helpers shared by the transform engine
//!
//! All functions are pure. Sizes are floored with [`clamp_min`], pointer
//! coordinates are constrained with [`clamp`] / [`clamp_point`], and
//! design-to-live conversion goes through [`map_range`].

use kurbo::{Point, Rect};

/// Raise `value` to `floor` if it falls below it
pub fn clamp_min(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else {
        value
    }
}

/// Constrain `value` into `[lo, hi]`
///
/// If the range is inverted, `lo` wins. Unlike `f64::clamp` this never panics.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value > hi {
        clamp_min(hi, lo)
    } else {
        clamp_min(value, lo)
    }
}

/// Constrain a point into a rectangle (edges inclusive)
pub fn clamp_point(point: Point, rect: Rect) -> Point {
    let rect = rect.abs();
    Point::new(
        clamp(point.x, rect.x0, rect.x1),
        clamp(point.y, rect.y0, rect.y1),
    )
}

/// Linearly map `value` from `[src_lo, src_hi]` into `[dst_lo, dst_hi]`
///
/// Values outside the source range extrapolate. A degenerate source range
/// maps everything to `dst_lo`.
pub fn map_range(value: f64, src_lo: f64, src_hi: f64, dst_lo: f64, dst_hi: f64) -> f64 {
    let span = src_hi - src_lo;
    if span.abs() < f64::EPSILON {
        return dst_lo;
    }
    dst_lo + (value - src_lo) / span * (dst_hi - dst_lo)
}
