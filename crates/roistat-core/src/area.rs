//! Area enumeration - shapes to integer pixel coordinates
//!
//! Converts a [`Shape`] into the exact set of integer pixel coordinates it
//! covers: the filled interior for rectangles and ellipses, the boundary
//! walk for lines, a single coordinate for points.
//!
//! # Contract
//!
//! - Enumeration order is deterministic and exhaustive: identical inputs
//!   produce the identical coordinate sequence (filled shapes scan
//!   row-major, y outer / x inner).
//! - No image-bounds filtering happens here. Coordinates may be negative
//!   or past the image edge; clipping is applied per coordinate by the
//!   statistics aggregator.
//! - Degenerate shapes (zero or negative width, height, or radius)
//!   enumerate zero coordinates. They are values, not errors.
//!
//! # Rounding rule
//!
//! Real coordinates and extents are truncated toward zero (`as i64`).
//! A rectangle at `(x, y)` spans the integer columns
//! `trunc(x) .. trunc(x) + trunc(w)`; an ellipse is tested against its
//! real-valued equation over the truncated bounding box; line and point
//! coordinates are truncated endpoints.

use crate::shape::{Shape, ShapeGeometry};

/// Buffered area enumeration result: parallel x/y coordinate arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapePoints {
    /// X coordinates, in enumeration order
    pub x: Vec<i32>,
    /// Y coordinates, in enumeration order
    pub y: Vec<i32>,
}

impl ShapePoints {
    /// Number of enumerated coordinates.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if the shape enumerated no coordinates.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Enumerate every integer pixel coordinate covered by `shape`, invoking
/// `callback` once per coordinate.
///
/// This is the pull-based primitive the statistics aggregator consumes;
/// see the module docs for ordering and rounding guarantees.
pub fn area_points<F: FnMut(i32, i32)>(shape: &Shape, mut callback: F) {
    match shape.geometry {
        ShapeGeometry::Point { x, y } => callback(x as i32, y as i32),
        ShapeGeometry::Line { x1, y1, x2, y2 } => {
            line_points(x1, y1, x2, y2, &mut callback);
        }
        ShapeGeometry::Rectangle { x, y, w, h } => {
            rectangle_points(x, y, w, h, &mut callback);
        }
        ShapeGeometry::Ellipse { cx, cy, rx, ry } => {
            ellipse_points(cx, cy, rx, ry, &mut callback);
        }
    }
}

/// Enumerate a shape's coordinates into a buffered [`ShapePoints`].
///
/// Trades memory for reuse; prefer [`area_points`] when streaming.
pub fn shape_points(shape: &Shape) -> ShapePoints {
    let mut points = ShapePoints::default();
    area_points(shape, |x, y| {
        points.x.push(x);
        points.y.push(y);
    });
    points
}

/// Count the coordinates a shape enumerates, without buffering them.
pub fn point_count(shape: &Shape) -> u64 {
    let mut count = 0u64;
    area_points(shape, |_, _| count += 1);
    count
}

/// Saturating narrowing; coordinates past the i32 range are far off any
/// image and get clipped by the aggregator either way.
fn narrow(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Row-major scan of the filled rectangle interior.
fn rectangle_points<F: FnMut(i32, i32)>(x: f64, y: f64, w: f64, h: f64, callback: &mut F) {
    let x0 = x as i64;
    let y0 = y as i64;
    let nx = w as i64;
    let ny = h as i64;
    // Empty ranges cover both zero and negative extents
    for iy in y0..y0.saturating_add(ny) {
        for ix in x0..x0.saturating_add(nx) {
            callback(narrow(ix), narrow(iy));
        }
    }
}

/// Row-major scan of the filled ellipse interior.
///
/// A coordinate is inside when `((x-cx)/rx)^2 + ((y-cy)/ry)^2 <= 1`.
fn ellipse_points<F: FnMut(i32, i32)>(cx: f64, cy: f64, rx: f64, ry: f64, callback: &mut F) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    let y_lo = (cy - ry).floor() as i64;
    let y_hi = (cy + ry).ceil() as i64;
    let x_lo = (cx - rx).floor() as i64;
    let x_hi = (cx + rx).ceil() as i64;

    for iy in y_lo..=y_hi {
        let dy = (iy as f64 - cy) / ry;
        for ix in x_lo..=x_hi {
            let dx = (ix as f64 - cx) / rx;
            if dx * dx + dy * dy <= 1.0 {
                callback(narrow(ix), narrow(iy));
            }
        }
    }
}

/// Bresenham walk along the line segment, both endpoints inclusive.
///
/// Endpoints are narrowed onto the i32 grid first; the walk itself runs
/// in i64 so even a full-grid span cannot overflow the error terms.
fn line_points<F: FnMut(i32, i32)>(x1: f64, y1: f64, x2: f64, y2: f64, callback: &mut F) {
    let x1 = narrow(x1 as i64) as i64;
    let y1 = narrow(y1 as i64) as i64;
    let x2 = narrow(x2 as i64) as i64;
    let y2 = narrow(y2 as i64) as i64;

    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx: i64 = if x1 < x2 { 1 } else { -1 };
    let sy: i64 = if y1 < y2 { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = x1;
    let mut y = y1;

    loop {
        callback(x as i32, y as i32);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
