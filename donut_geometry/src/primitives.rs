// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric primitives used by the selection engine.
//!
//! Everything here is pure and allocation-free. Inputs are expected to be finite: `NaN` and
//! infinities are the caller's responsibility and generally propagate into `false` results
//! rather than panicking.
//!
//! Note the deliberate difference in boundary handling:
//! - [`point_in_circle`] is exclusive (a point on the circumference is outside), and
//! - [`circle_rectangle_collide`] is inclusive (a rectangle tangent to the circle collides).
//!
//! The first is a precise hole test; the second is a coarse pre-filter.

use core::f64::consts::TAU;

use kurbo::{Line, Point, Rect};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Returns `true` if `point` lies strictly inside the circle.
pub fn point_in_circle(point: Point, center: Point, radius: f64) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy < radius * radius
}

/// Returns `true` if two axis-aligned rectangles overlap.
///
/// Bounds are exclusive: rectangles that only share an edge do not overlap.
/// Both rectangles are expected to be normalized (`x0 <= x1`, `y0 <= y1`).
pub fn rectangles_overlap(a: Rect, b: Rect) -> bool {
    !(a.x0 >= b.x1 || a.y0 >= b.y1 || a.x1 <= b.x0 || a.y1 <= b.y0)
}

/// Returns the intersection of two axis-aligned rectangles.
///
/// Unlike [`Rect::intersect`], the result is not clamped: when the rectangles are disjoint the
/// returned rectangle has a non-positive width or height, which callers treat as "no overlap".
pub fn overlap_region(a: Rect, b: Rect) -> Rect {
    Rect {
        x0: a.x0.max(b.x0),
        y0: a.y0.max(b.y0),
        x1: a.x1.min(b.x1),
        y1: a.y1.min(b.y1),
    }
}

/// Returns `true` if the rectangle touches or overlaps the circle.
///
/// The circle center is clamped into the rectangle to find the closest point; the test is
/// inclusive, so tangency counts as a collision.
pub fn circle_rectangle_collide(rect: Rect, center: Point, radius: f64) -> bool {
    let closest_x = rect.x0.max(center.x.min(rect.x1));
    let closest_y = rect.y0.max(center.y.min(rect.y1));
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx * dx + dy * dy <= radius * radius
}

/// Returns `true` if the whole rectangle lies within the circle (inclusive).
///
/// Uses the farthest extent of the rectangle from the center along each axis.
pub fn rectangle_in_circle(rect: Rect, center: Point, radius: f64) -> bool {
    let dx = (center.x - rect.x0).max(rect.x1 - center.x);
    let dy = (center.y - rect.y0).max(rect.y1 - center.y);
    radius * radius >= dx * dx + dy * dy
}

/// Returns the point on the circumference at `angle`.
///
/// Angle `0` is the topmost point and angles grow clockwise on screen.
pub fn point_on_circle(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Returns the clockwise angle swept from the `reference` ray to the `point` ray around
/// `center`, in `[0, 2π)`.
pub fn angle_between(center: Point, point: Point, reference: Point) -> f64 {
    let to_point = (center.x - point.x).atan2(center.y - point.y);
    let to_reference = (center.x - reference.x).atan2(center.y - reference.y);
    let mut angle = to_reference - to_point;
    if angle < 0.0 {
        angle += TAU;
    }
    // Rounding can land exactly on the upper bound.
    if angle >= TAU { angle - TAU } else { angle }
}

/// Returns `true` if two segments cross at a point interior to both.
///
/// Parallel (and collinear) segments never intersect, and neither do segments that only
/// share an endpoint: both parameters must lie in the open interval `(0, 1)`.
pub fn segments_intersect(a: Line, b: Line) -> bool {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let denominator = da.cross(db);
    if denominator == 0.0 {
        return false;
    }
    let offset = b.p0 - a.p0;
    let t = offset.cross(db) / denominator;
    let u = offset.cross(da) / denominator;
    0.0 < t && t < 1.0 && 0.0 < u && u < 1.0
}

/// Returns the four edges of a rectangle: top, bottom, right, left.
pub fn rectangle_edges(rect: Rect) -> [Line; 4] {
    [
        Line::new((rect.x0, rect.y0), (rect.x1, rect.y0)),
        Line::new((rect.x0, rect.y1), (rect.x1, rect.y1)),
        Line::new((rect.x1, rect.y0), (rect.x1, rect.y1)),
        Line::new((rect.x0, rect.y0), (rect.x0, rect.y1)),
    ]
}

/// Normalizes an angle into `[0, 2π)`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    if a >= TAU { a - TAU } else { a }
}

/// Returns `true` if `angle` lies within `[start, end]`, with a small tolerance for rounding.
pub(crate) fn angle_in_span(angle: f64, start: f64, end: f64) -> bool {
    const EPS: f64 = 1e-9;
    angle >= start - EPS && angle <= end + EPS
}
