// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path generation for drawn sectors and their hover outline.
//!
//! `kurbo` measures angles from the positive `x` axis; the donut measures them from the top.
//! Both grow clockwise on screen, so conversion is a fixed quarter-turn offset.

use core::f64::consts::FRAC_PI_2;

use kurbo::{BezPath, Circle, Rect, Shape};

use crate::bounds::wedge_bounds;
use crate::layout::SectorArc;
use crate::sector::DonutGeometry;

/// The annular wedge a sector is drawn as.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorShape {
    /// The annulus the wedge belongs to.
    pub geometry: DonutGeometry,
    /// Drawn start angle in radians.
    pub start_angle: f64,
    /// Drawn end angle in radians.
    pub end_angle: f64,
    /// Curve flattening tolerance when converting the wedge to a `BezPath`.
    pub tolerance: f64,
}

impl SectorShape {
    /// Creates the drawn wedge of `arc`, with its padding removed.
    pub fn new(geometry: &DonutGeometry, arc: &SectorArc) -> Self {
        let (start_angle, end_angle) = arc.drawn_angles();
        Self {
            geometry: *geometry,
            start_angle,
            end_angle,
            tolerance: 0.1,
        }
    }

    /// Sets the curve flattening tolerance used for `BezPath` conversion.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns `true` if the wedge has no area.
    pub fn is_empty(&self) -> bool {
        self.end_angle <= self.start_angle || self.geometry.is_degenerate()
    }

    /// The wedge outline.
    pub fn path(&self) -> BezPath {
        if self.is_empty() {
            return BezPath::new();
        }
        wedge_path(
            &self.geometry,
            self.geometry.hole_radius(),
            self.geometry.outer_radius,
            self.start_angle,
            self.end_angle,
            self.tolerance,
        )
    }

    /// Exact screen-space bounds of the wedge.
    pub fn bounding_box(&self) -> Rect {
        wedge_bounds(&self.geometry, self.start_angle, self.end_angle)
    }
}

/// The outline shown around a hovered sector.
///
/// It is slightly wider and thicker than the sector itself so the outline never overlaps the
/// sector's fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightShape {
    /// The annulus of the hovered sector.
    pub geometry: DonutGeometry,
    /// Start angle in radians, widened by [`HighlightShape::ANGLE_OFFSET`].
    pub start_angle: f64,
    /// End angle in radians, widened by [`HighlightShape::ANGLE_OFFSET`].
    pub end_angle: f64,
    /// Curve flattening tolerance when converting the outline to a `BezPath`.
    pub tolerance: f64,
}

impl HighlightShape {
    /// Angular widening on each side, in radians.
    pub const ANGLE_OFFSET: f64 = 0.03;
    /// How far the outline reaches into the hole, in pixels.
    pub const INNER_OFFSET: f64 = 3.5;
    /// How far the outline reaches past the outer circle, in pixels.
    pub const OUTER_OFFSET: f64 = 4.5;

    /// Creates the hover outline of `arc`.
    pub fn new(geometry: &DonutGeometry, arc: &SectorArc) -> Self {
        let (start, end) = arc.drawn_angles();
        Self {
            geometry: *geometry,
            start_angle: start - Self::ANGLE_OFFSET,
            end_angle: end + Self::ANGLE_OFFSET,
            tolerance: 0.1,
        }
    }

    /// Sets the curve flattening tolerance used for `BezPath` conversion.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Inner radius of the outline; never negative.
    pub fn inner_radius(&self) -> f64 {
        (self.geometry.inner_radius - Self::INNER_OFFSET).max(0.0)
    }

    /// Outer radius of the outline.
    pub fn outer_radius(&self) -> f64 {
        self.geometry.outer_radius + Self::OUTER_OFFSET
    }

    /// The outline path.
    pub fn path(&self) -> BezPath {
        if self.geometry.is_degenerate() {
            return BezPath::new();
        }
        wedge_path(
            &self.geometry,
            self.inner_radius(),
            self.outer_radius(),
            self.start_angle,
            self.end_angle,
            self.tolerance,
        )
    }
}

fn wedge_path(
    geometry: &DonutGeometry,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    tolerance: f64,
) -> BezPath {
    let circle = Circle::new(geometry.center, outer_radius);
    let segment = circle.segment(inner_radius, start_angle - FRAC_PI_2, end_angle - start_angle);
    segment.path_elements(tolerance).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, PI};

    use kurbo::Point;

    use super::*;

    #[test]
    fn quarter_sector_path_covers_the_upper_right() {
        let geometry = DonutGeometry::new((50.0, 50.0), 20.0, 10.0);
        let shape = SectorShape::new(&geometry, &SectorArc::new(0, 1.0, 0.0, FRAC_PI_2));
        let path = shape.path();

        let b = path.bounding_box();
        assert!((b.x0 - 50.0).abs() < 0.5, "{b:?}");
        assert!((b.y0 - 30.0).abs() < 0.5, "{b:?}");
        assert!((b.x1 - 70.0).abs() < 0.5, "{b:?}");
        assert!((b.y1 - 50.0).abs() < 0.5, "{b:?}");

        assert!(path.contains(Point::new(62.0, 38.0)));
        assert!(!path.contains(Point::new(38.0, 62.0)));
        // Inside the hole.
        assert!(!path.contains(Point::new(53.0, 47.0)));
    }

    #[test]
    fn analytic_bounds_match_the_path() {
        let geometry = DonutGeometry::new((0.0, 0.0), 30.0, 12.0);
        let shape = SectorShape::new(&geometry, &SectorArc::new(0, 1.0, 0.4, 2.6));
        let from_path = shape.path().bounding_box();
        let analytic = shape.bounding_box();
        assert!((from_path.x0 - analytic.x0).abs() < 0.5, "{from_path:?} {analytic:?}");
        assert!((from_path.y0 - analytic.y0).abs() < 0.5, "{from_path:?} {analytic:?}");
        assert!((from_path.x1 - analytic.x1).abs() < 0.5, "{from_path:?} {analytic:?}");
        assert!((from_path.y1 - analytic.y1).abs() < 0.5, "{from_path:?} {analytic:?}");
    }

    #[test]
    fn collapsed_sectors_draw_nothing() {
        let geometry = DonutGeometry::new((0.0, 0.0), 30.0, 12.0);
        let arc = SectorArc::new(0, 0.0, 1.0, 1.5).with_pad_angle(0.6);
        let shape = SectorShape::new(&geometry, &arc);
        assert!(shape.is_empty());
        assert!(shape.path().elements().is_empty());
    }

    #[test]
    fn highlight_is_wider_and_thicker() {
        let geometry = DonutGeometry::new((0.0, 0.0), 100.0, 50.0);
        let arc = SectorArc::new(0, 1.0, 0.0, PI);
        let highlight = HighlightShape::new(&geometry, &arc);
        assert_eq!(highlight.inner_radius(), 46.5);
        assert_eq!(highlight.outer_radius(), 104.5);
        assert!((highlight.start_angle + 0.03).abs() < 1e-12);
        assert!((highlight.end_angle - (PI + 0.03)).abs() < 1e-12);

        let b = highlight.path().bounding_box();
        assert!(b.y0 < -104.0, "{b:?}");
        assert!(b.x0 < 0.0, "widened start should cross the top: {b:?}");
    }

    #[test]
    fn highlight_of_a_pie_keeps_a_non_negative_hole() {
        let geometry = DonutGeometry::new((0.0, 0.0), 100.0, 0.0);
        let highlight = HighlightShape::new(&geometry, &SectorArc::new(0, 1.0, 0.0, 1.0));
        assert_eq!(highlight.inner_radius(), 0.0);
    }
}
