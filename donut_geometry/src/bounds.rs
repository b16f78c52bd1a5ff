// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space bounding boxes of rendered sectors.
//!
//! The selection engine only needs a box per sector. In a browser that box comes from the
//! rendered shape; here it is injected through [`BoundingBoxProvider`] so the engine can run
//! (and be tested) without any rendering surface.

use core::f64::consts::FRAC_PI_2;

use kurbo::{Point, Rect};

use crate::layout::SectorArc;
use crate::primitives::point_on_circle;
use crate::sector::{DonutGeometry, SectorBoundary};

/// Supplies the screen-space bounding box of a rendered sector.
pub trait BoundingBoxProvider {
    /// Returns the bounding box of sector `index`, drawn as `arc` within `geometry`.
    fn bounding_box(&self, index: usize, arc: &SectorArc, geometry: &DonutGeometry) -> Rect;

    /// Returns the boundary points and rays of sector `index`.
    ///
    /// Providers that cache per-sector data may serve it here.
    fn boundary(
        &self,
        _index: usize,
        arc: &SectorArc,
        geometry: &DonutGeometry,
    ) -> SectorBoundary {
        SectorBoundary::new(geometry, arc)
    }
}

/// Boxes reported by the host renderer, looked up by sector index.
impl<F> BoundingBoxProvider for F
where
    F: Fn(usize, &SectorArc) -> Rect,
{
    fn bounding_box(&self, index: usize, arc: &SectorArc, _geometry: &DonutGeometry) -> Rect {
        self(index, arc)
    }
}

/// Exact analytic boxes of the drawn (padded) annular wedge.
#[derive(Clone, Copy, Debug, Default)]
pub struct WedgeBounds;

impl BoundingBoxProvider for WedgeBounds {
    fn bounding_box(&self, _index: usize, arc: &SectorArc, geometry: &DonutGeometry) -> Rect {
        let (start, end) = arc.drawn_angles();
        wedge_bounds(geometry, start, end)
    }
}

pub(crate) fn wedge_bounds(geometry: &DonutGeometry, start: f64, end: f64) -> Rect {
    let c = geometry.center;
    let (r0, r1) = (geometry.hole_radius(), geometry.outer_radius);

    let mut rect = Rect::from_points(
        point_on_circle(c, start, r0),
        point_on_circle(c, start, r1),
    );
    let mut include = |p: Point| rect = rect.union_pt(p);
    include(point_on_circle(c, end, r0));
    include(point_on_circle(c, end, r1));

    // The outer arc bulges past its endpoints wherever it crosses a quarter turn.
    // Layout windows stay within [-π/2, 2π], so this range of quarter turns covers them.
    for k in -4_i32..=8 {
        let a = f64::from(k) * FRAC_PI_2;
        if a > start && a < end {
            include(point_on_circle(c, a, r1));
        }
    }
    rect
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU};

    use super::*;

    fn assert_rect_close(a: Rect, b: Rect) {
        let eps = 1e-9;
        assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
        assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
        assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
        assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
    }

    #[test]
    fn quarter_wedge_box() {
        let geometry = DonutGeometry::new((0.0, 0.0), 10.0, 5.0);
        let arc = SectorArc::new(0, 1.0, 0.0, FRAC_PI_2);
        let b = WedgeBounds.bounding_box(0, &arc, &geometry);
        assert_rect_close(b, Rect::new(0.0, -10.0, 10.0, 0.0));
    }

    #[test]
    fn wedge_crossing_the_bottom_includes_the_bulge() {
        let geometry = DonutGeometry::new((0.0, 0.0), 10.0, 5.0);
        let arc = SectorArc::new(0, 1.0, 0.75 * PI, 1.25 * PI);
        let b = WedgeBounds.bounding_box(0, &arc, &geometry);
        assert!((b.y1 - 10.0).abs() < 1e-9, "bottom bulge missing: {b:?}");
        let s = FRAC_1_SQRT_2;
        assert!((b.x1 - 10.0 * s).abs() < 1e-9, "{b:?}");
        assert!((b.y0 - 5.0 * s).abs() < 1e-9, "{b:?}");
    }

    #[test]
    fn full_circle_box_is_the_outer_box() {
        let geometry = DonutGeometry::new((50.0, 50.0), 10.0, 5.0);
        let arc = SectorArc::new(0, 1.0, 0.0, TAU);
        let b = WedgeBounds.bounding_box(0, &arc, &geometry);
        assert_rect_close(b, geometry.outer_bounds());
    }

    #[test]
    fn padding_shrinks_the_box() {
        let geometry = DonutGeometry::new((0.0, 0.0), 10.0, 0.0);
        let arc = SectorArc::new(0, 1.0, 0.0, FRAC_PI_2).with_pad_angle(0.2);
        let b = WedgeBounds.bounding_box(0, &arc, &geometry);
        assert!(b.y0 > -10.0, "padded wedge should not reach the top: {b:?}");
        assert!(b.x1 < 10.0, "padded wedge should not reach the right: {b:?}");
    }

    #[test]
    fn closures_can_provide_boxes() {
        let geometry = DonutGeometry::new((0.0, 0.0), 10.0, 0.0);
        let arc = SectorArc::new(3, 1.0, 0.0, 1.0);
        let provider = |index: usize, _arc: &SectorArc| Rect::new(0.0, 0.0, index as f64, 1.0);
        assert_eq!(
            provider.bounding_box(3, &arc, &geometry),
            Rect::new(0.0, 0.0, 3.0, 1.0)
        );
    }
}
