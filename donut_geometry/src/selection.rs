// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping screen rectangles and clicks back to sectors.
//!
//! A sector matches a drawn rectangle when:
//! 1. its bounding box overlaps the rectangle and the rectangle touches the outer circle,
//! 2. the overlap region is not entirely inside the donut hole, and
//! 3. a corner of the overlap region falls within the sector's angular span (outside the hole),
//!    or, failing that, an edge of the overlap region crosses one of the sector's straight sides.
//!
//! The edge fallback catches rectangles that slice through a thin part of a wedge without
//! enclosing any of its corners. The test is a heuristic over bounding boxes, not exact polygon
//! clipping; very thin sectors and extreme aspect ratios are covered by tests rather than by
//! a proof.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use log::{debug, trace, warn};

use crate::bounds::BoundingBoxProvider;
use crate::layout::SectorArc;
use crate::primitives::{
    angle_between, angle_in_span, circle_rectangle_collide, normalize_angle, overlap_region,
    point_in_circle, rectangle_edges, rectangle_in_circle, rectangles_overlap,
    segments_intersect,
};
use crate::sector::DonutGeometry;

/// Rectangles narrower and shorter than this (in pixels) are clicks, not drags.
pub const CLICK_THRESHOLD: f64 = 2.0;

/// Returns `true` if `rect` is too small on both axes to be a drag selection.
pub fn is_click(rect: Rect) -> bool {
    rect.width().abs() < CLICK_THRESHOLD && rect.height().abs() < CLICK_THRESHOLD
}

/// Returns the sectors whose wedges intersect `rect`, in input order.
///
/// `rect` must be in the same pixel space as `geometry` and the boxes reported by `bounds`.
/// Clicks (see [`is_click`]), degenerate donuts and empty sector lists yield an empty result;
/// the function never fails.
pub fn resolve_selection<'a, T: AsRef<SectorArc>>(
    rect: Rect,
    geometry: &DonutGeometry,
    sectors: &'a [T],
    bounds: &dyn BoundingBoxProvider,
) -> Vec<&'a T> {
    let rect = rect.abs();
    if sectors.is_empty() || is_click(rect) {
        return Vec::new();
    }
    if geometry.is_degenerate() {
        warn!("selection ignored: degenerate donut {geometry:?}");
        return Vec::new();
    }
    // The pre-filter does not depend on the sector.
    if !circle_rectangle_collide(rect, geometry.center, geometry.outer_radius) {
        trace!("selection {rect:?} misses the outer circle");
        return Vec::new();
    }

    let reference = geometry.start_reference_point();
    let matched: Vec<&T> = sectors
        .iter()
        .enumerate()
        .filter(|(index, sector)| {
            let arc = sector.as_ref();
            sector_matches(rect, *index, arc, geometry, bounds, reference)
        })
        .map(|(_, sector)| sector)
        .collect();

    debug!(
        "selection {rect:?} matched {} of {} sectors",
        matched.len(),
        sectors.len()
    );
    matched
}

fn sector_matches(
    rect: Rect,
    index: usize,
    arc: &SectorArc,
    geometry: &DonutGeometry,
    bounds: &dyn BoundingBoxProvider,
    reference: Point,
) -> bool {
    let sector_box = bounds.bounding_box(index, arc, geometry);
    if !rectangles_overlap(rect, sector_box) {
        return false;
    }

    let overlap = overlap_region(rect, sector_box);
    let hole = geometry.hole_radius();
    if rectangle_in_circle(overlap, geometry.center, hole) {
        trace!("sector {}: overlap {overlap:?} is inside the hole", arc.index);
        return false;
    }

    let layout_start = geometry.layout_start_angle();
    let span_start = arc.start_angle - layout_start;
    let span_end = arc.end_angle - layout_start;
    let corner_match = overlap_corners(overlap).into_iter().any(|corner| {
        let angle = angle_between(geometry.center, corner, reference);
        angle_in_span(angle, span_start, span_end)
            && !point_in_circle(corner, geometry.center, hole)
    });
    if corner_match {
        trace!("sector {}: corner inside angular span", arc.index);
        return true;
    }

    let boundary = bounds.boundary(index, arc, geometry);
    let edge_match = rectangle_edges(overlap).into_iter().any(|edge| {
        boundary
            .rays()
            .into_iter()
            .any(|ray| segments_intersect(ray, edge))
    });
    if edge_match {
        trace!("sector {}: overlap edge crosses a sector side", arc.index);
    }
    edge_match
}

fn overlap_corners(overlap: Rect) -> [Point; 4] {
    [
        Point::new(overlap.x0, overlap.y0),
        Point::new(overlap.x1, overlap.y0),
        Point::new(overlap.x0, overlap.y1),
        Point::new(overlap.x1, overlap.y1),
    ]
}

/// Returns the index of the drawn sector under `point`, if any.
///
/// This is the click target test: the point must lie within the annulus (boundaries included)
/// and within the sector's drawn (padded) angular span.
pub fn hit_test<T: AsRef<SectorArc>>(
    point: Point,
    geometry: &DonutGeometry,
    sectors: &[T],
) -> Option<usize> {
    if geometry.is_degenerate() {
        return None;
    }
    let d2 = (point - geometry.center).hypot2();
    let inner = geometry.hole_radius();
    if d2 < inner * inner || d2 > geometry.outer_radius * geometry.outer_radius {
        return None;
    }
    if d2 == 0.0 {
        // The center of a pie has no direction; pick nothing rather than guess.
        return None;
    }

    let layout_start = geometry.layout_start_angle();
    let angle = angle_between(geometry.center, point, geometry.start_reference_point());
    sectors.iter().position(|sector| {
        let (start, end) = sector.as_ref().drawn_angles();
        end > start
            && angle_in_span(
                angle,
                normalize_angle(start - layout_start),
                normalize_angle(start - layout_start) + (end - start),
            )
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;
    use crate::bounds::WedgeBounds;
    use crate::layout::CircleType;

    #[test]
    fn clicks_are_small_on_both_axes() {
        assert!(is_click(Rect::new(10.0, 10.0, 11.0, 11.5)));
        assert!(!is_click(Rect::new(10.0, 10.0, 10.5, 60.0)));
        assert!(!is_click(Rect::new(10.0, 10.0, 40.0, 10.0)));
    }

    #[test]
    fn click_rectangles_never_resolve() {
        let geometry = DonutGeometry::new((100.0, 100.0), 50.0, 0.0);
        let arcs = [SectorArc::new(0, 1.0, 0.0, TAU)];
        let got = resolve_selection(
            Rect::new(120.0, 100.0, 121.0, 101.0),
            &geometry,
            &arcs,
            &WedgeBounds,
        );
        assert!(got.is_empty());
    }

    #[test]
    fn hit_test_finds_the_wedge_under_the_pointer() {
        let geometry = DonutGeometry::new((100.0, 100.0), 50.0, 20.0);
        let arcs = [
            SectorArc::new(0, 1.0, 0.0, PI),
            SectorArc::new(1, 1.0, PI, TAU),
        ];
        assert_eq!(hit_test(Point::new(130.0, 100.0), &geometry, &arcs), Some(0));
        assert_eq!(hit_test(Point::new(70.0, 100.0), &geometry, &arcs), Some(1));
        // Inside the hole and outside the donut.
        assert_eq!(hit_test(Point::new(105.0, 100.0), &geometry, &arcs), None);
        assert_eq!(hit_test(Point::new(160.0, 100.0), &geometry, &arcs), None);
    }

    #[test]
    fn hit_test_ignores_padding_gaps() {
        let geometry = DonutGeometry::new((0.0, 0.0), 50.0, 0.0);
        let arcs = [
            SectorArc::new(0, 1.0, 0.0, FRAC_PI_2).with_pad_angle(0.4),
            SectorArc::new(1, 1.0, FRAC_PI_2, TAU).with_pad_angle(0.4),
        ];
        // Straight up sits in the gap between the last and the first sector.
        assert_eq!(hit_test(Point::new(0.0, -30.0), &geometry, &arcs), None);
        assert_eq!(hit_test(Point::new(20.0, -20.0), &geometry, &arcs), Some(0));
    }

    #[test]
    fn hit_test_in_semi_circle_mode() {
        let geometry =
            DonutGeometry::new((0.0, 0.0), 50.0, 10.0).with_circle_type(CircleType::Semi);
        let arcs = [
            SectorArc::new(0, 1.0, -FRAC_PI_2, 0.0),
            SectorArc::new(1, 1.0, 0.0, FRAC_PI_2),
        ];
        assert_eq!(hit_test(Point::new(-20.0, -20.0), &geometry, &arcs), Some(0));
        assert_eq!(hit_test(Point::new(20.0, -20.0), &geometry, &arcs), Some(1));
        // The lower half is not drawn.
        assert_eq!(hit_test(Point::new(0.0, 30.0), &geometry, &arcs), None);
    }
}
