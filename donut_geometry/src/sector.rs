// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sector geometry model: a donut descriptor plus per-sector boundary points and rays.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};

use crate::bounds::{BoundingBoxProvider, WedgeBounds};
use crate::layout::{CircleType, SectorArc};
use crate::primitives::point_on_circle;

/// The rendered annulus shared by every sector of one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutGeometry {
    /// Center in screen coordinates.
    pub center: Point,
    /// Outer radius in pixels.
    pub outer_radius: f64,
    /// Inner (hole) radius in pixels; `0` for a pie. Never negative when built with [`Self::new`].
    pub inner_radius: f64,
    /// The angular window the sectors were laid out in.
    pub circle_type: CircleType,
}

impl DonutGeometry {
    /// Creates a whole-circle donut.
    ///
    /// A negative or `NaN` inner radius is clamped to `0`.
    pub fn new(center: impl Into<Point>, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            center: center.into(),
            outer_radius,
            inner_radius: inner_radius.max(0.0),
            circle_type: CircleType::Whole,
        }
    }

    /// Sets the angular window.
    pub fn with_circle_type(mut self, circle_type: CircleType) -> Self {
        self.circle_type = circle_type;
        self
    }

    /// The angular zero reference of the layout.
    pub fn layout_start_angle(&self) -> f64 {
        self.circle_type.start_angle()
    }

    /// The point on the outer circle where the layout starts.
    ///
    /// Angular membership of arbitrary screen points is measured from this point.
    pub fn start_reference_point(&self) -> Point {
        point_on_circle(self.center, self.layout_start_angle(), self.outer_radius)
    }

    /// The radius of the hole as every hole test sees it: `inner_radius`, never below `0`.
    pub fn hole_radius(&self) -> f64 {
        self.inner_radius.max(0.0)
    }

    /// The bounding box of the outer circle.
    pub fn outer_bounds(&self) -> Rect {
        Rect::from_center_size(
            self.center,
            (2.0 * self.outer_radius, 2.0 * self.outer_radius),
        )
    }

    /// Returns `true` if nothing can be drawn (or selected) with this geometry.
    pub fn is_degenerate(&self) -> bool {
        !(self.outer_radius > 0.0 && self.inner_radius < self.outer_radius)
    }
}

/// The four corner points of an annular wedge and its two straight sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorBoundary {
    /// Inner circle point at the start angle.
    pub inner_start: Point,
    /// Outer circle point at the start angle.
    pub outer_start: Point,
    /// Inner circle point at the end angle.
    pub inner_end: Point,
    /// Outer circle point at the end angle.
    pub outer_end: Point,
}

impl SectorBoundary {
    /// Derives the boundary of `arc` within `geometry`, using the arc's layout angles.
    pub fn new(geometry: &DonutGeometry, arc: &SectorArc) -> Self {
        let c = geometry.center;
        let hole = geometry.hole_radius();
        Self {
            inner_start: point_on_circle(c, arc.start_angle, hole),
            outer_start: point_on_circle(c, arc.start_angle, geometry.outer_radius),
            inner_end: point_on_circle(c, arc.end_angle, hole),
            outer_end: point_on_circle(c, arc.end_angle, geometry.outer_radius),
        }
    }

    /// The straight side at the start angle, from the inner to the outer circle.
    pub fn start_ray(&self) -> Line {
        Line::new(self.inner_start, self.outer_start)
    }

    /// The straight side at the end angle, from the inner to the outer circle.
    pub fn end_ray(&self) -> Line {
        Line::new(self.inner_end, self.outer_end)
    }

    /// Both straight sides.
    pub fn rays(&self) -> [Line; 2] {
        [self.start_ray(), self.end_ray()]
    }
}

/// Derived per-sector data for one render pass.
///
/// The model is a snapshot: it must be rebuilt whenever the geometry or the angular layout
/// changes, and must not be used to resolve gestures that started in another pass.
#[derive(Clone, Debug)]
pub struct SectorModel {
    geometry: DonutGeometry,
    arcs: Vec<SectorArc>,
    boundaries: Vec<SectorBoundary>,
    bounds: Vec<Rect>,
}

impl SectorModel {
    /// Builds the model, querying `provider` once per sector.
    pub fn new(
        geometry: DonutGeometry,
        arcs: Vec<SectorArc>,
        provider: &dyn BoundingBoxProvider,
    ) -> Self {
        let boundaries = arcs
            .iter()
            .map(|arc| SectorBoundary::new(&geometry, arc))
            .collect();
        let bounds = arcs
            .iter()
            .enumerate()
            .map(|(i, arc)| provider.bounding_box(i, arc, &geometry))
            .collect();
        Self {
            geometry,
            arcs,
            boundaries,
            bounds,
        }
    }

    /// The donut this model was built for.
    pub fn geometry(&self) -> &DonutGeometry {
        &self.geometry
    }

    /// The laid out arcs, in input order.
    pub fn arcs(&self) -> &[SectorArc] {
        &self.arcs
    }

    /// Boundary points and rays of sector `index`.
    pub fn boundary(&self, index: usize) -> Option<&SectorBoundary> {
        self.boundaries.get(index)
    }

    /// Screen-space bounding box of sector `index`.
    pub fn bounding_box(&self, index: usize) -> Option<Rect> {
        self.bounds.get(index).copied()
    }

    /// Number of sectors.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Returns `true` if the model holds no sectors.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Whether sector `index` of this model is exactly `arc` within `geometry`.
    fn holds(&self, index: usize, arc: &SectorArc, geometry: &DonutGeometry) -> bool {
        *geometry == self.geometry && self.arcs.get(index) == Some(arc)
    }
}

/// A cached model serves its own boxes and boundaries.
///
/// Queries for any other geometry or arc (a model left over from an earlier pass) are computed
/// afresh, so a stale model is slower but never wrong.
impl BoundingBoxProvider for SectorModel {
    fn bounding_box(&self, index: usize, arc: &SectorArc, geometry: &DonutGeometry) -> Rect {
        match self.bounds.get(index) {
            Some(b) if self.holds(index, arc, geometry) => *b,
            _ => WedgeBounds.bounding_box(index, arc, geometry),
        }
    }

    fn boundary(
        &self,
        index: usize,
        arc: &SectorArc,
        geometry: &DonutGeometry,
    ) -> SectorBoundary {
        match self.boundaries.get(index) {
            Some(b) if self.holds(index, arc, geometry) => *b,
            _ => SectorBoundary::new(geometry, arc),
        }
    }
}
