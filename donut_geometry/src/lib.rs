// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annular sector geometry and rectangle selection for donut charts.
//!
//! This crate is the geometric core of the donut mod:
//! - **Primitives** are small, pure tests over `kurbo` points, rectangles and lines.
//! - **Layout** allocates angular spans to values, the way a standard pie layout does.
//! - **Sectors** derive boundary points and rays from a [`DonutGeometry`] and a [`SectorArc`].
//! - **Selection** maps a drawn screen rectangle (or a click) back to the sectors it touches.
//!
//! Angles are radians, measured clockwise from the top of the circle (screen coordinates with
//! `y` growing downwards). Rendering, marking and host data access live downstream.

#![no_std]

extern crate alloc;

mod bounds;
#[cfg(not(feature = "std"))]
mod float;
mod layout;
mod primitives;
mod sector;
mod selection;
mod shape;

pub use bounds::{BoundingBoxProvider, WedgeBounds};
pub use layout::{CircleType, PieLayout, SectorArc, SortOrder};
pub use primitives::{
    angle_between, circle_rectangle_collide, overlap_region, point_in_circle, point_on_circle,
    rectangle_edges, rectangle_in_circle, rectangles_overlap, segments_intersect,
};
pub use sector::{DonutGeometry, SectorBoundary, SectorModel};
pub use selection::{CLICK_THRESHOLD, hit_test, is_click, resolve_selection};
pub use shape::{HighlightShape, SectorShape};
