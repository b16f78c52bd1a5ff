// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render state, marking and display logic for the donut chart mod.
//!
//! This crate sits between a host analytics application and [`donut_geometry`]:
//! - **Configuration** is a typed [`ModConfig`] (optionally `serde`-backed) instead of a property bag.
//! - **State** ([`DonutState`]) is rebuilt wholesale on every render pass from host rows and the
//!   container size, and is treated as an immutable snapshot afterwards.
//! - **Gestures** ([`GestureState`]) turn pointer events into [`MarkingCommand`]s, which are
//!   applied to the host through the narrow [`Markable`] interface.
//! - **Display** helpers compute the center aggregate ([`CenterText`]) and sector labels.
//!
//! Rendering itself (SVG, animation, tooltips) stays with the host.

#![no_std]

extern crate alloc;

mod center_text;
mod config;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod gesture;
#[cfg(test)]
mod gesture_tests;
mod labels;
mod marking;
mod measure;
mod state;

pub use center_text::CenterText;
pub use config::{ConfigError, LabelsPosition, LabelsVisible, ModConfig, SortedPlacementOrder};
pub use format::{ValueFormat, ValueUnit, format_total_sum, percentage_of, round_number};
pub use gesture::{GestureOutcome, GestureState};
pub use labels::{
    Label, LabelPlacement, MIN_LABEL_PERCENTAGE, TextAnchor, contrast_ratio, label_color,
    label_placement, label_text, label_visible, labels, relative_luminance,
};
pub use marking::{
    MarkMode, Markable, MarkingCommand, MarkingOperation, SectorKey, clear_all,
    resolve_rectangle_selection, select,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use state::{
    DonutState, RenderPass, Sector, SectorInput, Size, StateError, Styling, parse_color,
};

pub use donut_geometry::{CircleType, DonutGeometry, SectorArc};
