// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector labels: text, placement, colour and visibility.
//!
//! Inside labels sit on the ring and pick whichever of the font and background colours reads
//! better against the sector fill (WCAG contrast ratio). Outside labels sit just past the outer
//! circle in the font colour. A label is only shown for sectors of at least
//! [`MIN_LABEL_PERCENTAGE`] percent, and only when it fits its slot.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

use donut_geometry::{DonutGeometry, point_on_circle};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use smallvec::SmallVec;

use crate::config::{LabelsPosition, LabelsVisible, ModConfig};
use crate::format::round_number;
use crate::marking::SectorKey;
use crate::measure::TextMeasurer;
use crate::state::{DonutState, Sector, Styling};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Sectors below this share (in percent) are never labelled.
pub const MIN_LABEL_PERCENTAGE: f64 = 5.0;

const INSIDE_OFFSET: f64 = 0.75;
const OUTSIDE_OFFSET: f64 = 1.03;
const DARK_BACKGROUND_CONTRAST: f64 = 1.7;
const LIGHT_BACKGROUND_CONTRAST: f64 = 2.7;

/// Horizontal text alignment relative to the label position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The text starts at the position.
    Start,
    /// The text is centered on the position.
    Middle,
    /// The text ends at the position.
    End,
}

/// Where a label is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Anchor point; the text is vertically centered on it.
    pub position: Point,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
}

impl LabelPlacement {
    /// The box a text of `extent` occupies at this placement.
    pub fn text_bounds(&self, extent: Size) -> Rect {
        let Point { x, y } = self.position;
        let Size { width, height } = extent;
        let (x0, x1) = match self.anchor {
            TextAnchor::Start => (x, x + width),
            TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
            TextAnchor::End => (x - width, x),
        };
        Rect::new(x0, y - height / 2.0, x1, y + height / 2.0)
    }
}

/// A computed sector label.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// The labelled sector.
    pub key: SectorKey,
    /// Label text; empty when the sector is not labelled.
    pub text: String,
    /// Position and alignment.
    pub placement: LabelPlacement,
    /// Text colour.
    pub color: Color,
    /// Whether the label should be drawn.
    pub visible: bool,
}

/// The label text of `sector`, or an empty string if it is not labelled.
///
/// The enabled parts are joined in the order category, value, percentage.
pub fn label_text(sector: &Sector, config: &ModConfig) -> String {
    match config.labels_visible {
        LabelsVisible::None => return String::new(),
        LabelsVisible::Marked if !sector.is_marked() => return String::new(),
        LabelsVisible::All | LabelsVisible::Marked => {}
    }

    let mut parts: SmallVec<[String; 3]> = SmallVec::new();
    if config.labels_category {
        parts.push(sector.category.clone());
    }
    if config.labels_value {
        parts.push(round_number(sector.value, 2).to_string());
    }
    if config.labels_percentage {
        parts.push(alloc::format!("{:.1}%", sector.percentage));
    }
    parts.join(", ")
}

/// Where the label of `sector` goes.
pub fn label_placement(
    sector: &Sector,
    geometry: &DonutGeometry,
    position: LabelsPosition,
) -> LabelPlacement {
    let mid = sector.arc.mid_angle();
    let (offset, anchor) = match position {
        LabelsPosition::Inside => (INSIDE_OFFSET, TextAnchor::Middle),
        LabelsPosition::Outside => {
            let anchor = if normalize_angle(mid) < PI {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };
            (OUTSIDE_OFFSET, anchor)
        }
    };
    LabelPlacement {
        position: point_on_circle(geometry.center, mid, geometry.outer_radius * offset),
        anchor,
    }
}

/// WCAG relative luminance of an sRGB colour.
pub fn relative_luminance(color: Color) -> f64 {
    let rgba = color.to_rgba8();
    let channel = |v: u8| {
        let v = f64::from(v) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(rgba.r) + 0.7152 * channel(rgba.g) + 0.0722 * channel(rgba.b)
}

/// WCAG contrast ratio between two colours, from `1` to `21`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// The text colour for a label on a sector filled with `sector_color`.
///
/// Inside labels keep the font colour while it contrasts enough with the fill, and switch to
/// the background colour otherwise. The bar is lower on dark backgrounds.
pub fn label_color(sector_color: Color, styling: &Styling, position: LabelsPosition) -> Color {
    if position == LabelsPosition::Outside || sector_color.components[3] == 0.0 {
        return styling.font_color;
    }
    let threshold = if relative_luminance(styling.background_color) < 0.5 {
        DARK_BACKGROUND_CONTRAST
    } else {
        LIGHT_BACKGROUND_CONTRAST
    };
    if contrast_ratio(sector_color, styling.font_color) > threshold {
        styling.font_color
    } else {
        styling.background_color
    }
}

/// Whether a label with `text` at `placement` should be drawn.
///
/// Inside labels must fit within the ring's thickness; outside labels must stay within the
/// drawing area.
pub fn label_visible(
    sector: &Sector,
    text: &str,
    placement: &LabelPlacement,
    state: &DonutState,
    measurer: &dyn TextMeasurer,
) -> bool {
    if text.is_empty() || sector.abs_percentage < MIN_LABEL_PERCENTAGE {
        return false;
    }
    let extent = measurer.measure(text, state.styling());
    match state.config().labels_position {
        LabelsPosition::Inside => {
            let geometry = state.geometry();
            let bound = geometry.outer_radius - geometry.hole_radius();
            extent.width < bound && extent.height < bound
        }
        LabelsPosition::Outside => {
            let bounds = placement.text_bounds(extent);
            let container = state.container();
            bounds.x0 >= container.x0
                && bounds.y0 >= container.y0
                && bounds.x1 <= container.x1
                && bounds.y1 <= container.y1
        }
    }
}

/// All sector labels of `state`, in row order.
pub fn labels(state: &DonutState, measurer: &dyn TextMeasurer) -> Vec<Label> {
    let config = state.config();
    state
        .sectors()
        .iter()
        .map(|sector| {
            let text = label_text(sector, config);
            let placement = label_placement(sector, state.geometry(), config.labels_position);
            let visible = label_visible(sector, &text, &placement, state, measurer);
            Label {
                key: sector.key.clone(),
                color: label_color(sector.color, state.styling(), config.labels_position),
                text,
                placement,
                visible,
            }
        })
        .collect()
}

fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}
