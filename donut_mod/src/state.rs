// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-render-pass donut state.
//!
//! A [`DonutState`] is built from host rows, the container size and the configuration every
//! time the host renders. It is an immutable snapshot: geometry, angular layout, percentages and
//! cached sector bounds all belong to one [`RenderPass`].

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use donut_geometry::{
    CircleType, DonutGeometry, SectorArc, SectorModel, WedgeBounds, hit_test, resolve_selection,
};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::{Point, Rect};
use log::{debug, warn};
use peniko::Color;
use peniko::color::Srgb;

use crate::center_text::CenterText;
use crate::config::ModConfig;
use crate::format::percentage_of;
use crate::labels::{Label, labels};
use crate::marking::SectorKey;
use crate::measure::TextMeasurer;

/// Margin removed from the container on each axis, and again from the radius.
const SIZE_MODIFIER: f64 = 40.0;
/// Inner radius as a fraction of the outer radius.
const INNER_RADIUS_RATIO: f64 = 0.5;

/// A container size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Identifies one render pass.
///
/// Geometry from one pass must never resolve a gesture that started in another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderPass(u64);

impl RenderPass {
    /// The first pass.
    pub const FIRST: Self = Self(0);

    /// The pass following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// The raw pass counter.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Errors returned when building a [`DonutState`].
#[derive(Clone, Debug, PartialEq)]
pub enum StateError {
    /// The container leaves no room for the donut.
    ContainerTooSmall {
        /// Container width in pixels.
        width: f64,
        /// Container height in pixels.
        height: f64,
    },
    /// A sector value is `NaN` or infinite.
    NonFiniteValue(SectorKey),
    /// Two rows share the same sector key.
    DuplicateKey(SectorKey),
    /// A colour string could not be parsed.
    InvalidColor(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerTooSmall { width, height } => write!(
                f,
                "the container ({width}x{height}) is too small to draw the donut"
            ),
            Self::NonFiniteValue(key) => write!(f, "sector `{key}` has a non-finite value"),
            Self::DuplicateKey(key) => write!(f, "sector key `{key}` appears more than once"),
            Self::InvalidColor(css) => write!(f, "invalid colour `{css}`"),
        }
    }
}

impl core::error::Error for StateError {}

/// Parses a CSS colour string; `"transparent"` is accepted.
pub fn parse_color(css: &str) -> Result<Color, StateError> {
    if css.trim().eq_ignore_ascii_case("transparent") {
        return Ok(Color::TRANSPARENT);
    }
    peniko::color::parse_color(css)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| StateError::InvalidColor(css.to_string()))
}

/// One sector's row data as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorInput {
    /// Stable identity.
    pub key: SectorKey,
    /// Display name of the category.
    pub category: String,
    /// Aggregated sector size; may be negative.
    pub value: f64,
    /// CSS colour of the rows, or `"transparent"`.
    pub color: String,
    /// Number of marked rows in the sector.
    pub marked_row_count: usize,
    /// Aggregated center value, when a center expression is configured.
    pub center_value: Option<f64>,
    /// The host's formatting of `center_value`.
    pub center_formatted: Option<String>,
}

impl SectorInput {
    /// Creates an unmarked sector whose category is its key.
    pub fn new(key: &str, value: f64, color: &str) -> Self {
        Self {
            key: SectorKey::new(key),
            category: key.to_string(),
            value,
            color: color.to_string(),
            marked_row_count: 0,
            center_value: None,
            center_formatted: None,
        }
    }

    /// Sets the category display name.
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Sets the number of marked rows.
    pub fn with_marked_row_count(mut self, count: usize) -> Self {
        self.marked_row_count = count;
        self
    }

    /// Sets the center aggregate and its host formatting.
    pub fn with_center_value(mut self, value: f64, formatted: &str) -> Self {
        self.center_value = Some(value);
        self.center_formatted = Some(formatted.to_string());
        self
    }
}

/// Host styling used for labels and the center text.
#[derive(Clone, Debug, PartialEq)]
pub struct Styling {
    /// Default text colour.
    pub font_color: Color,
    /// Canvas background colour.
    pub background_color: Color,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font family.
    pub font_family: String,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            font_color: Color::BLACK,
            background_color: Color::WHITE,
            font_size: 12.0,
            font_family: String::from("sans-serif"),
        }
    }
}

impl Styling {
    /// Builds a styling from CSS colour strings.
    pub fn from_css(font_color: &str, background_color: &str) -> Result<Self, StateError> {
        Ok(Self {
            font_color: parse_color(font_color)?,
            background_color: parse_color(background_color)?,
            ..Self::default()
        })
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

/// A laid out sector of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    /// Stable identity.
    pub key: SectorKey,
    /// Display name of the category.
    pub category: String,
    /// Signed sector value.
    pub value: f64,
    /// Fill colour.
    pub color: Color,
    /// Number of marked rows.
    pub marked_row_count: usize,
    /// Aggregated center value, if any.
    pub center_value: Option<f64>,
    /// The host's formatting of `center_value`.
    pub center_formatted: Option<String>,
    /// Signed share of the total absolute value, in percent with one decimal.
    pub percentage: f64,
    /// Unsigned share of the total absolute value, in percent with one decimal.
    pub abs_percentage: f64,
    /// Angular span.
    pub arc: SectorArc,
}

impl Sector {
    /// Returns `true` if any of the sector's rows are marked.
    pub fn is_marked(&self) -> bool {
        self.marked_row_count > 0
    }

    /// Returns `true` if the sector has no visible fill.
    pub fn is_transparent(&self) -> bool {
        self.color.components[3] == 0.0
    }
}

impl AsRef<SectorArc> for Sector {
    fn as_ref(&self) -> &SectorArc {
        &self.arc
    }
}

/// The donut of one render pass.
#[derive(Clone, Debug)]
pub struct DonutState {
    sectors: Vec<Sector>,
    index: HashMap<SectorKey, usize>,
    geometry: DonutGeometry,
    model: SectorModel,
    size: Size,
    config: ModConfig,
    styling: Styling,
    render_pass: RenderPass,
    total_abs_value: f64,
}

impl DonutState {
    /// Lays out `inputs` inside a container of `size`.
    ///
    /// The drawing area is the container minus a fixed margin; the donut is centered in it (or,
    /// for a semi circle, sits on its lower half) with a hole half the outer radius.
    pub fn build(
        inputs: Vec<SectorInput>,
        size: Size,
        config: &ModConfig,
        styling: Styling,
        render_pass: RenderPass,
    ) -> Result<Self, StateError> {
        let width = size.width - SIZE_MODIFIER;
        let height = size.height - SIZE_MODIFIER;
        let (radius, center) = match config.circle_type {
            CircleType::Whole => {
                let radius = width.min(height) / 2.0 - SIZE_MODIFIER;
                (radius, Point::new(width / 2.0, height / 2.0))
            }
            CircleType::Semi => {
                let radius = (width / 2.0).min(height) - SIZE_MODIFIER;
                (radius, Point::new(width / 2.0, height / 2.0 + radius / 2.0))
            }
        };
        if radius.is_nan() || radius <= 0.0 {
            warn!(
                "container {}x{} is too small for a donut",
                size.width, size.height
            );
            return Err(StateError::ContainerTooSmall {
                width: size.width,
                height: size.height,
            });
        }
        let geometry = DonutGeometry::new(center, radius, radius * INNER_RADIUS_RATIO)
            .with_circle_type(config.circle_type);

        let mut index = HashMap::with_capacity(inputs.len());
        let mut colors = Vec::with_capacity(inputs.len());
        for (i, input) in inputs.iter().enumerate() {
            if !input.value.is_finite() {
                return Err(StateError::NonFiniteValue(input.key.clone()));
            }
            match index.entry(input.key.clone()) {
                Entry::Occupied(_) => return Err(StateError::DuplicateKey(input.key.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
            colors.push(parse_color(&input.color)?);
        }

        let values: Vec<f64> = inputs.iter().map(|input| input.value).collect();
        let total_abs_value: f64 = values.iter().map(|v| v.abs()).sum();
        let arcs = config.pie_layout().arcs(&values);
        let model = SectorModel::new(geometry, arcs.clone(), &WedgeBounds);

        let sectors: Vec<Sector> = inputs
            .into_iter()
            .zip(colors)
            .zip(arcs)
            .map(|((input, color), arc)| Sector {
                percentage: percentage_of(input.value, total_abs_value, 1),
                abs_percentage: percentage_of(input.value.abs(), total_abs_value, 1),
                key: input.key,
                category: input.category,
                value: input.value,
                color,
                marked_row_count: input.marked_row_count,
                center_value: input.center_value,
                center_formatted: input.center_formatted,
                arc,
            })
            .collect();

        debug!(
            "render pass {}: {} sectors, radius {radius}",
            render_pass.id(),
            sectors.len()
        );
        Ok(Self {
            sectors,
            index,
            geometry,
            model,
            size,
            config: config.clone(),
            styling,
            render_pass,
            total_abs_value,
        })
    }

    /// The sectors, in host row order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Looks a sector up by key.
    pub fn sector(&self, key: &str) -> Option<&Sector> {
        self.index.get(key).map(|&i| &self.sectors[i])
    }

    /// The annulus of this pass.
    pub fn geometry(&self) -> &DonutGeometry {
        &self.geometry
    }

    /// The host container size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The drawing area, in the same coordinates as the geometry.
    pub fn container(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.size.width - SIZE_MODIFIER,
            self.size.height - SIZE_MODIFIER,
        )
    }

    /// The configuration this pass was built with.
    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    /// The styling this pass was built with.
    pub fn styling(&self) -> &Styling {
        &self.styling
    }

    /// The pass this state belongs to.
    pub fn render_pass(&self) -> RenderPass {
        self.render_pass
    }

    /// Sum of the absolute sector values.
    pub fn total_abs_value(&self) -> f64 {
        self.total_abs_value
    }

    /// The sectors a drawn rectangle selects, in row order.
    pub fn resolve_selection(&self, rect: Rect) -> Vec<&Sector> {
        resolve_selection(rect, &self.geometry, &self.sectors, &self.model)
    }

    /// The drawn sector under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<&Sector> {
        hit_test(point, &self.geometry, &self.sectors).map(|i| &self.sectors[i])
    }

    /// The center readout for the current marking.
    pub fn center_text(&self) -> CenterText {
        CenterText::compute(&self.sectors)
    }

    /// Sector labels, measured with `measurer`.
    pub fn labels(&self, measurer: &dyn TextMeasurer) -> Vec<Label> {
        labels(self, measurer)
    }
}
