// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed mod configuration.
//!
//! Property names and values use the same strings the host's settings popout sends, so a
//! `(name, value)` change event can be applied with [`ModConfig::set_property`], and a stored
//! configuration round-trips through `serde` (behind the `serde` feature).

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

use donut_geometry::{CircleType, PieLayout, SortOrder};

/// Placement order of sectors when sorted placement is enabled.
pub type SortedPlacementOrder = SortOrder;

/// Where sector labels are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LabelsPosition {
    /// On the ring, at three quarters of the outer radius.
    #[default]
    Inside,
    /// Just outside the outer circle.
    Outside,
}

/// Which sectors show a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LabelsVisible {
    /// Every sector.
    #[default]
    All,
    /// Only sectors with marked rows.
    Marked,
    /// No sector.
    None,
}

/// Errors returned when applying a property change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The property name is not recognised.
    UnknownProperty(String),
    /// The value is not valid for the property.
    InvalidValue {
        /// The property being set.
        property: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(f, "unknown mod property `{name}`"),
            Self::InvalidValue { property, value } => {
                write!(f, "invalid value `{value}` for mod property `{property}`")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// The recognised mod properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ModConfig {
    /// Where labels are drawn.
    pub labels_position: LabelsPosition,
    /// Which sectors are labelled.
    pub labels_visible: LabelsVisible,
    /// Show the sector percentage in labels.
    pub labels_percentage: bool,
    /// Show the sector value in labels.
    pub labels_value: bool,
    /// Show the sector category in labels.
    pub labels_category: bool,
    /// Place sectors sorted by size.
    pub sorted_placement: bool,
    /// Order used when `sorted_placement` is set.
    pub sorted_placement_order: SortedPlacementOrder,
    /// Full circle or upper half circle.
    pub circle_type: CircleType,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            labels_position: LabelsPosition::Inside,
            labels_visible: LabelsVisible::All,
            labels_percentage: true,
            labels_value: false,
            labels_category: false,
            sorted_placement: false,
            sorted_placement_order: SortOrder::Descending,
            circle_type: CircleType::Whole,
        }
    }
}

impl ModConfig {
    /// Property names accepted by [`ModConfig::set_property`].
    pub const PROPERTY_NAMES: [&'static str; 8] = [
        "labelsPosition",
        "labelsVisible",
        "labelsPercentage",
        "labelsValue",
        "labelsCategory",
        "sortedPlacement",
        "sortedPlacementOrder",
        "circleType",
    ];

    /// Sets the circle type.
    pub fn with_circle_type(mut self, circle_type: CircleType) -> Self {
        self.circle_type = circle_type;
        self
    }

    /// Enables sorted placement in the given order.
    pub fn with_sorted_placement(mut self, order: SortedPlacementOrder) -> Self {
        self.sorted_placement = true;
        self.sorted_placement_order = order;
        self
    }

    /// Sets the label position.
    pub fn with_labels_position(mut self, position: LabelsPosition) -> Self {
        self.labels_position = position;
        self
    }

    /// Sets which sectors are labelled.
    pub fn with_labels_visible(mut self, visible: LabelsVisible) -> Self {
        self.labels_visible = visible;
        self
    }

    /// Applies a settings change event.
    ///
    /// The configuration is left unchanged on error.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "labelsPosition" => {
                self.labels_position = match value {
                    "inside" => LabelsPosition::Inside,
                    "outside" => LabelsPosition::Outside,
                    _ => return Err(invalid("labelsPosition", value)),
                };
            }
            "labelsVisible" => {
                self.labels_visible = match value {
                    "all" => LabelsVisible::All,
                    "marked" => LabelsVisible::Marked,
                    "none" => LabelsVisible::None,
                    _ => return Err(invalid("labelsVisible", value)),
                };
            }
            "labelsPercentage" => self.labels_percentage = parse_bool("labelsPercentage", value)?,
            "labelsValue" => self.labels_value = parse_bool("labelsValue", value)?,
            "labelsCategory" => self.labels_category = parse_bool("labelsCategory", value)?,
            "sortedPlacement" => self.sorted_placement = parse_bool("sortedPlacement", value)?,
            "sortedPlacementOrder" => {
                self.sorted_placement_order = match value {
                    "ascending" => SortOrder::Ascending,
                    "descending" => SortOrder::Descending,
                    _ => return Err(invalid("sortedPlacementOrder", value)),
                };
            }
            "circleType" => {
                self.circle_type = match value {
                    "whole" => CircleType::Whole,
                    "semi" => CircleType::Semi,
                    _ => return Err(invalid("circleType", value)),
                };
            }
            _ => return Err(ConfigError::UnknownProperty(name.to_string())),
        }
        log::debug!("mod property `{name}` set to `{value}`");
        Ok(())
    }

    /// The angular layout these settings describe.
    pub fn pie_layout(&self) -> PieLayout {
        let layout = PieLayout::new(self.circle_type);
        if self.sorted_placement {
            layout.with_sort(self.sorted_placement_order)
        } else {
            layout
        }
    }
}

fn parse_bool(property: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(property, value)),
    }
}

fn invalid(property: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        property,
        value: value.to_string(),
    }
}
