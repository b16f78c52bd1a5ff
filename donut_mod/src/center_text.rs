// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The aggregate shown in the donut hole.
//!
//! With a center expression configured, the hole shows:
//! - the marked sector's category and value when exactly one sector is marked,
//! - the formatted sum of the marked sectors when several are,
//! - the formatted sum of every sector otherwise.
//!
//! Hovering a sector temporarily shows that sector instead. The readout is recomputed from
//! scratch whenever the marking changes.

extern crate alloc;

use alloc::string::String;

use crate::format::{ValueFormat, format_total_sum};
use crate::state::Sector;

/// The text shown in the donut hole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CenterText {
    /// Category line, shown above the value for a single sector.
    pub category: Option<String>,
    /// Value line.
    pub value: Option<String>,
    /// Sum of the center values of the marked sectors; `0` when nothing is marked.
    pub marked_total: f64,
    /// Number of marked sectors.
    pub marked_count: usize,
}

impl CenterText {
    /// Computes the readout for the current marking.
    ///
    /// Sectors without a center value contribute nothing. When the first sector has no host
    /// formatting there is no center expression, and the readout is empty.
    pub fn compute(sectors: &[Sector]) -> Self {
        let Some(format) = center_format(sectors) else {
            return Self::default();
        };

        let mut marked = sectors.iter().filter(|s| s.is_marked());
        let marked_total: f64 = marked.clone().filter_map(|s| s.center_value).sum();
        let marked_count = marked.clone().count();

        match (marked.next(), marked_count) {
            (Some(only), 1) => Self {
                category: Some(only.category.clone()),
                value: only.center_formatted.clone(),
                marked_total,
                marked_count,
            },
            (Some(_), _) => Self {
                category: None,
                value: Some(format_total_sum(marked_total, &format)),
                marked_total,
                marked_count,
            },
            (None, _) => Self {
                category: None,
                value: Some(format_total_sum(overall_total(sectors), &format)),
                marked_total,
                marked_count,
            },
        }
    }

    /// The readout while the pointer is over `sector`.
    pub fn on_hover(sector: &Sector) -> Self {
        Self {
            category: Some(sector.category.clone()),
            value: sector.center_formatted.clone(),
            marked_total: 0.0,
            marked_count: 0,
        }
    }

    /// The readout after the pointer leaves a sector: the overall total.
    pub fn on_leave(sectors: &[Sector]) -> Self {
        let value = center_format(sectors).map(|f| format_total_sum(overall_total(sectors), &f));
        Self {
            value,
            ..Self::default()
        }
    }

    /// Returns `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.value.is_none()
    }
}

fn center_format(sectors: &[Sector]) -> Option<ValueFormat> {
    let sample = sectors.first()?.center_formatted.as_deref()?;
    Some(ValueFormat::infer(sample))
}

fn overall_total(sectors: &[Sector]) -> f64 {
    sectors.iter().filter_map(|s| s.center_value).sum()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use crate::config::ModConfig;
    use crate::state::{DonutState, RenderPass, SectorInput, Size, Styling};

    use super::*;

    fn sectors(marked: [usize; 4]) -> Vec<Sector> {
        let inputs = vec![
            SectorInput::new("MW", 304.0, "#6489FA")
                .with_category("Midwest")
                .with_center_value(1200.0, "$1,200.00"),
            SectorInput::new("NE", 245.0, "#FA7864")
                .with_category("Northeast")
                .with_center_value(800.5, "$800.50"),
            SectorInput::new("SE", 341.0, "#FFDE5C")
                .with_category("South")
                .with_center_value(2000.0, "$2,000.00"),
            SectorInput::new("WE", 215.0, "#72ECA6")
                .with_category("West")
                .with_center_value(99.5, "$99.50"),
        ];
        let inputs = inputs
            .into_iter()
            .zip(marked)
            .map(|(input, count)| input.with_marked_row_count(count))
            .collect();
        DonutState::build(
            inputs,
            Size::new(640.0, 480.0),
            &ModConfig::default(),
            Styling::default(),
            RenderPass::FIRST,
        )
        .unwrap()
        .sectors()
        .to_vec()
    }

    #[test]
    fn nothing_marked_shows_the_overall_total() {
        let text = CenterText::compute(&sectors([0, 0, 0, 0]));
        assert_eq!(text.marked_total, 0.0);
        assert_eq!(text.marked_count, 0);
        assert_eq!(text.category, None);
        assert_eq!(text.value.as_deref(), Some("$4,100.00"));
    }

    #[test]
    fn a_single_marked_sector_shows_its_own_readout() {
        let text = CenterText::compute(&sectors([0, 3, 0, 0]));
        assert_eq!(text.category.as_deref(), Some("Northeast"));
        assert_eq!(text.value.as_deref(), Some("$800.50"));
        assert_eq!(text.marked_total, 800.5);
    }

    #[test]
    fn several_marked_sectors_show_their_formatted_sum() {
        let text = CenterText::compute(&sectors([1, 0, 2, 0]));
        assert_eq!(text.marked_count, 2);
        assert_eq!(text.marked_total, 3200.0);
        assert_eq!(text.category, None);
        assert_eq!(text.value.as_deref(), Some("$3,200.00"));
    }

    #[test]
    fn clearing_the_marking_drops_the_marked_total_to_zero() {
        let before = CenterText::compute(&sectors([1, 1, 1, 1]));
        assert_eq!(before.marked_total, 4100.0);
        let after = CenterText::compute(&sectors([0, 0, 0, 0]));
        assert_eq!(after.marked_total, 0.0);
    }

    #[test]
    fn hover_and_leave_readouts() {
        let all = sectors([0, 0, 0, 0]);
        let hover = CenterText::on_hover(&all[3]);
        assert_eq!(hover.category.as_deref(), Some("West"));
        assert_eq!(hover.value.as_deref(), Some("$99.50"));

        let leave = CenterText::on_leave(&all);
        assert_eq!(leave.category, None);
        assert_eq!(leave.value.as_deref(), Some("$4,100.00"));
    }

    #[test]
    fn no_center_expression_means_no_readout() {
        let state = DonutState::build(
            vec![SectorInput::new("A", 1.0, "#000000").with_marked_row_count(1)],
            Size::new(640.0, 480.0),
            &ModConfig::default(),
            Styling::default(),
            RenderPass::FIRST,
        )
        .unwrap();
        let text = state.center_text();
        assert!(text.is_empty());
        assert_eq!(text.marked_total, 0.0);
        assert!(CenterText::compute(&[]).is_empty());
    }
}
