// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular layout of values into sectors.
//!
//! This is the same proportional allocation a standard pie layout performs: every value gets a
//! share of the angular window proportional to its absolute value, optionally padded and
//! optionally placed in sorted order. The output is aligned with the input order regardless of
//! placement order, so callers can zip arcs with their own data.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};

/// The angular window a donut is drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CircleType {
    /// A full circle, starting at the top.
    #[default]
    Whole,
    /// The upper half circle, from the left-most point to the right-most point.
    Semi,
}

impl CircleType {
    /// Angle at which the first sector starts.
    pub fn start_angle(self) -> f64 {
        match self {
            Self::Whole => 0.0,
            Self::Semi => -FRAC_PI_2,
        }
    }

    /// Angle at which the last sector ends.
    pub fn end_angle(self) -> f64 {
        match self {
            Self::Whole => TAU,
            Self::Semi => FRAC_PI_2,
        }
    }

    /// Total angular span of the window.
    pub fn span(self) -> f64 {
        self.end_angle() - self.start_angle()
    }
}

/// Placement order when sorting sectors by size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortOrder {
    /// Smallest absolute value first.
    Ascending,
    /// Largest absolute value first.
    #[default]
    Descending,
}

/// The angular span assigned to one value.
///
/// `start_angle` and `end_angle` include the padding; the drawn wedge is inset by half of
/// `pad_angle` on each side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorArc {
    /// Index of the value in the layout input.
    pub index: usize,
    /// The signed input value.
    pub value: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians (`>= start_angle`).
    pub end_angle: f64,
    /// Padding included in `[start_angle, end_angle]`.
    pub pad_angle: f64,
}

impl SectorArc {
    /// Creates an unpadded arc.
    pub fn new(index: usize, value: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            index,
            value,
            start_angle,
            end_angle,
            pad_angle: 0.0,
        }
    }

    /// Sets the padding included in the span.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    /// Angular span in radians.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// The angle halfway through the span.
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.span() / 2.0
    }

    /// Start and end angle of the drawn wedge, with the padding removed.
    ///
    /// A span narrower than its padding collapses onto its mid angle.
    pub fn drawn_angles(&self) -> (f64, f64) {
        let half_pad = self.pad_angle.max(0.0) / 2.0;
        if self.span() <= 2.0 * half_pad {
            let mid = self.mid_angle();
            return (mid, mid);
        }
        (self.start_angle + half_pad, self.end_angle - half_pad)
    }
}

impl AsRef<Self> for SectorArc {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Angular layout options.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PieLayout {
    /// The angular window to fill.
    pub circle_type: CircleType,
    /// Optional placement order; `None` keeps the input order.
    pub sort: Option<SortOrder>,
    /// Padding between sectors; `None` uses `0.1 / n`.
    pub pad_angle: Option<f64>,
}

impl PieLayout {
    /// Creates a layout for the given window, in input order, with default padding.
    pub fn new(circle_type: CircleType) -> Self {
        Self {
            circle_type,
            sort: None,
            pad_angle: None,
        }
    }

    /// Places sectors sorted by absolute value.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets an explicit padding angle.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = Some(pad_angle);
        self
    }

    /// Computes one arc per value, aligned with `values`.
    ///
    /// Non-finite values are treated as zero.
    pub fn arcs(&self, values: &[f64]) -> Vec<SectorArc> {
        let n = values.len();
        if n == 0 {
            return Vec::new();
        }

        let magnitudes: Vec<f64> = values
            .iter()
            .map(|v| if v.is_finite() { v.abs() } else { 0.0 })
            .collect();
        let sum: f64 = magnitudes.iter().sum();

        let mut order: Vec<usize> = (0..n).collect();
        if let Some(sort) = self.sort {
            // `sort_by` is stable, so equal magnitudes keep their input order.
            order.sort_by(|&a, &b| {
                let (a, b) = (magnitudes[a], magnitudes[b]);
                match sort {
                    SortOrder::Ascending => a.total_cmp(&b),
                    SortOrder::Descending => b.total_cmp(&a),
                }
            });
        }

        let start = self.circle_type.start_angle();
        let span = self.circle_type.span();
        let requested_pad = self.pad_angle.unwrap_or(0.1 / n as f64).max(0.0);
        let pad = (span / n as f64).min(requested_pad);
        let k = if sum > 0.0 {
            (span - n as f64 * pad) / sum
        } else {
            0.0
        };

        let mut arcs = vec![SectorArc::new(0, 0.0, start, start); n];
        let mut a0 = start;
        for i in order {
            let a1 = a0 + magnitudes[i] * k + pad;
            arcs[i] = SectorArc {
                index: i,
                value: values[i],
                start_angle: a0,
                end_angle: a1,
                pad_angle: pad,
            };
            a0 = a1;
        }
        arcs
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9, "{a} != {b}");
    }

    #[test]
    fn whole_circle_is_filled_in_input_order() {
        let arcs = PieLayout::new(CircleType::Whole)
            .with_pad_angle(0.0)
            .arcs(&[1.0, 1.0, 2.0]);
        assert_eq!(arcs.len(), 3);
        assert_close(arcs[0].start_angle, 0.0);
        assert_close(arcs[0].end_angle, FRAC_PI_2);
        assert_close(arcs[1].end_angle, PI);
        assert_close(arcs[2].end_angle, TAU);
    }

    #[test]
    fn negative_values_are_sized_by_magnitude() {
        let arcs = PieLayout::new(CircleType::Whole)
            .with_pad_angle(0.0)
            .arcs(&[-1.0, 1.0]);
        assert_close(arcs[0].span(), PI);
        assert_close(arcs[1].span(), PI);
        assert_eq!(arcs[0].value, -1.0);
    }

    #[test]
    fn semi_circle_spans_the_upper_half() {
        let arcs = PieLayout::new(CircleType::Semi)
            .with_pad_angle(0.0)
            .arcs(&[3.0, 1.0]);
        assert_close(arcs[0].start_angle, -FRAC_PI_2);
        assert_close(arcs[1].end_angle, FRAC_PI_2);
        assert_close(arcs[0].span(), 0.75 * PI);
    }

    #[test]
    fn sorted_placement_keeps_output_aligned_with_input() {
        let arcs = PieLayout::new(CircleType::Whole)
            .with_sort(SortOrder::Descending)
            .with_pad_angle(0.0)
            .arcs(&[1.0, 3.0, 2.0]);
        // Placement: 3.0, 2.0, 1.0.
        assert_close(arcs[1].start_angle, 0.0);
        assert_close(arcs[2].start_angle, arcs[1].end_angle);
        assert_close(arcs[0].start_angle, arcs[2].end_angle);
        assert_close(arcs[0].end_angle, TAU);
        assert_eq!(arcs[1].index, 1);

        let asc = PieLayout::new(CircleType::Whole)
            .with_sort(SortOrder::Ascending)
            .with_pad_angle(0.0)
            .arcs(&[1.0, 3.0, 2.0]);
        assert_close(asc[0].start_angle, 0.0);
        assert_close(asc[1].end_angle, TAU);
    }

    #[test]
    fn default_padding_is_split_between_sectors() {
        let arcs = PieLayout::new(CircleType::Whole).arcs(&[1.0, 1.0, 1.0, 1.0]);
        let pad = 0.1 / 4.0;
        for arc in &arcs {
            assert_close(arc.pad_angle, pad);
            assert_close(arc.span(), TAU / 4.0);
            let (s, e) = arc.drawn_angles();
            assert_close(e - s, TAU / 4.0 - pad);
        }
        assert_close(arcs[3].end_angle, TAU);
    }

    #[test]
    fn all_zero_values_only_receive_padding() {
        let arcs = PieLayout::new(CircleType::Whole)
            .with_pad_angle(0.01)
            .arcs(&[0.0, 0.0]);
        assert_close(arcs[0].span(), 0.01);
        let (s, e) = arcs[0].drawn_angles();
        assert_close(s, e);
    }

    #[test]
    fn empty_input_yields_no_arcs() {
        assert!(PieLayout::default().arcs(&[]).is_empty());
    }
}
