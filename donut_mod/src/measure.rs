// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label extents.
//!
//! Whether a label is drawn depends on whether it fits its slot, and only the host knows how
//! its fonts shape. Label layout therefore asks a [`TextMeasurer`] for the extent of each label
//! in the host [`Styling`].

use kurbo::Size;

use crate::state::Styling;

/// Measures label text as the host would draw it.
pub trait TextMeasurer {
    /// The extent of `text` set in `styling`'s font family and size.
    fn measure(&self, text: &str, styling: &Styling) -> Size;
}

/// Estimates extents from the glyph count, without shaping.
///
/// Widths are `glyph_width` em per character and heights `line_height` em, where one em is
/// [`Styling::font_size`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicTextMeasurer {
    /// Average advance per character, in em.
    pub glyph_width: f64,
    /// Line height, in em.
    pub line_height: f64,
}

impl HeuristicTextMeasurer {
    /// Average proportions of common sans-serif faces.
    pub const PROPORTIONAL: Self = Self {
        glyph_width: 0.6,
        line_height: 1.0,
    };
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self::PROPORTIONAL
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, styling: &Styling) -> Size {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return Size::ZERO;
        }
        let em = styling.font_size;
        Size::new(self.glyph_width * em * glyphs as f64, self.line_height * em)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_scales_with_glyphs_and_font_size() {
        let measurer = HeuristicTextMeasurer::default();
        let styling = Styling::default().with_font_size(10.0);
        assert_eq!(measurer.measure("27.5%", &styling), Size::new(30.0, 10.0));
        assert_eq!(measurer.measure("", &styling), Size::ZERO);

        let large = Styling::default().with_font_size(20.0);
        assert_eq!(measurer.measure("27.5%", &large), Size::new(60.0, 20.0));
    }

    #[test]
    fn custom_proportions() {
        let narrow = HeuristicTextMeasurer {
            glyph_width: 0.5,
            line_height: 1.2,
        };
        let styling = Styling::default().with_font_size(10.0);
        assert_eq!(narrow.measure("abcd", &styling), Size::new(20.0, 12.0));
    }
}
