// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number rounding and formatting for labels and the center aggregate.
//!
//! The host formats every single value itself. Totals computed here have no host formatting, so
//! [`ValueFormat::infer`] reads the shape of a host-formatted sample (currency prefix, unit
//! suffix, decimals, digit grouping) and [`format_total_sum`] reproduces it.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Rounds `value` to `decimals` decimal places, half away from zero.
pub fn round_number(value: f64, decimals: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// `value` as a percentage of `total`, rounded to `decimals` places.
///
/// A zero total yields `0`.
pub fn percentage_of(value: f64, total: f64, decimals: u8) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round_number(value / total * 100.0, decimals)
}

/// A unit suffix recognised in host-formatted values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueUnit {
    /// `12.5%`; the raw value is a fraction.
    Percent,
    /// `1.2K`.
    Thousands,
    /// `1.2M`.
    Millions,
    /// `1.2B`.
    Billions,
    /// `1.2e5`; exponent notation.
    Scientific,
}

impl ValueUnit {
    fn from_suffix(c: char) -> Option<Self> {
        match c {
            '%' => Some(Self::Percent),
            'K' | 'k' => Some(Self::Thousands),
            'M' => Some(Self::Millions),
            'B' | 'b' => Some(Self::Billions),
            _ => None,
        }
    }

    /// Text appended after the number.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "B",
            Self::Scientific => "",
        }
    }

    /// Factor applied to a raw value before display.
    pub fn scale(self) -> f64 {
        match self {
            Self::Percent => 100.0,
            Self::Thousands => 1e-3,
            Self::Millions => 1e-6,
            Self::Billions => 1e-9,
            Self::Scientific => 1.0,
        }
    }
}

/// The display shape of a host-formatted number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueFormat {
    /// Leading symbols, e.g. a currency sign.
    pub prefix: String,
    /// Trailing unit, if any.
    pub unit: Option<ValueUnit>,
    /// Digits after the decimal point.
    pub decimals: u8,
    /// Whether the integer part is grouped by thousands with `,`.
    pub grouping: bool,
}

impl ValueFormat {
    /// Reads the display shape from a formatted sample such as `"$1,234.50"` or `"12.5%"`.
    ///
    /// Unrecognised samples yield a plain format with no decimals.
    pub fn infer(sample: &str) -> Self {
        let sample = sample.trim();
        let body_start = sample
            .char_indices()
            .find(|&(_, c)| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
            .map_or(sample.len(), |(i, _)| i);
        let prefix = String::from(&sample[..body_start]);
        let mut body = sample[body_start..].trim_end();

        let mut unit = None;
        if let Some(last) = body.chars().last()
            && let Some(u) = ValueUnit::from_suffix(last)
        {
            unit = Some(u);
            body = body[..body.len() - last.len_utf8()].trim_end();
        }

        let mantissa = match body.find(['e', 'E']) {
            Some(i) if unit.is_none() => {
                unit = Some(ValueUnit::Scientific);
                &body[..i]
            }
            _ => body,
        };
        let decimals = mantissa.split_once('.').map_or(0, |(_, fraction)| {
            let digits = fraction.chars().take_while(char::is_ascii_digit).count();
            u8::try_from(digits).unwrap_or(u8::MAX)
        });

        Self {
            prefix,
            unit,
            decimals,
            grouping: mantissa.contains(','),
        }
    }

    /// Formats `value` in this shape.
    pub fn format(&self, value: f64) -> String {
        let decimals = usize::from(self.decimals);
        if !value.is_finite() {
            return alloc::format!("{}{value}", self.prefix);
        }
        match self.unit {
            Some(ValueUnit::Scientific) => alloc::format!("{}{value:.decimals$e}", self.prefix),
            unit => {
                let scaled = value * unit.map_or(1.0, ValueUnit::scale);
                let rounded = round_number(scaled, self.decimals);
                let mut number = alloc::format!("{rounded:.decimals$}");
                if self.grouping {
                    number = group_thousands(&number);
                }
                let symbol = unit.map_or("", ValueUnit::symbol);
                alloc::format!("{}{number}{symbol}", self.prefix)
            }
        }
    }
}

/// Formats a sum of host values in the shape of the host's own formatting.
pub fn format_total_sum(total: f64, format: &ValueFormat) -> String {
    format.format(total)
}

fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int, fraction) = match digits.split_once('.') {
        Some((int, fraction)) => (int, Some(fraction)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(number.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn rounds_to_the_requested_decimals() {
        assert_eq!(round_number(3.456, 2), 3.46);
        assert_ne!(round_number(3.456, 2), 3.0);
        assert_eq!(round_number(2.5, 0), 3.0);
        assert_eq!(round_number(-1.25, 1), -1.3);
    }

    #[test]
    fn percentages() {
        assert_eq!(percentage_of(25.0, 100.0, 2), 25.0);
        assert_eq!(percentage_of(23.2558, 100.0, 2), 23.26);
        assert_eq!(percentage_of(304.0, 1105.0, 1), 27.5);
        assert_eq!(percentage_of(1.0, 0.0, 1), 0.0);
    }

    #[test]
    fn infers_prefix_unit_and_decimals() {
        let f = ValueFormat::infer("$1,234.50");
        assert_eq!(f.prefix, "$");
        assert_eq!(f.unit, None);
        assert_eq!(f.decimals, 2);
        assert!(f.grouping);

        let f = ValueFormat::infer("12.5%");
        assert_eq!(f.prefix, "");
        assert_eq!(f.unit, Some(ValueUnit::Percent));
        assert_eq!(f.decimals, 1);

        let f = ValueFormat::infer("€ 3.4M");
        assert_eq!(f.prefix, "€ ");
        assert_eq!(f.unit, Some(ValueUnit::Millions));

        let f = ValueFormat::infer("1.23e+5");
        assert_eq!(f.unit, Some(ValueUnit::Scientific));
        assert_eq!(f.decimals, 2);

        assert_eq!(ValueFormat::infer("n/a"), ValueFormat {
            prefix: "n/a".into(),
            ..ValueFormat::default()
        });
    }

    #[test]
    fn totals_follow_the_sample_shape() {
        let f = ValueFormat::infer("$1,234.50");
        assert_eq!(format_total_sum(1234567.891, &f), "$1,234,567.89");
        assert_eq!(format_total_sum(-1500.0, &f), "$-1,500.00");

        let f = ValueFormat::infer("1.2K");
        assert_eq!(format_total_sum(3460.0, &f), "3.5K");

        let f = ValueFormat::infer("12%");
        assert_eq!(format_total_sum(0.25, &f), "25%");

        let f = ValueFormat::infer("1.23e5");
        assert_eq!(format_total_sum(12345.0, &f), "1.23e4");

        assert_eq!(format_total_sum(0.0, &ValueFormat::default()), "0");
    }

    #[test]
    fn grouping_handles_short_and_signed_numbers() {
        assert_eq!(group_thousands("12"), "12");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("-123456.7"), "-123,456.7");
    }
}
