//! Fixed-precision rendering of converted magnitudes.
//!
//! Rounding is half away from zero on the exact binary value of the `f64`:
//! `0.125` rounds to `0.13` at two digits, while `1.005` (stored slightly
//! below the midpoint) rounds to `1.00`.

use crate::converter::{convert_bytes, ConverterOptions};
use crate::error::Result;

/// Largest number of fractional digits a result is rendered with.
pub const MAX_PRECISION: usize = 100;

/// Render `value` with exactly `precision` fractional digits.
///
/// `precision` is capped at [`MAX_PRECISION`].
pub fn to_fixed(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    if value.is_finite() && is_exact_tie(value.abs(), precision) {
        // Nudge one ulp away from zero so the formatter leaves the midpoint.
        format!("{:.*}", precision, next_away_from_zero(value))
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Round `value` to `precision` fractional digits.
pub fn round_to(value: f64, precision: usize) -> f64 {
    to_fixed(value, precision).parse().unwrap_or(value)
}

/// Drop redundant zeros after the decimal point: `1.50` -> `1.5`, `1.00` -> `1`.
pub fn trim_trailing_zeros(number: &str) -> &str {
    if !number.contains('.') {
        return number;
    }
    number.trim_end_matches('0').trim_end_matches('.')
}

/// Human string for `value` in `unit`, e.g. `1.5 MB`.
pub fn display_value(value: f64, precision: usize, unit: impl std::fmt::Display) -> String {
    let fixed = to_fixed(value, precision);
    format!("{} {}", trim_trailing_zeros(&fixed), unit)
}

/// Format a byte count with its best-fit unit.
pub fn format_bytes(bytes: f64, options: &ConverterOptions) -> Result<String> {
    Ok(convert_bytes(bytes, options)?.formatted)
}

/// Whether `value` sits exactly halfway between two `precision`-digit decimals.
///
/// Writing `value = m * 2^e` with `m` odd, `value * 10^precision` ends in
/// exactly `.5` iff `e == -(precision + 1)`.
fn is_exact_tie(value: f64, precision: usize) -> bool {
    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if mantissa == 0 {
        return false;
    }

    let exponent = exponent + i64::from(mantissa.trailing_zeros());
    exponent == -(precision as i64 + 1)
}

fn next_away_from_zero(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(to_fixed(1.5, 2), "1.50");
        assert_eq!(to_fixed(1.024, 2), "1.02");
        assert_eq!(to_fixed(1.234, 0), "1");
        assert_eq!(to_fixed(999.0, 0), "999");
        assert_eq!(to_fixed(2.147483648, 2), "2.15");
    }

    #[test]
    fn test_to_fixed_rounds_exact_midpoints_up() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(1.5, 0), "2");
        assert_eq!(to_fixed(0.375, 2), "0.38");
    }

    #[test]
    fn test_to_fixed_inexact_midpoints_follow_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        // 1.255 is stored as 1.25499999999999989...
        assert_eq!(to_fixed(1.255, 2), "1.25");
    }

    #[test]
    fn test_to_fixed_caps_precision() {
        let fixed = to_fixed(1.5, usize::MAX);
        assert_eq!(fixed.len(), "1.".len() + MAX_PRECISION);
        assert_eq!(fixed, to_fixed(1.5, MAX_PRECISION));
        assert_eq!(round_to(0.125, 1_000_000), 0.125);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234567, 3), 1.235);
        assert_eq!(round_to(1234.567, 3), 1234.567);
        assert_eq!(round_to(0.0, 4), 0.0);
    }

    #[test]
    fn test_trim_trailing_zeros() {
        assert_eq!(trim_trailing_zeros("1.50"), "1.5");
        assert_eq!(trim_trailing_zeros("1.00"), "1");
        assert_eq!(trim_trailing_zeros("1000"), "1000");
        assert_eq!(trim_trailing_zeros("1.234"), "1.234");
        assert_eq!(trim_trailing_zeros("10.0"), "10");
    }

    #[test]
    fn test_format_bytes() {
        let opts = ConverterOptions::default();
        assert_eq!(format_bytes(0.0, &opts).unwrap(), "0 B");
        assert_eq!(format_bytes(500.0, &opts).unwrap(), "500 B");
        assert_eq!(format_bytes(1024.0, &opts).unwrap(), "1.02 KB");
        assert_eq!(format_bytes(1_500_000.0, &opts).unwrap(), "1.5 MB");
    }

    #[test]
    fn test_format_bytes_respects_options() {
        let binary = ConverterOptions::default().with_binary(true);
        assert_eq!(format_bytes(1024.0, &binary).unwrap(), "1 KB");

        let precise = ConverterOptions::default().with_precision(3);
        assert_eq!(format_bytes(1234.0, &precise).unwrap(), "1.234 KB");
    }
}
