//! Conversion between decimal strings and fixed-point integers.
//!
//! `parse_units("100.5", 6) == 100_500_000`, `format_units(100_500_000, 6) == "100.5"`.
//! Parsing is exact: digits beyond the token's precision are rejected rather
//! than rounded.

use crate::constants::MAX_DECIMALS;
use crate::error::UnitsError;

/// Parse a non-negative decimal string into smallest units.
///
/// Accepts `"100"`, `"100.5"`, `".5"` and `"100."`. Surrounding whitespace is
/// ignored; signs, exponents and digit separators are not accepted.
///
/// # Examples
///
/// ```
/// use lockdrop_core::units::parse_units;
/// assert_eq!(parse_units("100", 6), Ok(100_000_000));
/// assert_eq!(parse_units("0.000001", 6), Ok(1));
/// assert!(parse_units("0.0000001", 6).is_err());
/// ```
pub fn parse_units(text: &str, decimals: u8) -> Result<u128, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::DecimalsTooLarge(decimals));
    }
    let text = text.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::Empty);
    }
    if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(UnitsError::InvalidCharacter(c));
    }
    if frac.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals { max: decimals });
    }

    let scale = 10u128.pow(decimals as u32);
    let whole_value = digits_to_u128(whole)?
        .checked_mul(scale)
        .ok_or(UnitsError::Overflow)?;
    let frac_scale = 10u128.pow((decimals as usize - frac.len()) as u32);
    let frac_value = digits_to_u128(frac)? * frac_scale;

    whole_value
        .checked_add(frac_value)
        .ok_or(UnitsError::Overflow)
}

/// [`parse_units`] narrowed to an underlying-asset amount.
pub fn parse_amount(text: &str, decimals: u8) -> Result<u64, UnitsError> {
    u64::try_from(parse_units(text, decimals)?).map_err(|_| UnitsError::Overflow)
}

fn digits_to_u128(digits: &str) -> Result<u128, UnitsError> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as u128))
            .ok_or(UnitsError::Overflow)
    })
}

/// Render smallest units as an exact decimal string.
///
/// Trailing fractional zeros are dropped, as is the decimal point for whole
/// values.
///
/// # Examples
///
/// ```
/// use lockdrop_core::units::format_units;
/// assert_eq!(format_units(30_000 * 10u128.pow(18), 18), "30000");
/// assert_eq!(format_units(1, 6), "0.000001");
/// ```
pub fn format_units(value: u128, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let (whole, frac) = if digits.len() > decimals {
        let (w, f) = digits.split_at(digits.len() - decimals);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{digits:0>decimals$}"))
    };

    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{whole}.{frac}")
    }
}

/// Render a percentage with a fixed number of fractional digits.
pub fn format_percent(percent: f64, digits: usize) -> String {
    format!("{percent:.digits$}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse_units ---

    #[test]
    fn parse_whole() {
        assert_eq!(parse_units("5000000", 6), Ok(5_000_000_000_000));
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(parse_units("100.5", 6), Ok(100_500_000));
        assert_eq!(parse_units(".5", 6), Ok(500_000));
        assert_eq!(parse_units("7.", 6), Ok(7_000_000));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_units("  42 ", 0), Ok(42));
    }

    #[test]
    fn parse_full_precision() {
        assert_eq!(parse_units("1.000000000000000001", 18), Ok(10u128.pow(18) + 1));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(parse_units("", 6), Err(UnitsError::Empty));
        assert_eq!(parse_units("   ", 6), Err(UnitsError::Empty));
        assert_eq!(parse_units(".", 6), Err(UnitsError::Empty));
    }

    #[test]
    fn parse_rejects_sign_and_separators() {
        assert_eq!(parse_units("-1", 6), Err(UnitsError::InvalidCharacter('-')));
        assert_eq!(parse_units("1_000", 6), Err(UnitsError::InvalidCharacter('_')));
        assert_eq!(parse_units("1.2.3", 6), Err(UnitsError::InvalidCharacter('.')));
        assert_eq!(parse_units("1e6", 6), Err(UnitsError::InvalidCharacter('e')));
    }

    #[test]
    fn parse_rejects_excess_precision() {
        assert_eq!(
            parse_units("0.1234567", 6),
            Err(UnitsError::TooManyDecimals { max: 6 })
        );
        assert_eq!(parse_units("1.5", 0), Err(UnitsError::TooManyDecimals { max: 0 }));
    }

    #[test]
    fn parse_overflow() {
        let too_big = "1".repeat(40);
        assert_eq!(parse_units(&too_big, 0), Err(UnitsError::Overflow));
        assert_eq!(
            parse_units("340282366920938463463374607431768211456", 0),
            Err(UnitsError::Overflow)
        );
        assert_eq!(parse_units("1000", 36), Err(UnitsError::Overflow));
    }

    #[test]
    fn parse_u128_max() {
        assert_eq!(
            parse_units("340282366920938463463374607431768211455", 0),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn parse_rejects_large_decimals() {
        assert_eq!(parse_units("1", 39), Err(UnitsError::DecimalsTooLarge(39)));
    }

    #[test]
    fn parse_amount_narrows() {
        assert_eq!(parse_amount("100", 6), Ok(100_000_000));
        assert_eq!(parse_amount("18446744073709551616", 0), Err(UnitsError::Overflow));
    }

    // --- format_units ---

    #[test]
    fn format_whole() {
        assert_eq!(format_units(5_000_000_000_000, 6), "5000000");
        assert_eq!(format_units(0, 6), "0");
    }

    #[test]
    fn format_fraction() {
        assert_eq!(format_units(100_500_000, 6), "100.5");
        assert_eq!(format_units(123_456_780_009, 6), "123456.780009");
    }

    #[test]
    fn format_small_values_pad() {
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(10, 2), "0.1");
    }

    #[test]
    fn format_zero_decimals() {
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn format_beyond_u128_digits() {
        assert_eq!(format_units(5, 40), format!("0.{}5", "0".repeat(39)));
    }

    #[test]
    fn format_then_parse_is_identity() {
        let cases = [
            (0u128, 6u8),
            (1, 6),
            (100_500_000, 6),
            (30_000 * 10u128.pow(18), 18),
            (u128::MAX, 18),
        ];
        for (v, d) in cases {
            assert_eq!(parse_units(&format_units(v, d), d), Ok(v), "value {v} decimals {d}");
        }
    }

    // --- format_percent ---

    #[test]
    fn percent_rendering() {
        assert_eq!(format_percent(2.0, 2), "2.00%");
        assert_eq!(format_percent(100.0, 0), "100%");
        assert_eq!(format_percent(0.123456, 4), "0.1235%");
    }
}
