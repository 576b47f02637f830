//! 256-bit intermediates for `a * b / d` on `u128` operands.
//!
//! The reward formula multiplies an 18-decimal pool by a 6-decimal weight,
//! which can exceed `u128` well before the quotient does.

const LOW_MASK: u128 = u64::MAX as u128;

/// Full 256-bit product of two `u128` values as `(high, low)`.
pub fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    let (a_hi, a_lo) = (a >> 64, a & LOW_MASK);
    let (b_hi, b_lo) = (b >> 64, b & LOW_MASK);

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // Sum of three values below 2^64 each; fits.
    let mid = (lo_lo >> 64) + (lo_hi & LOW_MASK) + (hi_lo & LOW_MASK);

    let low = (lo_lo & LOW_MASK) | (mid << 64);
    let high = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (mid >> 64);
    (high, low)
}

/// `floor(a * b / d)` without intermediate overflow.
///
/// Returns `None` when `d == 0` or the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use lockdrop_core::wide::mul_div_floor;
/// assert_eq!(mul_div_floor(u128::MAX, u128::MAX, u128::MAX), Some(u128::MAX));
/// assert_eq!(mul_div_floor(7, 3, 2), Some(10));
/// assert_eq!(mul_div_floor(1, 1, 0), None);
/// ```
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let (high, low) = widening_mul(a, b);
    if high == 0 {
        return Some(low / d);
    }
    if high >= d {
        return None;
    }

    // Restoring long division of (high:low) by d; the running remainder
    // starts below d and stays below d after every step.
    let mut rem = high;
    let mut quot: u128 = 0;
    for bit in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((low >> bit) & 1);
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quot |= 1u128 << bit;
        }
    }
    Some(quot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn widening_mul_small() {
        assert_eq!(widening_mul(6, 7), (0, 42));
    }

    #[test]
    fn widening_mul_carries_into_high() {
        assert_eq!(widening_mul(1u128 << 127, 2), (1, 0));
        assert_eq!(widening_mul(1u128 << 64, 1u128 << 64), (1, 0));
    }

    #[test]
    fn widening_mul_max() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(widening_mul(u128::MAX, u128::MAX), (u128::MAX - 1, 1));
    }

    #[test]
    fn mul_div_truncates() {
        assert_eq!(mul_div_floor(10, 1, 3), Some(3));
        assert_eq!(mul_div_floor(2, 1, 3), Some(0));
    }

    #[test]
    fn mul_div_wide_path() {
        // 2^127 * 4 / 8 = 2^126, product needs 130 bits.
        assert_eq!(mul_div_floor(1u128 << 127, 4, 8), Some(1u128 << 126));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), None);
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert_eq!(mul_div_floor(5, 5, 0), None);
    }

    #[test]
    fn mul_div_reward_scale() {
        // 1.5M LDY * (u64::MAX * 12) / (5M USDC * 12) overflows u128 in the
        // product but not in the quotient.
        let pool = 1_500_000u128 * 10u128.pow(18);
        let weight = u64::MAX as u128 * 12;
        let max_weight = 5_000_000_000_000u128 * 12;
        let expected = pool / 5_000_000_000_000 * u64::MAX as u128
            + (pool % 5_000_000_000_000) * u64::MAX as u128 / 5_000_000_000_000;
        assert_eq!(mul_div_floor(pool, weight, max_weight), Some(expected));
    }

    proptest! {
        #[test]
        fn matches_native_when_product_fits(
            a in 0u64..=u64::MAX,
            b in 0u64..=u64::MAX,
            d in 1u128..=u128::MAX,
        ) {
            let native = (a as u128 * b as u128) / d;
            prop_assert_eq!(mul_div_floor(a as u128, b as u128, d), Some(native));
        }

        #[test]
        fn identity_division(a in 0u128..=u128::MAX, b in 1u128..=u128::MAX) {
            prop_assert_eq!(mul_div_floor(a, b, b), Some(a));
        }

        #[test]
        fn floor_bound(a in 0u128..=u128::MAX, b in 0u128..=u128::MAX, d in 1u128..=u128::MAX) {
            if let Some(q) = mul_div_floor(a, b, d) {
                // q * d <= a * b < (q + 1) * d
                let (qh, ql) = widening_mul(q, d);
                let (ph, pl) = widening_mul(a, b);
                prop_assert!((qh, ql) <= (ph, pl));
                let rem_hi = ph - qh - u128::from(pl < ql);
                let rem_lo = pl.wrapping_sub(ql);
                prop_assert!(rem_hi == 0 && rem_lo < d);
            }
        }
    }
}
