//! Modular arithmetic operations for ML-KEM.
//!
//! Coefficients are kept canonical in [0, q-1] as `u16`. Products are reduced
//! with Barrett reduction, and the final correction is a branch-free
//! conditional subtraction, so no operation branches on coefficient values.

use crate::params::common::Q;

/// Barrett multiplier: floor(2^32 / q).
pub const BARRETT_MULTIPLIER: u64 = (1u64 << 32) / Q as u64;

/// Subtract q once if `a >= q`.
///
/// Input must lie in [0, 2q-1]. The borrow bit of `a - q` selects the result.
#[inline]
pub const fn csubq(a: u16) -> u16 {
    let r = a.wrapping_sub(Q);
    let mask = 0u16.wrapping_sub(r >> 15);
    r.wrapping_add(Q & mask)
}

/// Barrett reduction: compute `a mod q` for any `a < 2^32`.
///
/// The quotient estimate `floor(a * m / 2^32)` undershoots `floor(a / q)` by
/// at most one, so the remainder lands in [0, 2q-1] before `csubq`.
#[inline]
pub const fn barrett_reduce(a: u32) -> u16 {
    let quotient = ((a as u64 * BARRETT_MULTIPLIER) >> 32) as u32;
    let r = a - quotient * Q as u32;
    csubq(r as u16)
}

/// (a + b) mod q for canonical inputs.
#[inline]
pub const fn add_mod(a: u16, b: u16) -> u16 {
    csubq(a + b)
}

/// (a - b) mod q for canonical inputs.
#[inline]
pub const fn sub_mod(a: u16, b: u16) -> u16 {
    csubq(a + Q - b)
}

/// (a * b) mod q for canonical inputs.
#[inline]
pub const fn mul_mod(a: u16, b: u16) -> u16 {
    barrett_reduce(a as u32 * b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrett_multiplier() {
        assert_eq!(BARRETT_MULTIPLIER, 1_290_167);
    }

    #[test]
    fn test_csubq() {
        assert_eq!(csubq(0), 0);
        assert_eq!(csubq(Q - 1), Q - 1);
        assert_eq!(csubq(Q), 0);
        assert_eq!(csubq(2 * Q - 1), Q - 1);
    }

    #[test]
    fn test_barrett_reduce_small_range() {
        for a in 0..(4 * Q as u32) {
            assert_eq!(barrett_reduce(a) as u32, a % Q as u32, "a = {a}");
        }
    }

    #[test]
    fn test_barrett_reduce_products() {
        for a in (0..Q as u32).step_by(7) {
            for b in (0..Q as u32).step_by(13) {
                assert_eq!(barrett_reduce(a * b) as u32, (a * b) % Q as u32);
            }
        }
    }

    #[test]
    fn test_barrett_reduce_extremes() {
        for a in [u32::MAX, u32::MAX - 1, u32::MAX - Q as u32, 1 << 31, (1 << 31) - 1] {
            assert_eq!(barrett_reduce(a) as u32, a % Q as u32, "a = {a}");
        }
    }

    #[test]
    fn test_add_sub_mod() {
        for a in (0..Q).step_by(17) {
            for b in (0..Q).step_by(23) {
                assert_eq!(add_mod(a, b) as u32, (a as u32 + b as u32) % Q as u32);
                assert_eq!(
                    sub_mod(a, b) as u32,
                    (a as u32 + Q as u32 - b as u32) % Q as u32
                );
            }
        }
    }

    #[test]
    fn test_mul_mod() {
        assert_eq!(mul_mod(Q - 1, Q - 1), 1);
        assert_eq!(mul_mod(1729, 1), 1729);
        assert_eq!(mul_mod(0, 3000), 0);
    }
}
