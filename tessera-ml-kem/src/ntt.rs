//! Number Theoretic Transform (NTT) for ML-KEM.
//!
//! Implements FIPS 203 Algorithms 9 to 12 over Z_q\[X\]/(X^256 + 1) with
//! q = 3329. The ring does not split completely: the transform stops at 128
//! degree-one factors X^2 - γ_i, so multiplication in the NTT domain is a
//! product of 128 linear polynomials modulo their factor.
//!
//! Coefficients are canonical `u16` values in [0, q-1] on input and output.
//! Control flow depends only on indices, never on coefficient values.

use crate::params::common::{INV_128, N};
use crate::reduce::{add_mod, mul_mod, sub_mod};

/// Twiddle factors: `ZETAS[i] = 17^BitRev7(i) mod q`.
pub const ZETAS: [u16; 128] = [
    1, 1729, 2580, 3289, 2642, 630, 1897, 848, 1062, 1919, 193, 797, 2786, 3260, 569, 1746, 296,
    2447, 1339, 1476, 3046, 56, 2240, 1333, 1426, 2094, 535, 2882, 2393, 2879, 1974, 821, 289, 331,
    3253, 1756, 1197, 2304, 2277, 2055, 650, 1977, 2513, 632, 2865, 33, 1320, 1915, 2319, 1435,
    807, 452, 1438, 2868, 1534, 2402, 2647, 2617, 1481, 648, 2474, 3110, 1227, 910, 17, 2761, 583,
    2649, 1637, 723, 2288, 1100, 1409, 2662, 3281, 233, 756, 2156, 3015, 3050, 1703, 1651, 2789,
    1789, 1847, 952, 1461, 2687, 939, 2308, 2437, 2388, 733, 2337, 268, 641, 1584, 2298, 2037, 3220,
    375, 2549, 2090, 1645, 1063, 319, 2773, 757, 2099, 561, 2466, 2594, 2804, 1092, 403, 1026, 1143,
    2150, 2775, 886, 1722, 1212, 1874, 1029, 2110, 2935, 885, 2154,
];

/// Base-case moduli: `GAMMAS[i] = 17^(2·BitRev7(i) + 1) mod q`.
pub const GAMMAS: [u16; 128] = [
    17, 3312, 2761, 568, 583, 2746, 2649, 680, 1637, 1692, 723, 2606, 2288, 1041, 1100, 2229, 1409,
    1920, 2662, 667, 3281, 48, 233, 3096, 756, 2573, 2156, 1173, 3015, 314, 3050, 279, 1703, 1626,
    1651, 1678, 2789, 540, 1789, 1540, 1847, 1482, 952, 2377, 1461, 1868, 2687, 642, 939, 2390,
    2308, 1021, 2437, 892, 2388, 941, 733, 2596, 2337, 992, 268, 3061, 641, 2688, 1584, 1745, 2298,
    1031, 2037, 1292, 3220, 109, 375, 2954, 2549, 780, 2090, 1239, 1645, 1684, 1063, 2266, 319,
    3010, 2773, 556, 757, 2572, 2099, 1230, 561, 2768, 2466, 863, 2594, 735, 2804, 525, 1092, 2237,
    403, 2926, 1026, 2303, 1143, 2186, 2150, 1179, 2775, 554, 886, 2443, 1722, 1607, 1212, 2117,
    1874, 1455, 1029, 2300, 2110, 1219, 2935, 394, 885, 2444, 2154, 1175,
];

/// Forward NTT in place (FIPS 203 Algorithm 9).
///
/// Cooley-Tukey butterflies over layer lengths 128, 64, ..., 2 with
/// twiddles taken from `ZETAS[1..]` in order.
pub fn ntt(f: &mut [u16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            for j in start..start + len {
                let t = mul_mod(zeta, f[j + len]);
                f[j + len] = sub_mod(f[j], t);
                f[j] = add_mod(f[j], t);
            }
        }
        len /= 2;
    }
}

/// Inverse NTT in place (FIPS 203 Algorithm 10).
///
/// Gentleman-Sande butterflies over layer lengths 2, 4, ..., 128 with
/// twiddles taken from `ZETAS[127]` downwards, then scaling by 128^-1.
pub fn inv_ntt(f: &mut [u16; N]) {
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k -= 1;
            for j in start..start + len {
                let t = f[j];
                f[j] = add_mod(t, f[j + len]);
                f[j + len] = mul_mod(zeta, sub_mod(f[j + len], t));
            }
        }
        len *= 2;
    }
    for c in f.iter_mut() {
        *c = mul_mod(*c, INV_128);
    }
}

/// Product of two degree-one polynomials modulo X^2 - γ (FIPS 203 Algorithm 12).
///
/// Returns `(a0·b0 + a1·b1·γ, a0·b1 + a1·b0)`.
#[inline]
pub const fn base_case_multiply(a0: u16, a1: u16, b0: u16, b1: u16, gamma: u16) -> (u16, u16) {
    let c0 = add_mod(mul_mod(a0, b0), mul_mod(mul_mod(a1, b1), gamma));
    let c1 = add_mod(mul_mod(a0, b1), mul_mod(a1, b0));
    (c0, c1)
}

/// Multiply two NTT-domain polynomials (FIPS 203 Algorithm 11).
pub fn multiply_ntts(f: &[u16; N], g: &[u16; N]) -> [u16; N] {
    let mut h = [0u16; N];
    multiply_ntts_acc(&mut h, f, g);
    h
}

/// Accumulate `f ∘ g` into `acc`.
pub(crate) fn multiply_ntts_acc(acc: &mut [u16; N], f: &[u16; N], g: &[u16; N]) {
    for (i, &gamma) in GAMMAS.iter().enumerate() {
        let (c0, c1) = base_case_multiply(f[2 * i], f[2 * i + 1], g[2 * i], g[2 * i + 1], gamma);
        acc[2 * i] = add_mod(acc[2 * i], c0);
        acc[2 * i + 1] = add_mod(acc[2 * i + 1], c1);
    }
}
