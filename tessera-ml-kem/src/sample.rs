//! Sampling functions for ML-KEM.
//!
//! This module implements FIPS 203 Algorithm 7 (SampleNTT), which turns a
//! SHAKE128 stream into a uniform NTT-domain polynomial by rejection, and
//! Algorithm 8 (SamplePolyCBD), which turns PRF output into a small
//! polynomial drawn from the centered binomial distribution.

use crate::hash::prf_into;
use crate::params::common::{N, Q};
use crate::poly::{NttPoly, Poly};
use crate::reduce::sub_mod;
use crate::sha3::Shake128;
use tessera_core::{Error, Result};
use zeroize::Zeroize;

/// SHAKE128 rate; one squeeze yields 56 candidate triples.
const XOF_BLOCK: usize = Shake128::RATE;

/// Sample a uniform NTT-domain polynomial from a 34-byte seed `ρ ‖ j ‖ i`.
///
/// # Errors
/// [`Error::InvalidLength`] if `b` is not 34 bytes.
pub fn sample_ntt(b: &[u8]) -> Result<NttPoly> {
    if b.len() != 34 {
        return Err(Error::InvalidLength {
            expected: 34,
            actual: b.len(),
        });
    }
    let mut xof = Shake128::with_input(b);
    Ok(sample_ntt_from_xof(&mut xof))
}

/// Sample matrix entry Â\[i\]\[j\] from XOF(ρ ‖ j ‖ i).
pub(crate) fn sample_ntt_from_seed(rho: &[u8; 32], i: u8, j: u8) -> NttPoly {
    let mut xof = Shake128::with_inputs(&[&rho[..], &[j, i]]);
    sample_ntt_from_xof(&mut xof)
}

/// Rejection-sample 256 coefficients from an XOF stream.
///
/// Each 3-byte chunk yields two 12-bit candidates
/// `d1 = C0 + 256·(C1 mod 16)` and `d2 = ⌊C1/16⌋ + 16·C2`, each kept iff
/// below q. The loop length depends only on public data.
fn sample_ntt_from_xof(xof: &mut Shake128) -> NttPoly {
    let mut poly = NttPoly::zero();
    let mut block = [0u8; XOF_BLOCK];
    let mut j = 0;

    while j < N {
        xof.read(&mut block);
        for chunk in block.chunks_exact(3) {
            let d1 = (chunk[0] as u16) | (((chunk[1] as u16) & 0x0F) << 8);
            let d2 = ((chunk[1] as u16) >> 4) | ((chunk[2] as u16) << 4);

            if d1 < Q && j < N {
                poly.coeffs[j] = d1;
                j += 1;
            }
            if d2 < Q && j < N {
                poly.coeffs[j] = d2;
                j += 1;
            }
        }
    }

    poly
}

/// Sample a polynomial from the centered binomial distribution CBD_eta.
///
/// Coefficient i is the popcount of bits `[2iη, 2iη+η)` minus the popcount
/// of bits `[2iη+η, 2iη+2η)`, reduced into [0, q-1].
///
/// # Errors
/// - [`Error::InvalidParameter`] if `eta` is not 2 or 3
/// - [`Error::InvalidLength`] if `b` is not `64·eta` bytes
pub fn sample_poly_cbd(eta: usize, b: &[u8]) -> Result<Poly> {
    match eta {
        2 | 3 => {}
        _ => {
            return Err(Error::InvalidParameter {
                name: "eta",
                value: eta,
            })
        }
    }
    if b.len() != 64 * eta {
        return Err(Error::InvalidLength {
            expected: 64 * eta,
            actual: b.len(),
        });
    }
    Ok(cbd(eta, b))
}

/// Draw `SamplePolyCBD_eta(PRF_eta(σ, nonce))` and advance the nonce.
///
/// `eta` comes from a parameter set and is always 2 or 3.
pub(crate) fn sample_noise(eta: usize, sigma: &[u8; 32], nonce: &mut u8) -> Poly {
    debug_assert!(eta == 2 || eta == 3);
    let mut buf = [0u8; 64 * 3];
    let bytes = &mut buf[..64 * eta];
    prf_into(sigma, *nonce, bytes);
    *nonce = nonce.wrapping_add(1);
    let poly = cbd(eta, bytes);
    buf.zeroize();
    poly
}

fn cbd(eta: usize, bytes: &[u8]) -> Poly {
    let mut poly = Poly::zero();
    if eta == 2 {
        cbd2(&mut poly, bytes);
    } else {
        cbd3(&mut poly, bytes);
    }
    poly
}

/// CBD with eta=2: each byte gives two coefficients of 2+2 bits.
fn cbd2(poly: &mut Poly, bytes: &[u8]) {
    for (i, &byte) in bytes.iter().take(128).enumerate() {
        let t = byte as u32;
        // Sum adjacent bit pairs.
        let d = (t & 0x55) + ((t >> 1) & 0x55);

        for k in 0..2 {
            let a = ((d >> (4 * k)) & 0x3) as u16;
            let b = ((d >> (4 * k + 2)) & 0x3) as u16;
            poly.coeffs[2 * i + k] = sub_mod(a, b);
        }
    }
}

/// CBD with eta=3: every 3 bytes give four coefficients of 3+3 bits.
fn cbd3(poly: &mut Poly, bytes: &[u8]) {
    for (i, chunk) in bytes.chunks_exact(3).take(64).enumerate() {
        let t = (chunk[0] as u32) | ((chunk[1] as u32) << 8) | ((chunk[2] as u32) << 16);
        // Sum bit triples with the 0b001001... mask.
        let d = (t & 0x249249) + ((t >> 1) & 0x249249) + ((t >> 2) & 0x249249);

        for k in 0..4 {
            let a = ((d >> (6 * k)) & 0x7) as u16;
            let b = ((d >> (6 * k + 3)) & 0x7) as u16;
            poly.coeffs[4 * i + k] = sub_mod(a, b);
        }
    }
}
