//! Byte encoding, bit packing and compression for ML-KEM.
//!
//! This module implements FIPS 203 Algorithms 3 to 6 (`BitsToBytes`,
//! `BytesToBits`, `ByteEncode`, `ByteDecode`) and the `Compress`/`Decompress`
//! maps of §4.2.1. All bit strings are little-endian: bit 0 of a byte is its
//! least significant bit, and coefficient bits are emitted low bit first.
//!
//! The public functions validate their inputs and return [`Result`]. The
//! `pub(crate)` packers below them work on fixed-size arrays and are only
//! called with lengths the caller has already checked.

#![allow(clippy::needless_range_loop)]

use alloc::vec;
use alloc::vec::Vec;

use crate::params::common::{N, POLY_BYTES, Q};
use crate::poly::Poly;
use crate::reduce::csubq;
use subtle::{Choice, ConstantTimeLess};
use tessera_core::{Error, Result};

/// Largest supported bit width.
pub const MAX_BITS: usize = 12;

/// Decompress₁(1) = ⌈q/2⌋.
const HALF_Q: u16 = Q.div_ceil(2);

fn check_bits(d: usize) -> Result<()> {
    if (1..=MAX_BITS).contains(&d) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "d",
            value: d,
        })
    }
}

// ============================================================================
// Bit strings (FIPS 203 Algorithms 3 and 4)
// ============================================================================

/// Pack a bit array (one bit per entry, LSB first) into bytes.
///
/// Only the low bit of each entry is used.
///
/// # Errors
/// [`Error::InvalidLength`] if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::InvalidLength {
            expected: bits.len().next_multiple_of(8),
            actual: bits.len(),
        });
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (j, &bit)| byte | ((bit & 1) << j))
        })
        .collect())
}

/// Unpack bytes into a bit array, LSB of each byte first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for j in 0..8 {
            bits.push((byte >> j) & 1);
        }
    }
    bits
}

// ============================================================================
// Compression (FIPS 203 §4.2.1)
// ============================================================================

/// `Compress_d(x) = ⌈(2^d / q) · x⌋ mod 2^d` without range checks.
#[inline]
pub(crate) const fn compress_coeff(x: u16, d: usize) -> u16 {
    let scaled = ((x as u32) << d) + (Q as u32 / 2);
    ((scaled / Q as u32) & ((1 << d) - 1)) as u16
}

/// `Decompress_d(y) = ⌈(q / 2^d) · y⌋` without range checks.
#[inline]
pub(crate) const fn decompress_coeff(y: u16, d: usize) -> u16 {
    let y = (y as u32) & ((1 << d) - 1);
    ((y * Q as u32 + (1 << (d - 1))) >> d) as u16
}

/// Compress a coefficient to `d` bits.
///
/// # Errors
/// [`Error::InvalidParameter`] if `d` is not in [1, 12].
pub fn compress(d: usize, x: u16) -> Result<u16> {
    check_bits(d)?;
    Ok(compress_coeff(x, d))
}

/// Decompress a `d`-bit value back into [0, q-1].
///
/// Only the low `d` bits of `y` are used.
///
/// # Errors
/// [`Error::InvalidParameter`] if `d` is not in [1, 12].
pub fn decompress(d: usize, y: u16) -> Result<u16> {
    check_bits(d)?;
    Ok(decompress_coeff(y, d))
}

// ============================================================================
// ByteEncode / ByteDecode (FIPS 203 Algorithms 5 and 6)
// ============================================================================

/// Encode 256 integers of `d` bits each into `32·d` bytes.
///
/// Each entry is taken modulo 2^d.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `d` is not in [1, 12]
/// - [`Error::InvalidLength`] if `f` does not hold exactly 256 entries
pub fn byte_encode(d: usize, f: &[u16]) -> Result<Vec<u8>> {
    check_bits(d)?;
    let coeffs: &[u16; N] = f.try_into().map_err(|_| Error::InvalidLength {
        expected: N,
        actual: f.len(),
    })?;
    let mut out = vec![0u8; 32 * d];
    byte_encode_into(d, coeffs, &mut out);
    Ok(out)
}

/// Decode `32·d` bytes into 256 integers.
///
/// Entries are reduced modulo q when `d = 12` and are below 2^d otherwise.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `d` is not in [1, 12]
/// - [`Error::InvalidLength`] if `bytes` is not exactly `32·d` bytes
pub fn byte_decode(d: usize, bytes: &[u8]) -> Result<[u16; N]> {
    check_bits(d)?;
    if bytes.len() != 32 * d {
        return Err(Error::InvalidLength {
            expected: 32 * d,
            actual: bytes.len(),
        });
    }
    Ok(byte_decode_from(d, bytes))
}

/// Pack 256 `d`-bit values into `out[..32·d]` through a bit accumulator.
pub(crate) fn byte_encode_into(d: usize, coeffs: &[u16; N], out: &mut [u8]) {
    debug_assert!(out.len() >= 32 * d);
    if d == 12 {
        encode_12(coeffs, out);
        return;
    }
    let mask = (1u32 << d) - 1;
    let mut acc = 0u32;
    let mut bits = 0;
    let mut pos = 0;
    for &c in coeffs.iter() {
        acc |= (c as u32 & mask) << bits;
        bits += d;
        while bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            bits -= 8;
        }
    }
}

/// Unpack 256 `d`-bit values from `bytes[..32·d]`.
pub(crate) fn byte_decode_from(d: usize, bytes: &[u8]) -> [u16; N] {
    debug_assert!(bytes.len() >= 32 * d);
    if d == 12 {
        return decode_12(bytes);
    }
    let mask = (1u32 << d) - 1;
    let mut out = [0u16; N];
    let mut acc = 0u32;
    let mut bits = 0;
    let mut pos = 0;
    for c in out.iter_mut() {
        while bits < d {
            acc |= (bytes[pos] as u32) << bits;
            pos += 1;
            bits += 8;
        }
        *c = (acc & mask) as u16;
        acc >>= d;
        bits -= d;
    }
    out
}

/// Unpack two 12-bit coefficients from a 3-byte chunk.
///
/// Layout: `c0 = b0 | ((b1 & 0x0F) << 8)`, `c1 = (b1 >> 4) | (b2 << 4)`
#[inline]
fn unpack_12bit_coeffs(chunk: &[u8]) -> (u16, u16) {
    debug_assert_eq!(chunk.len(), 3);
    let b0 = chunk[0] as u16;
    let b1 = chunk[1] as u16;
    let b2 = chunk[2] as u16;
    let c0 = b0 | ((b1 & 0x0F) << 8);
    let c1 = (b1 >> 4) | (b2 << 4);
    (c0, c1)
}

fn encode_12(coeffs: &[u16; N], out: &mut [u8]) {
    for i in 0..N / 2 {
        let c0 = coeffs[2 * i] & 0x0FFF;
        let c1 = coeffs[2 * i + 1] & 0x0FFF;
        out[3 * i] = c0 as u8;
        out[3 * i + 1] = ((c0 >> 8) | (c1 << 4)) as u8;
        out[3 * i + 2] = (c1 >> 4) as u8;
    }
}

fn decode_12(bytes: &[u8]) -> [u16; N] {
    let mut out = [0u16; N];
    for (i, chunk) in bytes.chunks_exact(3).take(N / 2).enumerate() {
        let (c0, c1) = unpack_12bit_coeffs(chunk);
        // 12-bit values are below 2q, so one conditional subtraction reduces mod q.
        out[2 * i] = csubq(c0);
        out[2 * i + 1] = csubq(c1);
    }
    out
}

// ============================================================================
// Polynomial helpers
// ============================================================================

/// `ByteEncode_12` of a polynomial into `out[..384]`.
pub(crate) fn poly_to_bytes(coeffs: &[u16; N], out: &mut [u8]) {
    encode_12(coeffs, &mut out[..POLY_BYTES]);
}

/// `Compress_d` then `ByteEncode_d` into `out[..32·d]`.
pub(crate) fn poly_compress(poly: &Poly, d: usize, out: &mut [u8]) {
    let compressed = poly.coeffs.map(|c| compress_coeff(c, d));
    byte_encode_into(d, &compressed, out);
}

/// `ByteDecode_d` then `Decompress_d`.
pub(crate) fn poly_decompress(bytes: &[u8], d: usize) -> Poly {
    Poly {
        coeffs: byte_decode_from(d, bytes).map(|y| decompress_coeff(y, d)),
    }
}

/// Expand a 32-byte message into a polynomial: `Decompress_1(ByteDecode_1(m))`.
///
/// Bit 1 maps to ⌈q/2⌋ = 1665 and bit 0 to 0, selected with a mask rather
/// than a branch.
pub fn message_to_poly(m: &[u8; 32]) -> Poly {
    let mut poly = Poly::zero();
    for i in 0..32 {
        for j in 0..8 {
            let bit = ((m[i] >> j) & 1) as u16;
            poly.coeffs[8 * i + j] = 0u16.wrapping_sub(bit) & HALF_Q;
        }
    }
    poly
}

/// Recover a 32-byte message from a polynomial: `ByteEncode_1(Compress_1(w))`.
pub fn poly_to_message(poly: &Poly) -> [u8; 32] {
    let mut m = [0u8; 32];
    for i in 0..32 {
        for j in 0..8 {
            let bit = compress_coeff(poly.coeffs[8 * i + j], 1) as u8;
            m[i] |= bit << j;
        }
    }
    m
}

// ============================================================================
// Validation
// ============================================================================

/// Check that every 12-bit coefficient of an encapsulation key is below q.
///
/// This is the FIPS 203 §7.2 modulus check, equivalent to
/// `ByteEncode_12(ByteDecode_12(t)) == t` on the key's t̂ portion. The
/// `ek` is one or more 384-byte polynomials followed by the 32-byte ρ.
/// Length and alignment are public and checked first; the coefficient scan
/// accumulates a [`Choice`] so it takes the same time wherever a bad value
/// sits.
pub fn check_ek_modulus(ek: &[u8]) -> bool {
    if ek.len() <= 32 {
        return false;
    }
    let t_len = ek.len() - 32;
    if t_len % POLY_BYTES != 0 {
        return false;
    }

    let mut all_valid = Choice::from(1u8);
    for chunk in ek[..t_len].chunks_exact(3) {
        let (c0, c1) = unpack_12bit_coeffs(chunk);
        all_valid &= c0.ct_lt(&Q);
        all_valid &= c1.ct_lt(&Q);
    }
    all_valid.into()
}
