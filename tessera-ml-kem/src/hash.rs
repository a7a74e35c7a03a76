//! FIPS 203 hash functions for ML-KEM.
//!
//! This module provides the hash and XOF functions used in ML-KEM:
//! - H = SHA3-256: hash of the encapsulation key
//! - G = SHA3-512: seed and key derivation, split into two 32-byte halves
//! - J = SHAKE256 with 32 bytes of output: implicit rejection key
//! - PRF = SHAKE256 with 64·eta bytes of output: noise sampling
//! - XOF = SHAKE128: matrix sampling
//!
//! All of them run on the crate's own sponge in [`crate::sha3`].

use alloc::vec;
use alloc::vec::Vec;

use crate::sha3::{Sha3_256, Sha3_512, Shake128, Shake256};
use tessera_core::{Error, Result};
use zeroize::Zeroize;

/// PRF_eta(s, b) = SHAKE256(s ‖ b), 64·eta bytes.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `eta` is not 2 or 3
/// - [`Error::InvalidLength`] if `s` is not 32 bytes
pub fn prf(eta: usize, s: &[u8], b: u8) -> Result<Vec<u8>> {
    if eta != 2 && eta != 3 {
        return Err(Error::InvalidParameter {
            name: "eta",
            value: eta,
        });
    }
    let s: &[u8; 32] = s.try_into().map_err(|_| Error::InvalidLength {
        expected: 32,
        actual: s.len(),
    })?;
    let mut out = vec![0u8; 64 * eta];
    prf_into(s, b, &mut out);
    Ok(out)
}

/// PRF into a caller-sized buffer; the buffer length selects eta.
#[inline]
pub(crate) fn prf_into(s: &[u8; 32], b: u8, out: &mut [u8]) {
    Shake256::with_inputs(&[&s[..], &[b]]).read(out);
}

/// H(s) = SHA3-256(s).
#[inline]
pub fn h(s: &[u8]) -> [u8; 32] {
    Sha3_256::digest_of(s)
}

/// J(s) = SHAKE256(s, 32 bytes).
#[inline]
pub fn j(s: &[u8]) -> [u8; 32] {
    j_parts(&[s])
}

/// J over the concatenation of `parts`, e.g. `J(z ‖ c)` without copying.
pub fn j_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut out = [0u8; 32];
    Shake256::with_inputs(parts).read(&mut out);
    out
}

/// G(c) = SHA3-512(c), returned as its two 32-byte halves.
#[inline]
pub fn g(c: &[u8]) -> ([u8; 32], [u8; 32]) {
    g_parts(&[c])
}

/// G over the concatenation of `parts`, e.g. `G(m ‖ H(ek))`.
pub fn g_parts(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut digest = Sha3_512::digest_of_parts(parts);
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    a.copy_from_slice(&digest[..32]);
    b.copy_from_slice(&digest[32..]);
    digest.zeroize();
    (a, b)
}

/// Incremental SHAKE128, the XOF of FIPS 203 §4.1.
///
/// Absorb any number of times, then squeeze any number of times. Absorbing
/// after the first squeeze is rejected.
#[derive(Clone, Default)]
pub struct Xof {
    inner: Shake128,
}

impl Xof {
    /// Create an empty XOF.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb more input.
    ///
    /// # Errors
    /// [`Error::AbsorbAfterSqueeze`] once any output has been squeezed.
    pub fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.inner.update(data)
    }

    /// Squeeze the next `n` bytes.
    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        self.inner.read_vec(n)
    }

    /// Squeeze into `out`.
    #[inline]
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        self.inner.read(out);
    }
}
