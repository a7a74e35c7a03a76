//! Polynomial vector operations for ML-KEM.
//!
//! [`PolyVec`] and [`NttPolyVec`] hold K polynomials in the normal and NTT
//! domain respectively. They carry the vectors s, e, y, e1, t and u of
//! K-PKE along with their fixed-width encodings.

use crate::encode::{byte_decode_from, poly_compress, poly_decompress, poly_to_bytes};
use crate::params::common::POLY_BYTES;
use crate::poly::{NttPoly, Poly};
use crate::sample::sample_noise;

/// A vector of K polynomials in the normal domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PolyVec<const K: usize> {
    pub(crate) polys: [Poly; K],
}

/// A vector of K polynomials in the NTT domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NttPolyVec<const K: usize> {
    pub(crate) polys: [NttPoly; K],
}

impl<const K: usize> PolyVec<K> {
    /// Sample K noise polynomials, advancing `nonce` once per polynomial.
    pub(crate) fn sample_noise(eta: usize, sigma: &[u8; 32], nonce: &mut u8) -> Self {
        Self {
            polys: core::array::from_fn(|_| sample_noise(eta, sigma, nonce)),
        }
    }

    /// Transform every polynomial into the NTT domain.
    pub(crate) fn ntt(&self) -> NttPolyVec<K> {
        NttPolyVec {
            polys: core::array::from_fn(|i| self.polys[i].ntt()),
        }
    }

    /// Add `other` element-wise in place.
    pub(crate) fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            *a += b;
        }
    }

    /// Compress each polynomial to `d` bits and encode into `out[..K·32·d]`.
    pub(crate) fn compress_into(&self, d: usize, out: &mut [u8]) {
        let stride = 32 * d;
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(stride)) {
            poly_compress(poly, d, chunk);
        }
    }

    /// Decode and decompress K polynomials of `d` bits from `bytes[..K·32·d]`.
    pub(crate) fn decompress(bytes: &[u8], d: usize) -> Self {
        let stride = 32 * d;
        Self {
            polys: core::array::from_fn(|i| poly_decompress(&bytes[i * stride..(i + 1) * stride], d)),
        }
    }
}

impl<const K: usize> NttPolyVec<K> {
    /// The zero vector.
    pub(crate) fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| NttPoly::zero()),
        }
    }

    /// Transform every polynomial back into the normal domain.
    pub(crate) fn inv_ntt(&self) -> PolyVec<K> {
        PolyVec {
            polys: core::array::from_fn(|i| self.polys[i].inv_ntt()),
        }
    }

    /// Add `other` element-wise in place.
    pub(crate) fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            *a += b;
        }
    }

    /// Inner product `Σ self[i] ∘ other[i]`.
    pub(crate) fn dot(&self, other: &Self) -> NttPoly {
        let mut acc = NttPoly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc.mul_acc(a, b);
        }
        acc
    }

    /// `ByteEncode_12` of every polynomial into `out[..K·384]`.
    pub(crate) fn encode_into(&self, out: &mut [u8]) {
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(POLY_BYTES)) {
            poly_to_bytes(&poly.coeffs, chunk);
        }
    }

    /// `ByteDecode_12` of K polynomials from `bytes[..K·384]`.
    pub(crate) fn decode(bytes: &[u8]) -> Self {
        Self {
            polys: core::array::from_fn(|i| NttPoly {
                coeffs: byte_decode_from(12, &bytes[i * POLY_BYTES..(i + 1) * POLY_BYTES]),
            }),
        }
    }
}
