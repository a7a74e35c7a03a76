//! The public matrix Â of ML-KEM.
//!
//! Â is regenerated from ρ on every KeyGen and Encrypt call and dropped at
//! the end of it. Entry Â\[i\]\[j\] is sampled from XOF(ρ ‖ j ‖ i).

use crate::poly::NttPoly;
use crate::polyvec::NttPolyVec;
use crate::sample::sample_ntt_from_seed;

/// A K×K matrix of NTT-domain polynomials.
pub(crate) type Matrix<const K: usize> = [[NttPoly; K]; K];

/// Sample Â from ρ, or Âᵀ when `transpose` is set.
pub(crate) fn sample_matrix<const K: usize>(rho: &[u8; 32], transpose: bool) -> Matrix<K> {
    core::array::from_fn(|i| {
        core::array::from_fn(|j| {
            if transpose {
                // Âᵀ[i][j] = Â[j][i]
                sample_ntt_from_seed(rho, j as u8, i as u8)
            } else {
                sample_ntt_from_seed(rho, i as u8, j as u8)
            }
        })
    })
}

/// Matrix-vector product `result[i] = Σ_j a[i][j] ∘ v[j]`.
pub(crate) fn matrix_vec_mul<const K: usize>(a: &Matrix<K>, v: &NttPolyVec<K>) -> NttPolyVec<K> {
    let mut result = NttPolyVec::zero();
    for (row, out) in a.iter().zip(result.polys.iter_mut()) {
        for (entry, x) in row.iter().zip(v.polys.iter()) {
            out.mul_acc(entry, x);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::{N, Q};
    use crate::sample::sample_ntt;

    #[test]
    fn test_entry_seed_layout() {
        let rho = [0x42u8; 32];
        let a: Matrix<3> = sample_matrix(&rho, false);

        let mut seed = [0u8; 34];
        seed[..32].copy_from_slice(&rho);
        seed[32] = 2; // j
        seed[33] = 1; // i
        assert_eq!(a[1][2], sample_ntt(&seed).unwrap());
    }

    #[test]
    fn test_sample_matrix_transpose() {
        let rho = [0x17u8; 32];
        let a: Matrix<2> = sample_matrix(&rho, false);
        let at: Matrix<2> = sample_matrix(&rho, true);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(at[i][j], a[j][i], "transpose mismatch at [{}][{}]", i, j);
            }
        }
        assert_ne!(a[0][1], a[1][0]);
    }

    #[test]
    fn test_coefficients_in_range() {
        let a: Matrix<4> = sample_matrix(&[9u8; 32], false);
        for row in a.iter() {
            for entry in row.iter() {
                assert!(entry.coeffs().iter().all(|&c| c < Q));
            }
        }
    }

    #[test]
    fn test_matrix_vec_mul_zero() {
        let a: Matrix<2> = sample_matrix(&[0x42u8; 32], false);
        let result = matrix_vec_mul(&a, &NttPolyVec::zero());
        assert_eq!(result, NttPolyVec::zero());
    }

    #[test]
    fn test_matrix_vec_mul_by_basis_vector() {
        // Â · (1̂, 0) picks out the first column.
        let a: Matrix<2> = sample_matrix(&[5u8; 32], false);
        let mut one = [0u16; N];
        one[0] = 1;
        let mut e0 = NttPolyVec::<2>::zero();
        e0.polys[0] = crate::poly::Poly::from_coeffs(one).ntt();

        let result = matrix_vec_mul(&a, &e0);
        assert_eq!(result.polys[0], a[0][0]);
        assert_eq!(result.polys[1], a[1][0]);
    }
}
