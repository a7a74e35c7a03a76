//! K-PKE: IND-CPA-secure public-key encryption (FIPS 203 Algorithms 13-15).
//!
//! This module implements the underlying PKE scheme that ML-KEM builds upon.
//! K-PKE provides IND-CPA security but not IND-CCA2 security; the full ML-KEM
//! construction adds CCA security through the Fujisaki-Okamoto transform.
//!
//! All three algorithms are deterministic. Randomness enters only through
//! the seeds `d` and `r`, and the PRF nonce is a local counter that runs
//! over s then e (KeyGen) or y, e1 then e2 (Encrypt).

use alloc::vec;
use alloc::vec::Vec;

use crate::encode::{message_to_poly, poly_compress, poly_decompress, poly_to_message};
use crate::hash::g_parts;
use crate::matrix::{matrix_vec_mul, sample_matrix, Matrix};
use crate::params::common::{encapsulation_key_size, POLY_BYTES};
use crate::polyvec::{NttPolyVec, PolyVec};
use crate::sample::sample_noise;
use tessera_core::{Error, Result};
use zeroize::{Zeroize, Zeroizing};

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::InvalidLength { expected, actual })
    }
}

/// K-PKE Key Generation (FIPS 203 Algorithm 13).
///
/// # Type Parameters
/// * `K` - Module rank (2, 3, or 4)
/// * `ETA1` - Noise parameter for s and e (2 or 3)
///
/// # Returns
/// * `ek_pke` - `ByteEncode_12(t̂) ‖ ρ`, K·384 + 32 bytes
/// * `dk_pke` - `ByteEncode_12(ŝ)`, K·384 bytes
///
/// # Algorithm
/// 1. (ρ, σ) = G(d ‖ k)
/// 2. Â\[i\]\[j\] = SampleNTT(ρ ‖ j ‖ i)
/// 3. s, e ← CBD_eta1(PRF(σ, N)) with N = 0 .. 2k-1
/// 4. t̂ = Â ∘ NTT(s) + NTT(e)
pub fn k_pke_keygen<const K: usize, const ETA1: usize>(
    d: &[u8; 32],
) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
    let (rho, mut sigma) = g_parts(&[&d[..], &[K as u8]]);
    let a: Matrix<K> = sample_matrix(&rho, false);

    let mut nonce = 0u8;
    let s = PolyVec::<K>::sample_noise(ETA1, &sigma, &mut nonce);
    let e = PolyVec::<K>::sample_noise(ETA1, &sigma, &mut nonce);
    sigma.zeroize();

    let s_hat = s.ntt();
    let mut t_hat = matrix_vec_mul(&a, &s_hat);
    t_hat.add_assign(&e.ntt());

    let mut ek_pke = vec![0u8; encapsulation_key_size(K)];
    t_hat.encode_into(&mut ek_pke[..K * POLY_BYTES]);
    ek_pke[K * POLY_BYTES..].copy_from_slice(&rho);

    let mut dk_pke = Zeroizing::new(vec![0u8; K * POLY_BYTES]);
    s_hat.encode_into(&mut dk_pke);

    (ek_pke, dk_pke)
}

/// K-PKE Encryption (FIPS 203 Algorithm 14).
///
/// # Type Parameters
/// * `K` - Module rank (2, 3, or 4)
/// * `ETA1` - Noise parameter for y (2 or 3)
/// * `ETA2` - Noise parameter for e1 and e2 (2)
/// * `DU` - Compression width for u (10 or 11)
/// * `DV` - Compression width for v (4 or 5)
///
/// # Errors
/// [`Error::InvalidLength`] if `ek_pke` is not K·384 + 32 bytes.
pub fn k_pke_encrypt<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    ek_pke: &[u8],
    m: &[u8; 32],
    r: &[u8; 32],
) -> Result<Vec<u8>> {
    check_len(encapsulation_key_size(K), ek_pke.len())?;
    Ok(encrypt::<K, ETA1, ETA2, DU, DV>(ek_pke, m, r))
}

/// Encryption on an `ek_pke` whose length is already checked.
///
/// # Algorithm
/// 1. t̂ = ByteDecode_12(ek\[..384k\]), ρ = ek\[384k..\]
/// 2. y ← CBD_eta1, e1 ← CBD_eta2, e2 ← CBD_eta2 with N = 0 .. 2k
/// 3. u = NTT⁻¹(Âᵀ ∘ ŷ) + e1
/// 4. v = NTT⁻¹(t̂ᵀ ∘ ŷ) + e2 + Decompress_1(m)
/// 5. c = ByteEncode_du(Compress_du(u)) ‖ ByteEncode_dv(Compress_dv(v))
pub(crate) fn encrypt<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    ek_pke: &[u8],
    m: &[u8; 32],
    r: &[u8; 32],
) -> Vec<u8> {
    let t_hat = NttPolyVec::<K>::decode(&ek_pke[..K * POLY_BYTES]);
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&ek_pke[K * POLY_BYTES..K * POLY_BYTES + 32]);
    let a_t: Matrix<K> = sample_matrix(&rho, true);

    let mut nonce = 0u8;
    let y = PolyVec::<K>::sample_noise(ETA1, r, &mut nonce);
    let e1 = PolyVec::<K>::sample_noise(ETA2, r, &mut nonce);
    let e2 = sample_noise(ETA2, r, &mut nonce);

    let y_hat = y.ntt();
    let mut u = matrix_vec_mul(&a_t, &y_hat).inv_ntt();
    u.add_assign(&e1);

    let mut v = t_hat.dot(&y_hat).inv_ntt();
    v += &e2;
    v += &message_to_poly(m);

    let c1_len = K * 32 * DU;
    let mut c = vec![0u8; c1_len + 32 * DV];
    u.compress_into(DU, &mut c[..c1_len]);
    poly_compress(&v, DV, &mut c[c1_len..]);
    c
}

/// K-PKE Decryption (FIPS 203 Algorithm 15).
///
/// # Errors
/// [`Error::InvalidLength`] if `dk_pke` is not K·384 bytes or `c` is not
/// 32·(du·k + dv) bytes.
pub fn k_pke_decrypt<const K: usize, const DU: usize, const DV: usize>(
    dk_pke: &[u8],
    c: &[u8],
) -> Result<[u8; 32]> {
    check_len(K * POLY_BYTES, dk_pke.len())?;
    check_len(32 * (DU * K + DV), c.len())?;
    Ok(decrypt::<K, DU, DV>(dk_pke, c))
}

/// Decryption on inputs whose lengths are already checked.
///
/// w = v' - NTT⁻¹(ŝᵀ ∘ NTT(u')), m = ByteEncode_1(Compress_1(w)).
pub(crate) fn decrypt<const K: usize, const DU: usize, const DV: usize>(
    dk_pke: &[u8],
    c: &[u8],
) -> [u8; 32] {
    let c1_len = K * 32 * DU;
    let u = PolyVec::<K>::decompress(&c[..c1_len], DU);
    let mut w = poly_decompress(&c[c1_len..], DV);

    let s_hat = NttPolyVec::<K>::decode(dk_pke);
    w -= &s_hat.dot(&u.ntt()).inv_ntt();

    poly_to_message(&w)
}
