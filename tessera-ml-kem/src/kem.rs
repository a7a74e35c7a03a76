//! ML-KEM Key Encapsulation Mechanism (FIPS 203 Algorithms 16-18).
//!
//! This module implements the deterministic ("internal") ML-KEM algorithms
//! with IND-CCA2 security. ML-KEM uses the Fujisaki-Okamoto transform with
//! implicit rejection to build a CCA-secure KEM from K-PKE.
//!
//! The typed, randomized API lives in the per-parameter-set modules; the
//! functions here take their seeds explicitly and are what known-answer
//! tests drive.

use alloc::vec::Vec;

use crate::encode::check_ek_modulus;
use crate::hash::{g_parts, h, j_parts};
use crate::k_pke::{decrypt, encrypt, k_pke_keygen};
use crate::log::{log_failure, log_rejection};
use crate::params::common::{
    ciphertext_size, decapsulation_key_size, encapsulation_key_size, POLY_BYTES, SEED_SIZE,
};
use rand_core::TryCryptoRng;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use tessera_core::{Error, Result};
use zeroize::{Zeroize, Zeroizing};

/// ML-KEM Key Generation (FIPS 203 Algorithm 16).
///
/// # Type Parameters
/// * `K` - Module rank (2, 3, or 4)
/// * `ETA1` - Noise parameter (2 or 3)
///
/// # Arguments
/// * `d` - 32-byte seed for K-PKE key generation
/// * `z` - 32-byte implicit rejection seed
///
/// # Returns
/// * `ek` - Encapsulation key (`ek_pke`)
/// * `dk` - Decapsulation key (`dk_pke ‖ ek ‖ H(ek) ‖ z`)
pub fn keygen_internal<const K: usize, const ETA1: usize>(
    d: &[u8; 32],
    z: &[u8; 32],
) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
    let (ek, dk_pke) = k_pke_keygen::<K, ETA1>(d);

    let mut dk = Zeroizing::new(Vec::with_capacity(decapsulation_key_size(K)));
    dk.extend_from_slice(&dk_pke);
    dk.extend_from_slice(&ek);
    dk.extend_from_slice(&h(&ek));
    dk.extend_from_slice(z);

    (ek, dk)
}

/// ML-KEM Encapsulation (FIPS 203 Algorithm 17).
///
/// # Returns
/// `(K, c)`: the 32-byte shared secret and the ciphertext.
///
/// # Errors
/// - [`Error::InvalidLength`] if `ek` is not K·384 + 32 bytes
/// - [`Error::InvalidKey`] if any 12-bit coefficient of `ek` is ≥ q
///   (FIPS 203 §7.2 modulus check)
///
/// # Algorithm
/// 1. (K, r) = G(m ‖ H(ek))
/// 2. c = K-PKE.Encrypt(ek, m, r)
pub fn encaps_internal<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    ek: &[u8],
    m: &[u8; 32],
) -> Result<(Zeroizing<[u8; 32]>, Vec<u8>)> {
    let expected = encapsulation_key_size(K);
    if ek.len() != expected {
        log_rejection!(expected, actual = ek.len(), "encapsulation key length");
        return Err(Error::InvalidLength {
            expected,
            actual: ek.len(),
        });
    }
    if !check_ek_modulus(ek) {
        log_rejection!("encapsulation key failed modulus check");
        return Err(Error::InvalidKey);
    }

    let (shared_secret, mut r) = g_parts(&[&m[..], &h(ek)]);
    let c = encrypt::<K, ETA1, ETA2, DU, DV>(ek, m, &r);
    r.zeroize();

    Ok((Zeroizing::new(shared_secret), c))
}

/// ML-KEM Decapsulation (FIPS 203 Algorithm 18).
///
/// A ciphertext that does not re-encrypt to itself yields the implicit
/// rejection key J(z ‖ c) instead of an error. The comparison and the
/// selection between the two keys run in constant time.
///
/// # Errors
/// - [`Error::InvalidLength`] if `dk` is not K·768 + 96 bytes
/// - [`Error::InvalidLength`] if `c` is not 32·(K·du + dv) bytes
///
/// # Algorithm
/// 1. Parse dk as (dk_pke ‖ ek ‖ h ‖ z)
/// 2. m' = K-PKE.Decrypt(dk_pke, c)
/// 3. (K', r') = G(m' ‖ h)
/// 4. K̄ = J(z ‖ c)
/// 5. c' = K-PKE.Encrypt(ek, m', r')
/// 6. return K' if c == c' else K̄
pub fn decaps_internal<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    dk: &[u8],
    c: &[u8],
) -> Result<Zeroizing<[u8; 32]>> {
    let expected = decapsulation_key_size(K);
    if dk.len() != expected {
        log_rejection!(expected, actual = dk.len(), "decapsulation key length");
        return Err(Error::InvalidLength {
            expected,
            actual: dk.len(),
        });
    }
    let expected = ciphertext_size(K, DU, DV);
    if c.len() != expected {
        log_rejection!(expected, actual = c.len(), "ciphertext length");
        return Err(Error::InvalidLength {
            expected,
            actual: c.len(),
        });
    }

    let (dk_pke, rest) = dk.split_at(K * POLY_BYTES);
    let (ek, rest) = rest.split_at(encapsulation_key_size(K));
    let (h_ek, z) = rest.split_at(32);

    let mut m_prime = decrypt::<K, DU, DV>(dk_pke, c);
    let (mut k_prime, mut r_prime) = g_parts(&[&m_prime[..], h_ek]);
    let mut k_bar = j_parts(&[z, c]);
    let c_prime = encrypt::<K, ETA1, ETA2, DU, DV>(ek, &m_prime, &r_prime);

    let matches = c.ct_eq(&c_prime[..]);
    let mut result = Zeroizing::new([0u8; 32]);
    for ((out, accept), reject) in result.iter_mut().zip(&k_prime).zip(&k_bar) {
        *out = u8::conditional_select(reject, accept, matches);
    }

    m_prime.zeroize();
    k_prime.zeroize();
    r_prime.zeroize();
    k_bar.zeroize();

    Ok(result)
}

/// FIPS 203 §7.3 hash check: the H(ek) stored in `dk` matches the stored ek.
///
/// Returns `false` for a `dk` of the wrong length.
pub fn check_dk_hash<const K: usize>(dk: &[u8]) -> bool {
    if dk.len() != decapsulation_key_size(K) {
        return false;
    }
    let ek_start = K * POLY_BYTES;
    let h_start = ek_start + encapsulation_key_size(K);
    let ek = &dk[ek_start..h_start];
    let stored = &dk[h_start..h_start + 32];
    h(ek)[..].ct_eq(stored).into()
}

/// Draw a fresh 32-byte seed from `rng`.
///
/// # Errors
/// [`Error::RandomnessFailure`] if the random source reports an error.
pub(crate) fn random_seed(rng: &mut impl TryCryptoRng) -> Result<Zeroizing<[u8; SEED_SIZE]>> {
    let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
    rng.try_fill_bytes(&mut seed[..]).map_err(|_| {
        log_failure!("random source failed to supply a seed");
        Error::RandomnessFailure
    })?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::j;
    use alloc::vec;
    use core::convert::Infallible;
    use rand_core::TryRngCore;

    // ML-KEM-512 parameters
    const K512: usize = 2;
    const ETA1_512: usize = 3;
    const ETA2_512: usize = 2;
    const DU_512: usize = 10;
    const DV_512: usize = 4;

    // ML-KEM-768 parameters
    const K768: usize = 3;
    const ETA1_768: usize = 2;
    const ETA2_768: usize = 2;
    const DU_768: usize = 10;
    const DV_768: usize = 4;

    // ML-KEM-1024 parameters
    const K1024: usize = 4;
    const ETA1_1024: usize = 2;
    const ETA2_1024: usize = 2;
    const DU_1024: usize = 11;
    const DV_1024: usize = 5;

    fn seeds() -> ([u8; 32], [u8; 32], [u8; 32]) {
        (
            core::array::from_fn(|i| i as u8),
            core::array::from_fn(|i| 32 + i as u8),
            core::array::from_fn(|i| 64 + i as u8),
        )
    }

    #[test]
    fn test_keygen_deterministic() {
        let (d, z, _) = seeds();
        let (ek1, dk1) = keygen_internal::<K768, ETA1_768>(&d, &z);
        let (ek2, dk2) = keygen_internal::<K768, ETA1_768>(&d, &z);
        assert_eq!(ek1, ek2);
        assert_eq!(dk1, dk2);
    }

    #[test]
    fn test_key_sizes() {
        let (d, z, _) = seeds();
        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        assert_eq!((ek.len(), dk.len()), (800, 1632));
        let (ek, dk) = keygen_internal::<K768, ETA1_768>(&d, &z);
        assert_eq!((ek.len(), dk.len()), (1184, 2400));
        let (ek, dk) = keygen_internal::<K1024, ETA1_1024>(&d, &z);
        assert_eq!((ek.len(), dk.len()), (1568, 3168));
    }

    #[test]
    fn test_dk_layout() {
        let (d, z, _) = seeds();
        let (ek, dk) = keygen_internal::<K768, ETA1_768>(&d, &z);
        assert_eq!(&dk[1152..2336], &ek[..]);
        assert_eq!(&dk[2336..2368], &h(&ek)[..]);
        assert_eq!(&dk[2368..], &z[..]);
        assert!(check_dk_hash::<K768>(&dk));
    }

    #[test]
    fn test_known_answer_512() {
        let (d, z, m) = seeds();
        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        assert_eq!(
            hex::encode(h(&ek)),
            "82f101ff648063b376e2bb6c5b7455f655a50c2feadade150efa0e0e6f365aea"
        );
        assert_eq!(
            hex::encode(h(&dk)),
            "0bd3f5df01098ac9c29d687c7f1bd0588a5573feeef8f1e3b4573fa7f6ab57c8"
        );

        let (ss, c) = encaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&ek, &m).unwrap();
        assert_eq!(
            hex::encode(h(&c)),
            "e3fdddb90255869185c07cdf1c1880b2efe08b6f04da4997b693c0dea61503bd"
        );
        assert_eq!(
            hex::encode(*ss),
            "14cace3e48771b316676afad2cfcfe8488daaa4fad954e57236caa3f24a42cf7"
        );

        let ss2 = decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &c).unwrap();
        assert_eq!(ss, ss2);
    }

    #[test]
    fn test_known_answer_implicit_rejection_512() {
        let (d, z, m) = seeds();
        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        let (_, mut c) =
            encaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&ek, &m).unwrap();
        c[0] ^= 1;
        let ss = decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &c).unwrap();
        assert_eq!(
            hex::encode(*ss),
            "32ee1fb3f7bd2915218e9c1b2d0d2da88f0edce6804278bab3a6123c5bb64fc4"
        );
    }

    #[test]
    fn test_roundtrip_all_sets() {
        let (d, z, m) = seeds();

        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        let (ss, c) = encaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&ek, &m).unwrap();
        assert_eq!(c.len(), 768);
        let ss2 = decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &c).unwrap();
        assert_eq!(ss, ss2);

        let (ek, dk) = keygen_internal::<K768, ETA1_768>(&d, &z);
        let (ss, c) = encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &m).unwrap();
        assert_eq!(c.len(), 1088);
        let ss2 = decaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&dk, &c).unwrap();
        assert_eq!(ss, ss2);

        let (ek, dk) = keygen_internal::<K1024, ETA1_1024>(&d, &z);
        let (ss, c) =
            encaps_internal::<K1024, ETA1_1024, ETA2_1024, DU_1024, DV_1024>(&ek, &m).unwrap();
        assert_eq!(c.len(), 1568);
        let ss2 =
            decaps_internal::<K1024, ETA1_1024, ETA2_1024, DU_1024, DV_1024>(&dk, &c).unwrap();
        assert_eq!(ss, ss2);
    }

    #[test]
    fn test_implicit_rejection_is_j_of_z_and_c() {
        let (d, z, m) = seeds();
        let (ek, dk) = keygen_internal::<K768, ETA1_768>(&d, &z);
        let (ss, mut c) =
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &m).unwrap();

        let last = c.len() - 1;
        c[last] ^= 0x80;
        let rejected = decaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&dk, &c).unwrap();
        assert_ne!(ss, rejected);

        let mut zc = z.to_vec();
        zc.extend_from_slice(&c);
        assert_eq!(*rejected, j(&zc));

        // Deterministic on repeat.
        let again = decaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&dk, &c).unwrap();
        assert_eq!(rejected, again);
    }

    #[test]
    fn test_every_corruption_mask_is_rejected() {
        // The mask is forced odd so no byte value leaves the ciphertext intact.
        let (d, z, m) = seeds();
        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        let (ss, c) = encaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&ek, &m).unwrap();

        for corrupt in [0x00u8, 0x01, 0x7F, 0xFE, 0xFF] {
            let mut bad = c.clone();
            let idx = usize::from(corrupt) % bad.len();
            bad[idx] ^= corrupt | 1;
            assert_ne!(bad, c);

            let rejected =
                decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &bad).unwrap();
            assert_ne!(ss, rejected, "corrupt = {:#04x}", corrupt);

            let mut zc = z.to_vec();
            zc.extend_from_slice(&bad);
            assert_eq!(*rejected, j(&zc), "corrupt = {:#04x}", corrupt);
        }
    }

    #[test]
    fn test_secret_buffers_zeroize_without_std() {
        // Heap-backed secrets rely on zeroize's `alloc` feature, not `std`.
        fn assert_zeroize<T: Zeroize>() {}
        assert_zeroize::<Vec<u8>>();

        let (_, mut dk) = keygen_internal::<K512, ETA1_512>(&[1u8; 32], &[2u8; 32]);
        assert!(dk.iter().any(|&b| b != 0));
        dk.zeroize();
        assert!(dk.is_empty());
    }

    #[test]
    fn test_different_messages() {
        let (d, z, _) = seeds();
        let (ek, dk) = keygen_internal::<K768, ETA1_768>(&d, &z);

        let (ss1, c1) =
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &[0x00; 32]).unwrap();
        let (ss2, c2) =
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &[0xFF; 32]).unwrap();
        assert_ne!(c1, c2);
        assert_ne!(ss1, ss2);

        assert_eq!(
            decaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&dk, &c1).unwrap(),
            ss1
        );
        assert_eq!(
            decaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&dk, &c2).unwrap(),
            ss2
        );
    }

    #[test]
    fn test_encaps_invalid_ek_length() {
        let (_, _, m) = seeds();
        for len in [0usize, 100, 1183, 1185, 2000] {
            let ek = vec![0u8; len];
            assert_eq!(
                encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &m),
                Err(Error::InvalidLength {
                    expected: 1184,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn test_encaps_rejects_unreduced_coefficient() {
        let (d, z, m) = seeds();
        let (ek, _) = keygen_internal::<K768, ETA1_768>(&d, &z);

        // c0 = b0 | ((b1 & 0x0F) << 8); set c0 = 3329 = 0xD01.
        let mut bad = ek.clone();
        bad[0] = 0x01;
        bad[1] = (bad[1] & 0xF0) | 0x0D;
        assert_eq!(
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&bad, &m),
            Err(Error::InvalidKey)
        );

        // c0 = 0xFFF in the last polynomial.
        let mut bad = ek;
        let off = 2 * 384 + 381;
        bad[off] = 0xFF;
        bad[off + 1] |= 0x0F;
        assert_eq!(
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&bad, &m),
            Err(Error::InvalidKey)
        );
    }

    #[test]
    fn test_encaps_accepts_max_coefficient() {
        // All coefficients q-1 = 0xD00: bytes 00 0D D0.
        let mut ek = vec![0xAAu8; 1184];
        for chunk in ek[..1152].chunks_exact_mut(3) {
            chunk.copy_from_slice(&[0x00, 0x0D, 0xD0]);
        }
        assert!(
            encaps_internal::<K768, ETA1_768, ETA2_768, DU_768, DV_768>(&ek, &[0x55; 32]).is_ok()
        );
    }

    #[test]
    fn test_decaps_invalid_lengths() {
        let (d, z, m) = seeds();
        let (ek, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        let (_, c) = encaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&ek, &m).unwrap();

        assert_eq!(
            decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk[..1631], &c),
            Err(Error::InvalidLength {
                expected: 1632,
                actual: 1631
            })
        );
        assert_eq!(
            decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &c[..767]),
            Err(Error::InvalidLength {
                expected: 768,
                actual: 767
            })
        );
        // The dk length is checked first.
        assert_eq!(
            decaps_internal::<K1024, ETA1_1024, ETA2_1024, DU_1024, DV_1024>(&[], &[]),
            Err(Error::InvalidLength {
                expected: 3168,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decaps_zero_key_does_not_error() {
        // Content is never validated by decapsulation itself.
        let dk = vec![0u8; 1632];
        let c = vec![0u8; 768];
        assert!(decaps_internal::<K512, ETA1_512, ETA2_512, DU_512, DV_512>(&dk, &c).is_ok());
        assert!(!check_dk_hash::<K512>(&dk));
    }

    #[test]
    fn test_check_dk_hash_detects_tampering() {
        let (d, z, _) = seeds();
        let (_, dk) = keygen_internal::<K512, ETA1_512>(&d, &z);
        assert!(check_dk_hash::<K512>(&dk));

        let mut tampered = dk.to_vec();
        tampered[768 + 5] ^= 1;
        assert!(!check_dk_hash::<K512>(&tampered));
        assert!(!check_dk_hash::<K512>(&dk[..100]));
    }

    struct FixedRng;

    impl TryRngCore for FixedRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> core::result::Result<u32, Self::Error> {
            Ok(0)
        }

        fn try_next_u64(&mut self) -> core::result::Result<u64, Self::Error> {
            Ok(0)
        }

        fn try_fill_bytes(&mut self, dst: &mut [u8]) -> core::result::Result<(), Self::Error> {
            dst.fill(0x11);
            Ok(())
        }
    }

    impl TryCryptoRng for FixedRng {}

    #[test]
    fn test_random_seed_fills_from_rng() {
        let seed = random_seed(&mut FixedRng).unwrap();
        assert_eq!(*seed, [0x11u8; 32]);
    }
}
