//! ML-KEM-512 implementation (NIST Security Level 1).

use crate::kem::{decaps_internal, encaps_internal, keygen_internal, random_seed};
use crate::params::ml_kem_512::*;
use crate::types::define_kem_types;
use rand_core::TryCryptoRng;
use tessera_core::{Kem, Result};

define_kem_types! {
    k: K,
    dk_size: DECAPSULATION_KEY_SIZE,
    ek_size: ENCAPSULATION_KEY_SIZE,
    ct_size: CIPHERTEXT_SIZE,
    ss_size: SHARED_SECRET_SIZE
}

/// ML-KEM-512 key encapsulation mechanism.
///
/// Provides NIST Security Level 1 (128-bit classical security).
#[derive(Debug, Clone, Copy)]
pub struct MlKem512;

impl MlKem512 {
    /// Deterministic key generation from the seeds `d` and `z`.
    ///
    /// This is `ML-KEM.KeyGen_internal`; callers must supply fresh random
    /// seeds for real keys.
    pub fn keygen_derand(d: &[u8; 32], z: &[u8; 32]) -> (EncapsulationKey, DecapsulationKey) {
        let (ek_bytes, dk_bytes) = keygen_internal::<K, ETA1>(d, z);
        let mut ek = EncapsulationKey {
            bytes: [0u8; ENCAPSULATION_KEY_SIZE],
        };
        ek.bytes.copy_from_slice(&ek_bytes);
        let mut dk = DecapsulationKey {
            bytes: [0u8; DECAPSULATION_KEY_SIZE],
        };
        dk.bytes.copy_from_slice(&dk_bytes);
        (ek, dk)
    }

    /// Deterministic encapsulation with the message seed `m`.
    ///
    /// # Errors
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if `ek` fails the
    /// modulus check.
    pub fn encaps_derand(
        ek: &EncapsulationKey,
        m: &[u8; 32],
    ) -> Result<(SharedSecret, Ciphertext)> {
        let (key, c) = encaps_internal::<K, ETA1, ETA2, DU, DV>(&ek.bytes, m)?;
        let ss = SharedSecret { bytes: *key };
        let mut ct = Ciphertext {
            bytes: [0u8; CIPHERTEXT_SIZE],
        };
        ct.bytes.copy_from_slice(&c);
        Ok((ss, ct))
    }
}

impl Kem for MlKem512 {
    type DecapsulationKey = DecapsulationKey;
    type EncapsulationKey = EncapsulationKey;
    type Ciphertext = Ciphertext;
    type SharedSecret = SharedSecret;

    const DECAPSULATION_KEY_SIZE: usize = DECAPSULATION_KEY_SIZE;
    const ENCAPSULATION_KEY_SIZE: usize = ENCAPSULATION_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

    fn keygen(
        rng: &mut impl TryCryptoRng,
    ) -> Result<(Self::EncapsulationKey, Self::DecapsulationKey)> {
        let d = random_seed(rng)?;
        let z = random_seed(rng)?;
        Ok(Self::keygen_derand(&d, &z))
    }

    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl TryCryptoRng,
    ) -> Result<(Self::SharedSecret, Self::Ciphertext)> {
        let m = random_seed(rng)?;
        Self::encaps_derand(ek, &m)
    }

    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret> {
        let key = decaps_internal::<K, ETA1, ETA2, DU, DV>(&dk.bytes, &ct.bytes)?;
        Ok(SharedSecret { bytes: *key })
    }
}
