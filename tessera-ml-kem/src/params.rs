//! ML-KEM parameter sets as defined in FIPS 203.

/// Common parameters for all ML-KEM variants.
pub mod common {
    /// Polynomial ring dimension (n).
    pub const N: usize = 256;

    /// Modulus (q).
    pub const Q: u16 = 3329;

    /// Primitive 256th root of unity modulo q.
    pub const ZETA: u16 = 17;

    /// 128^(-1) mod q, applied at the end of the inverse NTT.
    pub const INV_128: u16 = 3303;

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = 32;

    /// Seed size for key generation (d, z) and encapsulation (m).
    pub const SEED_SIZE: usize = 32;

    /// Size of one polynomial under `ByteEncode_12`.
    pub const POLY_BYTES: usize = 384;

    /// Encapsulation key size for module rank `k`.
    pub const fn encapsulation_key_size(k: usize) -> usize {
        POLY_BYTES * k + 32
    }

    /// Decapsulation key size for module rank `k`.
    pub const fn decapsulation_key_size(k: usize) -> usize {
        POLY_BYTES * k + encapsulation_key_size(k) + 32 + 32
    }

    /// Ciphertext size for module rank `k` and compression widths `du`, `dv`.
    pub const fn ciphertext_size(k: usize, du: usize, dv: usize) -> usize {
        32 * (du * k + dv)
    }
}

/// ML-KEM-512 parameters (NIST Security Level 1).
#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    use super::common;

    /// Module rank (k).
    pub const K: usize = 2;

    /// Compression parameter for u (du).
    pub const DU: usize = 10;

    /// Compression parameter for v (dv).
    pub const DV: usize = 4;

    /// Noise parameter (eta1).
    pub const ETA1: usize = 3;

    /// Noise parameter (eta2).
    pub const ETA2: usize = 2;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = common::encapsulation_key_size(K);

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = common::decapsulation_key_size(K);

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = common::ciphertext_size(K, DU, DV);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = common::SHARED_SECRET_SIZE;
}

/// ML-KEM-768 parameters (NIST Security Level 3).
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    use super::common;

    /// Module rank (k).
    pub const K: usize = 3;

    /// Compression parameter for u (du).
    pub const DU: usize = 10;

    /// Compression parameter for v (dv).
    pub const DV: usize = 4;

    /// Noise parameter (eta1).
    pub const ETA1: usize = 2;

    /// Noise parameter (eta2).
    pub const ETA2: usize = 2;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = common::encapsulation_key_size(K);

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = common::decapsulation_key_size(K);

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = common::ciphertext_size(K, DU, DV);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = common::SHARED_SECRET_SIZE;
}

/// ML-KEM-1024 parameters (NIST Security Level 5).
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    use super::common;

    /// Module rank (k).
    pub const K: usize = 4;

    /// Compression parameter for u (du).
    pub const DU: usize = 11;

    /// Compression parameter for v (dv).
    pub const DV: usize = 5;

    /// Noise parameter (eta1).
    pub const ETA1: usize = 2;

    /// Noise parameter (eta2).
    pub const ETA2: usize = 2;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = common::encapsulation_key_size(K);

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = common::decapsulation_key_size(K);

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = common::ciphertext_size(K, DU, DV);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = common::SHARED_SECRET_SIZE;
}
