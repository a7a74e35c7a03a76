//! Key type wrapper macros for ML-KEM.
//!
//! This module provides a macro to generate the key type wrappers
//! (DecapsulationKey, EncapsulationKey, Ciphertext, SharedSecret)
//! for each ML-KEM parameter set.

/// Generate ML-KEM key types for a specific parameter set.
///
/// Creates DecapsulationKey, EncapsulationKey, Ciphertext, and SharedSecret
/// types with the appropriate sizes and implementations. `k` is the module
/// rank used by the FIPS 203 §7 input checks.
macro_rules! define_kem_types {
    (
        k: $k:expr,
        dk_size: $dk_size:expr,
        ek_size: $ek_size:expr,
        ct_size: $ct_size:expr,
        ss_size: $ss_size:expr
    ) => {
        /// Decapsulation key (secret key): `dk_pke ‖ ek ‖ H(ek) ‖ z`.
        #[derive(Clone, ::zeroize::Zeroize, ::zeroize::ZeroizeOnDrop)]
        pub struct DecapsulationKey {
            bytes: [u8; $dk_size],
        }

        impl DecapsulationKey {
            /// Create a decapsulation key from bytes.
            ///
            /// Only the length is checked; use [`Self::validate`] for the
            /// FIPS 203 hash check.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != $dk_size {
                    return Err($crate::Error::InvalidLength {
                        expected: $dk_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $dk_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// FIPS 203 §7.3 decapsulation key check.
            ///
            /// # Errors
            /// [`Error::InvalidKey`]($crate::Error::InvalidKey) if the
            /// embedded H(ek) does not match the embedded ek.
            pub fn validate(&self) -> $crate::Result<()> {
                if $crate::kem::check_dk_hash::<{ $k }>(&self.bytes) {
                    Ok(())
                } else {
                    Err($crate::Error::InvalidKey)
                }
            }

            /// The encapsulation key embedded in this decapsulation key.
            pub fn encapsulation_key(&self) -> EncapsulationKey {
                let start = $k * $crate::params::common::POLY_BYTES;
                let mut ek = EncapsulationKey {
                    bytes: [0u8; $ek_size],
                };
                ek.bytes.copy_from_slice(&self.bytes[start..start + $ek_size]);
                ek
            }
        }

        impl ::core::fmt::Debug for DecapsulationKey {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct("DecapsulationKey").finish_non_exhaustive()
            }
        }

        /// Encapsulation key (public key): `ByteEncode_12(t̂) ‖ ρ`.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct EncapsulationKey {
            bytes: [u8; $ek_size],
        }

        impl EncapsulationKey {
            /// Create an encapsulation key from bytes.
            ///
            /// Only the length is checked; the modulus check runs in
            /// [`Self::validate`] and on every encapsulation.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != $ek_size {
                    return Err($crate::Error::InvalidLength {
                        expected: $ek_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $ek_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// FIPS 203 §7.2 encapsulation key check.
            ///
            /// # Errors
            /// [`Error::InvalidKey`]($crate::Error::InvalidKey) if any
            /// encoded coefficient is not reduced mod q.
            pub fn validate(&self) -> $crate::Result<()> {
                if $crate::encode::check_ek_modulus(&self.bytes) {
                    Ok(())
                } else {
                    Err($crate::Error::InvalidKey)
                }
            }
        }

        /// Ciphertext.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct Ciphertext {
            bytes: [u8; $ct_size],
        }

        impl Ciphertext {
            /// Create a ciphertext from bytes.
            pub fn from_bytes(bytes: &[u8]) -> $crate::Result<Self> {
                if bytes.len() != $ct_size {
                    return Err($crate::Error::InvalidLength {
                        expected: $ct_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $ct_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the ciphertext as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Shared secret.
        ///
        /// Equality is constant time.
        #[derive(Clone, ::zeroize::Zeroize, ::zeroize::ZeroizeOnDrop)]
        pub struct SharedSecret {
            bytes: [u8; $ss_size],
        }

        impl AsRef<[u8]> for SharedSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        impl ::subtle::ConstantTimeEq for SharedSecret {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                ::subtle::ConstantTimeEq::ct_eq(&self.bytes[..], &other.bytes[..])
            }
        }

        impl PartialEq for SharedSecret {
            fn eq(&self, other: &Self) -> bool {
                ::subtle::ConstantTimeEq::ct_eq(self, other).into()
            }
        }

        impl Eq for SharedSecret {}

        impl ::core::fmt::Debug for SharedSecret {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct("SharedSecret").finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use define_kem_types;
