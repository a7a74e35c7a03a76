//! SHA-3 and SHAKE (FIPS 202) on the crate's own Keccak sponge.
//!
//! Fixed-output hashes compute their digest once and return the cached
//! value on every later call. XOFs can be read from indefinitely.
//! In both cases writing input after the first output is an error.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::keccak::{Domain, Sponge};
use tessera_core::Result;
use zeroize::Zeroize;

macro_rules! define_fixed_hash {
    ($(#[$meta:meta])* $name:ident, rate: $rate:expr, output: $out:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            sponge: Sponge,
            digest: Option<[u8; $out]>,
        }

        impl $name {
            /// Digest size in bytes.
            pub const OUTPUT_SIZE: usize = $out;

            /// Sponge rate in bytes.
            pub const RATE: usize = $rate;

            /// Create an empty hasher.
            pub const fn new() -> Self {
                Self {
                    sponge: Sponge::new($rate, Domain::Hash),
                    digest: None,
                }
            }

            /// Absorb more input.
            ///
            /// # Errors
            /// [`Error::AbsorbAfterSqueeze`](tessera_core::Error::AbsorbAfterSqueeze)
            /// after [`digest`](Self::digest) has been called.
            pub fn update(&mut self, data: &[u8]) -> Result<()> {
                self.sponge.absorb(data)
            }

            /// Return the digest, computing it on first use.
            pub fn digest(&mut self) -> [u8; $out] {
                if let Some(digest) = self.digest {
                    return digest;
                }
                let mut out = [0u8; $out];
                self.sponge.squeeze(&mut out);
                self.digest = Some(out);
                out
            }

            /// Lowercase hex form of [`digest`](Self::digest).
            pub fn hex_digest(&mut self) -> String {
                hex::encode(self.digest())
            }

            /// One-shot digest of `data`.
            pub fn digest_of(data: &[u8]) -> [u8; $out] {
                Self::digest_of_parts(&[data])
            }

            /// One-shot digest of the concatenation of `parts`.
            pub fn digest_of_parts(parts: &[&[u8]]) -> [u8; $out] {
                let mut sponge = Sponge::with_inputs($rate, Domain::Hash, parts);
                let mut out = [0u8; $out];
                sponge.squeeze(&mut out);
                out
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.digest.zeroize();
            }
        }
    };
}

macro_rules! define_xof {
    ($(#[$meta:meta])* $name:ident, rate: $rate:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            sponge: Sponge,
        }

        impl $name {
            /// Sponge rate in bytes.
            pub const RATE: usize = $rate;

            /// Create an empty XOF.
            pub const fn new() -> Self {
                Self {
                    sponge: Sponge::new($rate, Domain::Xof),
                }
            }

            /// Create an XOF that has absorbed `data`.
            pub fn with_input(data: &[u8]) -> Self {
                Self::with_inputs(&[data])
            }

            /// Create an XOF that has absorbed the concatenation of `parts`.
            pub fn with_inputs(parts: &[&[u8]]) -> Self {
                Self {
                    sponge: Sponge::with_inputs($rate, Domain::Xof, parts),
                }
            }

            /// Absorb more input.
            ///
            /// # Errors
            /// [`Error::AbsorbAfterSqueeze`](tessera_core::Error::AbsorbAfterSqueeze)
            /// once any output has been read.
            pub fn update(&mut self, data: &[u8]) -> Result<()> {
                self.sponge.absorb(data)
            }

            /// Fill `out` with the next bytes of output.
            pub fn read(&mut self, out: &mut [u8]) {
                self.sponge.squeeze(out);
            }

            /// Return the next `len` bytes of output.
            pub fn read_vec(&mut self, len: usize) -> Vec<u8> {
                let mut out = vec![0u8; len];
                self.read(&mut out);
                out
            }

            /// Whether output has been read, after which input is rejected.
            pub fn is_squeezing(&self) -> bool {
                self.sponge.is_squeezing()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_fixed_hash!(
    /// SHA3-224 hasher.
    Sha3_224, rate: 144, output: 28
);
define_fixed_hash!(
    /// SHA3-256 hasher (H in ML-KEM).
    Sha3_256, rate: 136, output: 32
);
define_fixed_hash!(
    /// SHA3-384 hasher.
    Sha3_384, rate: 104, output: 48
);
define_fixed_hash!(
    /// SHA3-512 hasher (G in ML-KEM).
    Sha3_512, rate: 72, output: 64
);

define_xof!(
    /// SHAKE128 extendable-output function (matrix sampling in ML-KEM).
    Shake128, rate: 168
);
define_xof!(
    /// SHAKE256 extendable-output function (PRF and J in ML-KEM).
    Shake256, rate: 136
);
