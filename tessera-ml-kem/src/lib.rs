//! # ML-KEM (FIPS 203)
//!
//! Implementation of the Module-Lattice-Based Key Encapsulation Mechanism
//! as specified in [FIPS 203](https://csrc.nist.gov/pubs/fips/203/final),
//! built from primitive operations: its own Keccak sponge, NTT arithmetic,
//! samplers and byte codec.
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Security Level | Public Key | Ciphertext | Shared Secret |
//! |---------------|----------------|------------|------------|---------------|
//! | ML-KEM-512    | 1 (128-bit)    | 800 bytes  | 768 bytes  | 32 bytes      |
//! | ML-KEM-768    | 3 (192-bit)    | 1184 bytes | 1088 bytes | 32 bytes      |
//! | ML-KEM-1024   | 5 (256-bit)    | 1568 bytes | 1568 bytes | 32 bytes      |
//!
//! ## Layers
//!
//! - [`sha3`]: SHA3-224/256/384/512 and SHAKE128/256 on a Keccak-p\[1600, 24\] sponge
//! - [`hash`]: the PRF, H, J, G and XOF functions of FIPS 203
//! - [`encode`]: bit packing, compression and `ByteEncode`/`ByteDecode`
//! - [`ntt`]: forward/inverse NTT and `MultiplyNTTs`
//! - [`sample`]: `SampleNTT` and `SamplePolyCBD`
//! - [`k_pke`]: the IND-CPA encryption scheme
//! - [`kem`]: the deterministic ML-KEM algorithms with implicit rejection
//! - [`MlKem512`], [`MlKem768`], [`MlKem1024`]: typed, randomized API
//!
//! ## Example
//!
//! ```ignore
//! use tessera_ml_kem::{MlKem768, Kem};
//!
//! let mut rng = rand::rng();
//! let (ek, dk) = MlKem768::keygen(&mut rng)?;
//! let (ss_sender, ct) = MlKem768::encaps(&ek, &mut rng)?;
//! let ss_receiver = MlKem768::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

mod keccak;
mod log;
mod matrix;
mod polyvec;
mod reduce;
#[allow(unused_macros, unused_imports)]
mod types;

pub mod encode;
pub mod hash;
pub mod k_pke;
pub mod kat;
pub mod kem;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod sample;
pub mod sha3;

#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512;
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768;
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024;

pub use tessera_core::{Error, Kem, Result};

#[cfg(feature = "ml-kem-512")]
pub use ml_kem_512::MlKem512;
#[cfg(feature = "ml-kem-768")]
pub use ml_kem_768::MlKem768;
#[cfg(feature = "ml-kem-1024")]
pub use ml_kem_1024::MlKem1024;
