//! # Tessera
//!
//! Post-quantum key encapsulation per NIST FIPS 203, built from first
//! principles: Keccak, NTT arithmetic and samplers included.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `ml-kem` (default): Enable ML-KEM (FIPS 203) key encapsulation
//! - `tracing`: Emit `tracing` events for rejected inputs and RNG failures
//!
//! ## Supported Algorithms
//!
//! - **ML-KEM** (FIPS 203): Module-Lattice-Based Key Encapsulation Mechanism
//!   - ML-KEM-512
//!   - ML-KEM-768
//!   - ML-KEM-1024
//!
//! ## Example
//!
//! ```ignore
//! use tessera::ml_kem::{MlKem768, Kem};
//!
//! let mut rng = rand::rng();
//!
//! // Generate a key pair
//! let (ek, dk) = MlKem768::keygen(&mut rng)?;
//!
//! // Encapsulate a shared secret
//! let (ss_sender, ct) = MlKem768::encaps(&ek, &mut rng)?;
//!
//! // Decapsulate the shared secret
//! let ss_receiver = MlKem768::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender, ss_receiver);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use tessera_core::{Error, Result};

/// Core traits for cryptographic primitives.
pub mod traits {
    pub use tessera_core::Kem;
}

/// ML-KEM (FIPS 203) key encapsulation mechanism.
#[cfg(feature = "ml-kem")]
pub mod ml_kem {
    pub use tessera_ml_kem::*;
}
