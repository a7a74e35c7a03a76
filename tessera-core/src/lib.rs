//! # Tessera Core
//!
//! Core traits and utilities for the Tessera post-quantum KEM workspace.
//!
//! This crate provides:
//! - The shared error taxonomy
//! - The [`Kem`] trait implemented by every parameter set
//! - Re-exports of the secret-hygiene crates used across the workspace

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Kem;

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;

/// Re-export rand_core so implementors name the same RNG traits.
pub use rand_core;
