//! Error types for Tessera cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
///
/// A ciphertext that fails re-encryption during decapsulation is never
/// reported here. It is absorbed by implicit rejection instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A fixed-size byte input (key, ciphertext, seed, message or encoded
    /// polynomial) has the wrong length.
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A small-domain parameter (eta, bit width d) is out of range.
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Value that was rejected.
        value: usize,
    },

    /// The random source could not supply bytes.
    RandomnessFailure,

    /// A key failed the FIPS 203 input checks (modulus or hash check).
    InvalidKey,

    /// Data was written into a sponge after output had been read from it.
    AbsorbAfterSqueeze,

    /// A known-answer fixture could not be parsed.
    InvalidKatFixture {
        /// 1-based line number of the offending line.
        line: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
            Error::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}: {value}")
            }
            Error::RandomnessFailure => write!(f, "random source failed to supply bytes"),
            Error::InvalidKey => write!(f, "key failed input validation"),
            Error::AbsorbAfterSqueeze => write!(f, "sponge already switched to squeezing"),
            Error::InvalidKatFixture { line } => {
                write!(f, "malformed known-answer fixture at line {line}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
