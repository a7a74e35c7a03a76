//! Cryptographic primitive traits.

use crate::Result;
use rand_core::TryCryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key Encapsulation Mechanism (KEM) trait.
///
/// This trait defines the interface for key encapsulation mechanisms
/// as specified in NIST post-quantum cryptography standards.
///
/// The random source is fallible: any error it reports is surfaced as
/// [`Error::RandomnessFailure`](crate::Error::RandomnessFailure) and the
/// operation produces no output.
///
/// # Example
///
/// ```ignore
/// use tessera_core::Kem;
///
/// let (ek, dk) = MyKem::keygen(&mut rng)?;
/// let (ss_sender, ct) = MyKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = MyKem::decaps(&dk, &ct)?;
/// ```
pub trait Kem {
    /// Decapsulation key (private key).
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Encapsulation key (public key).
    type EncapsulationKey: Clone;

    /// Ciphertext produced by encapsulation.
    type Ciphertext: Clone;

    /// Shared secret produced by encapsulation/decapsulation.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the decapsulation key in bytes.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Size of the encapsulation key in bytes.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (encapsulation_key, decapsulation_key).
    fn keygen(
        rng: &mut impl TryCryptoRng,
    ) -> Result<(Self::EncapsulationKey, Self::DecapsulationKey)>;

    /// Encapsulate a shared secret using the encapsulation key.
    ///
    /// # Arguments
    ///
    /// * `ek` - The encapsulation (public) key.
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (shared_secret, ciphertext).
    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl TryCryptoRng,
    ) -> Result<(Self::SharedSecret, Self::Ciphertext)>;

    /// Decapsulate a shared secret using the decapsulation key.
    ///
    /// # Security
    ///
    /// Implementations MUST use implicit rejection to prevent
    /// chosen-ciphertext attacks. Invalid ciphertexts produce a
    /// pseudorandom shared secret derived from the private key and
    /// ciphertext, never an error.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}
