//! Fuzz target for ML-KEM key generation.
//!
//! This fuzzer tests that KeyGen:
//! 1. Produces keys of the published sizes from any seeds
//! 2. Produces keys that pass both FIPS 203 input checks
//! 3. Produces consistent output (deterministic)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tessera_ml_kem::encode::check_ek_modulus;
use tessera_ml_kem::kem::{check_dk_hash, keygen_internal};

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    d: [u8; 32],
    z: [u8; 32],
    variant: u8, // 0 = ML-KEM-512, 1 = ML-KEM-768, 2 = ML-KEM-1024
}

macro_rules! check_keygen {
    ($input:expr, $k:literal, $eta1:literal, $ek_len:literal, $dk_len:literal) => {{
        let (ek, dk) = keygen_internal::<$k, $eta1>(&$input.d, &$input.z);
        let (ek2, dk2) = keygen_internal::<$k, $eta1>(&$input.d, &$input.z);
        assert_eq!(ek, ek2, "KeyGen should be deterministic");
        assert_eq!(dk, dk2, "KeyGen should be deterministic");
        assert_eq!(ek.len(), $ek_len);
        assert_eq!(dk.len(), $dk_len);
        assert!(check_ek_modulus(&ek), "fresh ek must pass the modulus check");
        assert!(check_dk_hash::<$k>(&dk), "fresh dk must pass the hash check");
        assert_eq!(&dk[dk.len() - 32..], &$input.z[..], "dk should end with z");
    }};
}

fuzz_target!(|input: KeyGenInput| {
    match input.variant % 3 {
        0 => check_keygen!(input, 2, 3, 800, 1632),
        1 => check_keygen!(input, 3, 2, 1184, 2400),
        _ => check_keygen!(input, 4, 2, 1568, 3168),
    }
});
