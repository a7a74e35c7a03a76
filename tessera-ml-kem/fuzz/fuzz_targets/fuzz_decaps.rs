//! Fuzz target for ML-KEM decapsulation.
//!
//! This fuzzer tests that Decaps:
//! 1. Recovers the shared secret from a valid ciphertext
//! 2. Answers a corrupted ciphertext with J(z ‖ c) instead of an error
//! 3. Produces consistent output (deterministic)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tessera_ml_kem::hash::j_parts;
use tessera_ml_kem::kem::{decaps_internal, encaps_internal, keygen_internal};

#[derive(Debug, Arbitrary)]
struct DecapsInput {
    d: [u8; 32],
    z: [u8; 32],
    m: [u8; 32],
    corrupt_byte: u8,
    corrupt_index: usize,
    variant: u8,
}

macro_rules! check_decaps {
    ($input:expr, $k:literal, $eta1:literal, $du:literal, $dv:literal) => {{
        let (ek, dk) = keygen_internal::<$k, $eta1>(&$input.d, &$input.z);
        let (ss_sender, mut ct) =
            encaps_internal::<$k, $eta1, 2, $du, $dv>(&ek, &$input.m).expect("fresh ek is valid");

        let ss_receiver = decaps_internal::<$k, $eta1, 2, $du, $dv>(&dk, &ct).unwrap();
        assert_eq!(ss_sender, ss_receiver, "Valid decaps should recover shared secret");

        let idx = $input.corrupt_index % ct.len();
        ct[idx] ^= $input.corrupt_byte | 1;
        let ss_bad = decaps_internal::<$k, $eta1, 2, $du, $dv>(&dk, &ct).unwrap();
        let ss_bad2 = decaps_internal::<$k, $eta1, 2, $du, $dv>(&dk, &ct).unwrap();
        assert_eq!(ss_bad, ss_bad2, "Implicit rejection should be deterministic");
        assert_eq!(*ss_bad, j_parts(&[&$input.z[..], &ct]));
    }};
}

fuzz_target!(|input: DecapsInput| {
    match input.variant % 3 {
        0 => check_decaps!(input, 2, 3, 10, 4),
        1 => check_decaps!(input, 3, 2, 10, 4),
        _ => check_decaps!(input, 4, 2, 11, 5),
    }
});
