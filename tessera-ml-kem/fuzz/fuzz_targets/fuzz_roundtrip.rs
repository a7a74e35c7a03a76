//! Fuzz target for the typed ML-KEM API (keygen -> encaps -> decaps).
//!
//! Drives the `*_derand` entry points and the byte (de)serialization of
//! every key and ciphertext type.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tessera_ml_kem::{ml_kem_1024, ml_kem_512, ml_kem_768, Kem};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    d: [u8; 32],
    z: [u8; 32],
    m: [u8; 32],
    variant: u8,
}

macro_rules! check_roundtrip {
    ($input:expr, $module:ident, $variant:ident) => {{
        use $module::{Ciphertext, DecapsulationKey, EncapsulationKey, $variant};

        let (ek, dk) = $variant::keygen_derand(&$input.d, &$input.z);
        let ek = EncapsulationKey::from_bytes(ek.as_bytes()).unwrap();
        let dk = DecapsulationKey::from_bytes(dk.as_bytes()).unwrap();
        assert!(ek.validate().is_ok());
        assert!(dk.validate().is_ok());

        let (ss_sender, ct) = $variant::encaps_derand(&ek, &$input.m).unwrap();
        let ct = Ciphertext::from_bytes(ct.as_bytes()).unwrap();
        let ss_receiver = $variant::decaps(&dk, &ct).unwrap();
        assert_eq!(ss_sender, ss_receiver);
    }};
}

fuzz_target!(|input: RoundtripInput| {
    match input.variant % 3 {
        0 => check_roundtrip!(input, ml_kem_512, MlKem512),
        1 => check_roundtrip!(input, ml_kem_768, MlKem768),
        _ => check_roundtrip!(input, ml_kem_1024, MlKem1024),
    }
});
