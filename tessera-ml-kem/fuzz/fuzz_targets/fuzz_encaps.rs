//! Fuzz target for ML-KEM encapsulation on arbitrary keys.
//!
//! Encaps must never panic. Any byte string is either rejected with
//! `InvalidLength` / `InvalidKey` or accepted, and accepted keys give
//! deterministic output of the published size.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tessera_ml_kem::encode::check_ek_modulus;
use tessera_ml_kem::kem::encaps_internal;
use tessera_ml_kem::Error;

#[derive(Debug, Arbitrary)]
struct EncapsInput {
    ek: Vec<u8>,
    m: [u8; 32],
    variant: u8,
}

macro_rules! check_encaps {
    ($input:expr, $k:literal, $eta1:literal, $du:literal, $dv:literal, $ek_len:literal, $ct_len:literal) => {{
        let result = encaps_internal::<$k, $eta1, 2, $du, $dv>(&$input.ek, &$input.m);
        match result {
            Ok((ss, ct)) => {
                assert_eq!(ct.len(), $ct_len);
                let (ss2, ct2) = encaps_internal::<$k, $eta1, 2, $du, $dv>(&$input.ek, &$input.m)
                    .expect("accepted once, accepted again");
                assert_eq!(ss, ss2);
                assert_eq!(ct, ct2);
            }
            Err(Error::InvalidLength { expected, actual }) => {
                assert_eq!(expected, $ek_len);
                assert_eq!(actual, $input.ek.len());
            }
            Err(Error::InvalidKey) => {
                assert_eq!($input.ek.len(), $ek_len);
                assert!(!check_ek_modulus(&$input.ek));
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }};
}

fuzz_target!(|input: EncapsInput| {
    match input.variant % 3 {
        0 => check_encaps!(input, 2, 3, 10, 4, 800, 768),
        1 => check_encaps!(input, 3, 2, 10, 4, 1184, 1088),
        _ => check_encaps!(input, 4, 2, 11, 5, 1568, 1568),
    }
});
