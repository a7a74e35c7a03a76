//! Fuzz target for the known-answer fixture parser.
//!
//! Arbitrary text must parse or fail with `InvalidKatFixture`, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use tessera_ml_kem::kat::parse_kat_records;
use tessera_ml_kem::Error;

fuzz_target!(|text: &str| {
    match parse_kat_records(text) {
        Ok(records) => {
            for record in records {
                assert!(record.d.len() <= text.len());
            }
        }
        Err(Error::InvalidKatFixture { line }) => {
            assert!(line >= 1 && line <= text.lines().count());
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
});
