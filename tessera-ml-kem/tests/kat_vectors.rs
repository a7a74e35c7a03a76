//! Fixture-driven known-answer tests.
//!
//! `tests/data/kat_mlkem*.rsp` hold the first NIST `PQCgenKAT` records for
//! each parameter set, with the d, z and m seeds spelled out.

#![allow(dead_code, unused_macros, unused_imports)]

use tessera_ml_kem::hash::j_parts;
use tessera_ml_kem::kat::{parse_kat_records, KatRecord};

macro_rules! kat_fixture {
    ($mod_name:ident, $file:literal, $feature:literal, $k:literal, $eta1:literal, $eta2:literal, $du:literal, $dv:literal) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use tessera_ml_kem::kem::{decaps_internal, encaps_internal, keygen_internal};

            const FIXTURE: &str = include_str!(concat!("data/", $file));

            fn records() -> Vec<KatRecord> {
                let records = parse_kat_records(FIXTURE).expect("fixture parses");
                assert!(!records.is_empty());
                records
            }

            #[test]
            fn keygen() {
                for r in records() {
                    let d = KatRecord::seed(&r.d).unwrap();
                    let z = KatRecord::seed(&r.z).unwrap();
                    let (ek, dk) = keygen_internal::<$k, $eta1>(&d, &z);
                    assert_eq!(ek, r.pk, "count = {}: pk mismatch", r.count);
                    assert_eq!(*dk, r.sk, "count = {}: sk mismatch", r.count);
                }
            }

            #[test]
            fn encaps() {
                for r in records() {
                    let m = KatRecord::seed(&r.m).unwrap();
                    let (ss, ct) = encaps_internal::<$k, $eta1, $eta2, $du, $dv>(&r.pk, &m).unwrap();
                    assert_eq!(ct, r.ct, "count = {}: ct mismatch", r.count);
                    assert_eq!(&ss[..], &r.ss[..], "count = {}: ss mismatch", r.count);
                }
            }

            #[test]
            fn decaps() {
                for r in records() {
                    let ss = decaps_internal::<$k, $eta1, $eta2, $du, $dv>(&r.sk, &r.ct).unwrap();
                    assert_eq!(&ss[..], &r.ss[..], "count = {}: ss mismatch", r.count);
                }
            }

            #[test]
            fn decaps_rejects_each_other_record() {
                // Every record's ciphertext is invalid under every other key.
                let records = records();
                for (a, b) in records.iter().zip(records.iter().cycle().skip(1)) {
                    if a.count == b.count {
                        continue;
                    }
                    let ss = decaps_internal::<$k, $eta1, $eta2, $du, $dv>(&a.sk, &b.ct).unwrap();
                    let z = &a.sk[a.sk.len() - 32..];
                    assert_eq!(&ss[..], &j_parts(&[z, &b.ct])[..]);
                }
            }
        }
    };
}

kat_fixture!(ml_kem_512, "kat_mlkem512.rsp", "ml-kem-512", 2, 3, 2, 10, 4);
kat_fixture!(ml_kem_768, "kat_mlkem768.rsp", "ml-kem-768", 3, 2, 2, 10, 4);
kat_fixture!(ml_kem_1024, "kat_mlkem1024.rsp", "ml-kem-1024", 4, 2, 2, 11, 5);
