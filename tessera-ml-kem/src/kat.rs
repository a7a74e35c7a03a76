//! Known-answer fixture parsing.
//!
//! Fixtures use the NIST `.rsp` layout: records open with `count = N` and
//! continue with `key = HEX` lines until the next `count`. Blank lines and
//! `#` comments are skipped. Keys other than d, z, pk, sk, m (or msg), ct and
//! ss are accepted and dropped.

use alloc::vec::Vec;

use tessera_core::{Error, Result};

/// One known-answer record. Fields absent from the fixture are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KatRecord {
    /// Record index from the `count` line.
    pub count: usize,
    /// Key generation seed d.
    pub d: Vec<u8>,
    /// Implicit rejection seed z.
    pub z: Vec<u8>,
    /// Encapsulation key.
    pub pk: Vec<u8>,
    /// Decapsulation key.
    pub sk: Vec<u8>,
    /// Encapsulation seed m.
    pub m: Vec<u8>,
    /// Ciphertext.
    pub ct: Vec<u8>,
    /// Shared secret.
    pub ss: Vec<u8>,
}

impl KatRecord {
    /// Interpret one of the record's fields as a 32-byte seed.
    ///
    /// # Errors
    /// [`Error::InvalidLength`] if the field is not 32 bytes.
    pub fn seed(field: &[u8]) -> Result<[u8; 32]> {
        field.try_into().map_err(|_| Error::InvalidLength {
            expected: 32,
            actual: field.len(),
        })
    }
}

/// Parse every record in `input`.
///
/// # Errors
/// [`Error::InvalidKatFixture`] with the 1-based line number when a line has
/// no `=`, a `count` is not a decimal integer, a value is not hex, or a
/// field appears before the first `count`.
pub fn parse_kat_records(input: &str) -> Result<Vec<KatRecord>> {
    let mut records = Vec::new();
    let mut current: Option<KatRecord> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        let invalid = Error::InvalidKatFixture { line: idx + 1 };

        let (key, value) = line.split_once('=').ok_or(invalid)?;
        let (key, value) = (key.trim(), value.trim());

        if key == "count" {
            let count = value.parse().map_err(|_| invalid)?;
            if let Some(done) = current.replace(KatRecord {
                count,
                ..KatRecord::default()
            }) {
                records.push(done);
            }
            continue;
        }

        let record = current.as_mut().ok_or(invalid)?;
        let slot = match key {
            "d" => &mut record.d,
            "z" => &mut record.z,
            "pk" | "ek" => &mut record.pk,
            "sk" | "dk" => &mut record.sk,
            "m" | "msg" => &mut record.m,
            "ct" | "c" => &mut record.ct,
            "ss" | "k" => &mut record.ss,
            _ => continue,
        };
        *slot = hex::decode(value).map_err(|_| invalid)?;
    }

    records.extend(current);
    Ok(records)
}
