//! Digest primitives: content digests, identifier prefixes, and
//! self-addressing identifiers.
//!
//! Self-addressing derivation digests a field map whose target field has
//! been blanked to dummy characters of the eventual identifier's length,
//! so the identifier can sit inside the data it addresses. Field maps are
//! `serde_json::Value` objects; serde_json keeps object keys sorted, which
//! makes the serialization deterministic.

use serde_json::Value;

use crate::crypto::{ct_eq, default_gateway};
use crate::error::CesrError;
use crate::matter::{Matter, Primitive};
use crate::signing::Verfer;
use crate::tables::{codex, sizage, DIGEST_CODES, PREFIX_CODES};

/// Placeholder character for blanked self-addressing fields.
const DUMMY: &str = "#";

/// Serialize a field map. Plain JSON values cannot fail to serialize.
fn serialize(sad: &Value) -> Vec<u8> {
    serde_json::to_vec(sad).expect("JSON value serialization does not fail")
}

/// Dummy string of the full qb64 length of a digest code.
fn dummy_for(code: &str) -> Result<String, CesrError> {
    let s = sizage(code)?;
    let fs = s.fs.ok_or_else(|| CesrError::InvalidCode {
        code: code.to_string(),
        family: "digest",
    })?;
    Ok(DUMMY.repeat(fs))
}

/// Content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diger {
    matter: Matter,
}

impl Diger {
    /// Default derivation for new digests.
    pub const DEFAULT_CODE: &'static str = codex::BLAKE3_256;

    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !DIGEST_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "digest",
            });
        }
        Ok(Self { matter })
    }

    /// Digest `ser` with the hash function named by `code`.
    pub fn from_ser(ser: &[u8], code: &str) -> Result<Self, CesrError> {
        let raw = default_gateway().digest(code, ser)?;
        Self::new(code, &raw)
    }

    /// Build from a digest code and precomputed raw digest.
    pub fn new(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::new(code, raw)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// Re-digest `ser` and compare in constant time.
    pub fn verify(&self, ser: &[u8]) -> Result<bool, CesrError> {
        let computed = default_gateway().digest(self.code(), ser)?;
        Ok(ct_eq(&computed, self.raw()))
    }

    /// Whether `other` addresses the same content as this digest.
    ///
    /// Equal qualified forms match trivially; digests under different codes
    /// match when both verify against `ser`.
    pub fn compare(&self, ser: &[u8], other: &Diger) -> Result<bool, CesrError> {
        if self.matter == other.matter {
            return Ok(true);
        }
        Ok(self.verify(ser)? && other.verify(ser)?)
    }
}

impl Primitive for Diger {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Self-certifying identifier prefix.
///
/// Basic prefixes carry a public verification key; self-addressing prefixes
/// carry a digest of the inception field map with its `i` and `d` fields
/// blanked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixer {
    matter: Matter,
}

impl Prefixer {
    /// Default derivation for self-addressing prefixes.
    pub const DEFAULT_CODE: &'static str = codex::BLAKE3_256;

    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !PREFIX_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "prefix",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a prefix code and raw material.
    pub fn new(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::new(code, raw)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// Basic prefix from a verification key.
    pub fn from_verfer(verfer: &Verfer) -> Result<Self, CesrError> {
        Self::new(verfer.code(), verfer.raw())
    }

    /// Self-addressing prefix derived from an inception field map.
    ///
    /// The `i` and `d` fields are blanked to dummy characters of the
    /// prefix's full length before digesting.
    pub fn from_sad(sad: &Value, code: &str) -> Result<Self, CesrError> {
        if !DIGEST_CODES.contains(&code) {
            return Err(CesrError::InvalidCode {
                code: code.to_string(),
                family: "self-addressing prefix",
            });
        }
        let raw = Self::derive(sad, code)?;
        Self::new(code, &raw)
    }

    fn derive(sad: &Value, code: &str) -> Result<Vec<u8>, CesrError> {
        let map = sad
            .as_object()
            .ok_or(CesrError::EmptyMaterial("inception field map"))?;
        let dummy = dummy_for(code)?;

        let mut blanked = Value::Object(map.clone());
        blanked["i"] = Value::String(dummy.clone());
        if map.contains_key("d") {
            blanked["d"] = Value::String(dummy);
        }
        default_gateway().digest(code, &serialize(&blanked))
    }

    /// Verify this prefix against an inception field map.
    ///
    /// Self-addressing prefixes are re-derived from the blanked map; basic
    /// prefixes must appear as both the identifier and the sole initial key.
    pub fn verify(&self, sad: &Value) -> Result<bool, CesrError> {
        let map = sad
            .as_object()
            .ok_or(CesrError::EmptyMaterial("inception field map"))?;
        let qb64 = self.qb64();

        if map.get("i").and_then(Value::as_str) != Some(qb64.as_str()) {
            return Ok(false);
        }

        if self.is_digestive() {
            let raw = Self::derive(sad, self.code())?;
            Ok(ct_eq(&raw, self.raw()))
        } else {
            let keys = map
                .get("k")
                .and_then(Value::as_array)
                .ok_or(CesrError::EmptyMaterial("inception key list"))?;
            Ok(keys.first().and_then(Value::as_str) == Some(qb64.as_str()))
        }
    }
}

impl Primitive for Prefixer {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Self-addressing identifier over a serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saider {
    matter: Matter,
}

impl Saider {
    /// Default derivation for new identifiers.
    pub const DEFAULT_CODE: &'static str = codex::BLAKE3_256;

    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !DIGEST_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "self-addressing identifier",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a digest code and raw digest.
    pub fn new(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::new(code, raw)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// Compute the identifier for `sad` and fill it into the `label` field.
    ///
    /// The field is blanked to dummy characters of the identifier's full
    /// length, the map is serialized and digested, and the resulting
    /// identifier replaces the blank. Returns the filled map and the
    /// identifier.
    pub fn saidify(sad: &Value, label: &str, code: &str) -> Result<(Value, Self), CesrError> {
        let map = sad
            .as_object()
            .ok_or(CesrError::EmptyMaterial("field map"))?;
        if !map.contains_key(label) {
            return Err(CesrError::EmptyMaterial("identifier field"));
        }

        let mut filled = Value::Object(map.clone());
        filled[label] = Value::String(dummy_for(code)?);

        let raw = default_gateway().digest(code, &serialize(&filled))?;
        let saider = Self::new(code, &raw)?;
        filled[label] = Value::String(saider.qb64());
        Ok((filled, saider))
    }

    /// Verify this identifier against the `label` field of `sad`.
    pub fn verify(&self, sad: &Value, label: &str) -> Result<bool, CesrError> {
        let map = sad
            .as_object()
            .ok_or(CesrError::EmptyMaterial("field map"))?;
        let field = map
            .get(label)
            .ok_or(CesrError::EmptyMaterial("identifier field"))?;

        if field.as_str() != Some(self.qb64().as_str()) {
            return Ok(false);
        }

        let mut blanked = Value::Object(map.clone());
        blanked[label] = Value::String(dummy_for(self.code())?);
        let raw = default_gateway().digest(self.code(), &serialize(&blanked))?;
        Ok(ct_eq(&raw, self.raw()))
    }
}

impl Primitive for Saider {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}
