//! Error types for the CESR primitive layer.

use thiserror::Error;

/// Errors raised while constructing or projecting primitives.
///
/// The layer never recovers from malformed input; every structural defect
/// surfaces as the precise variant below. Verification mismatches are not
/// errors — `verify` operations return `Ok(false)` for those.
#[derive(Debug, Error)]
pub enum CesrError {
    #[error("unknown derivation code: {0}")]
    UnknownCode(String),

    #[error("unknown code selector: {0:?}")]
    UnknownSelector(char),

    #[error("invalid code size for {code}: expected {expected} chars, got {actual}")]
    InvalidCodeSize {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("code {code} not valid for {family}")]
    InvalidCode { code: String, family: &'static str },

    #[error("raw size mismatch for code {code}: expected {expected} bytes, got {actual}")]
    RawMaterialSize {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("qualified material too short: need {need} more")]
    ShortMaterial { need: usize },

    #[error("nonzero padding in qualified material: {0}")]
    NonZeroPadding(String),

    #[error("value out of encodable range: {0}")]
    ValueOverflow(String),

    #[error("empty material: {0}")]
    EmptyMaterial(&'static str),

    #[error("invalid soft part for code {code}: {reason}")]
    InvalidSoft { code: String, reason: String },

    #[error("invalid base64 material: {0}")]
    InvalidBase64(String),

    #[error("crypto failure: {0}")]
    CryptoFailure(String),
}
