//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the qualified textual form of known primitives so that
//! independent implementations can check byte-for-byte agreement.

use cesr_core::{codex, Matter};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Derivation code.
    pub code: &'static str,
    /// Raw payload bytes.
    pub raw: &'static [u8],
    /// Expected textual qualified form.
    pub qb64: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "ed25519n zero key",
            code: codex::ED25519N,
            raw: &[0u8; 32],
            qb64: "BAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        },
        GoldenVector {
            name: "ed25519n real key",
            code: codex::ED25519N,
            raw: b"iN\x89Gi\xe6\xc3&~\x8bG|%\x90(L\xd6G\xddB\xef`\x07\xd2T\xfc\xe1\xcd.\x9b\xe4#",
            qb64: "BGlOiUdp5sMmfotHfCWQKEzWR91C72AH0lT84c0um-Qj",
        },
        GoldenVector {
            name: "short number one",
            code: codex::SHORT,
            raw: &[0x00, 0x01],
            qb64: "MAAB",
        },
        GoldenVector {
            name: "huge sequence number one",
            code: codex::SALT_128,
            raw: &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            qb64: "0AAAAAAAAAAAAAAAAAAAAAAB",
        },
        GoldenVector {
            name: "variable bytes lead 0",
            code: codex::BYTES_L0,
            raw: b"abcdef",
            qb64: "4BACYWJjZGVm",
        },
        GoldenVector {
            name: "variable bytes lead 1",
            code: codex::BYTES_L1,
            raw: b"abcde",
            qb64: "5BACAGFiY2Rl",
        },
        GoldenVector {
            name: "variable bytes lead 2",
            code: codex::BYTES_L2,
            raw: b"abcd",
            qb64: "6BACAABhYmNk",
        },
    ]
}

/// Check one vector in both directions, returning a failure description.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let matter = Matter::new(vector.code, vector.raw)
        .map_err(|e| format!("{}: construction failed: {e}", vector.name))?;
    if matter.qb64() != vector.qb64 {
        return Err(format!(
            "{}: qb64 mismatch: got {}, want {}",
            vector.name,
            matter.qb64(),
            vector.qb64
        ));
    }

    let back = Matter::from_qb64(vector.qb64)
        .map_err(|e| format!("{}: reconstruction failed: {e}", vector.name))?;
    if back.raw() != vector.raw {
        return Err(format!("{}: raw mismatch after reconstruction", vector.name));
    }
    Ok(())
}

/// Check every vector; failures come back as descriptions.
pub fn verify_all_vectors() -> Vec<String> {
    all_vectors()
        .iter()
        .filter_map(|v| check_vector(v).err())
        .collect()
}
