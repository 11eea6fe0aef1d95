//! Cryptographic gateway.
//!
//! The primitive layer never implements ciphers itself; typed primitives
//! reach signing, verification, digesting, and seed generation through the
//! narrow [`CryptoGateway`] trait, selecting the algorithm by derivation
//! code. The stock backend wraps ed25519-dalek and the Blake/SHA digest
//! crates. Code families without a backing implementation surface
//! [`CesrError::CryptoFailure`], never a panic.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Blake2s256};
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use sha2::{Digest as _, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

use crate::error::CesrError;
use crate::tables::codex;

type Blake2b256 = Blake2b<U32>;

/// Algorithm dispatch for typed primitives.
///
/// Implementations must be internally thread-safe and re-entrant; the stock
/// backend is stateless.
pub trait CryptoGateway: Send + Sync {
    /// Digest `ser` with the hash function named by a digest code.
    fn digest(&self, code: &str, ser: &[u8]) -> Result<Vec<u8>, CesrError>;

    /// Sign `ser` with the private seed of the suite named by a seed code.
    fn sign(&self, seed_code: &str, seed: &[u8], ser: &[u8]) -> Result<Vec<u8>, CesrError>;

    /// Derive the public verification key for a private seed.
    fn public_key(&self, seed_code: &str, seed: &[u8]) -> Result<Vec<u8>, CesrError>;

    /// Verify `sig` over `ser` against a public key of the suite named by a
    /// verification-key code. `Ok(false)` means a well-formed signature that
    /// does not match; structural defects are errors.
    fn verify(&self, key_code: &str, key: &[u8], sig: &[u8], ser: &[u8])
        -> Result<bool, CesrError>;

    /// Generate a fresh 256-bit random seed.
    fn generate_seed(&self) -> [u8; 32];
}

/// Stock gateway backed by ed25519-dalek, blake3, blake2, sha2, and sha3.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockCrypto;

/// The process-wide stock gateway.
pub fn default_gateway() -> &'static dyn CryptoGateway {
    static STOCK: StockCrypto = StockCrypto;
    &STOCK
}

impl StockCrypto {
    fn ed25519_seed(seed: &[u8]) -> Result<SigningKey, CesrError> {
        let seed: &[u8; 32] = seed
            .try_into()
            .map_err(|_| CesrError::CryptoFailure(format!(
                "ed25519 seed must be 32 bytes, got {}",
                seed.len()
            )))?;
        Ok(SigningKey::from_bytes(seed))
    }
}

impl CryptoGateway for StockCrypto {
    fn digest(&self, code: &str, ser: &[u8]) -> Result<Vec<u8>, CesrError> {
        match code {
            codex::BLAKE3_256 => Ok(blake3::hash(ser).as_bytes().to_vec()),
            codex::BLAKE3_512 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(ser);
                let mut out = [0u8; 64];
                hasher.finalize_xof().fill(&mut out);
                Ok(out.to_vec())
            }
            codex::BLAKE2B_256 => Ok(Blake2b256::digest(ser).to_vec()),
            codex::BLAKE2B_512 => Ok(Blake2b512::digest(ser).to_vec()),
            codex::BLAKE2S_256 => Ok(Blake2s256::digest(ser).to_vec()),
            codex::SHA2_256 => Ok(Sha256::digest(ser).to_vec()),
            codex::SHA2_512 => Ok(Sha512::digest(ser).to_vec()),
            codex::SHA3_256 => Ok(Sha3_256::digest(ser).to_vec()),
            codex::SHA3_512 => Ok(Sha3_512::digest(ser).to_vec()),
            _ => Err(CesrError::InvalidCode {
                code: code.to_string(),
                family: "digest",
            }),
        }
    }

    fn sign(&self, seed_code: &str, seed: &[u8], ser: &[u8]) -> Result<Vec<u8>, CesrError> {
        match seed_code {
            codex::ED25519_SEED => {
                let key = Self::ed25519_seed(seed)?;
                Ok(key.sign(ser).to_bytes().to_vec())
            }
            _ => Err(CesrError::CryptoFailure(format!(
                "unsupported signing suite for code {seed_code}"
            ))),
        }
    }

    fn public_key(&self, seed_code: &str, seed: &[u8]) -> Result<Vec<u8>, CesrError> {
        match seed_code {
            codex::ED25519_SEED => {
                let key = Self::ed25519_seed(seed)?;
                Ok(key.verifying_key().to_bytes().to_vec())
            }
            _ => Err(CesrError::CryptoFailure(format!(
                "unsupported key suite for code {seed_code}"
            ))),
        }
    }

    fn verify(
        &self,
        key_code: &str,
        key: &[u8],
        sig: &[u8],
        ser: &[u8],
    ) -> Result<bool, CesrError> {
        match key_code {
            codex::ED25519 | codex::ED25519N => {
                let key: &[u8; 32] = key.try_into().map_err(|_| {
                    CesrError::CryptoFailure(format!(
                        "ed25519 public key must be 32 bytes, got {}",
                        key.len()
                    ))
                })?;
                let sig: &[u8; 64] = sig.try_into().map_err(|_| {
                    CesrError::CryptoFailure(format!(
                        "ed25519 signature must be 64 bytes, got {}",
                        sig.len()
                    ))
                })?;
                let verifying_key = VerifyingKey::from_bytes(key)
                    .map_err(|_| CesrError::CryptoFailure("invalid ed25519 public key".into()))?;
                let signature = Signature::from_bytes(sig);
                Ok(verifying_key.verify(ser, &signature).is_ok())
            }
            _ => Err(CesrError::CryptoFailure(format!(
                "unsupported verification suite for code {key_code}"
            ))),
        }
    }

    fn generate_seed(&self) -> [u8; 32] {
        use rand::RngCore as _;
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        seed
    }
}

/// Constant-time byte comparison for digest checks.
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
