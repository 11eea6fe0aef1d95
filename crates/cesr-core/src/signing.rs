//! Signing primitives: verification keys, signers, and signatures.

use crate::crypto::default_gateway;
use crate::error::CesrError;
use crate::matter::{Matter, Primitive};
use crate::tables::{codex, SEED_CODES, SIG_CODES, VERFER_CODES};

/// Verification-key code for a seed code and transferability choice.
fn verfer_code(seed_code: &str, transferable: bool) -> Result<&'static str, CesrError> {
    match seed_code {
        codex::ED25519_SEED if transferable => Ok(codex::ED25519),
        codex::ED25519_SEED => Ok(codex::ED25519N),
        codex::ECDSA_256K1_SEED if transferable => Ok(codex::ECDSA_256K1),
        codex::ECDSA_256K1_SEED => Ok(codex::ECDSA_256K1N),
        codex::ECDSA_256R1_SEED if transferable => Ok(codex::ECDSA_256R1),
        codex::ECDSA_256R1_SEED => Ok(codex::ECDSA_256R1N),
        codex::ED448_SEED if transferable => Ok(codex::ED448),
        codex::ED448_SEED => Ok(codex::ED448N),
        _ => Err(CesrError::InvalidCode {
            code: seed_code.to_string(),
            family: "seed",
        }),
    }
}

/// Signature code for a seed code.
fn signature_code(seed_code: &str) -> Result<&'static str, CesrError> {
    match seed_code {
        codex::ED25519_SEED => Ok(codex::ED25519_SIG),
        codex::ECDSA_256K1_SEED => Ok(codex::ECDSA_256K1_SIG),
        codex::ECDSA_256R1_SEED => Ok(codex::ECDSA_256R1_SIG),
        codex::ED448_SEED => Ok(codex::ED448_SIG),
        _ => Err(CesrError::InvalidCode {
            code: seed_code.to_string(),
            family: "seed",
        }),
    }
}

/// Public verification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verfer {
    matter: Matter,
}

impl Verfer {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !VERFER_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "verification key",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a verification-key code and raw public key.
    pub fn new(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::new(code, raw)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the textual qualified form given as bytes.
    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64b(qb64b)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// Verify a raw signature over `ser` with this key.
    ///
    /// `Ok(false)` on mismatch; errors only for structural defects.
    pub fn verify(&self, sig: &[u8], ser: &[u8]) -> Result<bool, CesrError> {
        default_gateway().verify(self.code(), self.raw(), sig, ser)
    }
}

impl Primitive for Verfer {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Private signing key with its derived public Verfer.
#[derive(Clone)]
pub struct Signer {
    matter: Matter,
    verfer: Verfer,
}

impl Signer {
    fn derive(matter: Matter, transferable: bool) -> Result<Self, CesrError> {
        if !SEED_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "seed",
            });
        }
        let code = verfer_code(matter.code(), transferable)?;
        let key = default_gateway().public_key(matter.code(), matter.raw())?;
        let verfer = Verfer::new(code, &key)?;
        Ok(Self { matter, verfer })
    }

    /// Generate a signer from a fresh random seed.
    pub fn generate(transferable: bool) -> Result<Self, CesrError> {
        let seed = default_gateway().generate_seed();
        Self::from_seed(codex::ED25519_SEED, &seed, transferable)
    }

    /// Build from a seed code and raw seed bytes.
    pub fn from_seed(code: &str, seed: &[u8], transferable: bool) -> Result<Self, CesrError> {
        Self::derive(Matter::new(code, seed)?, transferable)
    }

    /// Build from the textual qualified form of the seed.
    pub fn from_qb64(qb64: &str, transferable: bool) -> Result<Self, CesrError> {
        Self::derive(Matter::from_qb64(qb64)?, transferable)
    }

    /// The derived public verification key.
    pub fn verfer(&self) -> &Verfer {
        &self.verfer
    }

    /// Sign `ser`, producing a non-indexed signature primitive.
    pub fn sign(&self, ser: &[u8]) -> Result<Cigar, CesrError> {
        let gateway = default_gateway();
        let sig = gateway.sign(self.code(), self.raw(), ser)?;
        Cigar::new(signature_code(self.code())?, &sig, Some(self.verfer.clone()))
    }
}

impl Primitive for Signer {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // seed material stays out of debug output
        write!(f, "Signer({})", self.verfer.qb64())
    }
}

/// Non-indexed signature, optionally carrying its Verfer.
#[derive(Debug, Clone)]
pub struct Cigar {
    matter: Matter,
    verfer: Option<Verfer>,
}

impl Cigar {
    fn validated(matter: Matter, verfer: Option<Verfer>) -> Result<Self, CesrError> {
        if !SIG_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "signature",
            });
        }
        Ok(Self { matter, verfer })
    }

    /// Build from a signature code and raw signature bytes.
    pub fn new(code: &str, raw: &[u8], verfer: Option<Verfer>) -> Result<Self, CesrError> {
        Self::validated(Matter::new(code, raw)?, verfer)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str, verfer: Option<Verfer>) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?, verfer)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8], verfer: Option<Verfer>) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?, verfer)
    }

    /// The associated verification key, when known.
    pub fn verfer(&self) -> Option<&Verfer> {
        self.verfer.as_ref()
    }
}

impl Primitive for Cigar {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_signer() -> Signer {
        Signer::from_seed(codex::ED25519_SEED, &[0x42u8; 32], true).unwrap()
    }

    #[test]
    fn test_signer_deterministic_from_seed() {
        let s1 = make_signer();
        let s2 = make_signer();
        assert_eq!(s1.verfer().qb64(), s2.verfer().qb64());
        assert_eq!(s1.code(), codex::ED25519_SEED);
        assert_eq!(s1.verfer().code(), codex::ED25519);
    }

    #[test]
    fn test_signer_nontransferable() {
        let signer = Signer::from_seed(codex::ED25519_SEED, &[0x42u8; 32], false).unwrap();
        assert_eq!(signer.verfer().code(), codex::ED25519N);
        assert!(!signer.verfer().is_transferable());
        assert!(signer.verfer().qb64().starts_with('B'));
    }

    #[test]
    fn test_sign_verify() {
        let signer = make_signer();
        let ser = b"abcdefghijklmnopqrstuvwxyz0123456789";

        let cigar = signer.sign(ser).unwrap();
        assert_eq!(cigar.code(), codex::ED25519_SIG);
        assert_eq!(cigar.raw().len(), 64);
        assert!(cigar.qb64().starts_with("0B"));

        assert!(signer.verfer().verify(cigar.raw(), ser).unwrap());

        // bit-flipped message must not verify
        let mut bad = ser.to_vec();
        bad[0] ^= 0x01;
        assert!(!signer.verfer().verify(cigar.raw(), &bad).unwrap());

        // tampered signature must not verify
        let mut bad_sig = cigar.raw().to_vec();
        bad_sig[0] = bad_sig[0].wrapping_add(1);
        assert!(!signer.verfer().verify(&bad_sig, ser).unwrap());
    }

    #[test]
    fn test_cigar_carries_verfer() {
        let signer = make_signer();
        let ser = b"message";
        let cigar = signer.sign(ser).unwrap();

        let verfer = cigar.verfer().unwrap();
        assert!(verfer.verify(cigar.raw(), ser).unwrap());

        let detached = Cigar::from_qb64(&cigar.qb64(), None).unwrap();
        assert!(detached.verfer().is_none());
        assert_eq!(detached.raw(), cigar.raw());
    }

    #[test]
    fn test_verfer_roundtrip() {
        let signer = make_signer();
        let qb64 = signer.verfer().qb64();

        let verfer = Verfer::from_qb64(&qb64).unwrap();
        assert_eq!(verfer, *signer.verfer());

        let verfer = Verfer::from_qb2(&signer.verfer().qb2()).unwrap();
        assert_eq!(verfer, *signer.verfer());
    }

    #[test]
    fn test_verfer_rejects_non_key_code() {
        assert!(matches!(
            Verfer::new(codex::BLAKE3_256, &[0u8; 32]),
            Err(CesrError::InvalidCode { family: "verification key", .. })
        ));
        assert!(matches!(
            Verfer::new(codex::ED25519_SIG, &[0u8; 64]),
            Err(CesrError::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_signer_rejects_non_seed_code() {
        assert!(matches!(
            Signer::from_seed(codex::ED25519, &[0u8; 32], true),
            Err(CesrError::InvalidCode { family: "seed", .. })
        ));
    }

    #[test]
    fn test_cigar_rejects_non_sig_code() {
        assert!(matches!(
            Cigar::new(codex::ED25519, &[0u8; 32], None),
            Err(CesrError::InvalidCode { family: "signature", .. })
        ));
    }

    #[test]
    fn test_generate_signers_differ() {
        let s1 = Signer::generate(true).unwrap();
        let s2 = Signer::generate(true).unwrap();
        assert_ne!(s1.verfer().qb64(), s2.verfer().qb64());
    }

    #[test]
    fn test_unsupported_suite_surfaces_crypto_failure() {
        // secp256k1 seeds are registered codes, but the stock gateway does
        // not implement the suite.
        assert!(matches!(
            Signer::from_seed(codex::ECDSA_256K1_SEED, &[0u8; 32], true),
            Err(CesrError::CryptoFailure(_))
        ));
    }
}
