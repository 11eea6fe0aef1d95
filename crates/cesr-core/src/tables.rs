//! Derivation-code tables.
//!
//! Every primitive carries a short Base64 code that fixes its cipher suite
//! and sizes. The registry below records, per code: hard size `hs` (fixed
//! leading chars), soft size `ss` (value-bearing chars), prepad size `xs`
//! (leading `A` chars inside the soft part), full size `fs` (total qb64
//! chars, `None` for variable-size codes), and lead size `ls` (zero bytes
//! prepended to raw in the binary domain).
//!
//! Tables are plain `match` expressions, so they are fully initialized at
//! compile time and safe to read from any thread.

use crate::error::CesrError;

/// Matter derivation codes.
pub mod codex {
    pub const ED25519_SEED: &str = "A"; // Ed25519 256 bit random seed for private key
    pub const ED25519N: &str = "B"; // Ed25519 verification key, non-transferable
    pub const X25519: &str = "C"; // X25519 public encryption key
    pub const ED25519: &str = "D"; // Ed25519 verification key, basic derivation
    pub const BLAKE3_256: &str = "E"; // Blake3 256 bit digest
    pub const BLAKE2B_256: &str = "F"; // Blake2b 256 bit digest
    pub const BLAKE2S_256: &str = "G"; // Blake2s 256 bit digest
    pub const SHA3_256: &str = "H"; // SHA3 256 bit digest
    pub const SHA2_256: &str = "I"; // SHA2 256 bit digest
    pub const ECDSA_256K1_SEED: &str = "J"; // ECDSA secp256k1 256 bit random seed
    pub const ED448_SEED: &str = "K"; // Ed448 448 bit random seed
    pub const X448: &str = "L"; // X448 public encryption key
    pub const SHORT: &str = "M"; // Short 2 byte number
    pub const BIG: &str = "N"; // Big 8 byte number
    pub const X25519_PRIVATE: &str = "O"; // X25519 private decryption key
    pub const ECDSA_256R1_SEED: &str = "Q"; // ECDSA secp256r1 256 bit random seed
    pub const TAG3: &str = "X"; // Tag3, 3 B64 chars in the soft part
    pub const TAG7: &str = "Y"; // Tag7, 7 B64 chars in the soft part
    pub const BLIND: &str = "Z"; // Blinding factor, 256 bits
    pub const SALT_128: &str = "0A"; // 128 bit random salt/seed/nonce
    pub const ED25519_SIG: &str = "0B"; // Ed25519 signature
    pub const ECDSA_256K1_SIG: &str = "0C"; // ECDSA secp256k1 signature
    pub const BLAKE3_512: &str = "0D"; // Blake3 512 bit digest
    pub const BLAKE2B_512: &str = "0E"; // Blake2b 512 bit digest
    pub const SHA3_512: &str = "0F"; // SHA3 512 bit digest
    pub const SHA2_512: &str = "0G"; // SHA2 512 bit digest
    pub const HUGE: &str = "0H"; // Huge 16 byte number
    pub const ECDSA_256R1_SIG: &str = "0I"; // ECDSA secp256r1 signature
    pub const TAG1: &str = "0J"; // Tag1, 1 B64 char + 1 prepad
    pub const TAG2: &str = "0K"; // Tag2, 2 B64 chars
    pub const TAG5: &str = "0L"; // Tag5, 5 B64 chars + 1 prepad
    pub const TAG6: &str = "0M"; // Tag6, 6 B64 chars
    pub const TAG9: &str = "0N"; // Tag9, 9 B64 chars + 1 prepad
    pub const TAG10: &str = "0O"; // Tag10, 10 B64 chars
    pub const ECDSA_256K1N: &str = "1AAA"; // ECDSA secp256k1 verification key, non-transferable
    pub const ECDSA_256K1: &str = "1AAB"; // ECDSA secp256k1 verification key
    pub const ED448N: &str = "1AAC"; // Ed448 verification key, non-transferable
    pub const ED448: &str = "1AAD"; // Ed448 verification key
    pub const ED448_SIG: &str = "1AAE"; // Ed448 signature
    pub const TAG4: &str = "1AAF"; // Tag4, 4 B64 chars
    pub const DATE_TIME: &str = "1AAG"; // Base64 custom encoded 32 char ISO-8601 datetime
    pub const ECDSA_256R1N: &str = "1AAI"; // ECDSA secp256r1 verification key, non-transferable
    pub const ECDSA_256R1: &str = "1AAJ"; // ECDSA secp256r1 verification key
    pub const NULL: &str = "1AAK"; // Null, none or empty value
    pub const NO: &str = "1AAL"; // Falsey boolean value
    pub const YES: &str = "1AAM"; // Truthy boolean value
    pub const TAG8: &str = "1AAN"; // Tag8, 8 B64 chars
    pub const GREAT: &str = "1AAO"; // Great 24 byte number
    pub const TBD0S: &str = "1__-"; // Testing only, special soft with raw, lead 0
    pub const TBD0: &str = "1___"; // Testing only, fixed, lead 0
    pub const TBD1S: &str = "2__-"; // Testing only, special soft with raw, lead 1
    pub const TBD1: &str = "2___"; // Testing only, fixed, lead 1
    pub const TBD2S: &str = "3__-"; // Testing only, special soft with raw, lead 2
    pub const TBD2: &str = "3___"; // Testing only, fixed, lead 2
    pub const STR_B64_L0: &str = "4A"; // Base64 string, lead 0
    pub const STR_B64_L1: &str = "5A"; // Base64 string, lead 1
    pub const STR_B64_L2: &str = "6A"; // Base64 string, lead 2
    pub const STR_B64_BIG_L0: &str = "7AAA"; // Base64 string big, lead 0
    pub const STR_B64_BIG_L1: &str = "8AAA"; // Base64 string big, lead 1
    pub const STR_B64_BIG_L2: &str = "9AAA"; // Base64 string big, lead 2
    pub const BYTES_L0: &str = "4B"; // Byte string, lead 0
    pub const BYTES_L1: &str = "5B"; // Byte string, lead 1
    pub const BYTES_L2: &str = "6B"; // Byte string, lead 2
    pub const BYTES_BIG_L0: &str = "7AAB"; // Byte string big, lead 0
    pub const BYTES_BIG_L1: &str = "8AAB"; // Byte string big, lead 1
    pub const BYTES_BIG_L2: &str = "9AAB"; // Byte string big, lead 2
}

/// Size record for one derivation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizage {
    /// Hard size: fixed leading characters of the code.
    pub hs: usize,
    /// Soft size: value-bearing characters following the hard part.
    pub ss: usize,
    /// Prepad size: leading `A` characters inside the soft part.
    pub xs: usize,
    /// Full size of the qb64 form; `None` for variable-size codes.
    pub fs: Option<usize>,
    /// Lead size: zero bytes prepended to raw in the binary domain.
    pub ls: usize,
}

const fn fixed(hs: usize, ss: usize, xs: usize, fs: usize, ls: usize) -> Sizage {
    Sizage { hs, ss, xs, fs: Some(fs), ls }
}

const fn variable(hs: usize, ss: usize, ls: usize) -> Sizage {
    Sizage { hs, ss, xs: 0, fs: None, ls }
}

fn lookup(code: &str) -> Option<Sizage> {
    use codex::*;
    let sizage = match code {
        ED25519_SEED | ED25519N | X25519 | ED25519 | BLAKE3_256 | BLAKE2B_256 | BLAKE2S_256
        | SHA3_256 | SHA2_256 | ECDSA_256K1_SEED | X25519_PRIVATE | ECDSA_256R1_SEED | BLIND => {
            fixed(1, 0, 0, 44, 0)
        }
        ED448_SEED | X448 => fixed(1, 0, 0, 76, 0),
        SHORT => fixed(1, 0, 0, 4, 0),
        BIG => fixed(1, 0, 0, 12, 0),
        TAG3 => fixed(1, 3, 0, 4, 0),
        TAG7 => fixed(1, 7, 0, 8, 0),
        SALT_128 | HUGE => fixed(2, 0, 0, 24, 0),
        ED25519_SIG | ECDSA_256K1_SIG | BLAKE3_512 | BLAKE2B_512 | SHA3_512 | SHA2_512
        | ECDSA_256R1_SIG => fixed(2, 0, 0, 88, 0),
        TAG1 => fixed(2, 2, 1, 4, 0),
        TAG2 => fixed(2, 2, 0, 4, 0),
        TAG5 => fixed(2, 6, 1, 8, 0),
        TAG6 => fixed(2, 6, 0, 8, 0),
        TAG9 => fixed(2, 10, 1, 12, 0),
        TAG10 => fixed(2, 10, 0, 12, 0),
        ECDSA_256K1N | ECDSA_256K1 | ECDSA_256R1N | ECDSA_256R1 => fixed(4, 0, 0, 48, 0),
        ED448N | ED448 => fixed(4, 0, 0, 80, 0),
        ED448_SIG => fixed(4, 0, 0, 156, 0),
        TAG4 => fixed(4, 4, 0, 8, 0),
        DATE_TIME | GREAT => fixed(4, 0, 0, 36, 0),
        NULL | NO | YES => fixed(4, 0, 0, 4, 0),
        TAG8 => fixed(4, 8, 0, 12, 0),
        TBD0S => fixed(4, 2, 0, 12, 0),
        TBD0 => fixed(4, 0, 0, 8, 0),
        TBD1S => fixed(4, 2, 1, 12, 1),
        TBD1 => fixed(4, 0, 0, 8, 1),
        TBD2S => fixed(4, 2, 0, 12, 2),
        TBD2 => fixed(4, 0, 0, 8, 2),
        STR_B64_L0 | BYTES_L0 => variable(2, 2, 0),
        STR_B64_L1 | BYTES_L1 => variable(2, 2, 1),
        STR_B64_L2 | BYTES_L2 => variable(2, 2, 2),
        STR_B64_BIG_L0 | BYTES_BIG_L0 => variable(4, 4, 0),
        STR_B64_BIG_L1 | BYTES_BIG_L1 => variable(4, 4, 1),
        STR_B64_BIG_L2 | BYTES_BIG_L2 => variable(4, 4, 2),
        _ => return None,
    };
    Some(sizage)
}

/// Look up the size record for a code.
pub fn sizage(code: &str) -> Result<Sizage, CesrError> {
    lookup(code).ok_or_else(|| CesrError::UnknownCode(code.to_string()))
}

/// Hard-code length implied by a code's first character.
pub fn hard_size(selector: char) -> Result<usize, CesrError> {
    match selector {
        'A'..='Z' | 'a'..='z' => Ok(1),
        '0' | '4' | '5' | '6' => Ok(2),
        '1' | '2' | '3' | '7' | '8' | '9' => Ok(4),
        other => Err(CesrError::UnknownSelector(other)),
    }
}

/// Raw payload length in bytes for a fixed-size code.
pub fn raw_size(code: &str) -> Result<usize, CesrError> {
    let s = sizage(code)?;
    let fs = s.fs.ok_or_else(|| CesrError::UnknownCode(code.to_string()))?;
    let cs = s.hs + s.ss;
    Ok((fs - cs) * 3 / 4 - s.ls)
}

/// Digest derivation codes (self-addressing).
pub const DIGEST_CODES: &[&str] = &[
    codex::BLAKE3_256,
    codex::BLAKE2B_256,
    codex::BLAKE2S_256,
    codex::SHA3_256,
    codex::SHA2_256,
    codex::BLAKE3_512,
    codex::BLAKE2B_512,
    codex::SHA3_512,
    codex::SHA2_512,
];

/// Public verification key codes.
pub const VERFER_CODES: &[&str] = &[
    codex::ED25519N,
    codex::ED25519,
    codex::ECDSA_256K1N,
    codex::ECDSA_256K1,
    codex::ED448N,
    codex::ED448,
    codex::ECDSA_256R1N,
    codex::ECDSA_256R1,
];

/// Non-transferable verification key codes.
pub const NONTRANS_CODES: &[&str] = &[
    codex::ED25519N,
    codex::ECDSA_256K1N,
    codex::ED448N,
    codex::ECDSA_256R1N,
];

/// Identifier prefix codes: basic keys plus self-addressing digests.
pub const PREFIX_CODES: &[&str] = &[
    codex::ED25519N,
    codex::ED25519,
    codex::BLAKE3_256,
    codex::BLAKE2B_256,
    codex::BLAKE2S_256,
    codex::SHA3_256,
    codex::SHA2_256,
    codex::BLAKE3_512,
    codex::BLAKE2B_512,
    codex::SHA3_512,
    codex::SHA2_512,
    codex::ECDSA_256K1N,
    codex::ECDSA_256K1,
    codex::ED448N,
    codex::ED448,
    codex::ECDSA_256R1N,
    codex::ECDSA_256R1,
];

/// Private seed codes accepted by signers.
pub const SEED_CODES: &[&str] = &[
    codex::ED25519_SEED,
    codex::ECDSA_256K1_SEED,
    codex::ED448_SEED,
    codex::ECDSA_256R1_SEED,
];

/// Non-indexed signature codes.
pub const SIG_CODES: &[&str] = &[
    codex::ED25519_SIG,
    codex::ECDSA_256K1_SIG,
    codex::ECDSA_256R1_SIG,
    codex::ED448_SIG,
];

/// Ordinal number codes ordered by raw width: 2, 8, 16, 24 bytes.
pub const NUMBER_CODES: &[&str] = &[codex::SHORT, codex::BIG, codex::HUGE, codex::GREAT];

/// Tag codes indexed by tag length minus one (1 through 10 chars).
pub const TAG_CODES: &[&str] = &[
    codex::TAG1,
    codex::TAG2,
    codex::TAG3,
    codex::TAG4,
    codex::TAG5,
    codex::TAG6,
    codex::TAG7,
    codex::TAG8,
    codex::TAG9,
    codex::TAG10,
];

/// Variable Base64-text codes, small then big, by lead index.
pub const BEXT_CODES: &[&str] = &[
    codex::STR_B64_L0,
    codex::STR_B64_L1,
    codex::STR_B64_L2,
    codex::STR_B64_BIG_L0,
    codex::STR_B64_BIG_L1,
    codex::STR_B64_BIG_L2,
];

/// Variable byte-string codes, small then big, by lead index.
pub const TEXT_CODES: &[&str] = &[
    codex::BYTES_L0,
    codex::BYTES_L1,
    codex::BYTES_L2,
    codex::BYTES_BIG_L0,
    codex::BYTES_BIG_L1,
    codex::BYTES_BIG_L2,
];

/// Selector characters of small variable codes, indexed by lead size.
pub(crate) const SMALL_VRZ_SELECTORS: [char; 3] = ['4', '5', '6'];

/// Selector characters of big variable codes, indexed by lead size.
pub(crate) const LARGE_VRZ_SELECTORS: [char; 3] = ['7', '8', '9'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codex_values() {
        assert_eq!(codex::ED25519_SEED, "A");
        assert_eq!(codex::ED25519N, "B");
        assert_eq!(codex::ED25519, "D");
        assert_eq!(codex::BLAKE3_256, "E");
        assert_eq!(codex::SHORT, "M");
        assert_eq!(codex::BIG, "N");
        assert_eq!(codex::ED25519_SIG, "0B");
        assert_eq!(codex::HUGE, "0H");
        assert_eq!(codex::ECDSA_256K1, "1AAB");
        assert_eq!(codex::DATE_TIME, "1AAG");
    }

    #[test]
    fn test_sizage_fixed() {
        let s = sizage(codex::ED25519N).unwrap();
        assert_eq!(s, Sizage { hs: 1, ss: 0, xs: 0, fs: Some(44), ls: 0 });

        let s = sizage(codex::ED25519_SIG).unwrap();
        assert_eq!(s, Sizage { hs: 2, ss: 0, xs: 0, fs: Some(88), ls: 0 });

        let s = sizage(codex::TAG1).unwrap();
        assert_eq!(s, Sizage { hs: 2, ss: 2, xs: 1, fs: Some(4), ls: 0 });

        let s = sizage(codex::TAG3).unwrap();
        assert_eq!(s, Sizage { hs: 1, ss: 3, xs: 0, fs: Some(4), ls: 0 });
    }

    #[test]
    fn test_sizage_variable() {
        let s = sizage(codex::BYTES_L1).unwrap();
        assert_eq!(s, Sizage { hs: 2, ss: 2, xs: 0, fs: None, ls: 1 });

        let s = sizage(codex::STR_B64_BIG_L2).unwrap();
        assert_eq!(s, Sizage { hs: 4, ss: 4, xs: 0, fs: None, ls: 2 });
    }

    #[test]
    fn test_sizage_unknown() {
        assert!(matches!(sizage("ZZ"), Err(CesrError::UnknownCode(_))));
        assert!(matches!(sizage(""), Err(CesrError::UnknownCode(_))));
    }

    #[test]
    fn test_hard_size() {
        assert_eq!(hard_size('A').unwrap(), 1);
        assert_eq!(hard_size('z').unwrap(), 1);
        assert_eq!(hard_size('0').unwrap(), 2);
        assert_eq!(hard_size('4').unwrap(), 2);
        assert_eq!(hard_size('1').unwrap(), 4);
        assert_eq!(hard_size('9').unwrap(), 4);
        assert!(matches!(hard_size('-'), Err(CesrError::UnknownSelector('-'))));
        assert!(matches!(hard_size('_'), Err(CesrError::UnknownSelector('_'))));
    }

    #[test]
    fn test_raw_sizes() {
        assert_eq!(raw_size(codex::ED25519N).unwrap(), 32);
        assert_eq!(raw_size(codex::ED25519_SEED).unwrap(), 32);
        assert_eq!(raw_size(codex::ED448_SEED).unwrap(), 56);
        assert_eq!(raw_size(codex::SHORT).unwrap(), 2);
        assert_eq!(raw_size(codex::BIG).unwrap(), 8);
        assert_eq!(raw_size(codex::SALT_128).unwrap(), 16);
        assert_eq!(raw_size(codex::HUGE).unwrap(), 16);
        assert_eq!(raw_size(codex::GREAT).unwrap(), 24);
        assert_eq!(raw_size(codex::ED25519_SIG).unwrap(), 64);
        assert_eq!(raw_size(codex::ECDSA_256K1).unwrap(), 33);
        assert_eq!(raw_size(codex::DATE_TIME).unwrap(), 24);
        assert_eq!(raw_size(codex::NULL).unwrap(), 0);
        assert_eq!(raw_size(codex::TAG3).unwrap(), 0);
        assert_eq!(raw_size(codex::TBD1).unwrap(), 2);
        assert_eq!(raw_size(codex::TBD2).unwrap(), 1);
        assert!(raw_size(codex::BYTES_L0).is_err());
    }

    #[test]
    fn test_pad_identity_all_fixed_codes() {
        // For every fixed code the pad class of (raw + lead) must match the
        // pad chars absorbed by the code: ps == cs % 4.
        use codex::*;
        let all = [
            ED25519_SEED, ED25519N, X25519, ED25519, BLAKE3_256, BLAKE2B_256, BLAKE2S_256,
            SHA3_256, SHA2_256, ECDSA_256K1_SEED, ED448_SEED, X448, SHORT, BIG, X25519_PRIVATE,
            ECDSA_256R1_SEED, TAG3, TAG7, BLIND, SALT_128, ED25519_SIG, ECDSA_256K1_SIG,
            BLAKE3_512, BLAKE2B_512, SHA3_512, SHA2_512, HUGE, ECDSA_256R1_SIG, TAG1, TAG2,
            TAG5, TAG6, TAG9, TAG10, ECDSA_256K1N, ECDSA_256K1, ED448N, ED448, ED448_SIG,
            TAG4, DATE_TIME, ECDSA_256R1N, ECDSA_256R1, NULL, NO, YES, TAG8, GREAT, TBD0S,
            TBD0, TBD1S, TBD1, TBD2S, TBD2,
        ];
        for code in all {
            let s = sizage(code).unwrap();
            let cs = s.hs + s.ss;
            let fs = s.fs.unwrap();
            let rs = raw_size(code).unwrap();
            let ps = (3 - (rs + s.ls) % 3) % 3;
            assert_eq!(ps, cs % 4, "pad identity violated for {code}");
            assert_eq!(fs, cs + (rs + s.ls + ps) * 4 / 3 - ps, "length identity violated for {code}");
            assert_eq!(s.hs, hard_size(code.chars().next().unwrap()).unwrap(), "selector mismatch for {code}");
        }
    }
}
