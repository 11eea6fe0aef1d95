//! The Matter engine: shared construct/project logic for qualified
//! cryptographic material.
//!
//! A [`Matter`] is an immutable `(code, soft, raw)` triple. Constructors
//! normalize and validate; after that the three projections `qb64`,
//! `qb64b`, and `qb2` are pure functions of the sealed state and commute
//! with the corresponding constructors.
//!
//! Alignment works in 24-bit units: three raw bytes per four Base64 chars.
//! Fixed-size codes absorb the pad characters of a non-aligned raw into the
//! code itself (the code length is chosen so `cs % 4` equals the pad
//! class). Variable-size codes instead prepend `ls` zero lead bytes to raw
//! and carry the payload quadlet count in the soft part.

use crate::b64::{
    b64_char, b64_to_int, code_b2_to_b64, decode_b64, encode_b64, int_to_b64, is_b64, nab_sextets,
};
use crate::error::CesrError;
use crate::tables::{
    hard_size, raw_size, sizage, Sizage, DIGEST_CODES, LARGE_VRZ_SELECTORS, NONTRANS_CODES,
    PREFIX_CODES, SMALL_VRZ_SELECTORS,
};

/// Fully qualified cryptographic material: derivation code plus raw payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Matter {
    /// Hard part of the derivation code.
    code: String,
    /// Soft value: empty for plain codes, tag chars for special codes,
    /// quadlet count for variable codes. Excludes the `xs` prepad.
    soft: String,
    /// Raw payload bytes.
    raw: Vec<u8>,
}

impl Matter {
    /// Build from a derivation code and raw payload.
    ///
    /// Plain and variable-size codes arrive as the bare hard code; for
    /// variable codes any lead-index sibling may be given and the actual
    /// sibling (and small vs. big family) is selected from the raw length.
    /// Special codes arrive combined, hard and soft together (`Xicp`); a
    /// code whose length does not match its table entry fails with
    /// `InvalidCodeSize`.
    pub fn new(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        let first = code
            .chars()
            .next()
            .ok_or_else(|| CesrError::UnknownCode(code.to_string()))?;
        let hs = hard_size(first)?;
        let hard = code
            .get(..hs)
            .ok_or_else(|| CesrError::UnknownCode(code.to_string()))?;
        let s = sizage(hard)?;

        if s.fs.is_none() {
            if code.len() != s.hs {
                return Err(CesrError::InvalidCodeSize {
                    code: code.to_string(),
                    expected: s.hs,
                    actual: code.len(),
                });
            }
            return Self::new_variable(hard, raw);
        }

        if s.ss > 0 {
            // special code: the soft value rides along in the full code
            if code.len() != s.hs + s.ss {
                return Err(CesrError::InvalidCodeSize {
                    code: code.to_string(),
                    expected: s.hs + s.ss,
                    actual: code.len(),
                });
            }
            let xtra = &code[hs..hs + s.xs];
            if xtra.chars().any(|c| c != 'A') {
                return Err(CesrError::InvalidSoft {
                    code: hard.to_string(),
                    reason: format!("nonzero soft prepad {xtra:?}"),
                });
            }
            return Self::with_soft(hard, &code[hs + s.xs..], raw);
        }

        if code.len() != s.hs {
            return Err(CesrError::InvalidCodeSize {
                code: code.to_string(),
                expected: s.hs,
                actual: code.len(),
            });
        }

        let rs = raw_size(hard)?;
        if raw.len() != rs {
            return Err(CesrError::RawMaterialSize {
                code: hard.to_string(),
                expected: rs,
                actual: raw.len(),
            });
        }

        Ok(Self {
            code: hard.to_string(),
            soft: String::new(),
            raw: raw.to_vec(),
        })
    }

    /// Build a variable-size primitive, choosing the lead-index sibling.
    fn new_variable(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
        let ls = (3 - raw.len() % 3) % 3;
        let size = (raw.len() + ls) / 3;

        let mut chars = code.chars();
        let selector = chars.next().ok_or(CesrError::EmptyMaterial("code"))?;
        let tail = &code[1..2];

        let (code, soft) = if SMALL_VRZ_SELECTORS.contains(&selector) {
            if size <= 64usize.pow(2) - 1 {
                (
                    format!("{}{}", SMALL_VRZ_SELECTORS[ls], tail),
                    int_to_b64(size as u128, 2),
                )
            } else if size <= 64usize.pow(4) - 1 {
                // promote to the big family
                (
                    format!("{}AA{}", LARGE_VRZ_SELECTORS[ls], tail),
                    int_to_b64(size as u128, 4),
                )
            } else {
                return Err(CesrError::RawMaterialSize {
                    code: code.to_string(),
                    expected: (64usize.pow(4) - 1) * 3,
                    actual: raw.len(),
                });
            }
        } else if LARGE_VRZ_SELECTORS.contains(&selector) {
            if size <= 64usize.pow(4) - 1 {
                (
                    format!("{}{}", LARGE_VRZ_SELECTORS[ls], &code[1..]),
                    int_to_b64(size as u128, 4),
                )
            } else {
                return Err(CesrError::RawMaterialSize {
                    code: code.to_string(),
                    expected: (64usize.pow(4) - 1) * 3,
                    actual: raw.len(),
                });
            }
        } else {
            return Err(CesrError::UnknownCode(code.to_string()));
        };

        Ok(Self {
            code,
            soft,
            raw: raw.to_vec(),
        })
    }

    /// Build a special-soft primitive: the value lives in the code's soft
    /// part and raw is usually empty (tags, message types, versions).
    pub fn with_soft(code: &str, soft: &str, raw: &[u8]) -> Result<Self, CesrError> {
        let s = sizage(code)?;
        if s.fs.is_none() {
            return Err(CesrError::InvalidSoft {
                code: code.to_string(),
                reason: "variable-size code cannot carry a special soft".to_string(),
            });
        }
        if s.ss == 0 {
            return Err(CesrError::InvalidSoft {
                code: code.to_string(),
                reason: "code has no soft part".to_string(),
            });
        }
        if code.len() != s.hs {
            return Err(CesrError::InvalidCodeSize {
                code: code.to_string(),
                expected: s.hs,
                actual: code.len(),
            });
        }

        let want = s.ss - s.xs;
        if soft.len() != want {
            return Err(CesrError::InvalidSoft {
                code: code.to_string(),
                reason: format!("need exactly {want} soft chars, got {}", soft.len()),
            });
        }
        if !is_b64(soft) {
            return Err(CesrError::InvalidSoft {
                code: code.to_string(),
                reason: format!("non-base64 soft {soft:?}"),
            });
        }

        let rs = raw_size(code)?;
        if raw.len() != rs {
            return Err(CesrError::RawMaterialSize {
                code: code.to_string(),
                expected: rs,
                actual: raw.len(),
            });
        }

        Ok(Self {
            code: code.to_string(),
            soft: soft.to_string(),
            raw: raw.to_vec(),
        })
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::from_qb64b(qb64.as_bytes())
    }

    /// Build from the textual qualified form given as bytes.
    ///
    /// Trailing bytes beyond the full size are ignored, so a primitive can
    /// be extracted from the front of a larger buffer.
    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self, CesrError> {
        if qb64b.is_empty() {
            return Err(CesrError::EmptyMaterial("qb64"));
        }

        let hs = hard_size(qb64b[0] as char)?;
        if qb64b.len() < hs {
            return Err(CesrError::ShortMaterial {
                need: hs - qb64b.len(),
            });
        }
        let hard = std::str::from_utf8(&qb64b[..hs])
            .map_err(|_| CesrError::InvalidBase64(String::from_utf8_lossy(&qb64b[..hs]).into_owned()))?;
        let s = sizage(hard)?;
        let cs = s.hs + s.ss;

        if qb64b.len() < cs {
            return Err(CesrError::ShortMaterial {
                need: cs - qb64b.len(),
            });
        }
        let soft_full = std::str::from_utf8(&qb64b[hs..cs]).map_err(|_| {
            CesrError::InvalidBase64(String::from_utf8_lossy(&qb64b[hs..cs]).into_owned())
        })?;
        let (xtra, soft) = soft_full.split_at(s.xs);
        if xtra.chars().any(|c| c != 'A') {
            return Err(CesrError::InvalidSoft {
                code: hard.to_string(),
                reason: format!("nonzero soft prepad {xtra:?}"),
            });
        }
        if !soft.is_empty() && !is_b64(soft) {
            return Err(CesrError::InvalidBase64(soft.to_string()));
        }

        let fs = match s.fs {
            Some(fs) => fs,
            None => {
                let size = b64_to_int(soft)? as usize;
                if size == 0 && s.ls != 0 {
                    return Err(CesrError::InvalidSoft {
                        code: hard.to_string(),
                        reason: "zero payload size under a lead-bearing code".to_string(),
                    });
                }
                size * 4 + cs
            }
        };

        if qb64b.len() < fs {
            return Err(CesrError::ShortMaterial {
                need: fs - qb64b.len(),
            });
        }
        let qb64b = &qb64b[..fs];

        // Prepad with 'A' to realign, decode, then demand zero midpad.
        let ps = cs % 4;
        let mut base = vec![b'A'; ps];
        base.extend_from_slice(&qb64b[cs..]);
        let base = std::str::from_utf8(&base)
            .map_err(|_| CesrError::InvalidBase64(String::from_utf8_lossy(&base).into_owned()))?;
        let paw = decode_b64(base)?;

        let mid = &paw[..ps + s.ls];
        if mid.iter().any(|b| *b != 0) {
            return Err(CesrError::NonZeroPadding(format!(
                "midpad bytes {mid:02x?}"
            )));
        }
        let raw = paw[ps + s.ls..].to_vec();

        let expected = (fs - cs) * 3 / 4 - s.ls;
        if raw.len() != expected {
            return Err(CesrError::RawMaterialSize {
                code: hard.to_string(),
                expected,
                actual: raw.len(),
            });
        }

        Ok(Self {
            code: hard.to_string(),
            soft: soft.to_string(),
            raw,
        })
    }

    /// Build from the binary qualified form.
    ///
    /// As with [`Matter::from_qb64b`], trailing bytes are ignored.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        if qb2.is_empty() {
            return Err(CesrError::EmptyMaterial("qb2"));
        }

        let first = b64_char(nab_sextets(qb2, 1)?[0]);
        let hs = hard_size(first)?;
        let bhs = (hs * 3).div_ceil(4);
        if qb2.len() < bhs {
            return Err(CesrError::ShortMaterial {
                need: bhs - qb2.len(),
            });
        }
        let hard = code_b2_to_b64(qb2, hs)?;
        let s = sizage(&hard)?;
        let cs = s.hs + s.ss;

        let bcs = (cs * 3).div_ceil(4);
        if qb2.len() < bcs {
            return Err(CesrError::ShortMaterial {
                need: bcs - qb2.len(),
            });
        }
        let both = code_b2_to_b64(qb2, cs)?;
        let (xtra, soft) = both[hs..].split_at(s.xs);
        if xtra.chars().any(|c| c != 'A') {
            return Err(CesrError::InvalidSoft {
                code: hard.clone(),
                reason: format!("nonzero soft prepad {xtra:?}"),
            });
        }
        let soft = soft.to_string();

        let fs = match s.fs {
            Some(fs) => fs,
            None => {
                let size = b64_to_int(&soft)? as usize;
                if size == 0 && s.ls != 0 {
                    return Err(CesrError::InvalidSoft {
                        code: hard.clone(),
                        reason: "zero payload size under a lead-bearing code".to_string(),
                    });
                }
                size * 4 + cs
            }
        };
        let bfs = (fs * 3).div_ceil(4);
        if qb2.len() < bfs {
            return Err(CesrError::ShortMaterial {
                need: bfs - qb2.len(),
            });
        }
        let qb2 = &qb2[..bfs];

        // Pad bits in the trailing code byte must be zero.
        let pbs = 2 * (cs % 4);
        if pbs > 0 {
            let pi = qb2[bcs - 1];
            let mask = (1u8 << pbs) - 1;
            if pi & mask != 0 {
                return Err(CesrError::NonZeroPadding(format!(
                    "code pad bits {:#04b}",
                    pi & mask
                )));
            }
        }
        // Lead bytes must be zero.
        if s.ls > 0 && qb2[bcs..bcs + s.ls].iter().any(|b| *b != 0) {
            return Err(CesrError::NonZeroPadding(format!(
                "lead bytes {:02x?}",
                &qb2[bcs..bcs + s.ls]
            )));
        }

        let raw = qb2[bcs + s.ls..].to_vec();
        let expected = (fs - cs) * 3 / 4 - s.ls;
        if raw.len() != expected {
            return Err(CesrError::RawMaterialSize {
                code: hard.clone(),
                expected,
                actual: raw.len(),
            });
        }

        Ok(Self {
            code: hard,
            soft,
            raw,
        })
    }

    /// Hard part of the derivation code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Soft value of the code (empty for plain codes).
    pub fn soft(&self) -> &str {
        &self.soft
    }

    /// Raw payload bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Size record for this primitive's code.
    ///
    /// Constructors only admit registered codes, so the lookup cannot miss.
    fn sizes(&self) -> Sizage {
        sizage(&self.code).expect("constructed Matter carries a registered code")
    }

    /// Payload size in quadlets for variable codes, `None` otherwise.
    pub fn size(&self) -> Option<usize> {
        match self.sizes().fs {
            None => Some((self.raw.len() + self.sizes().ls) / 3),
            Some(_) => None,
        }
    }

    /// Total length of the textual qualified form in characters.
    pub fn full_size(&self) -> usize {
        let s = self.sizes();
        match s.fs {
            Some(fs) => fs,
            None => s.hs + s.ss + (self.raw.len() + s.ls) / 3 * 4,
        }
    }

    /// Full code: hard part, prepad, and soft value.
    fn both(&self) -> String {
        let s = self.sizes();
        let mut both = String::with_capacity(s.hs + s.ss);
        both.push_str(&self.code);
        for _ in 0..s.xs {
            both.push('A');
        }
        both.push_str(&self.soft);
        both
    }

    /// Textual qualified form.
    pub fn qb64(&self) -> String {
        let s = self.sizes();
        let both = self.both();

        match s.fs {
            None => {
                // Lead bytes realign raw to whole quadlets.
                let mut padded = vec![0u8; s.ls];
                padded.extend_from_slice(&self.raw);
                format!("{}{}", both, encode_b64(&padded))
            }
            Some(_) => {
                // Pre-pad, encode, then drop the pad chars the code absorbs.
                let ps = (3 - (self.raw.len() + s.ls) % 3) % 3;
                let mut padded = vec![0u8; ps + s.ls];
                padded.extend_from_slice(&self.raw);
                let encoded = encode_b64(&padded);
                format!("{}{}", both, &encoded[ps..])
            }
        }
    }

    /// Textual qualified form as bytes.
    pub fn qb64b(&self) -> Vec<u8> {
        self.qb64().into_bytes()
    }

    /// Binary qualified form.
    pub fn qb2(&self) -> Vec<u8> {
        let s = self.sizes();
        let both = self.both();
        let cs = s.hs + s.ss;

        // Pack the code's sextets MSB-first, left-shifted over its pad bits.
        let n = (cs * 3).div_ceil(4);
        let mut value: u128 = 0;
        for c in both.chars() {
            value = (value << 6)
                | crate::b64::b64_index(c).expect("constructed code chars are base64") as u128;
        }
        value <<= 2 * (cs % 4);

        let mut full = Vec::with_capacity(n + s.ls + self.raw.len());
        for i in (0..n).rev() {
            full.push((value >> (8 * i)) as u8);
        }
        full.extend(std::iter::repeat(0u8).take(s.ls));
        full.extend_from_slice(&self.raw);
        full
    }

    /// Whether the code is not in the non-transferable family.
    pub fn is_transferable(&self) -> bool {
        !NONTRANS_CODES.contains(&self.code.as_str())
    }

    /// Whether the code is a digest derivation.
    pub fn is_digestive(&self) -> bool {
        DIGEST_CODES.contains(&self.code.as_str())
    }

    /// Whether the code may serve as an identifier prefix.
    pub fn is_prefixive(&self) -> bool {
        PREFIX_CODES.contains(&self.code.as_str())
    }

    /// Whether the code carries a special (non-size) soft value.
    pub fn is_special(&self) -> bool {
        let s = self.sizes();
        s.fs.is_some() && s.ss > 0
    }

    /// Whether the code is variable-size.
    pub fn is_variable(&self) -> bool {
        self.sizes().fs.is_none()
    }
}

/// Shared capability set of every typed primitive.
///
/// Typed primitives contain a [`Matter`] and forward to it; this trait
/// exposes the common projections without inheritance.
pub trait Primitive {
    /// The underlying Matter state.
    fn matter(&self) -> &Matter;

    /// Hard part of the derivation code.
    fn code(&self) -> &str {
        self.matter().code()
    }

    /// Raw payload bytes.
    fn raw(&self) -> &[u8] {
        self.matter().raw()
    }

    /// Textual qualified form.
    fn qb64(&self) -> String {
        self.matter().qb64()
    }

    /// Textual qualified form as bytes.
    fn qb64b(&self) -> Vec<u8> {
        self.matter().qb64b()
    }

    /// Binary qualified form.
    fn qb2(&self) -> Vec<u8> {
        self.matter().qb2()
    }

    /// Whether the code is not in the non-transferable family.
    fn is_transferable(&self) -> bool {
        self.matter().is_transferable()
    }

    /// Whether the code is a digest derivation.
    fn is_digestive(&self) -> bool {
        self.matter().is_digestive()
    }

    /// Whether the code may serve as an identifier prefix.
    fn is_prefixive(&self) -> bool {
        self.matter().is_prefixive()
    }
}

impl std::fmt::Debug for Matter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matter({})", self.qb64())
    }
}

impl std::str::FromStr for Matter {
    type Err = CesrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_qb64(s)
    }
}

impl TryFrom<&[u8]> for Matter {
    type Error = CesrError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_qb2(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::codex;

    const VERKEY: &[u8; 32] = b"iN\x89Gi\xe6\xc3&~\x8bG|%\x90(L\xd6G\xddB\xef`\x07\xd2T\xfc\xe1\xcd.\x9b\xe4#";
    const VERKEY_QB64: &str = "BGlOiUdp5sMmfotHfCWQKEzWR91C72AH0lT84c0um-Qj";
    const VERKEY_QB2: [u8; 33] = [
        0x04, 0x69, 0x4E, 0x89, 0x47, 0x69, 0xE6, 0xC3, 0x26, 0x7E, 0x8B, 0x47, 0x7C, 0x25,
        0x90, 0x28, 0x4C, 0xD6, 0x47, 0xDD, 0x42, 0xEF, 0x60, 0x07, 0xD2, 0x54, 0xFC, 0xE1,
        0xCD, 0x2E, 0x9B, 0xE4, 0x23,
    ];

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(
            Matter::new("", b""),
            Err(CesrError::UnknownCode(_))
        ));
        assert!(matches!(
            Matter::new("#", b"abc"),
            Err(CesrError::UnknownSelector('#'))
        ));
        // short raw for a fixed code
        assert!(matches!(
            Matter::new(codex::ED25519N, &[0u8; 31]),
            Err(CesrError::RawMaterialSize { .. })
        ));
        // long raw for a fixed code
        assert!(matches!(
            Matter::new(codex::ED25519N, &[0u8; 33]),
            Err(CesrError::RawMaterialSize { .. })
        ));
    }

    #[test]
    fn test_new_code_size_mismatch() {
        // a bare special code is missing its soft chars
        assert!(matches!(
            Matter::new(codex::TAG3, b""),
            Err(CesrError::InvalidCodeSize { expected: 4, actual: 1, .. })
        ));
        // trailing junk on a plain code
        assert!(matches!(
            Matter::new("BB", &[0u8; 32]),
            Err(CesrError::InvalidCodeSize { expected: 1, actual: 2, .. })
        ));
        // truncated four-char code
        assert!(matches!(
            Matter::new("1A", &[0u8; 24]),
            Err(CesrError::UnknownCode(_))
        ));
    }

    #[test]
    fn test_new_accepts_combined_special_code() {
        // hard and soft arriving together is equivalent to with_soft
        let combined = Matter::new("Xicp", b"").unwrap();
        let split = Matter::with_soft(codex::TAG3, "icp", b"").unwrap();
        assert_eq!(combined, split);

        let combined = Matter::new("0JAB", b"").unwrap();
        assert_eq!(combined.soft(), "B");
        assert!(matches!(
            Matter::new("0JBB", b""),
            Err(CesrError::InvalidSoft { .. })
        ));
    }

    #[test]
    fn test_fixed_roundtrip() {
        let matter = Matter::new(codex::ED25519N, VERKEY).unwrap();
        assert_eq!(matter.code(), codex::ED25519N);
        assert_eq!(matter.raw(), VERKEY);
        assert_eq!(matter.qb64(), VERKEY_QB64);
        assert_eq!(matter.qb2(), VERKEY_QB2.to_vec());
        assert_eq!(matter.full_size(), 44);
        assert!(!matter.is_transferable());
        assert!(!matter.is_digestive());
        assert!(matter.is_prefixive());
        assert!(!matter.is_special());
        assert!(!matter.is_variable());

        let back = Matter::from_qb64(VERKEY_QB64).unwrap();
        assert_eq!(back, matter);

        let back = Matter::from_qb64b(VERKEY_QB64.as_bytes()).unwrap();
        assert_eq!(back, matter);

        let back = Matter::from_qb2(&VERKEY_QB2).unwrap();
        assert_eq!(back, matter);
    }

    #[test]
    fn test_from_qb64_ignores_trailing() {
        let stream = format!("{VERKEY_QB64}:mystuff/mypath/toresource?query=what#fragment");
        let matter = Matter::from_qb64(&stream).unwrap();
        assert_eq!(matter.code(), codex::ED25519N);
        assert_eq!(matter.qb64(), VERKEY_QB64);
    }

    #[test]
    fn test_transferable_and_digestive() {
        let matter = Matter::new(codex::ED25519, VERKEY).unwrap();
        assert!(matter.is_transferable());
        assert!(!matter.is_digestive());

        let matter = Matter::new(codex::BLAKE3_256, &[0u8; 32]).unwrap();
        assert!(matter.is_digestive());
        assert!(matter.is_prefixive());
    }

    #[test]
    fn test_all_zero_raw() {
        let matter = Matter::new(codex::ED25519N, &[0u8; 32]).unwrap();
        assert_eq!(matter.qb64(), format!("B{}", "A".repeat(43)));
    }

    #[test]
    fn test_fixed_lead_codes() {
        // lead 0
        let matter = Matter::new(codex::TBD0, b"abc").unwrap();
        assert_eq!(matter.qb64(), "1___YWJj");
        let back = Matter::from_qb64("1___YWJj").unwrap();
        assert_eq!(back.raw(), b"abc");

        // lead 1
        let matter = Matter::new(codex::TBD1, b"ab").unwrap();
        assert_eq!(matter.qb64(), "2___AGFi");
        let back = Matter::from_qb64("2___AGFi").unwrap();
        assert_eq!(back.raw(), b"ab");

        // lead 2
        let matter = Matter::new(codex::TBD2, b"z").unwrap();
        assert_eq!(matter.qb64(), "3___AAB6");
        let back = Matter::from_qb64("3___AAB6").unwrap();
        assert_eq!(back.raw(), b"z");
    }

    #[test]
    fn test_fixed_lead_qb2_roundtrip() {
        for (code, raw) in [
            (codex::TBD0, b"abc".as_slice()),
            (codex::TBD1, b"ab".as_slice()),
            (codex::TBD2, b"z".as_slice()),
        ] {
            let matter = Matter::new(code, raw).unwrap();
            let back = Matter::from_qb2(&matter.qb2()).unwrap();
            assert_eq!(back, matter, "qb2 roundtrip failed for {code}");
        }
    }

    #[test]
    fn test_variable_sizes() {
        let matter = Matter::new(codex::BYTES_L0, b"abcdef").unwrap();
        assert_eq!(matter.code(), codex::BYTES_L0);
        assert_eq!(matter.qb64(), "4BACYWJjZGVm");
        assert_eq!(matter.size(), Some(2));
        assert_eq!(matter.full_size(), 12);
        assert!(matter.is_variable());

        let matter = Matter::new(codex::BYTES_L0, b"abcde").unwrap();
        assert_eq!(matter.code(), codex::BYTES_L1, "sibling selected from raw length");
        assert_eq!(matter.qb64(), "5BACAGFiY2Rl");

        let matter = Matter::new(codex::BYTES_L0, b"abcd").unwrap();
        assert_eq!(matter.code(), codex::BYTES_L2);
        assert_eq!(matter.qb64(), "6BACAABhYmNk");

        for qb64 in ["4BACYWJjZGVm", "5BACAGFiY2Rl", "6BACAABhYmNk"] {
            let matter = Matter::from_qb64(qb64).unwrap();
            assert_eq!(matter.qb64(), qb64);
            let back = Matter::from_qb2(&matter.qb2()).unwrap();
            assert_eq!(back, matter);
        }
    }

    #[test]
    fn test_variable_empty() {
        let matter = Matter::new(codex::STR_B64_L0, b"").unwrap();
        assert_eq!(matter.qb64(), "4AAA");
        assert_eq!(matter.size(), Some(0));
        let back = Matter::from_qb64("4AAA").unwrap();
        assert_eq!(back, matter);
    }

    #[test]
    fn test_variable_promotes_to_big() {
        // 64^2 quadlets of raw cannot fit a 2-char soft; the big family takes over.
        let raw = vec![0x21u8; 64 * 64 * 3];
        let matter = Matter::new(codex::BYTES_L0, &raw).unwrap();
        assert_eq!(matter.code(), codex::BYTES_BIG_L0);
        assert_eq!(matter.soft(), "ABAA");
        let back = Matter::from_qb64(&matter.qb64()).unwrap();
        assert_eq!(back, matter);
    }

    #[test]
    fn test_special_soft_codes() {
        let matter = Matter::with_soft(codex::TAG3, "icp", b"").unwrap();
        assert_eq!(matter.code(), codex::TAG3);
        assert_eq!(matter.soft(), "icp");
        assert_eq!(matter.raw(), b"");
        assert_eq!(matter.qb64(), "Xicp");
        assert!(matter.is_special());

        let back = Matter::from_qb64("Xicp").unwrap();
        assert_eq!(back, matter);
        let back = Matter::from_qb2(&matter.qb2()).unwrap();
        assert_eq!(back, matter);
    }

    #[test]
    fn test_special_soft_with_raw() {
        let matter = Matter::with_soft(codex::TBD0S, "TG", b"uvwx").unwrap();
        assert_eq!(matter.qb64(), "1__-TGB1dnd4");
        let back = Matter::from_qb64("1__-TGB1dnd4").unwrap();
        assert_eq!(back.soft(), "TG");
        assert_eq!(back.raw(), b"uvwx");
    }

    #[test]
    fn test_special_soft_rejects_foreign_chars() {
        // soft chars must stay inside the alphabet
        assert!(matches!(
            Matter::from_qb64("X!!!"),
            Err(CesrError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_special_soft_prepad() {
        // Tag1 has xs == 1: one 'A' prepad inside the soft part.
        let matter = Matter::with_soft(codex::TAG1, "B", b"").unwrap();
        assert_eq!(matter.qb64(), "0JAB");
        let back = Matter::from_qb64("0JAB").unwrap();
        assert_eq!(back.soft(), "B");

        // nonzero prepad rejected
        assert!(matches!(
            Matter::from_qb64("0JBB"),
            Err(CesrError::InvalidSoft { .. })
        ));
    }

    #[test]
    fn test_short_material() {
        let truncated = &VERKEY_QB64[..43];
        assert!(matches!(
            Matter::from_qb64(truncated),
            Err(CesrError::ShortMaterial { need: 1 })
        ));

        assert!(matches!(
            Matter::from_qb64(""),
            Err(CesrError::EmptyMaterial(_))
        ));

        let qb2 = Matter::new(codex::ED25519N, VERKEY).unwrap().qb2();
        assert!(matches!(
            Matter::from_qb2(&qb2[..32]),
            Err(CesrError::ShortMaterial { .. })
        ));
    }

    #[test]
    fn test_nonzero_padding_rejected() {
        // Pad bits of a 'B' code live in the top two bits of the first
        // material char: anything at or above 'Q' (sextet 16) is nonzero.
        let bad = format!("BQ{}", "A".repeat(42));
        assert!(matches!(
            Matter::from_qb64(&bad),
            Err(CesrError::NonZeroPadding(_))
        ));

        // Same corruption in the binary domain: set a code pad bit.
        let mut qb2 = Matter::new(codex::ED25519_SIG, &[0u8; 64]).unwrap().qb2();
        qb2[1] |= 0x01;
        assert!(matches!(
            Matter::from_qb2(&qb2),
            Err(CesrError::NonZeroPadding(_))
        ));
    }

    #[test]
    fn test_zero_size_under_lead_code_rejected() {
        // a lead-1 variable code cannot carry a zero-quadlet payload
        assert!(matches!(
            Matter::from_qb64("5BAA"),
            Err(CesrError::InvalidSoft { .. })
        ));
        assert!(matches!(
            Matter::from_qb2(&Matter::from_qb64("4AAA").unwrap().qb2()),
            Ok(_)
        ));
    }

    #[test]
    fn test_unknown_selectors() {
        assert!(matches!(
            Matter::from_qb64("-AAB"),
            Err(CesrError::UnknownSelector('-'))
        ));
        assert!(matches!(
            Matter::from_qb64("_AAB"),
            Err(CesrError::UnknownSelector('_'))
        ));
        assert!(matches!(
            Matter::from_qb64("*AAB"),
            Err(CesrError::UnknownSelector('*'))
        ));
    }

    #[test]
    fn test_qb2_equals_decoded_qb64() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine as _;

        for matter in [
            Matter::new(codex::ED25519N, VERKEY).unwrap(),
            Matter::new(codex::SHORT, &[0x00, 0x01]).unwrap(),
            Matter::new(codex::BYTES_L0, b"abcde").unwrap(),
            Matter::with_soft(codex::TAG3, "icp", b"").unwrap(),
            Matter::new(codex::TBD1, b"ab").unwrap(),
        ] {
            let decoded = URL_SAFE_NO_PAD.decode(matter.qb64()).unwrap();
            assert_eq!(matter.qb2(), decoded);
        }
    }

    #[test]
    fn test_from_str_and_try_from() {
        let matter: Matter = VERKEY_QB64.parse().unwrap();
        assert_eq!(matter.raw(), VERKEY);

        let qb2 = matter.qb2();
        let back = Matter::try_from(qb2.as_slice()).unwrap();
        assert_eq!(back, matter);
    }
}
