//! Ordinal numbers and sequence numbers.
//!
//! Integers encode big-endian at the minimum admissible width: 2, 8, 16,
//! or 24 bytes. The 24-byte width exists for material arriving in qualified
//! form; values constructed from native integers top out at `u128`.

use crate::error::CesrError;
use crate::matter::{Matter, Primitive};
use crate::tables::{codex, NUMBER_CODES};

/// Strip an optional `0x` prefix and parse bare hex.
fn parse_hex(text: &str) -> Result<u128, CesrError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u128::from_str_radix(digits, 16)
        .map_err(|_| CesrError::ValueOverflow(format!("not parseable hex: {text:?}")))
}

/// Big-endian bytes of `num` at exactly `width` bytes.
fn be_bytes(num: u128, width: usize) -> Vec<u8> {
    let full = num.to_be_bytes();
    full[full.len() - width..].to_vec()
}

/// Arbitrary ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    matter: Matter,
}

impl Number {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !NUMBER_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "number",
            });
        }
        Ok(Self { matter })
    }

    /// Encode `num` at the minimum admissible width.
    pub fn new(num: u128) -> Result<Self, CesrError> {
        let (code, width) = if num <= u16::MAX as u128 {
            (codex::SHORT, 2)
        } else if num <= u64::MAX as u128 {
            (codex::BIG, 8)
        } else {
            (codex::HUGE, 16)
        };
        Self::validated(Matter::new(code, &be_bytes(num, width))?)
    }

    /// Build from a hex string, `0x`-prefixed or bare.
    pub fn from_hex(text: &str) -> Result<Self, CesrError> {
        Self::new(parse_hex(text)?)
    }

    /// Build from a number code and raw big-endian bytes.
    pub fn from_raw(code: &str, raw: &[u8]) -> Result<Self, CesrError> {
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

    /// The ordinal value.
    ///
    /// Fails with `ValueOverflow` when 24-byte material exceeds `u128`.
    pub fn num(&self) -> Result<u128, CesrError> {
        let raw = self.raw();
        if raw.len() > 16 {
            let (head, tail) = raw.split_at(raw.len() - 16);
            if head.iter().any(|b| *b != 0) {
                return Err(CesrError::ValueOverflow(format!(
                    "number raw {:02x?} exceeds u128",
                    raw
                )));
            }
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(tail);
            return Ok(u128::from_be_bytes(bytes));
        }
        let mut bytes = [0u8; 16];
        bytes[16 - raw.len()..].copy_from_slice(raw);
        Ok(u128::from_be_bytes(bytes))
    }

    /// Hex rendering of the ordinal value.
    pub fn numh(&self) -> Result<String, CesrError> {
        Ok(format!("{:x}", self.num()?))
    }
}

impl Primitive for Number {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// 128-bit sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seqner {
    matter: Matter,
}

impl Seqner {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if matter.code() != codex::SALT_128 {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "sequence number",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a sequence number.
    pub fn new(sn: u128) -> Self {
        let matter = Matter::new(codex::SALT_128, &sn.to_be_bytes())
            .expect("sequence numbers are always 16 raw bytes");
        Self { matter }
    }

    /// Build from a hex string, `0x`-prefixed or bare.
    pub fn from_snh(text: &str) -> Result<Self, CesrError> {
        Ok(Self::new(parse_hex(text)?))
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The sequence number.
    pub fn sn(&self) -> u128 {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(self.raw());
        u128::from_be_bytes(bytes)
    }

    /// Hex rendering of the sequence number.
    pub fn snh(&self) -> String {
        format!("{:x}", self.sn())
    }
}

impl Primitive for Seqner {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_code_selection() {
        assert_eq!(Number::new(0).unwrap().code(), codex::SHORT);
        assert_eq!(Number::new(65535).unwrap().code(), codex::SHORT);
        assert_eq!(Number::new(65536).unwrap().code(), codex::BIG);
        assert_eq!(Number::new(u64::MAX as u128).unwrap().code(), codex::BIG);
        assert_eq!(Number::new(u64::MAX as u128 + 1).unwrap().code(), codex::HUGE);
        assert_eq!(Number::new(u128::MAX).unwrap().code(), codex::HUGE);
    }

    #[test]
    fn test_number_qb64_fixtures() {
        assert_eq!(Number::new(0).unwrap().qb64(), "MAAA");
        assert_eq!(Number::new(1).unwrap().qb64(), "MAAB");
        assert_eq!(Number::new(65535).unwrap().qb64(), "MP__");
        assert_eq!(Number::new(65536).unwrap().qb64(), "NAAAAAAAAQAA");
    }

    #[test]
    fn test_number_roundtrip() {
        for num in [0u128, 1, 42, 65535, 65536, 1 << 32, u64::MAX as u128, u128::MAX] {
            let number = Number::new(num).unwrap();
            assert_eq!(number.num().unwrap(), num);

            let back = Number::from_qb64(&number.qb64()).unwrap();
            assert_eq!(back, number);
            assert_eq!(back.num().unwrap(), num);

            let back = Number::from_qb2(&number.qb2()).unwrap();
            assert_eq!(back.num().unwrap(), num);
        }
    }

    #[test]
    fn test_number_ordering() {
        let values = [0u128, 1, 2, 65534, 65535, 65536, 1 << 40, u128::MAX];
        for window in values.windows(2) {
            let a = Number::new(window[0]).unwrap();
            let b = Number::new(window[1]).unwrap();
            assert!(a.num().unwrap() < b.num().unwrap());
        }
    }

    #[test]
    fn test_number_hex() {
        assert_eq!(Number::from_hex("0x10").unwrap().num().unwrap(), 16);
        assert_eq!(Number::from_hex("ff").unwrap().num().unwrap(), 255);
        assert_eq!(Number::new(255).unwrap().numh().unwrap(), "ff");
        assert!(matches!(
            Number::from_hex("zz"),
            Err(CesrError::ValueOverflow(_))
        ));
        // 25 hex bytes overflow u128
        assert!(matches!(
            Number::from_hex(&"ff".repeat(17)),
            Err(CesrError::ValueOverflow(_))
        ));
    }

    #[test]
    fn test_number_great_raw() {
        // 24-byte material within u128 range parses
        let mut raw = [0u8; 24];
        raw[23] = 7;
        let number = Number::from_raw(codex::GREAT, &raw).unwrap();
        assert_eq!(number.num().unwrap(), 7);

        // above u128 the accessor overflows
        let mut raw = [0u8; 24];
        raw[0] = 1;
        let number = Number::from_raw(codex::GREAT, &raw).unwrap();
        assert!(matches!(number.num(), Err(CesrError::ValueOverflow(_))));
    }

    #[test]
    fn test_number_rejects_non_number_code() {
        assert!(matches!(
            Number::from_raw(codex::ED25519, &[0u8; 32]),
            Err(CesrError::InvalidCode { family: "number", .. })
        ));
        assert!(matches!(
            Number::from_qb64("EAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"),
            Err(CesrError::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_seqner_fixtures() {
        assert_eq!(Seqner::new(0).qb64(), "0AAAAAAAAAAAAAAAAAAAAAAA");
        assert_eq!(Seqner::new(1).qb64(), "0AAAAAAAAAAAAAAAAAAAAAAB");
        assert_eq!(Seqner::new(1).qb64().len(), 24);
    }

    #[test]
    fn test_seqner_roundtrip() {
        for sn in [0u128, 1, 42, u64::MAX as u128, u128::MAX] {
            let seqner = Seqner::new(sn);
            assert_eq!(seqner.sn(), sn);

            let back = Seqner::from_qb64(&seqner.qb64()).unwrap();
            assert_eq!(back, seqner);

            let back = Seqner::from_qb2(&seqner.qb2()).unwrap();
            assert_eq!(back.sn(), sn);
        }
    }

    #[test]
    fn test_seqner_hex() {
        let seqner = Seqner::from_snh("0xff").unwrap();
        assert_eq!(seqner.sn(), 255);
        assert_eq!(seqner.snh(), "ff");

        let seqner = Seqner::from_snh("a").unwrap();
        assert_eq!(seqner.sn(), 10);
    }

    #[test]
    fn test_seqner_rejects_other_codes() {
        // a Number qb64 is not a sequence number
        assert!(matches!(
            Seqner::from_qb64("MAAB"),
            Err(CesrError::InvalidCode { family: "sequence number", .. })
        ));
    }
}
