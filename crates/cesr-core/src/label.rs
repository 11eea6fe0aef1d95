//! Soft-valued primitives: tags, message types, field labels, traits, and
//! protocol versions.
//!
//! A tag code stores its value directly in the soft part of the code, with
//! empty raw, so short Base64 words cost no more than their own length in
//! the qb64 domain.

use crate::b64::{b64_to_int, int_to_b64, is_b64};
use crate::error::CesrError;
use crate::matter::{Matter, Primitive};
use crate::number::Number;
use crate::tables::{codex, BEXT_CODES, NUMBER_CODES, TAG_CODES, TEXT_CODES};
use crate::text::{bext_to_raw, raw_to_bext};

/// Fixed-size Base64 token of one to ten characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagger {
    matter: Matter,
}

impl Tagger {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !TAG_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "tag",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a Base64 token of one to ten characters.
    pub fn new(tag: &str) -> Result<Self, CesrError> {
        if tag.is_empty() || tag.len() > TAG_CODES.len() {
            return Err(CesrError::ValueOverflow(format!(
                "tag length {} not in 1..={}",
                tag.len(),
                TAG_CODES.len()
            )));
        }
        if !is_b64(tag) {
            return Err(CesrError::InvalidBase64(tag.to_string()));
        }
        Self::validated(Matter::with_soft(TAG_CODES[tag.len() - 1], tag, b"")?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The carried token.
    pub fn tag(&self) -> &str {
        self.matter.soft()
    }
}

impl Primitive for Tagger {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Known message types.
pub const ILKS: &[&str] = &[
    "icp", "rot", "ixn", "dip", "drt", "rct", "qry", "rpy", "pro", "bar", "exn",
];

/// Three-character message-type marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ilker {
    matter: Matter,
}

impl Ilker {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if matter.code() != codex::TAG3 || !ILKS.contains(&matter.soft()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "message type",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a known message type.
    pub fn new(ilk: &str) -> Result<Self, CesrError> {
        if !ILKS.contains(&ilk) {
            return Err(CesrError::InvalidCode {
                code: ilk.to_string(),
                family: "message type",
            });
        }
        Self::validated(Matter::with_soft(codex::TAG3, ilk, b"")?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The message type.
    pub fn ilk(&self) -> &str {
        self.matter.soft()
    }
}

impl Primitive for Ilker {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Field-map label.
///
/// The code is chosen by content: decimal integers ride a number code,
/// short Base64 labels a tag code, longer Base64 labels a variable Base64
/// code, and anything else a variable byte-string code. `label()` inverts
/// the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeler {
    matter: Matter,
}

impl Labeler {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        let code = matter.code();
        let ok = NUMBER_CODES.contains(&code)
            || TAG_CODES.contains(&code)
            || BEXT_CODES.contains(&code)
            || TEXT_CODES.contains(&code);
        if !ok {
            return Err(CesrError::InvalidCode {
                code: code.to_string(),
                family: "label",
            });
        }
        Ok(Self { matter })
    }

    /// Build from label text.
    pub fn new(label: &str) -> Result<Self, CesrError> {
        // Decimal integers go through a number code, except forms with a
        // leading zero, which only round-trip as text.
        let decimal = label.len() == 1 || !label.starts_with('0');
        if decimal && !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(num) = label.parse::<u128>() {
                return Self::validated(Number::new(num)?.matter().clone());
            }
        }
        if is_b64(label) {
            if label.len() <= TAG_CODES.len() {
                return Self::validated(Matter::with_soft(
                    TAG_CODES[label.len() - 1],
                    label,
                    b"",
                )?);
            }
            return Self::validated(Matter::new(codex::STR_B64_L0, &bext_to_raw(label)?)?);
        }
        Self::validated(Matter::new(codex::BYTES_L0, label.as_bytes())?)
    }

    /// Build from an ordinal label.
    pub fn from_num(num: u128) -> Result<Self, CesrError> {
        Self::validated(Number::new(num)?.matter().clone())
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The label text.
    pub fn label(&self) -> Result<String, CesrError> {
        let code = self.code();
        if NUMBER_CODES.contains(&code) {
            let number = Number::from_raw(code, self.raw())?;
            return Ok(number.num()?.to_string());
        }
        if TAG_CODES.contains(&code) {
            return Ok(self.matter.soft().to_string());
        }
        if BEXT_CODES.contains(&code) {
            return Ok(raw_to_bext(self.raw()));
        }
        String::from_utf8(self.raw().to_vec())
            .map_err(|_| CesrError::InvalidBase64("label bytes are not utf-8".to_string()))
    }
}

impl Primitive for Labeler {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Known configuration traits.
pub const TRAITS: &[&str] = &["EO", "DND", "NB", "NRB", "DID"];

/// Configuration trait marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traitor {
    matter: Matter,
}

impl Traitor {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if !BEXT_CODES.contains(&matter.code()) {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "configuration trait",
            });
        }
        let traitor = Self { matter };
        if !TRAITS.contains(&traitor.name().as_str()) {
            return Err(CesrError::InvalidCode {
                code: traitor.name(),
                family: "configuration trait",
            });
        }
        Ok(traitor)
    }

    /// Build from a known trait name.
    pub fn new(name: &str) -> Result<Self, CesrError> {
        if !TRAITS.contains(&name) {
            return Err(CesrError::InvalidCode {
                code: name.to_string(),
                family: "configuration trait",
            });
        }
        Self::validated(Matter::new(codex::STR_B64_L0, &bext_to_raw(name)?)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The trait name.
    pub fn name(&self) -> String {
        raw_to_bext(self.raw())
    }
}

impl Primitive for Traitor {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}

/// Protocol version: four-character protocol name plus major.minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vrsn {
    pub major: u8,
    pub minor: u16,
}

/// Parsed content of a [`Verser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versage {
    /// Protocol name, four Base64 characters (e.g. `KERI`).
    pub proto: String,
    /// Protocol version.
    pub vrsn: Vrsn,
    /// Genus version, when carried.
    pub gvrsn: Option<Vrsn>,
}

/// Protocol-version primitive.
///
/// Soft layout is `PPPPMmm` (Tag7), or `PPPPMmmGgg` (Tag10) when a genus
/// version rides along: protocol name, then major as one Base64 char and
/// minor as two, repeated for the genus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verser {
    matter: Matter,
}

fn encode_vrsn(vrsn: Vrsn) -> Result<String, CesrError> {
    if vrsn.major >= 64 {
        return Err(CesrError::ValueOverflow(format!(
            "major version {} exceeds one base64 char",
            vrsn.major
        )));
    }
    if vrsn.minor >= 4096 {
        return Err(CesrError::ValueOverflow(format!(
            "minor version {} exceeds two base64 chars",
            vrsn.minor
        )));
    }
    Ok(format!(
        "{}{}",
        int_to_b64(vrsn.major as u128, 1),
        int_to_b64(vrsn.minor as u128, 2)
    ))
}

fn decode_vrsn(text: &str) -> Result<Vrsn, CesrError> {
    Ok(Vrsn {
        major: b64_to_int(&text[..1])? as u8,
        minor: b64_to_int(&text[1..3])? as u16,
    })
}

impl Verser {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if matter.code() != codex::TAG7 && matter.code() != codex::TAG10 {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "version",
            });
        }
        Ok(Self { matter })
    }

    /// Build from a versage.
    pub fn new(versage: &Versage) -> Result<Self, CesrError> {
        if versage.proto.len() != 4 || !is_b64(&versage.proto) {
            return Err(CesrError::InvalidSoft {
                code: codex::TAG7.to_string(),
                reason: format!("protocol must be 4 base64 chars, got {:?}", versage.proto),
            });
        }
        let mut soft = versage.proto.clone();
        soft.push_str(&encode_vrsn(versage.vrsn)?);
        match versage.gvrsn {
            None => Self::validated(Matter::with_soft(codex::TAG7, &soft, b"")?),
            Some(gvrsn) => {
                soft.push_str(&encode_vrsn(gvrsn)?);
                Self::validated(Matter::with_soft(codex::TAG10, &soft, b"")?)
            }
        }
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The parsed versage.
    pub fn versage(&self) -> Result<Versage, CesrError> {
        let soft = self.matter.soft();
        let proto = soft[..4].to_string();
        let vrsn = decode_vrsn(&soft[4..7])?;
        let gvrsn = match soft.len() {
            7 => None,
            _ => Some(decode_vrsn(&soft[7..10])?),
        };
        Ok(Versage { proto, vrsn, gvrsn })
    }
}

impl Primitive for Verser {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}
