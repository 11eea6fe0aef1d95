//! RFC-3339 datetime primitive.
//!
//! The raw payload is the ASCII of the canonical 32-character form with
//! `:` → `c`, `.` → `d`, and `+` → `p` substituted so the text is valid
//! URL-safe Base64; the substitution reverses on projection. The canonical
//! form always materializes six fractional digits and a numeric offset.

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::b64::{decode_b64, encode_b64};
use crate::error::CesrError;
use crate::matter::{Matter, Primitive};
use crate::tables::codex;

/// Canonical 32-character rendering, e.g. `2020-08-22T17:50:09.988921+00:00`.
fn canonical(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn substitute(dts: &str) -> String {
    dts.chars()
        .map(|c| match c {
            ':' => 'c',
            '.' => 'd',
            '+' => 'p',
            other => other,
        })
        .collect()
}

fn unsubstitute(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'c' => ':',
            'd' => '.',
            'p' => '+',
            other => other,
        })
        .collect()
}

/// RFC-3339 datetime with microseconds and explicit offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dater {
    matter: Matter,
}

impl Dater {
    fn validated(matter: Matter) -> Result<Self, CesrError> {
        if matter.code() != codex::DATE_TIME {
            return Err(CesrError::InvalidCode {
                code: matter.code().to_string(),
                family: "datetime",
            });
        }
        Ok(Self { matter })
    }

    /// Build from an RFC-3339 datetime string, normalizing to canonical form.
    pub fn new(dts: &str) -> Result<Self, CesrError> {
        let dt = DateTime::parse_from_rfc3339(dts)
            .map_err(|_| CesrError::ValueOverflow(format!("unencodable datetime {dts:?}")))?;
        Self::from_datetime(&dt)
    }

    /// Build from a parsed datetime.
    pub fn from_datetime(dt: &DateTime<FixedOffset>) -> Result<Self, CesrError> {
        let dts = canonical(dt);
        let text = substitute(&dts);
        if text.len() != 32 {
            return Err(CesrError::ValueOverflow(format!(
                "unencodable datetime {dts:?}"
            )));
        }
        let raw = decode_b64(&text)?;
        Self::validated(Matter::new(codex::DATE_TIME, &raw)?)
    }

    /// Build from the textual qualified form.
    pub fn from_qb64(qb64: &str) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb64(qb64)?)
    }

    /// Build from the binary qualified form.
    pub fn from_qb2(qb2: &[u8]) -> Result<Self, CesrError> {
        Self::validated(Matter::from_qb2(qb2)?)
    }

    /// The canonical datetime string.
    pub fn dts(&self) -> String {
        unsubstitute(&encode_b64(self.raw()))
    }

    /// The parsed datetime.
    pub fn datetime(&self) -> Result<DateTime<FixedOffset>, CesrError> {
        let dts = self.dts();
        DateTime::parse_from_rfc3339(&dts)
            .map_err(|_| CesrError::ValueOverflow(format!("undecodable datetime {dts:?}")))
    }
}

impl Primitive for Dater {
    fn matter(&self) -> &Matter {
        &self.matter
    }
}
