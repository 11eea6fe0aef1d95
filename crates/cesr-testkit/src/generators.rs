//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cesr_core::{codex, raw_size, Matter, Number, Primitive as _, Signer, Tagger};

/// Fixed-size codes with plain (empty-soft) payloads, one per pad class
/// and hard-size shape.
pub const FIXED_CODES: &[&str] = &[
    codex::ED25519_SEED,
    codex::ED25519N,
    codex::ED25519,
    codex::BLAKE3_256,
    codex::SHA3_256,
    codex::ED448_SEED,
    codex::SHORT,
    codex::BIG,
    codex::SALT_128,
    codex::HUGE,
    codex::GREAT,
    codex::ED25519_SIG,
    codex::SHA2_512,
    codex::ECDSA_256K1,
    codex::DATE_TIME,
    codex::TBD0,
    codex::TBD1,
    codex::TBD2,
];

/// Variable-size code families (any lead sibling; the engine reselects).
pub const VARIABLE_CODES: &[&str] = &[codex::STR_B64_L0, codex::BYTES_L0];

/// Strategy over fixed codes.
pub fn fixed_code() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(FIXED_CODES)
}

/// Strategy producing a Matter with a fixed code and random raw of the
/// code's exact size.
pub fn fixed_matter() -> impl Strategy<Value = Matter> {
    fixed_code().prop_flat_map(|code| {
        let rs = raw_size(code).expect("generator codes are fixed-size");
        prop::collection::vec(any::<u8>(), rs)
            .prop_map(move |raw| Matter::new(code, &raw).expect("exact-size raw"))
    })
}

/// Strategy producing a variable-size Matter with random payload.
pub fn variable_matter() -> impl Strategy<Value = Matter> {
    (
        proptest::sample::select(VARIABLE_CODES),
        prop::collection::vec(any::<u8>(), 0..200),
    )
        .prop_map(|(code, raw)| Matter::new(code, &raw).expect("variable raw"))
}

/// Strategy over either kind of Matter.
pub fn matter() -> impl Strategy<Value = Matter> {
    prop_oneof![fixed_matter(), variable_matter()]
}

/// Strategy over Base64 tags of one to ten characters.
pub fn tag() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,10}".prop_map(String::from)
}

/// Strategy over Base64 text.
pub fn bext() -> impl Strategy<Value = String> {
    "[B-Za-z0-9_-][A-Za-z0-9_-]{0,47}".prop_map(String::from)
}

/// Strategy over encodable ordinals, weighted across code widths.
pub fn ordinal() -> impl Strategy<Value = u128> {
    prop_oneof![
        0u128..=u16::MAX as u128,
        (u16::MAX as u128 + 1)..=u64::MAX as u128,
        (u64::MAX as u128 + 1)..=u128::MAX,
    ]
}

/// Strategy over deterministic signers.
pub fn signer() -> impl Strategy<Value = Signer> {
    (any::<[u8; 32]>(), any::<bool>()).prop_map(|(seed, transferable)| {
        Signer::from_seed(codex::ED25519_SEED, &seed, transferable).expect("ed25519 seed")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cesr_core::{Bexter, Diger, Saider};
    use serde_json::json;

    proptest! {
        #[test]
        fn prop_qb64_roundtrip(matter in matter()) {
            let back = Matter::from_qb64(&matter.qb64()).unwrap();
            prop_assert_eq!(back, matter);
        }

        #[test]
        fn prop_qb64b_roundtrip(matter in matter()) {
            let back = Matter::from_qb64b(&matter.qb64b()).unwrap();
            prop_assert_eq!(back, matter);
        }

        #[test]
        fn prop_qb2_roundtrip(matter in matter()) {
            let back = Matter::from_qb2(&matter.qb2()).unwrap();
            prop_assert_eq!(back, matter);
        }

        #[test]
        fn prop_qb64_length_is_full_size(matter in matter()) {
            prop_assert_eq!(matter.qb64().len(), matter.full_size());
            prop_assert_eq!(matter.qb64().len() % 4, 0);
            prop_assert_eq!(matter.qb2().len() * 4, matter.qb64().len() * 3);
        }

        #[test]
        fn prop_truncated_qb64_rejected(matter in matter()) {
            let qb64 = matter.qb64();
            let truncated = &qb64[..qb64.len() - 1];
            prop_assert!(Matter::from_qb64(truncated).is_err());
        }

        #[test]
        fn prop_number_roundtrip(num in ordinal()) {
            let number = Number::new(num).unwrap();
            prop_assert_eq!(number.num().unwrap(), num);
            let back = Number::from_qb64(&number.qb64()).unwrap();
            prop_assert_eq!(back.num().unwrap(), num);
        }

        #[test]
        fn prop_number_ordering(a in ordinal(), b in ordinal()) {
            let na = Number::new(a).unwrap().num().unwrap();
            let nb = Number::new(b).unwrap().num().unwrap();
            prop_assert_eq!(a < b, na < nb);
        }

        #[test]
        fn prop_tagger_roundtrip(tag in tag()) {
            let tagger = Tagger::new(&tag).unwrap();
            let back = Tagger::from_qb64(&tagger.qb64()).unwrap();
            prop_assert_eq!(back.tag(), tag);
        }

        #[test]
        fn prop_bexter_roundtrip(bext in bext()) {
            // generator avoids the leading-'A' wad ambiguity
            let bexter = Bexter::new(&bext).unwrap();
            prop_assert_eq!(bexter.bext(), bext.clone());
            let back = Bexter::from_qb64(&bexter.qb64()).unwrap();
            prop_assert_eq!(back.bext(), bext);
        }

        #[test]
        fn prop_sign_verify(signer in signer(), message in prop::collection::vec(any::<u8>(), 0..256)) {
            let cigar = signer.sign(&message).unwrap();
            prop_assert!(signer.verfer().verify(cigar.raw(), &message).unwrap());

            let mut flipped = message.clone();
            if flipped.is_empty() {
                flipped.push(1);
            } else {
                flipped[0] ^= 0x01;
            }
            prop_assert!(!signer.verfer().verify(cigar.raw(), &flipped).unwrap());
        }

        #[test]
        fn prop_diger_verify(content in prop::collection::vec(any::<u8>(), 0..256)) {
            let diger = Diger::from_ser(&content, Diger::DEFAULT_CODE).unwrap();
            prop_assert!(diger.verify(&content).unwrap());

            let mut flipped = content.clone();
            if flipped.is_empty() {
                flipped.push(1);
            } else {
                flipped[0] ^= 0x80;
            }
            prop_assert!(!diger.verify(&flipped).unwrap());
        }

        #[test]
        fn prop_saidify_verify(first in "[a-z]{1,16}", last in "[a-z]{1,16}") {
            prop_assume!(first != "tampered");
            let sad = json!({"d": "", "first": first, "last": last});
            let (filled, saider) = Saider::saidify(&sad, "d", Saider::DEFAULT_CODE).unwrap();
            prop_assert!(saider.verify(&filled, "d").unwrap());

            let mut tampered = filled.clone();
            tampered["first"] = json!("tampered");
            prop_assert!(!saider.verify(&tampered, "d").unwrap());
        }
    }
}
