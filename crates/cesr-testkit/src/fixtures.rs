//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use cesr_core::{codex, Diger, Prefixer, Primitive as _, Saider, Signer};
use serde_json::{json, Value};

/// A test fixture with a deterministic signer.
pub struct TestFixture {
    pub signer: Signer,
}

impl TestFixture {
    /// Create a fixture with the default deterministic seed.
    pub fn new() -> Self {
        Self::with_seed([0x42; 32])
    }

    /// Create with a specific seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            signer: Signer::from_seed(codex::ED25519_SEED, &seed, true)
                .expect("ed25519 seed fixture"),
        }
    }

    /// The signer's verification key in qualified form.
    pub fn verfer_qb64(&self) -> String {
        self.signer.verfer().qb64()
    }

    /// A minimal inception field map keyed by this fixture's key.
    pub fn inception_sad(&self) -> Value {
        json!({
            "v": "KERI10JSON0000fb_",
            "t": "icp",
            "d": "",
            "i": "",
            "s": "0",
            "k": [self.verfer_qb64()],
            "n": [],
        })
    }

    /// A self-addressed inception map with its prefix filled in.
    pub fn incepted_sad(&self) -> (Value, Prefixer) {
        let sad = self.inception_sad();
        let prefixer =
            Prefixer::from_sad(&sad, Prefixer::DEFAULT_CODE).expect("inception derivation");
        let mut filled = sad;
        filled["i"] = Value::String(prefixer.qb64());
        filled["d"] = Value::String(prefixer.qb64());
        (filled, prefixer)
    }

    /// Digest of arbitrary content with the default code.
    pub fn diger(&self, content: &[u8]) -> Diger {
        Diger::from_ser(content, Diger::DEFAULT_CODE).expect("digest fixture")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures with distinct deterministic seeds.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 0xA5;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A small self-addressed credential-like field map.
pub fn sample_sad() -> (Value, Saider) {
    let sad = json!({
        "d": "",
        "first": "John",
        "last": "Doe",
        "role": "inspector",
    });
    let (filled, saider) =
        Saider::saidify(&sad, "d", Saider::DEFAULT_CODE).expect("saidify fixture");
    (filled, saider)
}
