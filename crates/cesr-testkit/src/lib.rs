//! # CESR Testkit
//!
//! Testing utilities for the CESR primitive layer.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known primitives with pinned qualified forms for
//!   cross-implementation verification
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: deterministic signers and field maps for test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cesr_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cesr_testkit::generators::matter;
//!
//! proptest! {
//!     #[test]
//!     fn qb64_roundtrips(m in matter()) {
//!         let back = cesr_core::Matter::from_qb64(&m.qb64()).unwrap();
//!         prop_assert_eq!(back, m);
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use cesr_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let cigar = fixture.signer.sign(b"payload").unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, sample_sad, TestFixture};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};
