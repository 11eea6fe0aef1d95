//! # CESR Core
//!
//! Primitive layer for Composable Event Streaming Representation: every
//! cryptographic value carries a compact derivation code naming its cipher
//! suite and sizes, and converts bit-for-bit between a textual (Base64-URL)
//! and a binary qualified form.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over qualified cryptographic material.
//!
//! ## Key Types
//!
//! - [`Matter`] - The encoding engine shared by every typed primitive
//! - [`Verfer`] / [`Signer`] / [`Cigar`] - Keys and signatures
//! - [`Diger`] / [`Prefixer`] / [`Saider`] - Digests and self-addressing
//!   identifiers
//! - [`Number`] / [`Seqner`] / [`Dater`] - Ordinals, sequence numbers, and
//!   datetimes
//! - [`Tagger`] / [`Texter`] / [`Bexter`] / [`Pather`] / [`Labeler`] /
//!   [`Ilker`] / [`Traitor`] / [`Verser`] - Tokens, text, paths, and labels
//!
//! ## Qualified forms
//!
//! Every primitive projects to `qb64` (text), `qb64b` (text as bytes), and
//! `qb2` (binary), and reconstructs from any of them:
//!
//! ```rust
//! use cesr_core::{codex, Matter};
//!
//! let matter = Matter::new(codex::ED25519N, &[0u8; 32]).unwrap();
//! assert_eq!(matter.qb64().len(), 44);
//! assert_eq!(Matter::from_qb64(&matter.qb64()).unwrap(), matter);
//! assert_eq!(Matter::from_qb2(&matter.qb2()).unwrap(), matter);
//! ```

mod b64;
pub mod crypto;
pub mod dater;
pub mod digesting;
pub mod error;
pub mod label;
pub mod matter;
pub mod number;
pub mod signing;
pub mod tables;
pub mod text;

pub use crypto::{default_gateway, CryptoGateway, StockCrypto};
pub use dater::Dater;
pub use digesting::{Diger, Prefixer, Saider};
pub use error::CesrError;
pub use label::{Ilker, Labeler, Tagger, Traitor, Versage, Verser, Vrsn, ILKS, TRAITS};
pub use matter::{Matter, Primitive};
pub use number::{Number, Seqner};
pub use signing::{Cigar, Signer, Verfer};
pub use tables::{codex, hard_size, raw_size, sizage, Sizage};
pub use text::{Bexter, Pather, Texter};
