//! AES-128-CTR streaming encryption primitives.
//!
//! This module is intentionally free of HTTP dependencies. It provides the
//! key-derivation, cipher-context, and stream-transform layers the encode
//! handler composes per request.
//!
//! # Pipeline
//!
//! ```text
//! passphrase --kdf--> [u8; 16] key --cipher--> CipherContext (key, fresh IV)
//!                                                  |
//!                              stream::EncryptingWriter / DecryptingReader
//! ```
//!
//! A [`cipher::CipherContext`] is built once per request and serves exactly
//! one encrypt plus the matching decrypt; nothing is cached across requests.

pub mod cipher;
pub mod kdf;
pub mod stream;

pub use cipher::{BLOCK_LEN, KEY_LEN};
