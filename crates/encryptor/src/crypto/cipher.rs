//! AES-128-CTR cipher context: key validation and IV generation.
//!
//! **Mode choice:** CTR turns the block cipher into a stream cipher, so
//! ciphertext length equals plaintext length and the same construction
//! serves both directions. CTR provides confidentiality only — there is no
//! integrity tag, and a repeated (key, IV) pair leaks the XOR of the two
//! plaintexts. Every context therefore draws a fresh IV from the OS CSPRNG.

use aes::cipher::KeyIvInit;
use rand::{rngs::OsRng, TryRngCore};
use thiserror::Error;

/// AES-128 in counter mode with a 128-bit big-endian counter.
pub type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

/// Byte length of an AES-128 key.
pub const KEY_LEN: usize = 16;

/// Byte length of an AES block, and therefore of the IV.
pub const BLOCK_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The OS secure random source could not supply IV bytes.
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
}

/// An immutable (key, IV) pair bound to AES-128-CTR.
///
/// Built once per request; [`CipherContext::keystream`] hands out a fresh
/// stream positioned at byte offset 0 each time, so one context drives
/// exactly one encryption and the matching decryption.
#[derive(Clone)]
pub struct CipherContext {
    key: [u8; KEY_LEN],
    iv: [u8; BLOCK_LEN],
}

impl CipherContext {
    /// Build a context from `key` with a freshly generated IV.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
    /// bytes, or [`CipherError::RandomSource`] if the OS CSPRNG fails. Both
    /// abort the request, never the process.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        let mut iv = [0u8; BLOCK_LEN];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| CipherError::RandomSource(e.to_string()))?;
        Self::with_iv(key, iv)
    }

    /// Build a context from `key` and a caller-supplied IV.
    ///
    /// Decryption requires the exact IV used for the corresponding
    /// encryption; this constructor is how a caller re-binds it.
    pub fn with_iv(key: &[u8], iv: [u8; BLOCK_LEN]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength(key.len()));
        }
        let mut key_buf = [0u8; KEY_LEN];
        key_buf.copy_from_slice(key);
        Ok(Self { key: key_buf, iv })
    }

    /// A fresh CTR keystream positioned at byte offset 0.
    pub fn keystream(&self) -> Aes128Ctr {
        Aes128Ctr::new(&self.key.into(), &self.iv.into())
    }

    /// The IV bound to this context.
    // Retained for a future decrypt endpoint that echoes the IV to callers.
    #[allow(dead_code)]
    pub fn iv(&self) -> &[u8; BLOCK_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.debug_struct("CipherContext")
            .field("key", &"[REDACTED]")
            .field("iv", &self.iv)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_short_key() {
        let err = CipherContext::new(&[0u8; 8]).unwrap_err();
        assert!(matches!(err, CipherError::InvalidKeyLength(8)));
    }

    #[test]
    fn rejects_long_key() {
        assert!(CipherContext::new(&[0u8; 32]).is_err());
    }

    #[test]
    fn fresh_contexts_get_distinct_ivs() {
        let a = CipherContext::new(&[0x42u8; KEY_LEN]).unwrap();
        let b = CipherContext::new(&[0x42u8; KEY_LEN]).unwrap();
        assert_ne!(a.iv(), b.iv());
    }

    #[test]
    fn debug_never_leaks_key_material() {
        let ctx = CipherContext::with_iv(&[0xAAu8; KEY_LEN], [0u8; BLOCK_LEN]).unwrap();
        let repr = format!("{ctx:?}");
        assert!(repr.contains("REDACTED"));
        assert!(!repr.contains("170")); // 0xAA
    }

    #[test]
    fn ten_thousand_ivs_are_unique_and_uniform() {
        let key = [0x42u8; KEY_LEN];
        let mut seen = HashSet::new();
        let mut counts = [0u64; 256];

        for _ in 0..10_000 {
            let ctx = CipherContext::new(&key).unwrap();
            let iv = *ctx.iv();
            assert!(seen.insert(iv), "duplicate IV generated");
            for b in iv {
                counts[b as usize] += 1;
            }
        }

        // Chi-square over 160,000 byte samples in 256 bins: expected 625 per
        // bin, 255 degrees of freedom. A healthy CSPRNG lands near 255; 400
        // is more than six standard deviations out.
        let expected = (10_000 * BLOCK_LEN) as f64 / 256.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(
            chi_square < 400.0,
            "IV byte distribution failed uniformity check: chi-square = {chi_square}"
        );
    }
}
