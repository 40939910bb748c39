//! Passphrase-to-key derivation via bcrypt.
//!
//! The derived key is the first [`KEY_LEN`] bytes of the formatted bcrypt
//! hash. bcrypt salts every call from the OS CSPRNG, so two derivations of
//! the same passphrase yield different keys — the service encrypts and
//! decrypts within a single request, so a fresh key per request is the
//! intended property. Callers that need to decrypt in a later, independent
//! request must use [`derive_key_with_salt`] and persist the salt.

use thiserror::Error;

use super::KEY_LEN;

/// Errors produced by key derivation.
#[derive(Debug, Error)]
pub enum KdfError {
    /// The underlying bcrypt primitive rejected the input or its RNG failed.
    #[error("passphrase hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Derive a [`KEY_LEN`]-byte key from `passphrase` with a fresh random salt.
///
/// `cost` is the bcrypt work factor (valid range 4..=31). The passphrase may
/// be empty and may contain NUL bytes; bcrypt truncates input beyond 72 bytes.
///
/// # Errors
///
/// Returns [`KdfError::Hash`] if `cost` is out of range or the salt source
/// is unavailable.
pub fn derive_key(passphrase: &[u8], cost: u32) -> Result<[u8; KEY_LEN], KdfError> {
    let hashed = bcrypt::hash(passphrase, cost)?;
    Ok(truncate_hash(hashed.as_bytes()))
}

/// Deterministic variant of [`derive_key`] with a caller-supplied salt.
///
/// Identical (passphrase, cost, salt) inputs always produce the identical
/// key, which is what cross-request decryption requires.
// Retained for a future decrypt endpoint that accepts a stored salt.
#[allow(dead_code)]
pub fn derive_key_with_salt(
    passphrase: &[u8],
    cost: u32,
    salt: [u8; 16],
) -> Result<[u8; KEY_LEN], KdfError> {
    let parts = bcrypt::hash_with_salt(passphrase, cost, salt)?;
    Ok(truncate_hash(
        parts.format_for_version(bcrypt::Version::TwoB).as_bytes(),
    ))
}

/// Take the first [`KEY_LEN`] bytes of a formatted bcrypt hash.
///
/// A formatted hash is always 59 or 60 ASCII bytes, so the slice never
/// comes up short.
fn truncate_hash(hash: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&hash[..KEY_LEN]);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt work factor; keeps the test suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn key_is_exactly_16_bytes() {
        let key = derive_key(b"ilovedogs", TEST_COST).unwrap();
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn empty_passphrase_still_yields_16_bytes() {
        let key = derive_key(b"", TEST_COST).unwrap();
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn very_long_passphrase_yields_16_bytes() {
        let long = vec![b'a'; 4096];
        let key = derive_key(&long, TEST_COST).unwrap();
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn embedded_nul_bytes_yield_16_bytes() {
        let key = derive_key(b"pass\0word\0", TEST_COST).unwrap();
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn repeated_derivation_differs_due_to_random_salt() {
        let a = derive_key(b"ilovedogs", TEST_COST).unwrap();
        let b = derive_key(b"ilovedogs", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn salted_derivation_is_deterministic() {
        let salt = [7u8; 16];
        let a = derive_key_with_salt(b"ilovedogs", TEST_COST, salt).unwrap();
        let b = derive_key_with_salt(b"ilovedogs", TEST_COST, salt).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_cost_is_rejected() {
        assert!(derive_key(b"ilovedogs", 99).is_err());
    }
}
