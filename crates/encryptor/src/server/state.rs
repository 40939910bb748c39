//! Shared application state injected into every Axum handler.

/// Application state shared across all request handlers.
///
/// Deliberately tiny: the service derives fresh key material per request and
/// caches nothing, so the only state a handler needs is the KDF work factor.
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    /// bcrypt work factor used for passphrase-to-key derivation.
    pub kdf_cost: u32,
}

impl AppState {
    /// Create a new [`AppState`] with the provided KDF cost.
    pub fn new(kdf_cost: u32) -> Self {
        Self { kdf_cost }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] matching the config default.
    fn default() -> Self {
        Self::new(8)
    }
}
