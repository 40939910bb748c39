//! Request and response types exchanged between the browser form and the service.
//!
//! The encode endpoint speaks `application/x-www-form-urlencoded` on the way
//! in and a plain-text report on the way out; errors and health checks use
//! JSON bodies.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encode endpoint
// ---------------------------------------------------------------------------

/// Form fields submitted to `POST /encode`.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodeForm {
    /// Plaintext message to encrypt.
    pub message: String,
    /// Passphrase the key is derived from.
    pub key: String,
}

/// Per-request outcome of the encrypt/decrypt demonstration.
///
/// Rendered as a plain-text block:
///
/// ```text
/// ENCRYPTED: <base64 ciphertext>
/// MESSAGE: <status message>
/// CODE: <numeric status>
/// ```
///
/// The handler appends the round-tripped plaintext directly after the block.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeReport {
    /// Numeric status code echoed in the body.
    pub code: u16,
    /// Human-readable status message.
    pub message: String,
    /// Base64-encoded ciphertext. Ciphertext is always encoded at the
    /// response boundary; raw cipher bytes never appear in a text body.
    pub ciphertext: String,
}

impl EncodeReport {
    /// Render the report header block, trailing newline included.
    pub fn render(&self) -> String {
        format!(
            "ENCRYPTED: {}\nMESSAGE: {}\nCODE: {}\n",
            self.ciphertext, self.message, self.code
        )
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"internal_error"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is accepting.
    pub status: String,
    /// Crate version serving the request.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_form_deserialises_from_urlencoded() {
        let form: EncodeForm =
            serde_urlencoded::from_str("message=hello+there&key=ilovedogs").unwrap();
        assert_eq!(form.message, "hello there");
        assert_eq!(form.key, "ilovedogs");
    }

    #[test]
    fn report_renders_all_lines() {
        let report = EncodeReport {
            code: 200,
            message: "encoded 5 bytes".into(),
            ciphertext: "3q2+7w".into(),
        };
        let text = report.render();
        assert_eq!(text, "ENCRYPTED: 3q2+7w\nMESSAGE: encoded 5 bytes\nCODE: 200\n");
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("internal_error", "encryption failed");
        assert_eq!(e.code, "internal_error");
        assert!(e.message.contains("encryption failed"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            version: "0.1.0".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.status, "ok");
    }
}
