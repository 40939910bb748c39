//! Axum request handlers for all service endpoints.

use std::io::{Read, Write};

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::{EncodeForm, EncodeReport, ErrorResponse, HealthResponse};
use common::ServiceError;
use thiserror::Error;
use tracing::warn;

use crate::crypto::cipher::{CipherContext, CipherError};
use crate::crypto::kdf::{self, KdfError};
use crate::crypto::stream::{DecryptingReader, EncryptingWriter};
use super::state::AppState;

/// Entry form served at `GET /`.
///
/// Embedded at compile time; never re-read or mutated while serving.
const INDEX_HTML: &str = include_str!("index.html");

/// Any failure inside the per-request transform pipeline.
///
/// All variants are request-scoped: the handler converts them into a 500
/// response and the process keeps serving.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Passphrase hashing failed.
    #[error(transparent)]
    Kdf(#[from] KdfError),

    /// Key validation or IV generation failed.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// The wrapped in-memory stream reported an I/O failure.
    #[error("stream transform failed: {0}")]
    Io(#[from] std::io::Error),
}

/// `POST /encode` — encrypt the submitted message and demonstrate the round
/// trip.
///
/// The response body is the plain-text report
/// `ENCRYPTED: <base64>\nMESSAGE: <status>\nCODE: <numeric>\n` with the
/// decrypted plaintext appended directly after it. Malformed form bodies get
/// the standard JSON error response with a 400, not axum's plain-text
/// rejection.
pub async fn encode(
    State(state): State<AppState>,
    form: Result<Form<EncodeForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(f) => f,
        Err(e) => return error_response(ServiceError::BadRequest(e.body_text())),
    };

    // bcrypt is CPU-bound; keep it off the async reactor.
    let outcome =
        tokio::task::spawn_blocking(move || transform(&form.key, &form.message, state.kdf_cost))
            .await;

    let body = match outcome {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            warn!(error = %e, "transform failed");
            return error_response(ServiceError::CryptoFailure(e.to_string()));
        }
        Err(e) => {
            warn!(error = %e, "transform task panicked");
            return error_response(ServiceError::Internal("transform task failed".into()));
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// `GET /` — render the static HTML entry form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health` — liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Render a [`ServiceError`] as the standard JSON error response.
fn error_response(err: ServiceError) -> Response {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.code(), err.to_string());
    (status, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Transform pipeline
// ---------------------------------------------------------------------------

/// Run one message through the full pipeline: derive key, build context,
/// encrypt, render the report, decrypt with the same context, and append the
/// recovered plaintext.
fn transform(passphrase: &str, message: &str, cost: u32) -> Result<Vec<u8>, TransformError> {
    let key = kdf::derive_key(passphrase.as_bytes(), cost)?;
    let context = CipherContext::new(&key)?;

    let mut writer = EncryptingWriter::new(Vec::new(), context.keystream());
    writer.write_all(message.as_bytes())?;
    let ciphertext = writer.into_inner();

    let report = EncodeReport {
        code: StatusCode::OK.as_u16(),
        message: format!("encrypted {} bytes with AES-128-CTR", message.len()),
        ciphertext: STANDARD.encode(&ciphertext),
    };
    let mut body = report.render().into_bytes();

    // Same context, fresh keystream: the decrypt half of the demonstration.
    let mut reader = DecryptingReader::new(ciphertext.as_slice(), context.keystream());
    reader.read_to_end(&mut body)?;

    Ok(body)
}
