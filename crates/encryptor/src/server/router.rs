//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// `request_tracing` attaches a [`TraceLayer`] that logs every request and
/// response; it is enabled only in development deploy mode.
pub fn build(state: AppState, request_tracing: bool) -> Router {
    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/encode", post(handlers::encode))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state);

    if request_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
