//! Defines routes for the trigger and health endpoints.
//!
//! - `POST /events`  — storage-notification document; one pipeline run
//!   per record
//! - `GET  /healthz` — liveness
//! - `GET  /readyz`  — readiness (DB + disk checks)

use crate::handlers::{
    AppState,
    event_handlers::handle_events,
    health_handlers::{healthz, readyz},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for all endpoints.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/events", post(handle_events))
}
