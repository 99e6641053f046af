//! The trigger endpoint.
//!
//! `POST /events` accepts a storage-notification document and runs the
//! pipeline once per record. Every record gets exactly one completion
//! entry in the response body; a failed run is reported there as a
//! human-readable description, never as a process fault.

use crate::{
    errors::AppError,
    handlers::AppState,
    models::event::{NotificationDocument, TriggerEvent},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

/// Completion signal for one pipeline run.
#[derive(Debug, Serialize)]
pub struct RunCompletion {
    pub bucket: String,
    pub key: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub results: Vec<RunCompletion>,
}

/// `POST /events`
pub async fn handle_events(
    State(state): State<AppState>,
    Json(doc): Json<NotificationDocument>,
) -> Result<impl IntoResponse, AppError> {
    if doc.records.is_empty() {
        return Err(AppError::bad_request("notification document has no records"));
    }

    let mut results = Vec::with_capacity(doc.records.len());

    for record in &doc.records {
        let event = TriggerEvent::from(record);
        match state.thumbnailer.run(&event).await {
            Ok(outcome) => results.push(RunCompletion {
                bucket: event.bucket,
                key: event.key,
                ok: true,
                thumbnail_key: Some(outcome.thumbnail_key),
                width: Some(outcome.scaled_dimensions.0),
                height: Some(outcome.scaled_dimensions.1),
                error: None,
            }),
            Err(err) => {
                warn!(
                    bucket = %event.bucket,
                    key = %event.key,
                    error = %err,
                    "pipeline run failed"
                );
                results.push(RunCompletion {
                    bucket: event.bucket,
                    key: event.key,
                    ok: false,
                    thumbnail_key: None,
                    width: None,
                    height: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let status = if results.iter().all(|r| r.ok) {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((status, Json(EventResponse { results })))
}
