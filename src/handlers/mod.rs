//! HTTP handlers for the trigger and health endpoints.

pub mod event_handlers;
pub mod health_handlers;

use crate::pipeline::Thumbnailer;
use sqlx::SqlitePool;
use std::{path::PathBuf, sync::Arc};

/// Shared state carried by the router.
#[derive(Clone)]
pub struct AppState {
    pub thumbnailer: Thumbnailer,
    pub db: Arc<SqlitePool>,
    pub storage_dir: PathBuf,
}
