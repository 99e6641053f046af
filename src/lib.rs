//! thumbgen — a trigger-driven thumbnail-generation service.
//!
//! A storage-creation notification names a bucket and an object key;
//! one pipeline run fetches the object, scales it to fit a bounding box
//! resolved from its metadata (default 200x200), writes the thumbnail
//! back under `thumbs/<key>`, and records the source→thumbnail link in
//! SQLite.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod services;
