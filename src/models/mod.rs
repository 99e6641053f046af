//! Core data models for the thumbnail pipeline.
//!
//! These entities represent the trigger event consumed per invocation,
//! the in-flight fetched object, and the persisted thumbnail record.

pub mod event;
pub mod object;
pub mod record;
