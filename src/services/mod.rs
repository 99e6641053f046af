//! Gateway implementations for the pipeline's external collaborators.

pub mod object_store;
pub mod record_store;
