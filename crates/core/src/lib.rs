//! Shared domain types for the notes service and its client.

pub mod error;
pub mod notes;
pub mod types;
