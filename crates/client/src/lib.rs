//! Client side of the notes service.
//!
//! - [`api`]: the HTTP client and the [`api::NotesApi`] seam the controller
//!   talks through.
//! - [`state`]: the explicit UI state and its reducer transitions.
//! - [`controller`]: the async driver sequencing transitions around API calls.
//! - [`view`]: pure view models rendered from state.

pub mod api;
pub mod config;
pub mod controller;
pub mod state;
pub mod view;
