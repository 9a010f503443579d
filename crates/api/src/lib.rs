//! EventDesk API server library.
//!
//! Exposes configuration, state, error handling, editor sessions and routes
//! so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod sessions;
pub mod state;
