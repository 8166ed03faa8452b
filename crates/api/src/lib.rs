//! Onboarding bridge HTTP server library.
//!
//! Exposes config, state, error handling, the router and the routes so the
//! binary entrypoint and the integration tests build the same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
