//! Shared domain types for the onboarding bridge.
//!
//! Holds the pieces every other crate agrees on: primary key and timestamp
//! aliases, the core error type, and the registration payload together with
//! its validator.

pub mod error;
pub mod registration;
pub mod types;
