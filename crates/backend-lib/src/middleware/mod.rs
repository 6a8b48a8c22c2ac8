// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the Gatekeeper credential service.

pub mod require_auth;

pub use require_auth::{require_auth, AuthContext};
