// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use password::{PasswordHasher, DEFAULT_HASH_COST};
pub use service::{AuthOutcome, AuthService};
pub use service_impl::CredentialService;
pub use token::{AccessClaims, TokenError, TokenIssuer};
