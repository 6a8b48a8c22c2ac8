// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
use crate::error::AppError;
use crate::store::Account;
use async_trait::async_trait;
use gatekeeper_common::{LoginRequest, RegisterRequest};

/// Outcome of a successful registration or login: the account record plus a
/// freshly issued token. The router derives the wire summaries from this;
/// the password hash never reaches a response body.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub account: Account,
    pub token: String,
}

/// Credential lifecycle operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate, enforce uniqueness, hash, persist, and issue a token.
    async fn register(&self, req: RegisterRequest) -> Result<AuthOutcome, AppError>;

    /// Verify credentials and issue a token.
    async fn login(&self, req: LoginRequest) -> Result<AuthOutcome, AppError>;
}
