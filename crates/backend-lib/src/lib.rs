// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Gatekeeper credential service.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod store;
pub mod validation;

use crate::auth::{AuthService, CredentialService, PasswordHasher, TokenIssuer};
use crate::config::Settings;
use crate::error::AppError;
use crate::store::CredentialStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Token issuer, shared with the access gate
    pub tokens: Arc<TokenIssuer>,
    /// Settings manager
    pub settings: Arc<Settings>,
    /// Credential store
    pub store: Arc<S>,
}

impl<S: CredentialStore + 'static> AppState<S> {
    /// Create a new application state.
    ///
    /// The signing secret and hash cost are read here, once; nothing else
    /// touches configuration per request.
    pub fn new(store: S, settings: Settings) -> Result<Self, AppError> {
        let store = Arc::new(store);
        let tokens = Arc::new(TokenIssuer::new(
            settings.token_secret.as_bytes(),
            settings.token_ttl_secs,
        ));
        let hasher = PasswordHasher::new(settings.hash_cost)?;
        let auth = Arc::new(CredentialService::new(
            store.clone() as Arc<dyn CredentialStore>,
            hasher,
            tokens.clone(),
            settings.password_requirements.clone(),
        ));

        Ok(Self {
            auth,
            tokens,
            settings: Arc::new(settings),
            store,
        })
    }
}
