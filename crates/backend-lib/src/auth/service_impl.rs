// ============================
// crates/backend-lib/src/auth/service_impl.rs
// ============================
use crate::auth::{AuthOutcome, AuthService, PasswordHasher, TokenIssuer};
use crate::config::PasswordRequirements;
use crate::error::{AppError, ConflictField};
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCESS, REGISTER_CONFLICT, REGISTER_SUCCESS};
use crate::store::{CredentialStore, NewAccount};
use crate::validation;
use async_trait::async_trait;
use gatekeeper_common::{LoginRequest, RegisterRequest, Role};
use metrics::counter;
use std::sync::Arc;

/// Default `AuthService` wiring the credential store, password hasher, and
/// token issuer together.
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
    requirements: PasswordRequirements,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenIssuer>,
        requirements: PasswordRequirements,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            requirements,
        }
    }
}

#[async_trait]
impl AuthService for CredentialService {
    async fn register(&self, mut req: RegisterRequest) -> Result<AuthOutcome, AppError> {
        // Structural validation short-circuits before any store access.
        validation::validate_registration(&req, &self.requirements)
            .map_err(AppError::Validation)?;

        let email = validation::normalize_email(&req.email);

        // Point lookups, email first. The store's atomic check remains the
        // backstop for the race between these and the insert below.
        if self.store.find_by_email(&email).await?.is_some() {
            counter!(REGISTER_CONFLICT).increment(1);
            return Err(AppError::Conflict(ConflictField::Email));
        }
        if self.store.find_by_username(&req.username).await?.is_some() {
            counter!(REGISTER_CONFLICT).increment(1);
            return Err(AppError::Conflict(ConflictField::Username));
        }

        let password_hash = self.hasher.hash_secure(&mut req.password)?;

        // Self-registration never honors a requested role; admin accounts
        // are provisioned out-of-band.
        if let Some(requested) = req.role.as_deref() {
            if requested != Role::User.as_str() {
                tracing::warn!(
                    username = %req.username,
                    requested,
                    "ignoring requested role at registration"
                );
            }
        }

        // A lost race surfaces as the same Conflict the lookups produce.
        let account = self
            .store
            .insert(NewAccount {
                username: req.username,
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        let token = self.tokens.issue(account.id, account.role)?;

        counter!(REGISTER_SUCCESS).increment(1);
        tracing::info!(account_id = %account.id, "account registered");

        Ok(AuthOutcome { account, token })
    }

    async fn login(&self, req: LoginRequest) -> Result<AuthOutcome, AppError> {
        validation::validate_login(&req, self.requirements.min_length)
            .map_err(AppError::Validation)?;

        let email = validation::normalize_email(&req.email);

        // A missing account and a wrong password take the same exit: the
        // caller must not learn which emails are registered.
        let Some(account) = self.store.find_by_email(&email).await? else {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(&account.password_hash, &req.password) {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id, account.role)?;

        counter!(LOGIN_SUCCESS).increment(1);
        tracing::debug!(account_id = %account.id, "login succeeded");

        Ok(AuthOutcome { account, token })
    }
}
