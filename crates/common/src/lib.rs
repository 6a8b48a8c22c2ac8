// ================
// crates/common/src/lib.rs
// ================
//! Common types and structures
//! shared between the Gatekeeper server and its clients.
//! This module defines the request/response bodies of the credential API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role carried in tokens and user summaries.
///
/// Self-registration always produces `User`; `Admin` accounts are
/// provisioned out-of-band by an operator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Wire representation, as it appears in tokens and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/auth/register`
/// # Fields
/// * `username` - Desired handle (3-30 alphanumeric characters, unique)
/// * `email` - Account email (unique, compared case-insensitively)
/// * `password` - Plaintext password; hashed server-side, never stored
/// * `role` - Accepted for compatibility but ignored; registration
///   always creates a `user` account
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account summary returned on successful registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Account summary returned on successful login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Success body of `POST /api/auth/register` (201).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
    pub token: String,
}

/// Success body of `POST /api/auth/login` (200).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AuthenticatedUser,
}

/// One entry of a validation error set.
///
/// A failed request reports every violation at once, so clients always
/// receive the complete list rather than the first offending field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending input field
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Identity attached to a request by the access gate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

/// Body of `GET /api/me` (200).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MeResponse {
    pub user: Identity,
}
