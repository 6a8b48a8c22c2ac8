// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Bearer token issuance and verification.
use chrono::{Duration, Utc};
use gatekeeper_common::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (account id)
    pub sub: Uuid,
    /// Account role at issuance
    pub role: Role,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

/// Token verification errors.
///
/// The access gate reports every variant as the same `Unauthorized`; the
/// distinction exists for logs and tests only.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token encoding error: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256-signed bearer tokens.
///
/// Holds the process-wide signing key, read once at startup. A missing
/// secret is rejected by `Settings::load` before this type is constructed.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the configured secret and lifetime.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Zero leeway: a token is rejected the moment its expiry passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Issue a token for the account, valid for the configured lifetime
    /// from now.
    pub fn issue(&self, account_id: Uuid, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: account_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a presented token and return its claims.
    ///
    /// Malformed tokens, signature mismatches, and past expiry all fail;
    /// only expiry is distinguished, for diagnostics.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
