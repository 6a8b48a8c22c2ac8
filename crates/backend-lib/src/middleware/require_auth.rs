// crates/backend-lib/src/middleware/require_auth.rs

use crate::metrics::TOKEN_REJECTED;
use crate::store::CredentialStore;
use crate::{error::AppError, AppState};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use gatekeeper_common::Role;
use metrics::counter;
use std::sync::Arc;
use uuid::Uuid;

/// Identity decoded from a verified bearer token, attached to the request
/// for downstream handlers.
///
/// The gate authenticates only; role-based authorization stays with the
/// protected operation.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub role: Role,
}

/// Access gate middleware: reject requests without a valid bearer token.
pub async fn require_auth<S: CredentialStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    // Expired, malformed, and forged tokens are indistinguishable to the
    // caller.
    let claims = state.tokens.verify(token).map_err(|err| {
        counter!(TOKEN_REJECTED).increment(1);
        tracing::debug!(%err, "rejected bearer token");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthContext {
        account_id: claims.sub,
        role: claims.role,
    });

    // Continue to next middleware/handler
    Ok(next.run(request).await)
}
