// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router and handlers for the credential API.
use crate::auth::AuthOutcome;
use crate::error::AppError;
use crate::middleware::{require_auth, AuthContext};
use crate::store::CredentialStore;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use gatekeeper_common::{
    AuthenticatedUser, Identity, LoginRequest, LoginResponse, MeResponse, RegisterRequest,
    RegisterResponse, RegisteredUser,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the API router
pub fn create_router<S: CredentialStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        // Protected routes first so the gate layer applies only to them
        .route("/api/me", get(me))
        .route_layer(from_fn_with_state(state.clone(), require_auth::<S>))
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler for `POST /api/auth/register`
async fn register<S: CredentialStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let AuthOutcome { account, token } = state.auth.register(req).await?;

    let body = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: RegisteredUser {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
        },
        token,
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// Handler for `POST /api/auth/login`
async fn login<S: CredentialStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let AuthOutcome { account, token } = state.auth.login(req).await?;

    let body = LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: AuthenticatedUser {
            id: account.id,
            email: account.email,
            role: account.role,
        },
    };

    Ok((StatusCode::OK, Json(body)))
}

/// Handler for `GET /api/me`: echoes the identity the gate attached.
async fn me(Extension(ctx): Extension<AuthContext>) -> Json<MeResponse> {
    Json(MeResponse {
        user: Identity {
            id: ctx.account_id,
            role: ctx.role,
        },
    })
}
