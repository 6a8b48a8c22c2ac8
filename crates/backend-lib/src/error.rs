// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatekeeper_common::FieldError;
use thiserror::Error;

/// Field whose uniqueness invariant a registration collided with.
///
/// Email is checked before username, so when both collide the reported
/// conflict is the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
}

impl ConflictField {
    /// Wire message for this conflict, as clients expect it verbatim.
    pub fn message(self) -> &'static str {
        match self {
            ConflictField::Email => "Email already in use",
            ConflictField::Username => "Username already taken",
        }
    }
}

/// Application error types, translated to wire responses at the boundary
#[derive(Error, Debug)]
pub enum AppError {
    /// Structural validation failed; carries the complete error set
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// A uniqueness invariant was violated during registration
    #[error("{}", .0.message())]
    Conflict(ConflictField),

    /// Login failed. Deliberately undifferentiated: a missing account and a
    /// wrong password must be indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, or expired bearer token at the access gate
    #[error("Unauthorized")]
    Unauthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::Conflict(field) => field.message().to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Io(_) | AppError::Json(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            // Validation returns the full error set, never a single message
            AppError::Validation(errors) => serde_json::json!({ "errors": errors }),
            AppError::Conflict(field) => serde_json::json!({ "error": field.message() }),
            AppError::InvalidCredentials => serde_json::json!({ "error": "Invalid credentials" }),
            AppError::Unauthorized => serde_json::json!({ "error": "Unauthorized" }),
            other => {
                // Use detailed messages in development, sanitized in production
                let message = if cfg!(debug_assertions) {
                    other.to_string()
                } else {
                    other.sanitized_message()
                };
                serde_json::json!({ "error": message })
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

// Issuance failures are infrastructure errors; the gate maps verification
// failures to Unauthorized explicitly instead of using this.
impl From<crate::auth::TokenError> for AppError {
    fn from(err: crate::auth::TokenError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io::{Error as IoError, ErrorKind};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict(ConflictField::Email).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Io(IoError::new(ErrorKind::NotFound, "gone")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_messages() {
        assert_eq!(ConflictField::Email.message(), "Email already in use");
        assert_eq!(ConflictField::Username.message(), "Username already taken");
    }

    #[tokio::test]
    async fn test_validation_response_carries_error_set() {
        let error = AppError::Validation(vec![
            FieldError::new("username", "Username must be 3-30 alphanumeric characters"),
            FieldError::new("password", "Password must be at least 8 characters"),
        ]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "username");
        assert_eq!(errors[1]["field"], "password");
    }

    #[tokio::test]
    async fn test_conflict_response_body() {
        let response = AppError::Conflict(ConflictField::Email).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Email already in use");
    }

    #[tokio::test]
    async fn test_invalid_credentials_body_is_fixed() {
        // The body must not vary with the cause; both login failure modes
        // funnel through this one variant.
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));
    }

    #[test]
    fn test_error_from_impls() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "Permission denied");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));

        let app_err: AppError = "wiring failure".into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
