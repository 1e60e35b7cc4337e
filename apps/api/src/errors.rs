use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::token::TokenError;
use crate::jobs::registry::RegistryError;
use crate::resume::ingest::IngestError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant maps to one fixed status, code and client-facing message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad upload: {0}")]
    BadUpload(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Forbidden: {0} access required")]
    Forbidden(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate application")]
    DuplicateApplication,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Resume parser error: {0}")]
    ParseService(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::BadUpload(msg) => (StatusCode::BAD_REQUEST, "BAD_UPLOAD", msg.clone()),
            AppError::UnsupportedType(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_TYPE",
                "Invalid file type. Only PDF and DOCX are allowed.".to_string(),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Invalid email or password".to_string(),
            ),
            AppError::Forbidden(role) => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!("{role} access required"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::DuplicateApplication => (
                StatusCode::CONFLICT,
                "DUPLICATE_APPLICATION",
                "You have already applied for this job".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::ParseService(msg) => {
                tracing::error!("Resume parser error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_SERVICE_ERROR",
                    "The resume parsing service failed to process the file".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken(email) => {
                AppError::Conflict(format!("An account with email {email} already exists"))
            }
            StoreError::DuplicateApplication => AppError::DuplicateApplication,
            StoreError::ProfileNotFound(user_id) => {
                AppError::NotFound(format!("Profile for user {user_id} not found"))
            }
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => {
                tracing::debug!("Rejected bearer token: {err}");
                AppError::Unauthenticated
            }
            TokenError::Signing(msg) => {
                AppError::Internal(anyhow::anyhow!("Failed to sign token: {msg}"))
            }
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::JobNotFound(job_id) => {
                AppError::NotFound(format!("Job {job_id} not found"))
            }
            RegistryError::DuplicateApplication => AppError::DuplicateApplication,
            RegistryError::Store(e) => e.into(),
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedType(ext) => AppError::UnsupportedType(ext),
            IngestError::Storage(e) => AppError::Storage(e.to_string()),
            IngestError::Parser(e) => AppError::ParseService(e.to_string()),
            IngestError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {err}");
        AppError::BadRequest("Invalid request payload".to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadUpload(format!("Could not read uploaded file: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses_are_fixed_per_kind() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::BadUpload("x".into()), StatusCode::BAD_REQUEST),
            (AppError::UnsupportedType(".png".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("Admin"), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::DuplicateApplication, StatusCode::CONFLICT),
            (AppError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::ParseService("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_token_errors_become_unauthenticated() {
        assert!(matches!(
            AppError::from(TokenError::Expired),
            AppError::Unauthenticated
        ));
        assert!(matches!(
            AppError::from(TokenError::Invalid),
            AppError::Unauthenticated
        ));
    }

    #[test]
    fn test_registry_duplicate_maps_to_conflict_kind() {
        let err = AppError::from(RegistryError::DuplicateApplication);
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
