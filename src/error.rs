// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! The domain taxonomy (`AuthError`, `WriteError`, `StorageError`) is
//! propagated unchanged by the data-access layers; handlers convert to
//! `AppError` for the HTTP response. No layer retries a failed operation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Identity-provider failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No account registered for this email")]
    UnknownEmail,

    #[error("An account already exists for this email")]
    EmailTaken,

    /// Account creation succeeded but the display-name update did not.
    /// The account exists and can sign in, just without a name.
    #[error("Account created but profile update failed: {0}")]
    ProfileUpdateFailed(String),

    #[error("Identity provider unreachable: {0}")]
    Network(String),
}

/// Document-store write failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WriteError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Write not permitted")]
    PermissionDenied,

    #[error("Document store unreachable: {0}")]
    Network(String),
}

/// Blob-store failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Listing failed: {0}")]
    List(String),

    #[error("Object not found: {0}")]
    NotFound(String),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Auth(err) => match err {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
                }
                AuthError::UnknownEmail => {
                    (StatusCode::NOT_FOUND, "unknown_email", Some(err.to_string()))
                }
                AuthError::EmailTaken => {
                    (StatusCode::CONFLICT, "email_taken", Some(err.to_string()))
                }
                AuthError::ProfileUpdateFailed(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "profile_update_failed",
                    Some(err.to_string()),
                ),
                AuthError::Network(msg) => {
                    tracing::error!(error = %msg, "Identity provider error");
                    (StatusCode::BAD_GATEWAY, "auth_unavailable", None)
                }
            },
            AppError::Write(err) => match err {
                WriteError::NotFound(msg) => {
                    (StatusCode::NOT_FOUND, "not_found", Some(msg.clone()))
                }
                WriteError::PermissionDenied => (StatusCode::FORBIDDEN, "forbidden", None),
                WriteError::Network(msg) => {
                    tracing::error!(error = %msg, "Document store error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
                }
            },
            AppError::Storage(err) => match err {
                StorageError::NotFound(msg) => {
                    (StatusCode::NOT_FOUND, "not_found", Some(msg.clone()))
                }
                _ => {
                    tracing::error!(error = %err, "Blob store error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
                }
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
