//! Mapping from service errors to HTTP responses.
//!
//! Bodies are always `{"error": "<code>"}`. Codes are fixed strings so that
//! storage messages, provider bodies and secrets never reach the client.

use crate::aggregation::domain::AggregationError;
use crate::identity::{
    domain::SessionError, ports::UserRepositoryError, services::AccountError,
};
use crate::oauth::domain::OAuthError;
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session check failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Signup failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Task mutation failed.
    #[error(transparent)]
    Task(#[from] TaskServiceError),

    /// Aggregation failed.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Authorization start or unlink failed.
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// The path names no known provider.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// The caller has no link for the provider.
    #[error("provider is not linked")]
    NotLinked,
}

impl ApiError {
    /// Returns the status code and stable error code for the response.
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Session(SessionError::Unauthenticated) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated")
            }
            Self::Session(SessionError::InvalidCredential) => {
                (StatusCode::UNAUTHORIZED, "invalid_credential")
            }
            Self::Session(SessionError::Issuance(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "session_issuance_failed")
            }
            Self::Account(AccountError::Domain(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_account")
            }
            Self::Account(AccountError::Repository(
                UserRepositoryError::DuplicateEmail(_) | UserRepositoryError::DuplicateUser(_),
            )) => (StatusCode::CONFLICT, "account_exists"),
            Self::Task(TaskServiceError::Domain(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_task")
            }
            Self::Task(
                TaskServiceError::NotFound(_)
                | TaskServiceError::Repository(TaskRepositoryError::NotFound(_)),
            ) => (StatusCode::NOT_FOUND, "task_not_found"),
            Self::Task(TaskServiceError::Forbidden(_)) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::Task(TaskServiceError::Repository(TaskRepositoryError::DuplicateTask(_))) => {
                (StatusCode::CONFLICT, "duplicate_task")
            }
            Self::Task(TaskServiceError::Repository(TaskRepositoryError::Persistence(_)))
            | Self::Account(AccountError::Repository(UserRepositoryError::Persistence(_)))
            | Self::Aggregation(AggregationError::StorageUnavailable(_))
            | Self::OAuth(OAuthError::Store(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            Self::OAuth(OAuthError::NotConfigured(_)) => {
                (StatusCode::NOT_FOUND, "provider_not_configured")
            }
            Self::OAuth(OAuthError::StateIssuance(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "state_issuance_failed")
            }
            Self::OAuth(other) => (StatusCode::BAD_REQUEST, other.reason_code()),
            Self::UnknownProvider(_) => (StatusCode::NOT_FOUND, "unknown_provider"),
            Self::NotLinked => (StatusCode::NOT_FOUND, "provider_not_linked"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        }
        (status, Json(json!({ "error": code }))).into_response()
    }
}
