//! Error types and HTTP error response handling.
//!
//! This module defines the request and infrastructure errors of the service
//! and how they are converted into HTTP responses. Business-rule outcomes of
//! debit, credit and balance checks are not errors; see
//! [`Rejection`](crate::models::ledger::Rejection).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Query failed for a reason other than connectivity.
    ///
    /// Returns HTTP 500. Details are logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The store could not be reached (pool timeout, I/O failure).
    ///
    /// Returns HTTP 503 Service Unavailable.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Requested account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account not found")]
    AccountNotFound,

    /// A uniqueness constraint was violated on creation.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// The gateway did not forward a user identity.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The forwarded role is not allowed to use the endpoint.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Admin access required")]
    Forbidden,

    /// A balance update kept losing the race against concurrent writers.
    ///
    /// Returns HTTP 503 Service Unavailable. The balance is left unchanged.
    #[error("Account is busy, retry later")]
    Contention,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::StoreUnavailable(err.to_string()),
            other => AppError::Database(other),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
            }
            AppError::Contention => (StatusCode::SERVICE_UNAVAILABLE, "contention"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = match &self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                "An internal error occurred".to_string()
            }
            AppError::StoreUnavailable(detail) => {
                tracing::error!(detail = %detail, "Store unavailable");
                "Service temporarily unavailable".to_string()
            }
            other => other.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_connectivity_failures_to_store_unavailable() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::AccountNotFound, StatusCode::NOT_FOUND),
            (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::Contention, StatusCode::SERVICE_UNAVAILABLE),
            (
                AppError::StoreUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
