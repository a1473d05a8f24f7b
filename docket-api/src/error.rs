/// Error handling for the API server
///
/// A unified error type mapping to HTTP responses. Handlers return
/// `ApiResult<T>`; conversion to a response happens in one place.
///
/// Two mappings matter for the access engine:
///
/// - `AccessError` maps per the engine's taxonomy (role/record not found →
///   404, bad keys or malformed input → 422, database → 500).
/// - A *denied* record read is reported as the same `NotFound` an absent
///   record produces. The response body is identical in both situations,
///   so case identifiers cannot be enumerated across teams or tenants.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docket_shared::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403) - authenticated but lacking a capability
    Forbidden(String),

    /// Not found (404) - also produced by denied reads
    NotFound(String),

    /// Conflict (409)
    Conflict(String),

    /// Unprocessable entity (422)
    ValidationError(String),

    /// Internal server error (500)
    InternalError(String),
}

impl ApiError {
    /// The uniform not-found error for record reads.
    ///
    /// Used for both "absent" and "denied" so the two are
    /// indistinguishable to the caller.
    pub fn record_not_found(kind: &str) -> Self {
        ApiError::NotFound(format!("{kind} not found"))
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::ValidationError(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            ApiError::InternalError(msg) => {
                // never leak internals to the caller
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UnknownPermission(key) => {
                ApiError::ValidationError(format!("unknown permission key: {key}"))
            }
            AccessError::RoleNotFound(name) => ApiError::NotFound(format!("role not found: {name}")),
            AccessError::Validation(msg) => ApiError::ValidationError(msg),
            AccessError::NotFound(kind) => ApiError::record_not_found(kind),
            AccessError::Database(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_and_absent_share_a_body() {
        let denied = ApiError::record_not_found("case");
        let absent = ApiError::record_not_found("case");
        assert_eq!(denied.to_string(), absent.to_string());
    }

    #[test]
    fn test_access_error_mapping() {
        let err: ApiError = AccessError::RoleNotFound("paralegal".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = AccessError::UnknownPermission("cases.fly".to_string()).into();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
