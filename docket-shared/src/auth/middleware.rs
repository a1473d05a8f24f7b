/// Identity middleware for Axum
///
/// Validates the `Authorization: Bearer <token>` header against the
/// identity provider's signing secret and inserts an [`Identity`] into the
/// request extensions. Handlers extract it with Axum's `Extension`
/// extractor and load their `AccessContext` from it.
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// The authenticated request identity.
///
/// Only who and where - authorization state (roles, scope, hierarchy) is
/// loaded from the store per request, never carried in the token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    /// Authenticated user
    pub user_id: Uuid,

    /// Tenant the request acts within
    pub tenant_id: Uuid,
}

/// Error type for the identity middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Malformed authorization header
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Bearer-token middleware.
///
/// On success the request carries an [`Identity`] extension; on failure
/// the request is rejected with 401 (or 400 for a malformed header).
pub async fn identity_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    req.extensions_mut().insert(Identity {
        user_id: claims.sub,
        tenant_id: claims.tenant_id,
    });

    Ok(next.run(req).await)
}

/// Captures the signing secret into a middleware closure.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use docket_shared::auth::middleware::create_identity_middleware;
///
/// let app: Router = Router::new()
///     .route("/protected", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_identity_middleware("secret")));
/// ```
pub fn create_identity_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(identity_middleware(secret, req, next))
    }
}
