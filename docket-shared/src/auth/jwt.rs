/// Identity token validation
///
/// The external identity provider signs HS256 access tokens carrying the
/// authenticated user and their tenant. Validation checks signature,
/// expiry, and issuer; nothing else in the token is trusted - roles,
/// scope, and hierarchy always come from the store.
///
/// `create_token` exists for tests and local development where no
/// provider is running.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Issuer expected on every token.
pub const ISSUER: &str = "docket-idp";

/// Default access-token lifetime.
const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Errors from token validation
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token has expired
    #[error("token expired")]
    Expired,

    /// Issuer claim does not match
    #[error("invalid issuer")]
    InvalidIssuer,

    /// Signature, format, or claim validation failed
    #[error("token validation failed: {0}")]
    ValidationError(String),

    /// Token could not be encoded
    #[error("token creation failed: {0}")]
    CreateError(String),
}

/// Claims carried by an identity-provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Tenant the user is acting in (custom claim)
    pub tenant_id: Uuid,
}

impl Claims {
    /// Creates claims with the default lifetime.
    pub fn new(user_id: Uuid, tenant_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
            tenant_id,
        }
    }

    /// True when the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }
}

/// Signs claims into a token. Test/dev helper - production tokens come
/// from the identity provider.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Validates a token's signature, expiry, and issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes!!";

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();

        let token = create_token(&Claims::new(user_id, tenant_id), SECRET).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.tenant_id, tenant_id);
        assert_eq!(claims.iss, ISSUER);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::new(Uuid::new_v4(), Uuid::new_v4()), SECRET).unwrap();
        assert!(validate_token(&token, "a-different-secret-of-32-bytes!!!").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), Uuid::new_v4());
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), Uuid::new_v4());
        claims.iss = "someone-else".to_string();

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(JwtError::InvalidIssuer)
        ));
    }
}
