/// Common error taxonomy for the access engine
///
/// Visibility predicates never produce an error for "not visible" - denial
/// is an ordinary `false`, and an unresolvable or cross-tenant record is
/// indistinguishable from a denied one. Errors here are reserved for
/// mutations (bad permission keys, missing roles) and for infrastructure
/// failures.
use thiserror::Error;

/// Result alias used throughout the access engine.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors surfaced by the access engine and role-management operations.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A permission key is not registered in the catalog
    #[error("unknown permission key: {0}")]
    UnknownPermission(String),

    /// A role name does not resolve to a role definition in the tenant
    #[error("role not found: {0}")]
    RoleNotFound(String),

    /// A mutation carried invalid input (malformed role name, bad keys)
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record fetched by ID after a visibility check passed is absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccessError::UnknownPermission("cases.fly".to_string());
        assert!(err.to_string().contains("cases.fly"));

        let err = AccessError::RoleNotFound("paralegal".to_string());
        assert!(err.to_string().contains("paralegal"));

        let err = AccessError::NotFound("case");
        assert_eq!(err.to_string(), "case not found");
    }
}
