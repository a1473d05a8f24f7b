/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `permissions`: Permission catalog introspection
/// - `roles`: Role definitions, grants, and revocations
/// - `access`: The caller's effective permission set
/// - `cases`: Row-filtered case reads
/// - `records`: Row-filtered document/task/hearing reads
/// - `employees`: Legacy role field updates (hosts the role sync rule)
use docket_shared::auth::middleware::Identity;
use docket_shared::models::role_assignment::RoleAssignment;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

pub mod access;
pub mod cases;
pub mod employees;
pub mod health;
pub mod permissions;
pub mod records;
pub mod roles;

/// Action-level gate shared by the mutation handlers.
///
/// Checks the caller's effective permission set for one catalog key; a
/// miss is 403, not 404 - the caller knows the management surface exists.
pub(crate) async fn require_permission(
    state: &AppState,
    identity: &Identity,
    key: &str,
) -> ApiResult<()> {
    let held =
        RoleAssignment::has_permission(&state.db, identity.tenant_id, identity.user_id, key)
            .await?;

    if !held {
        return Err(ApiError::Forbidden(format!("missing permission: {key}")));
    }
    Ok(())
}
