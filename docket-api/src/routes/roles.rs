/// Role management endpoints
///
/// The surface consumed by the external role-management UI: listing role
/// definitions, creating custom roles, replacing a role's permission set,
/// and granting/revoking roles. All mutations are gated on the caller's
/// own `roles.*` capabilities.
///
/// # Endpoints
///
/// ```text
/// GET    /v1/roles
/// POST   /v1/roles
/// PUT    /v1/roles/:name/permissions
/// POST   /v1/users/:user_id/roles/:role
/// DELETE /v1/users/:user_id/roles/:role
/// ```
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use docket_shared::auth::middleware::Identity;
use docket_shared::models::role::{CreateCustomRole, RoleDefinition};
use docket_shared::models::role_assignment::RoleAssignment;
use docket_shared::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_permission,
};

/// Lists every role definition of the caller's tenant.
pub async fn list_roles(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<RoleDefinition>>> {
    require_permission(&state, &identity, "roles.view").await?;

    let roles = RoleDefinition::list_by_tenant(&state.db, identity.tenant_id).await?;
    Ok(Json(roles))
}

/// Creates a tenant-owned custom role.
pub async fn create_role(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(input): Json<CreateCustomRole>,
) -> ApiResult<Json<RoleDefinition>> {
    require_permission(&state, &identity, "roles.create").await?;

    let role = RoleDefinition::create_custom(&state.db, identity.tenant_id, input).await?;

    tracing::info!(
        tenant_id = %identity.tenant_id,
        role = %role.name,
        created_by = %identity.user_id,
        "custom role created"
    );

    Ok(Json(role))
}

/// Request body for replacing a role's permission set
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePermissionsRequest {
    /// The complete new permission set (full replace, no merge)
    pub permissions: Vec<String>,
}

/// Replaces a role's permission set atomically.
pub async fn update_role_permissions(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(name): Path<String>,
    Json(req): Json<UpdatePermissionsRequest>,
) -> ApiResult<Json<RoleDefinition>> {
    require_permission(&state, &identity, "roles.update").await?;

    let role =
        RoleDefinition::update_permissions(&state.db, identity.tenant_id, &name, &req.permissions)
            .await?;

    tracing::info!(
        tenant_id = %identity.tenant_id,
        role = %role.name,
        permissions = role.permissions.len(),
        updated_by = %identity.user_id,
        "role permission set replaced"
    );

    Ok(Json(role))
}

/// Grants a role to a user.
pub async fn grant_role(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((user_id, role)): Path<(Uuid, String)>,
) -> ApiResult<Json<RoleAssignment>> {
    require_permission(&state, &identity, "roles.update").await?;

    // an unknown user gets the same 404 shape as an unknown role
    User::find_by_id_and_tenant(&state.db, identity.tenant_id, user_id)
        .await?
        .ok_or_else(|| ApiError::record_not_found("user"))?;

    let assignment = RoleAssignment::grant(
        &state.db,
        identity.tenant_id,
        user_id,
        &role,
        identity.user_id,
    )
    .await?;

    tracing::info!(
        tenant_id = %identity.tenant_id,
        user_id = %user_id,
        role = %role,
        granted_by = %identity.user_id,
        "role granted"
    );

    Ok(Json(assignment))
}

/// Response for a revocation
#[derive(Debug, Serialize, Deserialize)]
pub struct RevokeResponse {
    /// True when an active grant was deactivated; false for a no-op
    pub revoked: bool,
}

/// Revokes a role from a user (idempotent).
pub async fn revoke_role(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((user_id, role)): Path<(Uuid, String)>,
) -> ApiResult<Json<RevokeResponse>> {
    require_permission(&state, &identity, "roles.update").await?;

    let revoked = RoleAssignment::revoke(&state.db, identity.tenant_id, user_id, &role).await?;

    if revoked {
        tracing::info!(
            tenant_id = %identity.tenant_id,
            user_id = %user_id,
            role = %role,
            revoked_by = %identity.user_id,
            "role revoked"
        );
    }

    Ok(Json(RevokeResponse { revoked }))
}
