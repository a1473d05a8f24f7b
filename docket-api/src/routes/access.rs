/// Caller-introspection endpoints
///
/// # Endpoints
///
/// ```text
/// GET /v1/me/permissions
/// ```
use axum::{extract::State, Extension, Json};
use docket_shared::auth::middleware::Identity;
use docket_shared::models::role_assignment::RoleAssignment;
use serde::{Deserialize, Serialize};

use crate::{app::AppState, error::ApiResult};

/// The caller's effective permission set
#[derive(Debug, Serialize, Deserialize)]
pub struct MyPermissionsResponse {
    /// Active role names
    pub roles: Vec<String>,

    /// Union of permission keys over the active roles
    pub permissions: Vec<String>,
}

/// Returns the caller's active roles and effective permissions.
///
/// A user with no active roles gets empty lists, not an error.
pub async fn my_permissions(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<MyPermissionsResponse>> {
    let roles =
        RoleAssignment::active_role_names(&state.db, identity.tenant_id, identity.user_id).await?;
    let permissions =
        RoleAssignment::effective_permissions(&state.db, identity.tenant_id, identity.user_id)
            .await?;

    Ok(Json(MyPermissionsResponse {
        roles: roles.into_iter().collect(),
        permissions: permissions.into_iter().collect(),
    }))
}
