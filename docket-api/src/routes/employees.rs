/// Employee role-field endpoint
///
/// The legacy single-valued role field survives from an earlier data
/// model. Updating it here persists the field and immediately runs the
/// role sync rule, so the assignment store never drifts from it.
///
/// # Endpoints
///
/// ```text
/// PUT /v1/employees/:user_id/role
/// ```
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use docket_shared::access::sync;
use docket_shared::auth::middleware::Identity;
use docket_shared::models::employee::Employee;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_permission,
};

/// Request body for a legacy role update
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// The new legacy role value; unknown values sync as `staff`
    pub role: String,
}

/// Response carrying the updated profile and the synced role
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleResponse {
    /// Updated employee profile
    pub employee: Employee,

    /// System role the sync rule granted
    pub synced_role: String,
}

/// Updates an employee's legacy role field and syncs assignments.
pub async fn update_employee_role(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<UpdateRoleResponse>> {
    require_permission(&state, &identity, "team.update").await?;

    let employee =
        Employee::update_legacy_role(&state.db, identity.tenant_id, user_id, &req.role)
            .await?
            .ok_or_else(|| ApiError::record_not_found("employee"))?;

    let synced = sync::map_legacy_role(&req.role);
    sync::sync_employee_role(
        &state.db,
        identity.tenant_id,
        user_id,
        &req.role,
        identity.user_id,
    )
    .await?;

    tracing::info!(
        tenant_id = %identity.tenant_id,
        user_id = %user_id,
        legacy_role = %req.role,
        synced_role = synced.as_str(),
        updated_by = %identity.user_id,
        "legacy role synced"
    );

    Ok(Json(UpdateRoleResponse {
        employee,
        synced_role: synced.as_str().to_string(),
    }))
}
