/// Permission catalog endpoint
///
/// Read-only introspection for the role editor: the full catalog with
/// module/action/label, in stable order.
///
/// # Endpoint
///
/// ```text
/// GET /v1/permissions
/// ```
use axum::Json;
use docket_shared::access::catalog;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// One catalog entry
#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Full key, `module.action`
    pub key: String,

    /// Module the permission belongs to
    pub module: String,

    /// Action within the module
    pub action: String,

    /// Human-readable label
    pub label: String,
}

/// Lists the permission catalog.
pub async fn list_permissions() -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = catalog::all()
        .iter()
        .map(|p| PermissionResponse {
            key: p.key.to_string(),
            module: p.module.to_string(),
            action: p.action.to_string(),
            label: p.label.to_string(),
        })
        .collect();

    Ok(Json(permissions))
}
