/// Case read endpoints
///
/// Reads are row-filtered: listings run the visibility predicate in the
/// store, and a fetch of a denied case returns the same 404 as a
/// nonexistent one, so case identifiers cannot be probed.
///
/// # Endpoints
///
/// ```text
/// GET /v1/cases
/// GET /v1/cases/:id
/// ```
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use docket_shared::access::{self, filters, AccessContext};
use docket_shared::auth::middleware::Identity;
use docket_shared::models::case::Case;
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_permission,
};

/// Lists the cases visible to the caller.
pub async fn list_cases(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Case>>> {
    require_permission(&state, &identity, "cases.view").await?;

    let ctx = AccessContext::load(&state.db, identity.tenant_id, identity.user_id).await?;
    let cases = filters::visible_cases(&state.db, &ctx).await?;
    Ok(Json(cases))
}

/// Fetches one case, if visible.
pub async fn get_case(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Case>> {
    require_permission(&state, &identity, "cases.view").await?;

    let ctx = AccessContext::load(&state.db, identity.tenant_id, identity.user_id).await?;
    if !access::can_view_case(&state.db, &ctx, id).await? {
        return Err(ApiError::record_not_found("case"));
    }

    // visibility passed; a vanished row at this point is a genuine 404
    let case = Case::find_by_id_and_tenant(&state.db, identity.tenant_id, id)
        .await?
        .ok_or_else(|| ApiError::record_not_found("case"))?;

    Ok(Json(case))
}
