/// Dependent-record read endpoints
///
/// Documents, tasks, and hearings go through the entity visibility
/// propagator: case inheritance plus the self-authorship exceptions.
/// Denied and absent records share one 404.
///
/// # Endpoints
///
/// ```text
/// GET /v1/documents        GET /v1/documents/:id
/// GET /v1/tasks            GET /v1/tasks/:id
/// GET /v1/hearings         GET /v1/hearings/:id
/// ```
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use docket_shared::access::{self, filters, AccessContext, EntityKind};
use docket_shared::auth::middleware::Identity;
use docket_shared::models::document::Document;
use docket_shared::models::hearing::Hearing;
use docket_shared::models::task::Task;
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_permission,
};

async fn load_ctx(state: &AppState, identity: &Identity) -> ApiResult<AccessContext> {
    Ok(AccessContext::load(&state.db, identity.tenant_id, identity.user_id).await?)
}

/// Lists the documents visible to the caller.
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Document>>> {
    require_permission(&state, &identity, "documents.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    let documents = filters::visible_documents(&state.db, &ctx).await?;
    Ok(Json(documents))
}

/// Fetches one document, if visible.
pub async fn get_document(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Document>> {
    require_permission(&state, &identity, "documents.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    if !access::can_view_entity(&state.db, &ctx, EntityKind::Document, id).await? {
        return Err(ApiError::record_not_found("document"));
    }

    let document = Document::find_by_id_and_tenant(&state.db, identity.tenant_id, id)
        .await?
        .ok_or_else(|| ApiError::record_not_found("document"))?;

    Ok(Json(document))
}

/// Lists the tasks visible to the caller.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Task>>> {
    require_permission(&state, &identity, "tasks.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    let tasks = filters::visible_tasks(&state.db, &ctx).await?;
    Ok(Json(tasks))
}

/// Fetches one task, if visible.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    require_permission(&state, &identity, "tasks.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    if !access::can_view_entity(&state.db, &ctx, EntityKind::Task, id).await? {
        return Err(ApiError::record_not_found("task"));
    }

    let task = Task::find_by_id_and_tenant(&state.db, identity.tenant_id, id)
        .await?
        .ok_or_else(|| ApiError::record_not_found("task"))?;

    Ok(Json(task))
}

/// Lists the hearings visible to the caller.
pub async fn list_hearings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Hearing>>> {
    require_permission(&state, &identity, "hearings.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    let hearings = filters::visible_hearings(&state.db, &ctx).await?;
    Ok(Json(hearings))
}

/// Fetches one hearing, if visible.
pub async fn get_hearing(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Hearing>> {
    require_permission(&state, &identity, "hearings.view").await?;

    let ctx = load_ctx(&state, &identity).await?;
    if !access::can_view_entity(&state.db, &ctx, EntityKind::Hearing, id).await? {
        return Err(ApiError::record_not_found("hearing"));
    }

    let hearing = Hearing::find_by_id_and_tenant(&state.db, identity.tenant_id, id)
        .await?
        .ok_or_else(|| ApiError::record_not_found("hearing"))?;

    Ok(Json(hearing))
}
