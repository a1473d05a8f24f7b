/// The access-control engine
///
/// Everything that decides, for a user and a record, whether that user may
/// see or act on it. The engine layers three mechanisms:
///
/// 1. **Capability grants** - a flat permission catalog, granted through
///    roles, unioned over a user's active assignments ([`catalog`],
///    `models::role`, `models::role_assignment`).
/// 2. **Data scope** - graduated record visibility (`Own`/`Team`/`All`)
///    over the reporting hierarchy ([`scope`], [`hierarchy`],
///    [`case_visibility`]).
/// 3. **Visibility inheritance** - documents, tasks, and hearings derive
///    visibility from their parent case with narrow self-authorship
///    exceptions ([`entity_visibility`]).
///
/// Evaluation is pure: every decision is a function of an explicit
/// [`context::AccessContext`] and the record's fields, with no ambient
/// session state. The same predicates exist as SQL row filters
/// ([`filters`]) and as store-side row-security policies (migrations).
///
/// # Example
///
/// ```no_run
/// use docket_shared::access::{self, context::AccessContext};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, tenant_id: Uuid, user_id: Uuid, case_id: Uuid) -> anyhow::Result<()> {
/// let ctx = AccessContext::load(&pool, tenant_id, user_id).await?;
/// if access::can_view_case(&pool, &ctx, case_id).await? {
///     // fetch and return the case
/// }
/// # Ok(())
/// # }
/// ```

pub mod case_visibility;
pub mod catalog;
pub mod context;
pub mod editor;
pub mod entity_visibility;
pub mod filters;
pub mod hierarchy;
pub mod scope;
pub mod sync;

pub use case_visibility::can_view_case;
pub use context::AccessContext;
pub use entity_visibility::{
    can_view_document, can_view_entity, can_view_hearing, can_view_task, EntityKind,
};
pub use scope::DataScope;
