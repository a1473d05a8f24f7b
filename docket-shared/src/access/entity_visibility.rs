/// Entity visibility propagator
///
/// Documents, tasks, and hearings have no visibility rule of their own -
/// their visibility is derived from the parent case, with narrow,
/// auditable exceptions:
///
/// 1. **Self-authorship**: a document's uploader, and a task's assignee or
///    assigner, always see the record - even after a case reassignment
///    would otherwise exclude them. Hearings have no such carve-out; their
///    existence is a property of the case.
/// 2. **Case inheritance**: a case-linked record is exactly as visible as
///    its case.
/// 3. **Client-level records**: with no case link, a record attached to a
///    client is visible iff any of that client's cases is.
/// 4. **Orphans**: with neither link, only `All` scope (or a bypass role,
///    which sees every case anyway) reaches the record.
///
/// Managers get one widening for tasks: under `Team` or `All` scope, tasks
/// assigned to or created by a strict subordinate are visible even when
/// the task's case is not.
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::case_visibility::evaluate as case_visible;
use crate::access::context::AccessContext;
use crate::access::scope::DataScope;
use crate::models::case::Case;
use crate::models::document::Document;
use crate::models::hearing::Hearing;
use crate::models::task::Task;

/// Kinds of case-dependent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Document,
    Task,
    Hearing,
}

impl EntityKind {
    /// Converts kind to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Document => "document",
            EntityKind::Task => "task",
            EntityKind::Hearing => "hearing",
        }
    }
}

/// Shared tail of the propagation chain: case inheritance, client-level
/// fallback, orphan rule. `parent` is the already-fetched case for the
/// record's `case_id` (None when unset or unresolvable); `client_cases`
/// are the client's cases when only `client_id` is set.
fn inherited_visibility(
    ctx: &AccessContext,
    case_id: Option<Uuid>,
    parent: Option<&Case>,
    client_id: Option<Uuid>,
    client_cases: &[Case],
) -> bool {
    if case_id.is_some() {
        // a dangling case link denies rather than widens
        return parent.is_some_and(|c| case_visible(ctx, c));
    }
    if client_id.is_some() {
        return client_cases.iter().any(|c| case_visible(ctx, c));
    }
    ctx.scope == DataScope::All || ctx.has_bypass()
}

/// Pure document-visibility predicate.
pub fn evaluate_document(
    ctx: &AccessContext,
    document: &Document,
    parent: Option<&Case>,
    client_cases: &[Case],
) -> bool {
    if document.tenant_id != ctx.tenant_id {
        return false;
    }
    if document.uploaded_by == ctx.user_id {
        return true;
    }
    inherited_visibility(ctx, document.case_id, parent, document.client_id, client_cases)
}

/// Pure task-visibility predicate.
pub fn evaluate_task(
    ctx: &AccessContext,
    task: &Task,
    parent: Option<&Case>,
    client_cases: &[Case],
) -> bool {
    if task.tenant_id != ctx.tenant_id {
        return false;
    }
    if task.assigned_to == ctx.user_id || task.assigned_by == ctx.user_id {
        return true;
    }
    // manager rule: subordinates' tasks are visible under Team scope even
    // when the case itself is not
    if ctx.scope >= DataScope::Team
        && (ctx.org.is_subordinate(ctx.user_id, task.assigned_to)
            || ctx.org.is_subordinate(ctx.user_id, task.assigned_by))
    {
        return true;
    }
    inherited_visibility(ctx, task.case_id, parent, task.client_id, client_cases)
}

/// Pure hearing-visibility predicate.
///
/// No authorship step: the clerk who entered a hearing does not keep
/// seeing it once the case moves out of reach.
pub fn evaluate_hearing(
    ctx: &AccessContext,
    hearing: &Hearing,
    parent: Option<&Case>,
    client_cases: &[Case],
) -> bool {
    if hearing.tenant_id != ctx.tenant_id {
        return false;
    }
    inherited_visibility(ctx, hearing.case_id, parent, hearing.client_id, client_cases)
}

/// Fetches whatever the record's links require, then evaluates.
///
/// One query when the record is case-linked, one for the client's cases
/// when it is client-linked, none for orphans.
async fn load_linked_cases(
    pool: &PgPool,
    ctx: &AccessContext,
    case_id: Option<Uuid>,
    client_id: Option<Uuid>,
) -> Result<(Option<Case>, Vec<Case>), sqlx::Error> {
    match (case_id, client_id) {
        (Some(case_id), _) => {
            let parent = Case::find_by_id_and_tenant(pool, ctx.tenant_id, case_id).await?;
            Ok((parent, Vec::new()))
        }
        (None, Some(client_id)) => {
            let cases = Case::list_by_client(pool, ctx.tenant_id, client_id).await?;
            Ok((None, cases))
        }
        (None, None) => Ok((None, Vec::new())),
    }
}

/// Fetches a document and evaluates its visibility.
pub async fn can_view_document(
    pool: &PgPool,
    ctx: &AccessContext,
    document_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let Some(document) = Document::find_by_id_and_tenant(pool, ctx.tenant_id, document_id).await?
    else {
        return Ok(false);
    };
    // authorship short-circuit avoids the case fetch entirely
    if document.uploaded_by == ctx.user_id {
        return Ok(true);
    }
    let (parent, client_cases) =
        load_linked_cases(pool, ctx, document.case_id, document.client_id).await?;
    Ok(evaluate_document(ctx, &document, parent.as_ref(), &client_cases))
}

/// Fetches a task and evaluates its visibility.
pub async fn can_view_task(
    pool: &PgPool,
    ctx: &AccessContext,
    task_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let Some(task) = Task::find_by_id_and_tenant(pool, ctx.tenant_id, task_id).await? else {
        return Ok(false);
    };
    if task.assigned_to == ctx.user_id || task.assigned_by == ctx.user_id {
        return Ok(true);
    }
    let (parent, client_cases) = load_linked_cases(pool, ctx, task.case_id, task.client_id).await?;
    Ok(evaluate_task(ctx, &task, parent.as_ref(), &client_cases))
}

/// Fetches a hearing and evaluates its visibility.
pub async fn can_view_hearing(
    pool: &PgPool,
    ctx: &AccessContext,
    hearing_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let Some(hearing) = Hearing::find_by_id_and_tenant(pool, ctx.tenant_id, hearing_id).await?
    else {
        return Ok(false);
    };
    let (parent, client_cases) =
        load_linked_cases(pool, ctx, hearing.case_id, hearing.client_id).await?;
    Ok(evaluate_hearing(ctx, &hearing, parent.as_ref(), &client_cases))
}

/// Kind-dispatched entry point matching the external contract.
pub async fn can_view_entity(
    pool: &PgPool,
    ctx: &AccessContext,
    kind: EntityKind,
    entity_id: Uuid,
) -> Result<bool, sqlx::Error> {
    match kind {
        EntityKind::Document => can_view_document(pool, ctx, entity_id).await,
        EntityKind::Task => can_view_task(pool, ctx, entity_id).await,
        EntityKind::Hearing => can_view_hearing(pool, ctx, entity_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::hierarchy::OrgChart;
    use crate::models::task::TaskStatus;
    use chrono::Utc;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    const TENANT: u128 = 100;

    fn ctx(user: u128, scope: DataScope, roles: &[&str], org: OrgChart) -> AccessContext {
        AccessContext::new(
            uid(TENANT),
            uid(user),
            roles.iter().map(|r| r.to_string()).collect(),
            scope,
            org,
        )
    }

    fn case(assigned_to: u128, owner: u128) -> Case {
        Case {
            id: uid(999),
            tenant_id: uid(TENANT),
            client_id: uid(50),
            case_number: "MAT-2024-002".to_string(),
            title: "Brightwater v. Holt".to_string(),
            assigned_to: uid(assigned_to),
            owner_id: uid(owner),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn document(uploaded_by: u128, case_id: Option<Uuid>, client_id: Option<Uuid>) -> Document {
        Document {
            id: uid(700),
            tenant_id: uid(TENANT),
            case_id,
            client_id,
            uploaded_by: uid(uploaded_by),
            file_name: "witness-statement.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            created_at: Utc::now(),
        }
    }

    fn task(assigned_to: u128, assigned_by: u128, case_id: Option<Uuid>) -> Task {
        Task {
            id: uid(701),
            tenant_id: uid(TENANT),
            case_id,
            client_id: None,
            assigned_to: uid(assigned_to),
            assigned_by: uid(assigned_by),
            title: "File defence by Friday".to_string(),
            status: TaskStatus::Open,
            due_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn hearing(created_by: u128, case_id: Option<Uuid>) -> Hearing {
        Hearing {
            id: uid(702),
            tenant_id: uid(TENANT),
            case_id,
            client_id: None,
            created_by: uid(created_by),
            scheduled_at: Utc::now(),
            courtroom: Some("Court 4".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_inherits_case_visibility() {
        let c = case(7, 8);
        let doc = document(7, Some(c.id), None);

        // non-author, unrelated: tracks the case exactly
        let outsider = ctx(1, DataScope::Own, &["staff"], OrgChart::default());
        assert!(!evaluate_document(&outsider, &doc, Some(&c), &[]));

        let all_scope = ctx(1, DataScope::All, &["staff"], OrgChart::default());
        assert!(evaluate_document(&all_scope, &doc, Some(&c), &[]));
    }

    #[test]
    fn test_document_self_authorship_overrides_case_denial() {
        let c = case(7, 8);
        let doc = document(1, Some(c.id), None);
        let uploader = ctx(1, DataScope::Own, &["staff"], OrgChart::default());

        assert!(!case_visible(&uploader, &c));
        assert!(evaluate_document(&uploader, &doc, Some(&c), &[]));
    }

    #[test]
    fn test_dangling_case_link_denies() {
        let doc = document(7, Some(uid(404)), None);
        let all_scope = ctx(1, DataScope::All, &["staff"], OrgChart::default());
        // case_id set but unresolvable: the link denies, it does not fall
        // through to the orphan rule
        assert!(!evaluate_document(&all_scope, &doc, None, &[]));
    }

    #[test]
    fn test_client_level_document_follows_any_visible_case() {
        let visible = case(1, 1);
        let doc = document(7, None, Some(uid(50)));

        let own = ctx(1, DataScope::Own, &["staff"], OrgChart::default());
        assert!(evaluate_document(&own, &doc, None, std::slice::from_ref(&visible)));

        let unrelated = ctx(2, DataScope::Own, &["staff"], OrgChart::default());
        assert!(!evaluate_document(&unrelated, &doc, None, std::slice::from_ref(&visible)));
    }

    #[test]
    fn test_orphan_document_needs_all_scope() {
        let doc = document(7, None, None);

        assert!(!evaluate_document(
            &ctx(1, DataScope::Team, &["staff"], OrgChart::default()),
            &doc,
            None,
            &[]
        ));
        assert!(evaluate_document(
            &ctx(1, DataScope::All, &["staff"], OrgChart::default()),
            &doc,
            None,
            &[]
        ));
        // bypass roles see every case, so orphans follow
        assert!(evaluate_document(
            &ctx(1, DataScope::Own, &["partner"], OrgChart::default()),
            &doc,
            None,
            &[]
        ));
    }

    #[test]
    fn test_task_assignee_and_assigner_always_see_it() {
        let c = case(7, 8);
        let t = task(1, 2, Some(c.id));

        let assignee = ctx(1, DataScope::Own, &["staff"], OrgChart::default());
        let assigner = ctx(2, DataScope::Own, &["staff"], OrgChart::default());
        let outsider = ctx(3, DataScope::Own, &["staff"], OrgChart::default());

        assert!(evaluate_task(&assignee, &t, Some(&c), &[]));
        assert!(evaluate_task(&assigner, &t, Some(&c), &[]));
        assert!(!evaluate_task(&outsider, &t, Some(&c), &[]));
    }

    #[test]
    fn test_manager_sees_subordinate_tasks_despite_case_denial() {
        // manager(1) -> associate(2); case belongs to an unrelated silo
        let org = OrgChart::from_links([
            (uid(1), None),
            (uid(2), Some(uid(1))),
            (uid(7), None),
            (uid(8), None),
        ]);
        let c = case(7, 8);
        let t = task(2, 7, Some(c.id));

        let manager = ctx(1, DataScope::Team, &["manager"], org.clone());
        assert!(!case_visible(&manager, &c));
        assert!(evaluate_task(&manager, &t, Some(&c), &[]));

        // same manager with Own scope does not get the widening
        let own_manager = ctx(1, DataScope::Own, &["manager"], org);
        assert!(!evaluate_task(&own_manager, &t, Some(&c), &[]));
    }

    #[test]
    fn test_hearing_has_no_authorship_exception() {
        let c = case(7, 8);
        let h = hearing(1, Some(c.id));

        // the clerk who entered it cannot see it once the case is out of reach
        let clerk = ctx(1, DataScope::Own, &["clerk"], OrgChart::default());
        assert!(!evaluate_hearing(&clerk, &h, Some(&c), &[]));

        let assignee = ctx(7, DataScope::Own, &["advocate"], OrgChart::default());
        assert!(evaluate_hearing(&assignee, &h, Some(&c), &[]));
    }

    #[test]
    fn test_cross_tenant_entity_denied_even_for_author() {
        let mut doc = document(1, None, None);
        doc.tenant_id = uid(200);
        let author = ctx(1, DataScope::All, &["admin"], OrgChart::default());
        assert!(!evaluate_document(&author, &doc, None, &[]));
    }
}
