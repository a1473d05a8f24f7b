/// Row-filter queries
///
/// The SQL expression of the visibility predicates, one listing per
/// record table. Listings never fetch-then-filter: the predicate runs in
/// the store, so a page of results is a page of *visible* results and a
/// user who can see nothing gets an empty list, not an error.
///
/// Each function branches on the caller's scope to a static query:
/// bypass roles and `All` scope take the tenant-wide query, `Team` takes
/// the recursive reporting-line query, `Own` the assignment query. The
/// same shapes are installed as row-security policies by the migrations,
/// so a store client bypassing this crate is still constrained.
use sqlx::PgPool;

use crate::access::context::AccessContext;
use crate::access::scope::DataScope;
use crate::models::case::Case;
use crate::models::document::Document;
use crate::models::hearing::Hearing;
use crate::models::task::Task;

/// The reporting-line CTE shared by the Team-scope queries.
///
/// `subordinates` is the caller's transitive subtree; `visible_users`
/// adds the caller and their same-manager peers. Peers' subtrees are
/// deliberately absent - lateral visibility does not recurse.
const TEAM_CTE: &str = r#"
    WITH RECURSIVE subordinates AS (
        SELECT e.user_id
        FROM employees e
        WHERE e.tenant_id = $1 AND e.manager_id = $2
        UNION
        SELECT e.user_id
        FROM employees e
        JOIN subordinates s ON e.manager_id = s.user_id
        WHERE e.tenant_id = $1
    ),
    visible_users AS (
        SELECT $2::uuid AS user_id
        UNION
        SELECT user_id FROM subordinates
        UNION
        SELECT peer.user_id
        FROM employees peer
        JOIN employees me ON me.tenant_id = peer.tenant_id AND me.user_id = $2
        WHERE peer.tenant_id = $1
          AND peer.manager_id IS NOT NULL
          AND peer.manager_id = me.manager_id
    )
"#;

/// Lists the cases visible to the caller, newest first.
pub async fn visible_cases(pool: &PgPool, ctx: &AccessContext) -> Result<Vec<Case>, sqlx::Error> {
    const COLUMNS: &str = "id, tenant_id, client_id, case_number, title, assigned_to, owner_id, \
                           created_at, updated_at";

    if ctx.has_bypass() || ctx.scope == DataScope::All {
        return sqlx::query_as::<_, Case>(&format!(
            r#"
            SELECT {COLUMNS} FROM cases
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(ctx.tenant_id)
        .fetch_all(pool)
        .await;
    }

    match ctx.scope {
        DataScope::Team => {
            sqlx::query_as::<_, Case>(&format!(
                r#"
                {TEAM_CTE}
                SELECT {COLUMNS} FROM cases
                WHERE tenant_id = $1
                  AND (assigned_to IN (SELECT user_id FROM visible_users)
                       OR owner_id IN (SELECT user_id FROM visible_users))
                ORDER BY created_at DESC
                "#
            ))
            .bind(ctx.tenant_id)
            .bind(ctx.user_id)
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Case>(&format!(
                r#"
                SELECT {COLUMNS} FROM cases
                WHERE tenant_id = $1 AND (assigned_to = $2 OR owner_id = $2)
                ORDER BY created_at DESC
                "#
            ))
            .bind(ctx.tenant_id)
            .bind(ctx.user_id)
            .fetch_all(pool)
            .await
        }
    }
}

/// Lists the documents visible to the caller, newest first.
///
/// Mirrors the propagator: self-authorship, case inheritance,
/// client-level fallback. Orphan documents appear only in the
/// tenant-wide branch.
pub async fn visible_documents(
    pool: &PgPool,
    ctx: &AccessContext,
) -> Result<Vec<Document>, sqlx::Error> {
    const COLUMNS: &str =
        "d.id, d.tenant_id, d.case_id, d.client_id, d.uploaded_by, d.file_name, d.content_type, \
         d.created_at";

    if ctx.has_bypass() || ctx.scope == DataScope::All {
        return sqlx::query_as::<_, Document>(&format!(
            r#"
            SELECT {COLUMNS} FROM documents d
            WHERE d.tenant_id = $1
            ORDER BY d.created_at DESC
            "#
        ))
        .bind(ctx.tenant_id)
        .fetch_all(pool)
        .await;
    }

    let visible_cases_clause = match ctx.scope {
        DataScope::Team => format!(
            r#"
            {TEAM_CTE},
            visible_cases AS (
                SELECT c.id, c.client_id FROM cases c
                WHERE c.tenant_id = $1
                  AND (c.assigned_to IN (SELECT user_id FROM visible_users)
                       OR c.owner_id IN (SELECT user_id FROM visible_users))
            )
            "#
        ),
        _ => r#"
            WITH visible_cases AS (
                SELECT c.id, c.client_id FROM cases c
                WHERE c.tenant_id = $1 AND (c.assigned_to = $2 OR c.owner_id = $2)
            )
            "#
        .to_string(),
    };

    sqlx::query_as::<_, Document>(&format!(
        r#"
        {visible_cases_clause}
        SELECT {COLUMNS} FROM documents d
        WHERE d.tenant_id = $1
          AND (d.uploaded_by = $2
               OR (d.case_id IS NOT NULL
                   AND d.case_id IN (SELECT id FROM visible_cases))
               OR (d.case_id IS NULL AND d.client_id IS NOT NULL
                   AND d.client_id IN (SELECT client_id FROM visible_cases)))
        ORDER BY d.created_at DESC
        "#
    ))
    .bind(ctx.tenant_id)
    .bind(ctx.user_id)
    .fetch_all(pool)
    .await
}

/// Lists the tasks visible to the caller, newest first.
///
/// Adds the manager rule on top of the document shape: under Team scope,
/// tasks assigned to or created by a subordinate are included whether or
/// not their case is.
pub async fn visible_tasks(pool: &PgPool, ctx: &AccessContext) -> Result<Vec<Task>, sqlx::Error> {
    const COLUMNS: &str =
        "t.id, t.tenant_id, t.case_id, t.client_id, t.assigned_to, t.assigned_by, t.title, \
         t.status, t.due_at, t.created_at, t.updated_at";

    if ctx.has_bypass() || ctx.scope == DataScope::All {
        return sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {COLUMNS} FROM tasks t
            WHERE t.tenant_id = $1
            ORDER BY t.created_at DESC
            "#
        ))
        .bind(ctx.tenant_id)
        .fetch_all(pool)
        .await;
    }

    match ctx.scope {
        DataScope::Team => {
            sqlx::query_as::<_, Task>(&format!(
                r#"
                {TEAM_CTE},
                visible_cases AS (
                    SELECT c.id, c.client_id FROM cases c
                    WHERE c.tenant_id = $1
                      AND (c.assigned_to IN (SELECT user_id FROM visible_users)
                           OR c.owner_id IN (SELECT user_id FROM visible_users))
                )
                SELECT {COLUMNS} FROM tasks t
                WHERE t.tenant_id = $1
                  AND (t.assigned_to = $2 OR t.assigned_by = $2
                       OR t.assigned_to IN (SELECT user_id FROM subordinates)
                       OR t.assigned_by IN (SELECT user_id FROM subordinates)
                       OR (t.case_id IS NOT NULL
                           AND t.case_id IN (SELECT id FROM visible_cases))
                       OR (t.case_id IS NULL AND t.client_id IS NOT NULL
                           AND t.client_id IN (SELECT client_id FROM visible_cases)))
                ORDER BY t.created_at DESC
                "#
            ))
            .bind(ctx.tenant_id)
            .bind(ctx.user_id)
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Task>(&format!(
                r#"
                WITH visible_cases AS (
                    SELECT c.id, c.client_id FROM cases c
                    WHERE c.tenant_id = $1 AND (c.assigned_to = $2 OR c.owner_id = $2)
                )
                SELECT {COLUMNS} FROM tasks t
                WHERE t.tenant_id = $1
                  AND (t.assigned_to = $2 OR t.assigned_by = $2
                       OR (t.case_id IS NOT NULL
                           AND t.case_id IN (SELECT id FROM visible_cases))
                       OR (t.case_id IS NULL AND t.client_id IS NOT NULL
                           AND t.client_id IN (SELECT client_id FROM visible_cases)))
                ORDER BY t.created_at DESC
                "#
            ))
            .bind(ctx.tenant_id)
            .bind(ctx.user_id)
            .fetch_all(pool)
            .await
        }
    }
}

/// Lists the hearings visible to the caller, soonest first.
///
/// Strict case inheritance - no authorship clause at all.
pub async fn visible_hearings(
    pool: &PgPool,
    ctx: &AccessContext,
) -> Result<Vec<Hearing>, sqlx::Error> {
    const COLUMNS: &str =
        "h.id, h.tenant_id, h.case_id, h.client_id, h.created_by, h.scheduled_at, h.courtroom, \
         h.created_at";

    if ctx.has_bypass() || ctx.scope == DataScope::All {
        return sqlx::query_as::<_, Hearing>(&format!(
            r#"
            SELECT {COLUMNS} FROM hearings h
            WHERE h.tenant_id = $1
            ORDER BY h.scheduled_at ASC
            "#
        ))
        .bind(ctx.tenant_id)
        .fetch_all(pool)
        .await;
    }

    let visible_cases_clause = match ctx.scope {
        DataScope::Team => format!(
            r#"
            {TEAM_CTE},
            visible_cases AS (
                SELECT c.id, c.client_id FROM cases c
                WHERE c.tenant_id = $1
                  AND (c.assigned_to IN (SELECT user_id FROM visible_users)
                       OR c.owner_id IN (SELECT user_id FROM visible_users))
            )
            "#
        ),
        _ => r#"
            WITH visible_cases AS (
                SELECT c.id, c.client_id FROM cases c
                WHERE c.tenant_id = $1 AND (c.assigned_to = $2 OR c.owner_id = $2)
            )
            "#
        .to_string(),
    };

    sqlx::query_as::<_, Hearing>(&format!(
        r#"
        {visible_cases_clause}
        SELECT {COLUMNS} FROM hearings h
        WHERE h.tenant_id = $1
          AND ((h.case_id IS NOT NULL
                AND h.case_id IN (SELECT id FROM visible_cases))
               OR (h.case_id IS NULL AND h.client_id IS NOT NULL
                   AND h.client_id IN (SELECT client_id FROM visible_cases)))
        ORDER BY h.scheduled_at ASC
        "#
    ))
    .bind(ctx.tenant_id)
    .bind(ctx.user_id)
    .fetch_all(pool)
    .await
}
