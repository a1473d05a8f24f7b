/// Role sync rule
///
/// Employees carry a historical single-valued `legacy_role` field that
/// predates multi-role assignments. Whenever that field changes, this rule
/// projects it onto the assignment store: all previously-active non-base
/// roles are deactivated and the mapped system role is granted. The base
/// `user` role is never removed.
///
/// The projection is strictly one-way (legacy field → assignments) and
/// runs as a side effect of unrelated employee edits, so it must not block
/// them: an unmapped legacy value falls back to `staff` instead of
/// failing.
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AccessError, AccessResult};
use crate::models::role::SystemRole;
use crate::models::role_assignment::RoleAssignment;

/// Maps a legacy role value to its system role.
///
/// Deterministic lookup; unknown values default to [`SystemRole::Staff`].
pub fn map_legacy_role(value: &str) -> SystemRole {
    SystemRole::from_str(value.trim().to_ascii_lowercase().as_str())
        .unwrap_or(SystemRole::Staff)
}

/// Projects an employee's legacy role onto the assignment store.
///
/// In one transaction: deactivates every active assignment except the
/// base `user` role, then grants the mapped role (idempotent upsert, same
/// semantics as [`RoleAssignment::grant`]).
///
/// # Errors
///
/// Returns `RoleNotFound` only when the mapped system role was never
/// seeded into the tenant - a provisioning bug, not a user error.
pub async fn sync_employee_role(
    pool: &PgPool,
    tenant_id: Uuid,
    user_id: Uuid,
    legacy_value: &str,
    granted_by: Uuid,
) -> AccessResult<RoleAssignment> {
    let target = map_legacy_role(legacy_value);

    let mut tx = pool.begin().await?;

    let role_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM roles
        WHERE tenant_id = $1 AND name = $2
        "#,
    )
    .bind(tenant_id)
    .bind(target.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let role_id = role_id.ok_or_else(|| AccessError::RoleNotFound(target.as_str().to_string()))?;

    // drop every non-base role; the mapped role is re-granted below, so
    // deactivating it here is harmless and keeps the statement simple
    sqlx::query(
        r#"
        UPDATE role_assignments ra
        SET is_active = FALSE, revoked_at = NOW()
        FROM roles r
        WHERE r.id = ra.role_id
          AND ra.tenant_id = $1 AND ra.user_id = $2 AND ra.is_active
          AND r.name <> $3
        "#,
    )
    .bind(tenant_id)
    .bind(user_id)
    .bind(SystemRole::User.as_str())
    .execute(&mut *tx)
    .await?;

    let assignment = sqlx::query_as::<_, RoleAssignment>(
        r#"
        INSERT INTO role_assignments (tenant_id, user_id, role_id, granted_by)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (tenant_id, user_id, role_id) DO UPDATE SET
            is_active = TRUE,
            granted_by = CASE WHEN role_assignments.is_active
                              THEN role_assignments.granted_by
                              ELSE EXCLUDED.granted_by END,
            granted_at = CASE WHEN role_assignments.is_active
                              THEN role_assignments.granted_at
                              ELSE NOW() END
        RETURNING id, tenant_id, user_id, role_id, is_active, granted_by, granted_at, revoked_at
        "#,
    )
    .bind(tenant_id)
    .bind(user_id)
    .bind(role_id)
    .bind(granted_by)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_legacy_values_map_directly() {
        assert_eq!(map_legacy_role("admin"), SystemRole::Admin);
        assert_eq!(map_legacy_role("partner"), SystemRole::Partner);
        assert_eq!(map_legacy_role("ca"), SystemRole::Ca);
        assert_eq!(map_legacy_role("advocate"), SystemRole::Advocate);
        assert_eq!(map_legacy_role("manager"), SystemRole::Manager);
        assert_eq!(map_legacy_role("staff"), SystemRole::Staff);
        assert_eq!(map_legacy_role("clerk"), SystemRole::Clerk);
        assert_eq!(map_legacy_role("user"), SystemRole::User);
    }

    #[test]
    fn test_mapping_is_case_and_whitespace_tolerant() {
        assert_eq!(map_legacy_role("Partner"), SystemRole::Partner);
        assert_eq!(map_legacy_role("  advocate  "), SystemRole::Advocate);
    }

    #[test]
    fn test_unknown_legacy_values_fall_back_to_staff() {
        assert_eq!(map_legacy_role("receptionist"), SystemRole::Staff);
        assert_eq!(map_legacy_role(""), SystemRole::Staff);
    }
}
