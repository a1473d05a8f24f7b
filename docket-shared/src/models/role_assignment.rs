/// Role assignment store
///
/// Assignments tie users to role definitions within a tenant. A user may
/// hold several active roles at once; the effective permission set is the
/// union over active assignments. Deactivation is a soft toggle - rows are
/// never deleted, so visibility computed at a past instant stays
/// reproducible from the grant history.
///
/// The uniqueness constraint on `(tenant_id, user_id, role_id)` makes
/// `grant` an idempotent upsert: safe to call twice, safe under concurrent
/// retries.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE role_assignments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     granted_by UUID REFERENCES users(id) ON DELETE SET NULL,
///     granted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     revoked_at TIMESTAMPTZ,
///     UNIQUE (tenant_id, user_id, role_id)
/// );
/// ```
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AccessError, AccessResult};
use crate::models::role::RoleDefinition;

/// A role grant with provenance.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleAssignment {
    /// Assignment ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Grantee
    pub user_id: Uuid,

    /// Granted role definition
    pub role_id: Uuid,

    /// Whether the grant is currently in force
    pub is_active: bool,

    /// Who granted it (None when the granter was since removed)
    pub granted_by: Option<Uuid>,

    /// When the grant was made (refreshed on reactivation)
    pub granted_at: DateTime<Utc>,

    /// When the grant was last deactivated, if ever
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RoleAssignment {
    /// Grants a role to a user.
    ///
    /// Idempotent: granting an already-active role returns the existing
    /// assignment unchanged. Re-granting a revoked role flips it back on
    /// and refreshes the provenance fields.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the role name does not resolve in the
    /// tenant.
    pub async fn grant(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
        role_name: &str,
        granted_by: Uuid,
    ) -> AccessResult<Self> {
        let role = RoleDefinition::find_by_name(pool, tenant_id, role_name)
            .await?
            .ok_or_else(|| AccessError::RoleNotFound(role_name.to_string()))?;

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
            RETURNING id, tenant_id, user_id, role_id, is_active, granted_by, granted_at,
                      revoked_at
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(role.id)
        .bind(granted_by)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    /// Revokes a role from a user.
    ///
    /// Soft toggle - the row stays for audit history. Returns `false` when
    /// the grant was not active (idempotent no-op).
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the role name does not resolve in the
    /// tenant.
    pub async fn revoke(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
        role_name: &str,
    ) -> AccessResult<bool> {
        let role = RoleDefinition::find_by_name(pool, tenant_id, role_name)
            .await?
            .ok_or_else(|| AccessError::RoleNotFound(role_name.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE role_assignments
            SET is_active = FALSE, revoked_at = NOW()
            WHERE tenant_id = $1 AND user_id = $2 AND role_id = $3 AND is_active
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(role.id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Names of the user's currently-active roles.
    pub async fn active_role_names(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<BTreeSet<String>, sqlx::Error> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM role_assignments ra
            JOIN roles r ON r.id = ra.role_id AND r.tenant_id = ra.tenant_id
            WHERE ra.tenant_id = $1 AND ra.user_id = $2 AND ra.is_active
            ORDER BY r.name
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(names.into_iter().collect())
    }

    /// The union of permission keys over the user's active assignments.
    ///
    /// A user with no active roles gets the empty set, not an error.
    pub async fn effective_permissions(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<BTreeSet<String>, sqlx::Error> {
        let keys: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT perm
            FROM role_assignments ra
            JOIN roles r ON r.id = ra.role_id AND r.tenant_id = ra.tenant_id
            CROSS JOIN LATERAL unnest(r.permissions) AS perm
            WHERE ra.tenant_id = $1 AND ra.user_id = $2 AND ra.is_active
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(keys.into_iter().collect())
    }

    /// Membership test against the effective permission set.
    pub async fn has_permission(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
        key: &str,
    ) -> Result<bool, sqlx::Error> {
        let held: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM role_assignments ra
                JOIN roles r ON r.id = ra.role_id AND r.tenant_id = ra.tenant_id
                WHERE ra.tenant_id = $1 AND ra.user_id = $2 AND ra.is_active
                  AND $3 = ANY(r.permissions)
            )
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(key)
        .fetch_one(pool)
        .await?;

        Ok(held)
    }
}
