/// Employee model
///
/// Employees are the per-tenant profile attached one-to-one to a user.
/// They carry the two inputs of the visibility engine - the graduated
/// `data_scope` and the nullable `manager_id` forming the reporting tree -
/// plus the historical single-valued `legacy_role` field that the role
/// sync rule projects onto role assignments.
///
/// The manager tree is kept acyclic at write time (the CRUD layer rejects
/// a manager change that would close a loop); the engine still walks it
/// defensively.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE data_scope AS ENUM ('own', 'team', 'all');
///
/// CREATE TABLE employees (
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     data_scope data_scope NOT NULL DEFAULT 'own',
///     manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     legacy_role VARCHAR(50),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (tenant_id, user_id)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::scope::DataScope;

/// Per-tenant employee profile.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    /// User this profile belongs to
    pub user_id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Graduated visibility scope
    pub data_scope: DataScope,

    /// Immediate manager in the reporting tree, if any
    pub manager_id: Option<Uuid>,

    /// Historical single-valued role field, kept consistent with role
    /// assignments by the sync rule
    pub legacy_role: Option<String>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Finds the employee profile for a user within a tenant.
    pub async fn find_by_user(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT user_id, tenant_id, data_scope, manager_id, legacy_role, created_at, updated_at
            FROM employees
            WHERE tenant_id = $1 AND user_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    /// Loads every `(user_id, manager_id)` link of a tenant.
    ///
    /// This is the input of the in-memory org chart snapshot; one query
    /// per evaluation context rather than one per chain step.
    pub async fn org_links(
        pool: &PgPool,
        tenant_id: Uuid,
    ) -> Result<Vec<(Uuid, Option<Uuid>)>, sqlx::Error> {
        let links: Vec<(Uuid, Option<Uuid>)> = sqlx::query_as(
            r#"
            SELECT user_id, manager_id
            FROM employees
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        Ok(links)
    }

    /// Updates the legacy single-valued role field.
    ///
    /// Returns the updated profile, or `None` when the employee does not
    /// exist. Callers are expected to run the role sync rule afterwards -
    /// this function only persists the field.
    pub async fn update_legacy_role(
        pool: &PgPool,
        tenant_id: Uuid,
        user_id: Uuid,
        legacy_role: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET legacy_role = $3, updated_at = NOW()
            WHERE tenant_id = $1 AND user_id = $2
            RETURNING user_id, tenant_id, data_scope, manager_id, legacy_role, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(legacy_role)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }
}
