/// Case model
///
/// Cases are the anchor of visibility: every document, task, and hearing
/// derives its visibility from its parent case. The engine never writes
/// cases - the CRUD layer does - so only read accessors live here.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cases (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
///     case_number VARCHAR(100) NOT NULL,
///     title VARCHAR(255) NOT NULL,
///     assigned_to UUID NOT NULL REFERENCES users(id),
///     owner_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (tenant_id, case_number)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A legal case (matter).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Case {
    /// Case ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Client the case is for
    pub client_id: Uuid,

    /// Firm-assigned case number (unique per tenant)
    pub case_number: String,

    /// Case title
    pub title: String,

    /// Fee earner currently handling the case
    pub assigned_to: Uuid,

    /// Responsible owner (usually the originating lawyer)
    pub owner_id: Uuid,

    /// When the case was opened
    pub created_at: DateTime<Utc>,

    /// When the case was last updated
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Finds a case by ID within a tenant.
    ///
    /// A case from another tenant is `None`, not an error - absence of
    /// access must be indistinguishable from absence of the record.
    pub async fn find_by_id_and_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let case = sqlx::query_as::<_, Case>(
            r#"
            SELECT id, tenant_id, client_id, case_number, title, assigned_to, owner_id,
                   created_at, updated_at
            FROM cases
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(case)
    }

    /// Lists every case of one client within a tenant.
    ///
    /// Used by the entity propagator to evaluate client-level records
    /// that have no case linkage.
    pub async fn list_by_client(
        pool: &PgPool,
        tenant_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let cases = sqlx::query_as::<_, Case>(
            r#"
            SELECT id, tenant_id, client_id, case_number, title, assigned_to, owner_id,
                   created_at, updated_at
            FROM cases
            WHERE tenant_id = $1 AND client_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .fetch_all(pool)
        .await?;

        Ok(cases)
    }
}
