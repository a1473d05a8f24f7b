/// Hearing model
///
/// Court dates for a case. Hearings are the strictest dependent record:
/// their existence is a property of the case, so there is no
/// self-authorship carve-out - whoever cannot see the case cannot see its
/// hearings, including the clerk who entered them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE hearings (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     case_id UUID REFERENCES cases(id) ON DELETE SET NULL,
///     client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
///     created_by UUID NOT NULL REFERENCES users(id),
///     scheduled_at TIMESTAMPTZ NOT NULL,
///     courtroom VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A scheduled court hearing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hearing {
    /// Hearing ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Parent case, if any
    pub case_id: Option<Uuid>,

    /// Client link, consulted only when no case is set
    pub client_id: Option<Uuid>,

    /// Who entered the hearing (audit only - carries no visibility)
    pub created_by: Uuid,

    /// Scheduled date and time
    pub scheduled_at: DateTime<Utc>,

    /// Courtroom or venue
    pub courtroom: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Hearing {
    /// Finds a hearing by ID within a tenant.
    pub async fn find_by_id_and_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let hearing = sqlx::query_as::<_, Hearing>(
            r#"
            SELECT id, tenant_id, case_id, client_id, created_by, scheduled_at, courtroom,
                   created_at
            FROM hearings
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(hearing)
    }
}
