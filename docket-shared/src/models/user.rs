/// User model
///
/// Users are authenticated principals. Authentication itself happens at
/// the external identity provider; rows exist here so grants and foreign
/// keys resolve, and so the API can reject grants for unknown users.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     email VARCHAR(255) NOT NULL,
///     display_name VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (tenant_id, email)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// An authenticated principal, scoped to one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// User ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Login email (unique per tenant)
    pub email: String,

    /// Display name
    pub display_name: Option<String>,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Finds a user by ID within a tenant.
    ///
    /// The tenant filter is not optional: a user ID from another tenant
    /// must behave exactly like a nonexistent one.
    pub async fn find_by_id_and_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, tenant_id, email, display_name, created_at
            FROM users
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
