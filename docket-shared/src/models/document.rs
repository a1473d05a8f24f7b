/// Document model
///
/// Documents usually hang off a case; a document filed before a matter is
/// opened may instead carry only a client link, and an uploader's personal
/// note may carry neither. Visibility is derived from the parent case with
/// a self-authorship exception for the uploader - see
/// `access::entity_visibility`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE documents (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     case_id UUID REFERENCES cases(id) ON DELETE SET NULL,
///     client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
///     uploaded_by UUID NOT NULL REFERENCES users(id),
///     file_name VARCHAR(512) NOT NULL,
///     content_type VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A filed document.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    /// Document ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Parent case, if filed against one
    pub case_id: Option<Uuid>,

    /// Client link, consulted only when no case is set
    pub client_id: Option<Uuid>,

    /// Uploader - the self-authorship exception key
    pub uploaded_by: Uuid,

    /// Original file name
    pub file_name: String,

    /// MIME type, when known
    pub content_type: Option<String>,

    /// When the document was uploaded
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Finds a document by ID within a tenant.
    pub async fn find_by_id_and_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, tenant_id, case_id, client_id, uploaded_by, file_name, content_type,
                   created_at
            FROM documents
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(document)
    }
}
