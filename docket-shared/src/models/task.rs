/// Task model
///
/// Work items for fee earners and support staff. Like documents, tasks
/// inherit visibility from their parent case, with self-authorship
/// exceptions for both the assignee and the assigner, and an additional
/// manager rule (a Team-scope manager sees subordinates' tasks even when
/// the case itself is out of reach).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('open', 'in_progress', 'done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     case_id UUID REFERENCES cases(id) ON DELETE SET NULL,
///     client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
///     assigned_to UUID NOT NULL REFERENCES users(id),
///     assigned_by UUID NOT NULL REFERENCES users(id),
///     title VARCHAR(255) NOT NULL,
///     status task_status NOT NULL DEFAULT 'open',
///     due_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task progress state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Open,

    /// Being worked on
    InProgress,

    /// Completed
    Done,
}

impl TaskStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// A work item, usually attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Task ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Parent case, if any
    pub case_id: Option<Uuid>,

    /// Client link, consulted only when no case is set
    pub client_id: Option<Uuid>,

    /// Who the task is assigned to
    pub assigned_to: Uuid,

    /// Who created the assignment
    pub assigned_by: Uuid,

    /// Task title
    pub title: String,

    /// Progress state
    pub status: TaskStatus,

    /// Due date, if set
    pub due_at: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Finds a task by ID within a tenant.
    pub async fn find_by_id_and_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, tenant_id, case_id, client_id, assigned_to, assigned_by, title, status,
                   due_at, created_at, updated_at
            FROM tasks
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Open.as_str(), "open");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
    }
}
