/// Data-visibility scope
///
/// Every employee carries a graduated visibility scope deciding how far
/// beyond their own records they can see: `Own` < `Team` < `All`. Scope is
/// monotonic - anything visible under `Own` stays visible when the scope
/// is upgraded.
///
/// Resolution is a pure lookup of the employee record; the reporting
/// hierarchy is consulted only by the case evaluator when the scope is
/// `Team`.
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Graduated visibility scope assigned per employee.
///
/// Ordering is significant: `Own < Team < All`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "data_scope", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataScope {
    /// Records the user is assigned to or owns
    Own,

    /// Own records plus the reporting line (subordinates and same-manager peers)
    Team,

    /// Every record in the tenant
    All,
}

impl Default for DataScope {
    fn default() -> Self {
        DataScope::Own
    }
}

impl DataScope {
    /// Converts scope to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            DataScope::Own => "own",
            DataScope::Team => "team",
            DataScope::All => "all",
        }
    }

    /// Parses a scope from its stored form
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "own" => Some(DataScope::Own),
            "team" => Some(DataScope::Team),
            "all" => Some(DataScope::All),
            _ => None,
        }
    }

    /// True when this scope sees at least as much as `other`.
    pub fn covers(&self, other: DataScope) -> bool {
        *self >= other
    }
}

/// Resolves a user's effective visibility scope.
///
/// Reads the employee record's `data_scope`; a user without an employee
/// record (service principals, not-yet-onboarded users) defaults to
/// [`DataScope::Own`].
///
/// # Errors
///
/// Returns an error only if the database query fails.
pub async fn resolve(pool: &PgPool, tenant_id: Uuid, user_id: Uuid) -> Result<DataScope, sqlx::Error> {
    let employee = crate::models::employee::Employee::find_by_user(pool, tenant_id, user_id).await?;
    Ok(employee.map(|e| e.data_scope).unwrap_or_default())
}
