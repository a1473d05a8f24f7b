/// Role definitions
///
/// A role is a named set of permission keys. System roles exist in every
/// tenant with seeded permission sets (which a tenant may extend); custom
/// roles are fully tenant-owned. The `admin` and `partner` roles
/// additionally carry the scope-independent visibility bypass - see
/// `access::case_visibility`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE roles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     name VARCHAR(64) NOT NULL,
///     display_name VARCHAR(255) NOT NULL,
///     description TEXT,
///     is_system BOOLEAN NOT NULL DEFAULT FALSE,
///     permissions TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (tenant_id, name)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::access::catalog;
use crate::error::{AccessError, AccessResult};

/// The fixed system roles seeded into every tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    /// Firm administrator; visibility bypass
    Admin,

    /// Partner; visibility bypass
    Partner,

    /// Chartered accountant
    Ca,

    /// Advocate (fee earner)
    Advocate,

    /// Team manager
    Manager,

    /// Support staff
    Staff,

    /// Court clerk
    Clerk,

    /// Base role every member holds; never removed by the sync rule
    User,
}

impl SystemRole {
    /// All system roles, in seeding order.
    pub const ALL: [SystemRole; 8] = [
        SystemRole::Admin,
        SystemRole::Partner,
        SystemRole::Ca,
        SystemRole::Advocate,
        SystemRole::Manager,
        SystemRole::Staff,
        SystemRole::Clerk,
        SystemRole::User,
    ];

    /// Converts role to its stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::Admin => "admin",
            SystemRole::Partner => "partner",
            SystemRole::Ca => "ca",
            SystemRole::Advocate => "advocate",
            SystemRole::Manager => "manager",
            SystemRole::Staff => "staff",
            SystemRole::Clerk => "clerk",
            SystemRole::User => "user",
        }
    }

    /// Parses a system role from its stored name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(SystemRole::Admin),
            "partner" => Some(SystemRole::Partner),
            "ca" => Some(SystemRole::Ca),
            "advocate" => Some(SystemRole::Advocate),
            "manager" => Some(SystemRole::Manager),
            "staff" => Some(SystemRole::Staff),
            "clerk" => Some(SystemRole::Clerk),
            "user" => Some(SystemRole::User),
            _ => None,
        }
    }

    /// Display name used when seeding
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemRole::Admin => "Administrator",
            SystemRole::Partner => "Partner",
            SystemRole::Ca => "Chartered Accountant",
            SystemRole::Advocate => "Advocate",
            SystemRole::Manager => "Manager",
            SystemRole::Staff => "Staff",
            SystemRole::Clerk => "Clerk",
            SystemRole::User => "Member",
        }
    }

    /// True for roles whose holders see every case in their tenant
    /// regardless of data scope.
    pub fn is_bypass(&self) -> bool {
        matches!(self, SystemRole::Admin | SystemRole::Partner)
    }

    /// Seeded permission set.
    ///
    /// Tenants may extend these after seeding; the seeds are the floor a
    /// fresh tenant starts from.
    pub fn seed_permissions(&self) -> Vec<&'static str> {
        match self {
            SystemRole::Admin => catalog::all_keys().collect(),
            SystemRole::Partner => catalog::all_keys()
                .filter(|k| !k.starts_with("roles.") || *k == "roles.view")
                .collect(),
            SystemRole::Ca => vec![
                "cases.view",
                "clients.view",
                "documents.view",
                "documents.upload",
                "documents.download",
                "tasks.view",
                "tasks.create",
                "tasks.update",
                "reports.view",
                "reports.export",
            ],
            SystemRole::Advocate => vec![
                "cases.view",
                "cases.create",
                "cases.update",
                "clients.view",
                "documents.view",
                "documents.upload",
                "documents.update",
                "documents.download",
                "tasks.view",
                "tasks.create",
                "tasks.update",
                "hearings.view",
                "hearings.create",
                "hearings.update",
            ],
            SystemRole::Manager => vec![
                "cases.view",
                "cases.create",
                "cases.update",
                "clients.view",
                "clients.create",
                "clients.update",
                "documents.view",
                "documents.upload",
                "documents.download",
                "tasks.view",
                "tasks.create",
                "tasks.update",
                "tasks.delete",
                "hearings.view",
                "hearings.create",
                "hearings.update",
                "team.view",
                "team.update",
                "reports.view",
            ],
            SystemRole::Staff => vec![
                "cases.view",
                "clients.view",
                "documents.view",
                "documents.upload",
                "tasks.view",
                "tasks.update",
                "hearings.view",
            ],
            SystemRole::Clerk => vec![
                "cases.view",
                "documents.view",
                "documents.upload",
                "tasks.view",
                "hearings.view",
                "hearings.create",
                "hearings.update",
            ],
            SystemRole::User => vec![
                "cases.view",
                "documents.view",
                "tasks.view",
                "hearings.view",
            ],
        }
    }
}

/// True when holding this role name grants the case-visibility bypass.
pub fn is_bypass_role(name: &str) -> bool {
    SystemRole::from_str(name).is_some_and(|r| r.is_bypass())
}

/// A role definition - system-seeded or tenant custom.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleDefinition {
    /// Role ID
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Stable name (unique per tenant), referenced by grants and the API
    pub name: String,

    /// Display name
    pub display_name: String,

    /// Description
    pub description: Option<String>,

    /// True for the seeded system roles
    pub is_system: bool,

    /// Permission keys this role grants
    pub permissions: Vec<String>,

    /// When the role was created
    pub created_at: DateTime<Utc>,

    /// When the permission set last changed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a custom role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomRole {
    /// Stable name, lowercase identifier
    #[validate(length(min = 2, max = 64, message = "Role name must be 2-64 characters"))]
    pub name: String,

    /// Display name
    #[validate(length(min = 1, max = 255, message = "Display name must be 1-255 characters"))]
    pub display_name: String,

    /// Description
    pub description: Option<String>,

    /// Initial permission keys
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Role names are lowercase identifiers: `[a-z][a-z0-9_]*`.
fn is_valid_role_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl RoleDefinition {
    /// Finds a role by name within a tenant.
    pub async fn find_by_name(
        pool: &PgPool,
        tenant_id: Uuid,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let role = sqlx::query_as::<_, RoleDefinition>(
            r#"
            SELECT id, tenant_id, name, display_name, description, is_system, permissions,
                   created_at, updated_at
            FROM roles
            WHERE tenant_id = $1 AND name = $2
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    /// Lists every role of a tenant, system roles first.
    pub async fn list_by_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let roles = sqlx::query_as::<_, RoleDefinition>(
            r#"
            SELECT id, tenant_id, name, display_name, description, is_system, permissions,
                   created_at, updated_at
            FROM roles
            WHERE tenant_id = $1
            ORDER BY is_system DESC, name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        Ok(roles)
    }

    /// Creates a tenant-owned custom role.
    ///
    /// # Errors
    ///
    /// - `Validation` on a malformed name or a name collision
    /// - `UnknownPermission` if any key is not in the catalog
    pub async fn create_custom(
        pool: &PgPool,
        tenant_id: Uuid,
        input: CreateCustomRole,
    ) -> AccessResult<Self> {
        input
            .validate()
            .map_err(|e| AccessError::Validation(e.to_string()))?;
        if !is_valid_role_name(&input.name) {
            return Err(AccessError::Validation(format!(
                "malformed role name: {}",
                input.name
            )));
        }
        catalog::validate_keys(input.permissions.iter().map(String::as_str))?;

        let role = sqlx::query_as::<_, RoleDefinition>(
            r#"
            INSERT INTO roles (tenant_id, name, display_name, description, is_system, permissions)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING id, tenant_id, name, display_name, description, is_system, permissions,
                      created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(&input.name)
        .bind(&input.display_name)
        .bind(&input.description)
        .bind(&input.permissions)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AccessError::Validation(format!("role name already exists: {}", input.name))
            }
            other => AccessError::Database(other),
        })?;

        Ok(role)
    }

    /// Replaces a role's full permission set atomically.
    ///
    /// Single UPDATE, last-writer-wins; concurrent readers never observe a
    /// partially replaced set.
    ///
    /// # Errors
    ///
    /// - `UnknownPermission` if any key is not in the catalog
    /// - `RoleNotFound` if the name does not resolve in the tenant
    pub async fn update_permissions(
        pool: &PgPool,
        tenant_id: Uuid,
        name: &str,
        permissions: &[String],
    ) -> AccessResult<Self> {
        catalog::validate_keys(permissions.iter().map(String::as_str))?;

        let role = sqlx::query_as::<_, RoleDefinition>(
            r#"
            UPDATE roles
            SET permissions = $3, updated_at = NOW()
            WHERE tenant_id = $1 AND name = $2
            RETURNING id, tenant_id, name, display_name, description, is_system, permissions,
                      created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(permissions)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AccessError::RoleNotFound(name.to_string()))?;

        Ok(role)
    }

    /// Seeds the system roles into a tenant.
    ///
    /// Idempotent - roles already present (possibly with tenant-extended
    /// permission sets) are left untouched.
    pub async fn seed_system_roles(pool: &PgPool, tenant_id: Uuid) -> Result<(), sqlx::Error> {
        for role in SystemRole::ALL {
            let permissions: Vec<String> =
                role.seed_permissions().into_iter().map(String::from).collect();

            sqlx::query(
                r#"
                INSERT INTO roles (tenant_id, name, display_name, is_system, permissions)
                VALUES ($1, $2, $3, TRUE, $4)
                ON CONFLICT (tenant_id, name) DO NOTHING
                "#,
            )
            .bind(tenant_id)
            .bind(role.as_str())
            .bind(role.display_name())
            .bind(&permissions)
            .execute(pool)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_role_round_trip() {
        for role in SystemRole::ALL {
            assert_eq!(SystemRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(SystemRole::from_str("paralegal"), None);
    }

    #[test]
    fn test_bypass_roles() {
        assert!(SystemRole::Admin.is_bypass());
        assert!(SystemRole::Partner.is_bypass());
        assert!(!SystemRole::Manager.is_bypass());
        assert!(!SystemRole::User.is_bypass());

        assert!(is_bypass_role("admin"));
        assert!(is_bypass_role("partner"));
        assert!(!is_bypass_role("staff"));
        assert!(!is_bypass_role("senior_partner"));
    }

    #[test]
    fn test_seed_permissions_are_registered() {
        for role in SystemRole::ALL {
            for key in role.seed_permissions() {
                assert!(catalog::is_known(key), "{} seeds unknown key {}", role.as_str(), key);
            }
        }
    }

    #[test]
    fn test_admin_seed_covers_catalog() {
        assert_eq!(
            SystemRole::Admin.seed_permissions().len(),
            catalog::all().len()
        );
    }

    #[test]
    fn test_partner_cannot_edit_roles() {
        let perms = SystemRole::Partner.seed_permissions();
        assert!(perms.contains(&"roles.view"));
        assert!(!perms.contains(&"roles.update"));
        assert!(!perms.contains(&"roles.delete"));
    }

    #[test]
    fn test_role_name_rules() {
        assert!(is_valid_role_name("senior_paralegal"));
        assert!(is_valid_role_name("litigation2"));
        assert!(!is_valid_role_name("Senior Paralegal"));
        assert!(!is_valid_role_name("2nd_chair"));
        assert!(!is_valid_role_name(""));
    }

    #[test]
    fn test_create_custom_role_length_rules() {
        let bad = CreateCustomRole {
            name: "x".to_string(),
            display_name: "X".to_string(),
            description: None,
            permissions: vec![],
        };
        assert!(bad.validate().is_err());
    }
}
