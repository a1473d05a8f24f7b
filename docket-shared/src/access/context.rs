/// Evaluation context
///
/// Every visibility decision is a pure function of `(tenant, user, active
/// roles, data scope, hierarchy position)` on one side and the record's
/// fields on the other. This struct carries the user side, loaded once per
/// request - there is no ambient session state, which keeps the same logic
/// testable outside any request pipeline and portable to the store's
/// policy layer.
///
/// # Example
///
/// ```no_run
/// use docket_shared::access::context::AccessContext;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, tenant_id: Uuid, user_id: Uuid) -> anyhow::Result<()> {
/// let ctx = AccessContext::load(&pool, tenant_id, user_id).await?;
/// if ctx.has_bypass() {
///     println!("admin or partner - sees every case in the tenant");
/// }
/// # Ok(())
/// # }
/// ```
use std::collections::BTreeSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::access::hierarchy::OrgChart;
use crate::access::scope::{self, DataScope};
use crate::models::employee::Employee;
use crate::models::role::is_bypass_role;
use crate::models::role_assignment::RoleAssignment;

/// The user side of every visibility decision.
#[derive(Debug, Clone)]
pub struct AccessContext {
    /// Tenant the request acts within
    pub tenant_id: Uuid,

    /// Acting user
    pub user_id: Uuid,

    /// Names of the user's currently-active roles
    pub roles: BTreeSet<String>,

    /// Resolved data-visibility scope
    pub scope: DataScope,

    /// Snapshot of the tenant's reporting hierarchy
    pub org: OrgChart,
}

impl AccessContext {
    /// Builds a context from already-resolved parts.
    ///
    /// The loader below is the production path; this constructor exists so
    /// evaluators can be exercised without a database.
    pub fn new(
        tenant_id: Uuid,
        user_id: Uuid,
        roles: BTreeSet<String>,
        scope: DataScope,
        org: OrgChart,
    ) -> Self {
        Self {
            tenant_id,
            user_id,
            roles,
            scope,
            org,
        }
    }

    /// Loads the context for one user in one tenant.
    ///
    /// Three reads: active role names, employee scope (absent profile
    /// defaults to `Own`), and the tenant's manager links.
    pub async fn load(pool: &PgPool, tenant_id: Uuid, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let roles = RoleAssignment::active_role_names(pool, tenant_id, user_id).await?;
        let scope = scope::resolve(pool, tenant_id, user_id).await?;
        let org = OrgChart::from_links(Employee::org_links(pool, tenant_id).await?);

        Ok(Self::new(tenant_id, user_id, roles, scope, org))
    }

    /// True when the user holds the named active role.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    /// True when the user holds a role with the scope-independent
    /// visibility bypass (`admin` or `partner`).
    pub fn has_bypass(&self) -> bool {
        self.roles.iter().any(|r| is_bypass_role(r))
    }
}
