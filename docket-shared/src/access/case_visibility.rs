/// Case visibility evaluator
///
/// The decision core. A case is visible when, in order:
///
/// 1. it belongs to the user's tenant (a mismatch denies unconditionally,
///    before any role is consulted);
/// 2. the user holds an active `admin` or `partner` role (bypass);
/// 3. the user's scope is `All`;
/// 4. the scope is `Team` and the assignee or owner is the user, one of
///    their direct or transitive subordinates, or a peer under the same
///    immediate manager;
/// 5. the scope is `Own` and the assignee or owner is the user.
///
/// The evaluator is a pure function of the context and the case row - no
/// writes, no side effects, safe to call concurrently from any number of
/// request tasks.
///
/// Denial never surfaces as an error: an unresolvable case (wrong tenant,
/// or nonexistent) is just `false`, so absence of access is
/// indistinguishable from absence of the record.
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::context::AccessContext;
use crate::access::scope::DataScope;
use crate::models::case::Case;

/// Pure case-visibility predicate.
pub fn evaluate(ctx: &AccessContext, case: &Case) -> bool {
    if case.tenant_id != ctx.tenant_id {
        return false;
    }
    if ctx.has_bypass() {
        return true;
    }

    let own = case.assigned_to == ctx.user_id || case.owner_id == ctx.user_id;
    match ctx.scope {
        DataScope::All => true,
        DataScope::Team => {
            own || ctx.org.in_reporting_line(ctx.user_id, case.assigned_to)
                || ctx.org.in_reporting_line(ctx.user_id, case.owner_id)
        }
        DataScope::Own => own,
    }
}

/// Fetches a case and evaluates its visibility.
///
/// Absent or cross-tenant cases are `Ok(false)`, never an error.
pub async fn can_view_case(
    pool: &PgPool,
    ctx: &AccessContext,
    case_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let Some(case) = Case::find_by_id_and_tenant(pool, ctx.tenant_id, case_id).await? else {
        return Ok(false);
    };
    Ok(evaluate(ctx, &case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::hierarchy::OrgChart;
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    const TENANT: u128 = 100;

    fn ctx(user: u128, scope: DataScope, roles: &[&str], org: OrgChart) -> AccessContext {
        AccessContext::new(
            uid(TENANT),
            uid(user),
            roles.iter().map(|r| r.to_string()).collect(),
            scope,
            org,
        )
    }

    fn case(tenant: u128, assigned_to: u128, owner: u128) -> Case {
        Case {
            id: uid(999),
            tenant_id: uid(tenant),
            client_id: uid(50),
            case_number: "MAT-2024-001".to_string(),
            title: "Estate of Hargreaves".to_string(),
            assigned_to: uid(assigned_to),
            owner_id: uid(owner),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cross_tenant_is_always_denied() {
        let c = case(200, 1, 1);
        // even an admin with All scope
        let ctx = ctx(1, DataScope::All, &["admin"], OrgChart::default());
        assert!(!evaluate(&ctx, &c));
    }

    #[test]
    fn test_bypass_dominates_scope() {
        let c = case(TENANT, 7, 8);
        for role in ["admin", "partner"] {
            let ctx = ctx(1, DataScope::Own, &[role], OrgChart::default());
            assert!(evaluate(&ctx, &c), "{role} should bypass scope");
        }
    }

    #[test]
    fn test_all_scope_sees_everything_in_tenant() {
        let c = case(TENANT, 7, 8);
        let ctx = ctx(1, DataScope::All, &["staff"], OrgChart::default());
        assert!(evaluate(&ctx, &c));
    }

    #[test]
    fn test_own_scope_requires_assignment_or_ownership() {
        let unrelated = ctx(1, DataScope::Own, &["staff"], OrgChart::default());
        assert!(!evaluate(&unrelated, &case(TENANT, 7, 8)));

        let assignee = ctx(7, DataScope::Own, &["staff"], OrgChart::default());
        assert!(evaluate(&assignee, &case(TENANT, 7, 8)));

        let owner = ctx(8, DataScope::Own, &["staff"], OrgChart::default());
        assert!(evaluate(&owner, &case(TENANT, 7, 8)));
    }

    #[test]
    fn test_team_scope_sees_subordinate_cases() {
        // manager(1) -> associate(2); case assigned to the associate
        let org = OrgChart::from_links([(uid(1), None), (uid(2), Some(uid(1)))]);
        let manager = ctx(1, DataScope::Team, &["manager"], org.clone());
        assert!(evaluate(&manager, &case(TENANT, 2, 2)));

        // the subordinate does not see upward
        let associate = ctx(2, DataScope::Team, &["staff"], org);
        assert!(!evaluate(&associate, &case(TENANT, 1, 1)));
    }

    #[test]
    fn test_team_scope_sees_lateral_peer_cases() {
        // both report to manager(1)
        let org = OrgChart::from_links([
            (uid(1), None),
            (uid(2), Some(uid(1))),
            (uid(3), Some(uid(1))),
        ]);
        let peer = ctx(2, DataScope::Team, &["staff"], org);
        assert!(evaluate(&peer, &case(TENANT, 3, 3)));
    }

    #[test]
    fn test_team_scope_denies_unrelated_users() {
        let org = OrgChart::from_links([
            (uid(1), None),
            (uid(2), Some(uid(1))),
            (uid(9), None),
        ]);
        let outsider = ctx(9, DataScope::Team, &["staff"], org);
        assert!(!evaluate(&outsider, &case(TENANT, 2, 2)));
    }

    #[test]
    fn test_scope_monotonicity() {
        // whatever Own can see, Team and All can see too
        let org = OrgChart::default();
        let c = case(TENANT, 4, 4);
        for scope in [DataScope::Own, DataScope::Team, DataScope::All] {
            let ctx = ctx(4, scope, &["staff"], org.clone());
            assert!(evaluate(&ctx, &c), "visible under {scope:?}");
        }
    }
}
