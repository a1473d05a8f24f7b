/// Reporting hierarchy
///
/// Employees form a tree through their nullable `manager_id`
/// self-reference. Team-scope visibility walks this tree: a user sees
/// records belonging to their direct and transitive subordinates, and to
/// peers reporting to the same immediate manager.
///
/// The walk is iterative with a hard depth cap. Writes keep the tree
/// acyclic, but the walk guards against cycles anyway - a corrupted chain
/// must terminate, not spin.
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Upper bound on the manager-chain walk. No real firm is this deep.
const MAX_CHAIN_DEPTH: usize = 64;

/// In-memory snapshot of one tenant's manager links.
///
/// Built once per evaluation context from `(user_id, manager_id)` employee
/// rows and queried by the visibility evaluators. Never spans tenants.
#[derive(Debug, Clone, Default)]
pub struct OrgChart {
    manager_of: HashMap<Uuid, Option<Uuid>>,
}

impl OrgChart {
    /// Builds a chart from `(user_id, manager_id)` pairs.
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, Option<Uuid>)>,
    {
        Self {
            manager_of: links.into_iter().collect(),
        }
    }

    /// Immediate manager of a user, if any.
    pub fn manager_of(&self, user_id: Uuid) -> Option<Uuid> {
        self.manager_of.get(&user_id).copied().flatten()
    }

    /// True if `target` is a direct or transitive subordinate of `manager`.
    ///
    /// Walks the `manager_id` chain upward from `target`, bounded by
    /// [`MAX_CHAIN_DEPTH`] and a visited set. A user is not their own
    /// subordinate.
    pub fn is_subordinate(&self, manager_id: Uuid, target_id: Uuid) -> bool {
        if manager_id == target_id {
            return false;
        }

        let mut current = target_id;
        let mut visited = HashSet::new();
        for _ in 0..MAX_CHAIN_DEPTH {
            let Some(next) = self.manager_of(current) else {
                return false;
            };
            if next == manager_id {
                return true;
            }
            if !visited.insert(next) {
                // cycle - corrupted chain, treat as no relation
                return false;
            }
            current = next;
        }
        false
    }

    /// True if `a` and `b` report to the same immediate manager.
    ///
    /// Both must actually have a manager; two roots are not a team.
    pub fn same_team(&self, a: Uuid, b: Uuid) -> bool {
        if a == b {
            return false;
        }
        match (self.manager_of(a), self.manager_of(b)) {
            (Some(ma), Some(mb)) => ma == mb,
            _ => false,
        }
    }

    /// The reporting-line test used by Team-scope case visibility.
    ///
    /// `target` is in `user`'s reporting line when it is a direct or
    /// transitive subordinate, or when both report to the same immediate
    /// manager (lateral same-team visibility).
    pub fn in_reporting_line(&self, user_id: Uuid, target_id: Uuid) -> bool {
        self.is_subordinate(user_id, target_id) || self.same_team(user_id, target_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    /// partner(1) -> senior(2) -> junior(3); senior(2) -> junior(4); paralegal(5) reports to nobody
    fn sample_chart() -> OrgChart {
        OrgChart::from_links([
            (uid(1), None),
            (uid(2), Some(uid(1))),
            (uid(3), Some(uid(2))),
            (uid(4), Some(uid(2))),
            (uid(5), None),
        ])
    }

    #[test]
    fn test_direct_subordinate() {
        let org = sample_chart();
        assert!(org.is_subordinate(uid(1), uid(2)));
        assert!(org.is_subordinate(uid(2), uid(3)));
        assert!(!org.is_subordinate(uid(2), uid(1)));
    }

    #[test]
    fn test_transitive_subordinate() {
        let org = sample_chart();
        assert!(org.is_subordinate(uid(1), uid(3)));
        assert!(org.is_subordinate(uid(1), uid(4)));
        assert!(!org.is_subordinate(uid(3), uid(1)));
    }

    #[test]
    fn test_not_own_subordinate() {
        let org = sample_chart();
        assert!(!org.is_subordinate(uid(2), uid(2)));
    }

    #[test]
    fn test_same_team_laterally() {
        let org = sample_chart();
        assert!(org.same_team(uid(3), uid(4)));
        assert!(org.same_team(uid(4), uid(3)));
        // different managers
        assert!(!org.same_team(uid(2), uid(3)));
        // two roots are not a team
        assert!(!org.same_team(uid(1), uid(5)));
    }

    #[test]
    fn test_reporting_line_combines_both() {
        let org = sample_chart();
        // downward
        assert!(org.in_reporting_line(uid(2), uid(3)));
        // lateral
        assert!(org.in_reporting_line(uid(3), uid(4)));
        // upward is not included
        assert!(!org.in_reporting_line(uid(3), uid(2)));
        // unrelated
        assert!(!org.in_reporting_line(uid(5), uid(3)));
    }

    #[test]
    fn test_cycle_terminates() {
        // a -> b -> c -> a, corrupted on purpose
        let org = OrgChart::from_links([
            (uid(10), Some(uid(11))),
            (uid(11), Some(uid(12))),
            (uid(12), Some(uid(10))),
        ]);
        assert!(!org.is_subordinate(uid(99), uid(10)));
        // relations inside the cycle still resolve where reachable
        assert!(org.is_subordinate(uid(11), uid(10)));
    }

    #[test]
    fn test_unknown_users_have_no_relations() {
        let org = sample_chart();
        assert!(!org.is_subordinate(uid(1), uid(99)));
        assert!(!org.same_team(uid(99), uid(3)));
    }
}
