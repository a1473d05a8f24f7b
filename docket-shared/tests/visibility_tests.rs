/// End-to-end tests of the visibility engine's contract, driven through
/// the pure evaluators with hand-built contexts. No database: every
/// decision is a function of the explicit context and the record fields,
/// so the whole property surface is checkable in-process.
use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use docket_shared::access::case_visibility::evaluate as case_visible;
use docket_shared::access::context::AccessContext;
use docket_shared::access::entity_visibility::{evaluate_document, evaluate_task};
use docket_shared::access::hierarchy::OrgChart;
use docket_shared::access::scope::DataScope;
use docket_shared::access::{catalog, editor};
use docket_shared::models::case::Case;
use docket_shared::models::document::Document;
use docket_shared::models::role::SystemRole;
use docket_shared::models::task::{Task, TaskStatus};

fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

const TENANT_A: u128 = 1000;
const TENANT_B: u128 = 2000;

fn ctx_in(
    tenant: u128,
    user: u128,
    scope: DataScope,
    roles: &[&str],
    org: OrgChart,
) -> AccessContext {
    AccessContext::new(
        uid(tenant),
        uid(user),
        roles.iter().map(|r| r.to_string()).collect(),
        scope,
        org,
    )
}

fn case_in(tenant: u128, id: u128, assigned_to: u128, owner: u128) -> Case {
    Case {
        id: uid(id),
        tenant_id: uid(tenant),
        client_id: uid(77),
        case_number: format!("MAT-{id}"),
        title: "Matter".to_string(),
        assigned_to: uid(assigned_to),
        owner_id: uid(owner),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn doc_for(uploader: u128, case_id: Option<Uuid>) -> Document {
    Document {
        id: uid(9001),
        tenant_id: uid(TENANT_A),
        case_id,
        client_id: None,
        uploaded_by: uid(uploader),
        file_name: "bundle.pdf".to_string(),
        content_type: None,
        created_at: Utc::now(),
    }
}

#[test]
fn tenant_isolation_holds_for_every_role_and_scope() {
    let foreign_case = case_in(TENANT_B, 1, 5, 5);

    for scope in [DataScope::Own, DataScope::Team, DataScope::All] {
        for roles in [&["admin"][..], &["partner"][..], &["staff"][..], &[][..]] {
            let ctx = ctx_in(TENANT_A, 5, scope, roles, OrgChart::default());
            assert!(
                !case_visible(&ctx, &foreign_case),
                "cross-tenant case visible under scope {scope:?} roles {roles:?}"
            );
        }
    }
}

#[test]
fn scope_upgrades_never_hide_a_case() {
    // assigned to the user: visible under Own, must stay visible upward
    let c = case_in(TENANT_A, 1, 5, 6);
    let scopes = [DataScope::Own, DataScope::Team, DataScope::All];

    for (i, lower) in scopes.iter().enumerate() {
        let visible_lower = case_visible(
            &ctx_in(TENANT_A, 5, *lower, &["staff"], OrgChart::default()),
            &c,
        );
        for higher in &scopes[i..] {
            let visible_higher = case_visible(
                &ctx_in(TENANT_A, 5, *higher, &["staff"], OrgChart::default()),
                &c,
            );
            assert!(
                !visible_lower || visible_higher,
                "case visible under {lower:?} but hidden under {higher:?}"
            );
        }
    }
}

#[test]
fn bypass_roles_see_every_in_tenant_case() {
    let c = case_in(TENANT_A, 1, 8, 9);
    for role in ["admin", "partner"] {
        let ctx = ctx_in(TENANT_A, 5, DataScope::Own, &[role], OrgChart::default());
        assert!(case_visible(&ctx, &c));
    }
}

#[test]
fn non_author_entity_visibility_equals_case_visibility() {
    let c = case_in(TENANT_A, 1, 8, 9);
    let doc = doc_for(8, Some(c.id));

    let contexts = [
        ctx_in(TENANT_A, 5, DataScope::Own, &["staff"], OrgChart::default()),
        ctx_in(TENANT_A, 5, DataScope::All, &["staff"], OrgChart::default()),
        ctx_in(TENANT_A, 9, DataScope::Own, &["staff"], OrgChart::default()),
    ];
    for ctx in contexts {
        assert_eq!(
            evaluate_document(&ctx, &doc, Some(&c), &[]),
            case_visible(&ctx, &c),
            "inheritance bound broken for user {}",
            ctx.user_id
        );
    }
}

#[test]
fn uploader_keeps_seeing_their_document_after_case_denial() {
    let c = case_in(TENANT_A, 1, 8, 9);
    let doc = doc_for(5, Some(c.id));
    let uploader = ctx_in(TENANT_A, 5, DataScope::Own, &["staff"], OrgChart::default());

    assert!(!case_visible(&uploader, &c));
    assert!(evaluate_document(&uploader, &doc, Some(&c), &[]));
}

// Scenario 1: Own scope, unrelated -> denied; after reassignment -> allowed.
#[test]
fn own_scope_follows_reassignment() {
    let ctx = ctx_in(TENANT_A, 5, DataScope::Own, &["advocate"], OrgChart::default());

    let before = case_in(TENANT_A, 1, 8, 9);
    assert!(!case_visible(&ctx, &before));

    let mut after = before;
    after.assigned_to = uid(5);
    assert!(case_visible(&ctx, &after));
}

// Scenario 2: Team-scope manager sees a subordinate's case; an unrelated
// Team-scope peer does not.
#[test]
fn team_scope_separates_hierarchy_from_strangers() {
    // manager(10) -> sub(11); peer(12) has no hierarchy link to them
    let org = OrgChart::from_links([
        (uid(10), None),
        (uid(11), Some(uid(10))),
        (uid(12), None),
    ]);
    let c = case_in(TENANT_A, 1, 11, 11);

    let manager = ctx_in(TENANT_A, 10, DataScope::Team, &["manager"], org.clone());
    assert!(case_visible(&manager, &c));

    let stranger = ctx_in(TENANT_A, 12, DataScope::Team, &["staff"], org);
    assert!(!case_visible(&stranger, &c));
}

// Scenario 3: caseless document is visible to its uploader only (among
// Own-scope users).
#[test]
fn caseless_document_belongs_to_its_uploader() {
    let doc = doc_for(5, None);

    let uploader = ctx_in(TENANT_A, 5, DataScope::Own, &["staff"], OrgChart::default());
    assert!(evaluate_document(&uploader, &doc, None, &[]));

    let other = ctx_in(TENANT_A, 6, DataScope::Own, &["staff"], OrgChart::default());
    assert!(!evaluate_document(&other, &doc, None, &[]));
}

// Scenario 4: module toggle from a partial selection selects everything,
// toggling again clears it.
#[test]
fn module_toggle_cycles_partial_full_empty() {
    let tasks_module = catalog::module_permissions("tasks");
    assert_eq!(tasks_module.len(), 4);

    let partial: BTreeSet<String> = ["tasks.view", "tasks.create", "tasks.update"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let full = editor::toggle_module(&tasks_module, &partial);
    assert!(editor::is_module_fully_selected(&tasks_module, &full));

    let cleared = editor::toggle_module(&tasks_module, &full);
    assert!(!cleared.iter().any(|k| k.starts_with("tasks.")));
}

// Scenario 5 (mapping half): the legacy value drives a deterministic
// system-role target, with the safe fallback.
#[test]
fn legacy_role_mapping_is_deterministic() {
    use docket_shared::access::sync::map_legacy_role;

    assert_eq!(map_legacy_role("partner"), SystemRole::Partner);
    assert_eq!(map_legacy_role("staff"), SystemRole::Staff);
    assert_eq!(map_legacy_role("office_dog"), SystemRole::Staff);
}

#[test]
fn manager_task_rule_requires_team_scope() {
    let org = OrgChart::from_links([(uid(10), None), (uid(11), Some(uid(10)))]);
    let silo_case = case_in(TENANT_A, 1, 90, 91);
    let task = Task {
        id: uid(9100),
        tenant_id: uid(TENANT_A),
        case_id: Some(silo_case.id),
        client_id: None,
        assigned_to: uid(11),
        assigned_by: uid(90),
        title: "Serve notice".to_string(),
        status: TaskStatus::Open,
        due_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let team_manager = ctx_in(TENANT_A, 10, DataScope::Team, &["manager"], org.clone());
    assert!(!case_visible(&team_manager, &silo_case));
    assert!(evaluate_task(&team_manager, &task, Some(&silo_case), &[]));

    let own_manager = ctx_in(TENANT_A, 10, DataScope::Own, &["manager"], org);
    assert!(!evaluate_task(&own_manager, &task, Some(&silo_case), &[]));
}
