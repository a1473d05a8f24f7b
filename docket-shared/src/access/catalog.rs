/// Permission catalog
///
/// Static registry of every `(module, action)` permission pair the system
/// understands, keyed as `module.action` strings (e.g. `cases.update`).
/// The catalog is populated at compile time and immutable thereafter -
/// role definitions reference these keys and nothing else.
///
/// # Example
///
/// ```
/// use docket_shared::access::catalog;
///
/// let info = catalog::describe("cases.update").unwrap();
/// assert_eq!(info.module, "cases");
/// assert_eq!(info.action, "update");
///
/// assert!(catalog::is_known("documents.upload"));
/// assert!(!catalog::is_known("documents.shred"));
/// ```
use crate::error::{AccessError, AccessResult};

/// A single registered permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionInfo {
    /// Full key, `module.action`
    pub key: &'static str,

    /// Module the permission belongs to
    pub module: &'static str,

    /// Action within the module
    pub action: &'static str,

    /// Human-readable label for role-editing UIs
    pub label: &'static str,
}

/// The complete permission catalog, in stable order.
///
/// Keys are immutable once referenced by any role; additions go at the end
/// of their module block.
pub const CATALOG: &[PermissionInfo] = &[
    // Cases
    PermissionInfo { key: "cases.view", module: "cases", action: "view", label: "View cases" },
    PermissionInfo { key: "cases.create", module: "cases", action: "create", label: "Create cases" },
    PermissionInfo { key: "cases.update", module: "cases", action: "update", label: "Update cases" },
    PermissionInfo { key: "cases.delete", module: "cases", action: "delete", label: "Delete cases" },
    // Clients
    PermissionInfo { key: "clients.view", module: "clients", action: "view", label: "View clients" },
    PermissionInfo { key: "clients.create", module: "clients", action: "create", label: "Create clients" },
    PermissionInfo { key: "clients.update", module: "clients", action: "update", label: "Update clients" },
    PermissionInfo { key: "clients.delete", module: "clients", action: "delete", label: "Delete clients" },
    // Documents
    PermissionInfo { key: "documents.view", module: "documents", action: "view", label: "View documents" },
    PermissionInfo { key: "documents.upload", module: "documents", action: "upload", label: "Upload documents" },
    PermissionInfo { key: "documents.update", module: "documents", action: "update", label: "Update documents" },
    PermissionInfo { key: "documents.delete", module: "documents", action: "delete", label: "Delete documents" },
    PermissionInfo { key: "documents.download", module: "documents", action: "download", label: "Download documents" },
    // Tasks
    PermissionInfo { key: "tasks.view", module: "tasks", action: "view", label: "View tasks" },
    PermissionInfo { key: "tasks.create", module: "tasks", action: "create", label: "Create tasks" },
    PermissionInfo { key: "tasks.update", module: "tasks", action: "update", label: "Update tasks" },
    PermissionInfo { key: "tasks.delete", module: "tasks", action: "delete", label: "Delete tasks" },
    // Hearings
    PermissionInfo { key: "hearings.view", module: "hearings", action: "view", label: "View hearings" },
    PermissionInfo { key: "hearings.create", module: "hearings", action: "create", label: "Schedule hearings" },
    PermissionInfo { key: "hearings.update", module: "hearings", action: "update", label: "Update hearings" },
    PermissionInfo { key: "hearings.delete", module: "hearings", action: "delete", label: "Delete hearings" },
    // Team (employee directory)
    PermissionInfo { key: "team.view", module: "team", action: "view", label: "View team members" },
    PermissionInfo { key: "team.create", module: "team", action: "create", label: "Add team members" },
    PermissionInfo { key: "team.update", module: "team", action: "update", label: "Update team members" },
    PermissionInfo { key: "team.delete", module: "team", action: "delete", label: "Remove team members" },
    // Roles
    PermissionInfo { key: "roles.view", module: "roles", action: "view", label: "View roles" },
    PermissionInfo { key: "roles.create", module: "roles", action: "create", label: "Create roles" },
    PermissionInfo { key: "roles.update", module: "roles", action: "update", label: "Update roles" },
    PermissionInfo { key: "roles.delete", module: "roles", action: "delete", label: "Delete roles" },
    // Reports
    PermissionInfo { key: "reports.view", module: "reports", action: "view", label: "View reports" },
    PermissionInfo { key: "reports.export", module: "reports", action: "export", label: "Export reports" },
    // Settings
    PermissionInfo { key: "settings.view", module: "settings", action: "view", label: "View firm settings" },
    PermissionInfo { key: "settings.update", module: "settings", action: "update", label: "Update firm settings" },
];

/// Returns the full catalog in stable, restartable order.
pub fn all() -> &'static [PermissionInfo] {
    CATALOG
}

/// Returns every registered permission key in catalog order.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|p| p.key)
}

/// Looks up a permission by key.
///
/// # Errors
///
/// Returns `AccessError::UnknownPermission` if the key is not registered.
pub fn describe(key: &str) -> AccessResult<&'static PermissionInfo> {
    CATALOG
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| AccessError::UnknownPermission(key.to_string()))
}

/// Membership test against the catalog.
pub fn is_known(key: &str) -> bool {
    CATALOG.iter().any(|p| p.key == key)
}

/// Returns the distinct module names in catalog order.
pub fn modules() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for p in CATALOG {
        if !seen.contains(&p.module) {
            seen.push(p.module);
        }
    }
    seen
}

/// Returns the permission keys belonging to one module, in catalog order.
///
/// An unknown module yields an empty list, not an error - the caller is
/// iterating modules it got from [`modules`].
pub fn module_permissions(module: &str) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|p| p.module == module)
        .map(|p| p.key)
        .collect()
}

/// Validates that every key in a candidate set is registered.
///
/// Used by role mutations before persisting a permission set.
///
/// # Errors
///
/// Returns `AccessError::UnknownPermission` naming the first unknown key.
pub fn validate_keys<'a, I>(keys: I) -> AccessResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    for key in keys {
        if !is_known(key) {
            return Err(AccessError::UnknownPermission(key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_are_module_dot_action() {
        for p in all() {
            assert_eq!(p.key, format!("{}.{}", p.module, p.action));
        }
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut keys: Vec<_> = all_keys().collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), CATALOG.len());
    }

    #[test]
    fn test_describe_known_key() {
        let info = describe("hearings.create").unwrap();
        assert_eq!(info.module, "hearings");
        assert_eq!(info.action, "create");
        assert_eq!(info.label, "Schedule hearings");
    }

    #[test]
    fn test_describe_unknown_key() {
        let err = describe("cases.merge").unwrap_err();
        assert!(matches!(err, AccessError::UnknownPermission(k) if k == "cases.merge"));
    }

    #[test]
    fn test_module_permissions_order_is_stable() {
        let docs = module_permissions("documents");
        assert_eq!(
            docs,
            vec![
                "documents.view",
                "documents.upload",
                "documents.update",
                "documents.delete",
                "documents.download",
            ]
        );
    }

    #[test]
    fn test_modules_cover_catalog() {
        let modules = modules();
        assert!(modules.contains(&"cases"));
        assert!(modules.contains(&"settings"));

        let total: usize = modules.iter().map(|m| module_permissions(m).len()).sum();
        assert_eq!(total, CATALOG.len());
    }

    #[test]
    fn test_validate_keys() {
        assert!(validate_keys(["cases.view", "tasks.update"]).is_ok());

        let err = validate_keys(["cases.view", "cases.escalate"]).unwrap_err();
        assert!(matches!(err, AccessError::UnknownPermission(k) if k == "cases.escalate"));
    }
}
