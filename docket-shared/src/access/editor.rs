/// Role-permission editor logic
///
/// Pure helpers behind the role editor's per-module "select all" checkbox:
/// tri-state detection and bulk toggling over a candidate permission set.
/// Nothing here touches the store - callers persist the resulting set via
/// `RoleDefinition::update_permissions`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use docket_shared::access::{catalog, editor};
///
/// let module = catalog::module_permissions("tasks");
/// let mut selected: BTreeSet<String> = ["tasks.view", "tasks.update"]
///     .iter().map(|s| s.to_string()).collect();
///
/// assert!(editor::is_module_partially_selected(&module, &selected));
///
/// // partial -> select all in the module
/// selected = editor::toggle_module(&module, &selected);
/// assert!(editor::is_module_fully_selected(&module, &selected));
///
/// // full -> clear the module
/// selected = editor::toggle_module(&module, &selected);
/// assert!(!selected.iter().any(|k| k.starts_with("tasks.")));
/// ```
use std::collections::BTreeSet;

use crate::access::catalog;

/// True when every permission of the module is in the selected set.
///
/// An empty module is never "fully selected" - the checkbox would have
/// nothing to stand for.
pub fn is_module_fully_selected(module_keys: &[&str], selected: &BTreeSet<String>) -> bool {
    !module_keys.is_empty() && module_keys.iter().all(|k| selected.contains(*k))
}

/// True when some, but not all, permissions of the module are selected.
pub fn is_module_partially_selected(module_keys: &[&str], selected: &BTreeSet<String>) -> bool {
    let count = module_keys.iter().filter(|k| selected.contains(**k)).count();
    count > 0 && count < module_keys.len()
}

/// Toggles a whole module in the candidate set.
///
/// Fully selected → every key of the module is removed; anything less →
/// every key of the module is added. Keys outside the module are never
/// touched.
pub fn toggle_module(module_keys: &[&str], selected: &BTreeSet<String>) -> BTreeSet<String> {
    let mut next = selected.clone();
    if is_module_fully_selected(module_keys, selected) {
        for key in module_keys {
            next.remove(*key);
        }
    } else {
        for key in module_keys {
            next.insert((*key).to_string());
        }
    }
    next
}

/// The full catalog as a candidate set.
pub fn select_all() -> BTreeSet<String> {
    catalog::all_keys().map(String::from).collect()
}

/// The empty candidate set.
pub fn clear_all() -> BTreeSet<String> {
    BTreeSet::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_tri_state_detection() {
        let module = catalog::module_permissions("cases");

        let none = selected(&[]);
        assert!(!is_module_fully_selected(&module, &none));
        assert!(!is_module_partially_selected(&module, &none));

        let some = selected(&["cases.view", "cases.update"]);
        assert!(!is_module_fully_selected(&module, &some));
        assert!(is_module_partially_selected(&module, &some));

        let all = selected(&["cases.view", "cases.create", "cases.update", "cases.delete"]);
        assert!(is_module_fully_selected(&module, &all));
        assert!(!is_module_partially_selected(&module, &all));
    }

    #[test]
    fn test_toggle_partial_selects_all() {
        let module = catalog::module_permissions("documents");
        // 3 of 5 selected
        let current = selected(&["documents.view", "documents.upload", "documents.update"]);

        let next = toggle_module(&module, &current);
        assert!(is_module_fully_selected(&module, &next));
        assert_eq!(next.len(), module.len());
    }

    #[test]
    fn test_toggle_full_clears_module_only() {
        let module = catalog::module_permissions("tasks");
        let mut current = selected(&["tasks.view", "tasks.create", "tasks.update", "tasks.delete"]);
        // a key from another module must survive the toggle
        current.insert("cases.view".to_string());

        let next = toggle_module(&module, &current);
        assert!(!next.iter().any(|k| k.starts_with("tasks.")));
        assert!(next.contains("cases.view"));
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let module = catalog::module_permissions("hearings");
        let start = selected(&["hearings.view"]);

        let full = toggle_module(&module, &start);
        let cleared = toggle_module(&module, &full);
        assert!(!cleared.iter().any(|k| k.starts_with("hearings.")));
    }

    #[test]
    fn test_select_all_and_clear_all() {
        assert_eq!(select_all().len(), catalog::all().len());
        assert!(clear_all().is_empty());
    }

    #[test]
    fn test_empty_module_is_never_full() {
        let empty: Vec<&str> = Vec::new();
        assert!(!is_module_fully_selected(&empty, &select_all()));
        assert!(!is_module_partially_selected(&empty, &select_all()));
    }
}
