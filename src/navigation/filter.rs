//! Menu filtering by tenant module visibility.
//!
//! Filtering is pure: it borrows the registry and returns a freshly built
//! tree, so repeated calls always see the pristine registry.

use crate::domain::models::{MenuItem, ModuleVisibilityMap};

/// Filter a role registry by a tenant's module visibility.
///
/// `None` means the role is never filtered and the tree is returned as is.
/// Otherwise gated items whose key is explicitly disabled are dropped,
/// parents left without visible children are dropped, and section dividers
/// with no remaining item of their section after them are dropped.
pub fn filter_menu(tree: &[MenuItem], visibility: Option<&ModuleVisibilityMap>) -> Vec<MenuItem> {
    let Some(visibility) = visibility else {
        return tree.to_vec();
    };
    filter_level(tree, visibility)
}

fn filter_level(items: &[MenuItem], visibility: &ModuleVisibilityMap) -> Vec<MenuItem> {
    let kept: Vec<MenuItem> = items
        .iter()
        .filter_map(|item| filter_item(item, visibility))
        .collect();
    prune_orphan_dividers(kept)
}

fn filter_item(item: &MenuItem, visibility: &ModuleVisibilityMap) -> Option<MenuItem> {
    if let Some(key) = item.module_key.as_deref() {
        if !visibility.is_enabled(key) {
            return None;
        }
    }

    match &item.children {
        Some(children) => {
            let visible = filter_level(children, visibility);
            if visible.iter().all(MenuItem::is_divider) {
                return None;
            }
            Some(MenuItem {
                label: item.label.clone(),
                icon: item.icon.clone(),
                path: item.path.clone(),
                section: item.section.clone(),
                module_key: item.module_key.clone(),
                children: Some(visible),
            })
        }
        None => Some(item.clone()),
    }
}

/// Keep a divider only if a later non-divider item shares its section
fn prune_orphan_dividers(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let keep: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_divider() {
                return true;
            }
            items[index + 1..]
                .iter()
                .any(|later| !later.is_divider() && later.section == item.section)
        })
        .collect();

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}
