use crate::domain::models::MenuItem;

/// `path` is active for `current` when equal or when `current` is nested under it
pub fn is_active(path: &str, current: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    current == path
        || current
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// First parent (depth first) with a direct child active for `current`
pub fn find_active_parent<'a>(tree: &'a [MenuItem], current: &str) -> Option<&'a MenuItem> {
    tree.iter().find_map(|item| {
        let children = item.children.as_deref()?;
        if children
            .iter()
            .any(|child| !child.is_divider() && is_active(&child.path, current))
        {
            return Some(item);
        }
        find_active_parent(children, current)
    })
}

/// Drop query string, fragment and trailing slash from a browser pathname
pub fn normalize_pathname(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finance_tree() -> Vec<MenuItem> {
        vec![
            MenuItem::leaf("Dashboard", "📊", "/dashboard"),
            MenuItem::parent(
                "Finance",
                "💰",
                "/f",
                vec![MenuItem::leaf("Invoices", "🧾", "/f/invoices").gated_by("module_invoices")],
            ),
        ]
    }

    #[test]
    fn test_is_active_exact_and_nested() {
        assert!(is_active("/f/invoices", "/f/invoices"));
        assert!(is_active("/f/invoices", "/f/invoices/42"));
        assert!(!is_active("/f/invoices", "/f/invoices-archive"));
        assert!(!is_active("/f/invoices", "/f"));
        assert!(!is_active("", "/anything"));
    }

    #[test]
    fn test_find_active_parent_for_nested_route() {
        let tree = finance_tree();
        let parent = find_active_parent(&tree, "/f/invoices/42").unwrap();
        assert_eq!(parent.label.as_deref(), Some("Finance"));
    }

    #[test]
    fn test_find_active_parent_ignores_top_level_leaves() {
        let tree = finance_tree();
        assert!(find_active_parent(&tree, "/dashboard").is_none());
        assert!(find_active_parent(&tree, "/elsewhere").is_none());
    }

    #[test]
    fn test_find_active_parent_returns_first_match() {
        let tree = vec![
            MenuItem::parent("One", "", "/one", vec![MenuItem::leaf("Shared", "", "/shared")]),
            MenuItem::parent("Two", "", "/two", vec![MenuItem::leaf("Shared", "", "/shared")]),
        ];
        assert_eq!(find_active_parent(&tree, "/shared").unwrap().path, "/one");
    }

    #[test]
    fn test_normalize_pathname() {
        assert_eq!(normalize_pathname("/f/invoices/?page=2"), "/f/invoices");
        assert_eq!(normalize_pathname("/f/invoices#top"), "/f/invoices");
        assert_eq!(normalize_pathname("/"), "/");
        assert_eq!(normalize_pathname(""), "/");
    }
}
