use serde::{Deserialize, Serialize};

/// A node of a role menu registry.
///
/// A node is one of:
/// - a parent: `children` is `Some` and non-empty, `path` only identifies it
///   for the accordion
/// - a leaf: `children` is `None`, `path` is navigable
/// - a section divider: `section` is set and `label` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: Option<String>,
    pub icon: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn leaf(label: &str, icon: &str, path: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            icon: icon.to_string(),
            path: path.to_string(),
            section: None,
            module_key: None,
            children: None,
        }
    }

    pub fn parent(label: &str, icon: &str, path: &str, children: Vec<MenuItem>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(label, icon, path)
        }
    }

    pub fn divider(section: &str) -> Self {
        Self {
            label: None,
            icon: String::new(),
            path: String::new(),
            section: Some(section.to_string()),
            module_key: None,
            children: None,
        }
    }

    /// Group the item under a section divider
    pub fn in_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    /// Gate the item behind a tenant module toggle
    pub fn gated_by(mut self, module_key: &str) -> Self {
        self.module_key = Some(module_key.to_string());
        self
    }

    pub fn is_divider(&self) -> bool {
        self.label.is_none() && self.section.is_some()
    }

    pub fn is_parent(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_divider() && self.children.is_none()
    }

    pub fn children(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Why this node cannot be rendered, if it cannot
    pub fn malformation(&self) -> Option<&'static str> {
        if self.is_divider() {
            return None;
        }
        if self.label.is_none() {
            return Some("item without label or section");
        }
        match &self.children {
            Some(children) if children.is_empty() => Some("parent with no children"),
            None if self.path.is_empty() => Some("leaf without path"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let leaf = MenuItem::leaf("Invoices", "🧾", "/f/invoices");
        let parent = MenuItem::parent("Finance", "💰", "/f", vec![leaf.clone()]);
        let divider = MenuItem::divider("Finance");

        assert!(leaf.is_leaf() && !leaf.is_parent() && !leaf.is_divider());
        assert!(parent.is_parent() && !parent.is_leaf());
        assert!(divider.is_divider() && !divider.is_leaf());
    }

    #[test]
    fn test_malformation() {
        assert_eq!(MenuItem::leaf("A", "", "/a").malformation(), None);
        assert_eq!(
            MenuItem::leaf("A", "", "").malformation(),
            Some("leaf without path")
        );
        assert_eq!(
            MenuItem::parent("P", "", "/p", vec![]).malformation(),
            Some("parent with no children")
        );
        assert_eq!(MenuItem::divider("Work").malformation(), None);
    }

    #[test]
    fn test_builders_set_section_and_module_key() {
        let item = MenuItem::leaf("Leads", "🎯", "/admin/leads")
            .in_section("CRM")
            .gated_by("module_leads");

        assert_eq!(item.section.as_deref(), Some("CRM"));
        assert_eq!(item.module_key.as_deref(), Some("module_leads"));
    }
}
