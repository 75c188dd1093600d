//! View models handed to the sidebar renderer.

use crate::domain::models::MenuItem;
use crate::shared::logging::log_malformed_menu_item;

use super::accordion::AccordionState;
use super::route_match::is_active;

#[derive(Debug, Clone, PartialEq)]
pub enum NavNode {
    Divider {
        section: String,
    },
    Leaf {
        label: String,
        icon: String,
        path: String,
        is_active: bool,
    },
    Group {
        label: String,
        icon: String,
        path: String,
        is_active: bool,
        is_expanded: bool,
        children: Vec<NavNode>,
    },
}

impl NavNode {
    pub fn is_active(&self) -> bool {
        match self {
            NavNode::Divider { .. } => false,
            NavNode::Leaf { is_active, .. } | NavNode::Group { is_active, .. } => *is_active,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, NavNode::Group { is_expanded: true, .. })
    }
}

/// Build the rendered tree for an already filtered menu.
///
/// Malformed nodes are skipped so one bad registry entry cannot take the
/// whole navigation down.
pub fn compose_menu(tree: &[MenuItem], pathname: &str, accordion: &AccordionState) -> Vec<NavNode> {
    tree.iter()
        .filter_map(|item| compose_item(item, pathname, accordion))
        .collect()
}

fn compose_item(item: &MenuItem, pathname: &str, accordion: &AccordionState) -> Option<NavNode> {
    if let Some(reason) = item.malformation() {
        log_malformed_menu_item(&item.path, reason);
        return None;
    }

    if item.is_divider() {
        return Some(NavNode::Divider {
            section: item.section.clone().unwrap_or_default(),
        });
    }

    let label = item.label.clone().unwrap_or_default();
    match &item.children {
        Some(children) => {
            let children = compose_menu(children, pathname, accordion);
            if children.is_empty() {
                return None;
            }
            Some(NavNode::Group {
                is_active: children.iter().any(NavNode::is_active),
                is_expanded: !accordion.collapsed && accordion.is_expanded(&item.path),
                label,
                icon: item.icon.clone(),
                path: item.path.clone(),
                children,
            })
        }
        None => Some(NavNode::Leaf {
            is_active: is_active(&item.path, pathname),
            label,
            icon: item.icon.clone(),
            path: item.path.clone(),
        }),
    }
}

/// Number of expanded groups anywhere in the tree
pub fn expanded_count(nodes: &[NavNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            NavNode::Group {
                is_expanded,
                children,
                ..
            } => usize::from(*is_expanded) + expanded_count(children),
            _ => 0,
        })
        .sum()
}
