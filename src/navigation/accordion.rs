//! Single-open accordion for the sidebar.
//!
//! The open submenu is one `Option<String>`, so two expanded parents cannot
//! exist. Transitions are plain functions of `(state, event)`; the UI only
//! forwards route changes, toggles and collapse changes.

use crate::domain::models::MenuItem;

use super::route_match::find_active_parent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionState {
    /// Path of the one expanded parent
    pub active_menu_path: Option<String>,
    /// Last pathname seen by a `RouteChanged` event
    pub previous_pathname: Option<String>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum AccordionEvent<'a> {
    /// The browser pathname was observed, on mount or after navigation
    RouteChanged {
        pathname: &'a str,
        tree: &'a [MenuItem],
    },
    /// The user clicked a parent header
    Toggled { path: &'a str },
    /// The sidebar was collapsed to a rail or expanded again
    CollapsedChanged {
        collapsed: bool,
        tree: &'a [MenuItem],
    },
}

impl AccordionState {
    pub fn is_expanded(&self, path: &str) -> bool {
        self.active_menu_path.as_deref() == Some(path)
    }

    pub fn reduce(mut self, event: AccordionEvent<'_>) -> Self {
        self.apply(event);
        self
    }

    /// Apply an event in place. Returns whether anything changed.
    pub fn apply(&mut self, event: AccordionEvent<'_>) -> bool {
        let before = self.clone();
        match event {
            AccordionEvent::RouteChanged { pathname, tree } => {
                if self.previous_pathname.as_deref() == Some(pathname) {
                    return false;
                }
                self.previous_pathname = Some(pathname.to_string());
                self.auto_expand(tree);
            }
            AccordionEvent::Toggled { path } => {
                if self.collapsed {
                    return false;
                }
                if self.is_expanded(path) {
                    self.active_menu_path = None;
                } else {
                    self.active_menu_path = Some(path.to_string());
                }
            }
            AccordionEvent::CollapsedChanged { collapsed, tree } => {
                if self.collapsed == collapsed {
                    return false;
                }
                self.collapsed = collapsed;
                if collapsed {
                    self.active_menu_path = None;
                } else {
                    self.auto_expand(tree);
                }
            }
        }
        *self != before
    }

    fn auto_expand(&mut self, tree: &[MenuItem]) {
        if self.collapsed {
            return;
        }
        let Some(pathname) = self.previous_pathname.as_deref() else {
            return;
        };
        if let Some(parent) = find_active_parent(tree, pathname) {
            self.active_menu_path = Some(parent.path.clone());
        }
    }
}
