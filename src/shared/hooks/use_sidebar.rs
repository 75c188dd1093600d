use dioxus::prelude::*;

use crate::domain::models::{MenuItem, Role};
use crate::navigation::{AccordionEvent, AccordionState};
use crate::shared::logging::log_route_change;

const COLLAPSED_KEY: &str = "sidebar_collapsed";

#[derive(Clone, Copy, PartialEq)]
pub struct UseSidebarReturn {
    pub accordion: Signal<AccordionState>,
}

impl UseSidebarReturn {
    pub fn toggle(&self, path: &str) {
        let mut accordion = self.accordion;
        accordion.with_mut(|state| {
            state.apply(AccordionEvent::Toggled { path });
        });
    }
}

/// Accordion state for one sidebar.
///
/// Fed from the latest filtered tree and pathname. The reducer itself ignores
/// a pathname it has already seen, so re-running this effect for an unrelated
/// re-render leaves a manually closed section closed.
pub fn use_sidebar(role: Role, tree: Vec<MenuItem>, pathname: String, collapsed: bool) -> UseSidebarReturn {
    let mut accordion = use_signal(AccordionState::default);

    use_effect(use_reactive!(|(role, tree, pathname, collapsed)| {
        accordion.with_mut(|state| {
            state.apply(AccordionEvent::CollapsedChanged {
                collapsed,
                tree: &tree,
            });
            if state.apply(AccordionEvent::RouteChanged {
                pathname: &pathname,
                tree: &tree,
            }) {
                log_route_change(role, &pathname, state.active_menu_path.as_deref());
            }
        });
    }));

    UseSidebarReturn { accordion }
}

/// Sidebar collapsed flag, restored from localStorage on mount
pub fn use_sidebar_collapsed() -> Signal<bool> {
    #[allow(unused_mut)]
    let mut collapsed = use_signal(|| false);

    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(saved) = load_sidebar_collapsed() {
                collapsed.set(saved);
            }
        }
    });

    collapsed
}

#[cfg(target_arch = "wasm32")]
fn load_sidebar_collapsed() -> Option<bool> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let saved = storage.get_item(COLLAPSED_KEY).ok()??;
    Some(saved == "true")
}

/// Save the collapsed flag to localStorage
#[cfg(target_arch = "wasm32")]
pub fn save_sidebar_collapsed(collapsed: bool) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(COLLAPSED_KEY, if collapsed { "true" } else { "false" });
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_sidebar_collapsed(_collapsed: bool) {
    // No-op on server
    let _ = COLLAPSED_KEY;
}
