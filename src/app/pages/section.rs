use dioxus::prelude::*;

use crate::app::components::NavCard;
use crate::app::routes::Route;
use crate::domain::models::Role;
use crate::navigation::{find_active_parent, find_by_path, registry};
use crate::shared::hooks::ModuleSettingsHandle;

/// Any menu destination without a dedicated page
#[component]
pub fn Section(segments: Vec<String>) -> Element {
    let settings = use_context::<ModuleSettingsHandle>();

    let pathname = format!("/{}", segments.join("/"));
    let role = Role::from_pathname(&pathname);
    let tree = role.map(registry).unwrap_or(&[]);

    let Some(item) = find_by_path(tree, &pathname) else {
        return rsx! {
            div { class: "c-page c-page--missing",
                h1 { class: "c-page__title", "Page not found" }
                p { "Nothing lives at {pathname}." }
                Link { to: Route::Home {}, class: "c-button c-button--secondary", "Back to the dashboards" }
            }
        };
    };

    let label = item.label.clone().unwrap_or_default();
    let breadcrumb = find_active_parent(tree, &pathname)
        .filter(|parent| parent.path != pathname)
        .and_then(|parent| parent.label.clone());

    // Pages stay reachable by URL; only the menu hides disabled modules
    let disabled = match (role, item.module_key.as_deref()) {
        (Some(role), Some(key)) => settings
            .visibility_for(role)
            .is_some_and(|visibility| !visibility.is_enabled(key)),
        _ => false,
    };

    let children: Vec<_> = item.children().iter().filter(|child| !child.is_divider()).cloned().collect();

    rsx! {
        div { class: "c-page",
            if let Some(parent) = breadcrumb {
                p { class: "c-page__breadcrumb", "{parent} / {label}" }
            }
            h1 { class: "c-page__title", "{item.icon} {label}" }

            if disabled {
                div { class: "c-notice c-notice--warning",
                    "This module is disabled for your company."
                }
            }

            if children.is_empty() {
                p { class: "c-page__subtitle", "Nothing to show here yet." }
            } else {
                div { class: "c-page__grid",
                    for child in children {
                        NavCard {
                            key: "{child.path}",
                            icon: child.icon.clone(),
                            title: child.label.clone().unwrap_or_default(),
                            to: child.path.clone(),
                        }
                    }
                }
            }
        }
    }
}
