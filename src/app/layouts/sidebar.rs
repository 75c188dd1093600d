use dioxus::prelude::*;

use crate::domain::models::Role;
use crate::navigation::{compose_menu, filter_menu, normalize_pathname, registry, NavNode};
use crate::shared::hooks::{use_sidebar, ModuleSettingsHandle, UseSidebarReturn};

/// Role menu, filtered by the tenant's module settings
#[component]
pub fn Sidebar(role: Role, pathname: String, collapsed: bool) -> Element {
    let settings = use_context::<ModuleSettingsHandle>();

    // Reading the store here re-renders the sidebar when a module is toggled
    let visibility = settings.visibility_for(role);
    let tree = filter_menu(registry(role), visibility.as_ref());
    let pathname = normalize_pathname(&pathname).to_string();

    let sidebar = use_sidebar(role, tree.clone(), pathname.clone(), collapsed);
    let nodes = compose_menu(&tree, &pathname, &sidebar.accordion.read());

    let sidebar_class = if collapsed {
        "c-sidebar c-sidebar--collapsed"
    } else {
        "c-sidebar"
    };

    rsx! {
        aside { class: "{sidebar_class}",
            div { class: "c-sidebar__header",
                span { class: "c-sidebar__role-icon", "{role.icon()}" }
                if !collapsed {
                    h2 { class: "c-sidebar__title", "{role.display_name()}" }
                }
            }
            nav { class: "c-sidebar__nav",
                ul { class: "c-sidebar__list",
                    for node in nodes {
                        SidebarNode { node, sidebar, collapsed }
                    }
                }
            }
        }
    }
}

#[component]
fn SidebarNode(node: NavNode, sidebar: UseSidebarReturn, collapsed: bool) -> Element {
    match node {
        NavNode::Divider { section } => rsx! {
            li { class: "c-sidebar__divider",
                if !collapsed {
                    span { class: "c-sidebar__section", "{section}" }
                }
            }
        },
        NavNode::Leaf { label, icon, path, is_active } => {
            let item_class = if is_active {
                "c-sidebar__item c-sidebar__item--active"
            } else {
                "c-sidebar__item"
            };

            rsx! {
                li {
                    Link {
                        to: path,
                        class: "{item_class}",
                        span { class: "c-sidebar__icon", "{icon}" }
                        if !collapsed {
                            span { class: "c-sidebar__label", "{label}" }
                        }
                    }
                }
            }
        }
        NavNode::Group { label, icon, path, is_active, is_expanded, children } => {
            let group_class = if is_active {
                "c-sidebar__group-toggle c-sidebar__group-toggle--active"
            } else {
                "c-sidebar__group-toggle"
            };
            let chevron = if is_expanded { "▾" } else { "▸" };

            rsx! {
                li { class: "c-sidebar__group",
                    button {
                        class: "{group_class}",
                        aria_expanded: "{is_expanded}",
                        onclick: move |_| sidebar.toggle(&path),
                        span { class: "c-sidebar__icon", "{icon}" }
                        if !collapsed {
                            span { class: "c-sidebar__label", "{label}" }
                            span { class: "c-sidebar__chevron", "{chevron}" }
                        }
                    }
                    if is_expanded && !collapsed {
                        ul { class: "c-sidebar__children",
                            for child in children {
                                SidebarNode { node: child, sidebar, collapsed }
                            }
                        }
                    }
                }
            }
        }
    }
}
