use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::Role;

/// Global navbar with logo, sidebar toggle and role switcher
#[component]
pub fn AppNavbar(
    #[props(!optional)] role: Option<Role>,
    collapsed: bool,
    on_toggle_collapse: EventHandler<()>,
) -> Element {
    let toggle_label = if collapsed { "Expand sidebar" } else { "Collapse sidebar" };

    let role_links: Vec<(Role, &'static str)> = Role::ALL
        .iter()
        .map(|candidate| {
            let class = if role == Some(*candidate) {
                "c-navbar__role c-navbar__role--active"
            } else {
                "c-navbar__role"
            };
            (*candidate, class)
        })
        .collect();

    rsx! {
        nav { class: "c-navbar",
            if role.is_some() {
                button {
                    class: "c-navbar__collapse",
                    aria_label: "{toggle_label}",
                    onclick: move |_| on_toggle_collapse.call(()),
                    if collapsed { "»" } else { "«" }
                }
            }

            Link {
                to: Route::Home {},
                class: "c-navbar__logo",
                "🧭 CRM Console"
            }

            // Right: jump between role dashboards
            div { class: "c-navbar__actions",
                for (candidate, class) in role_links {
                    Link {
                        key: "{candidate.slug()}",
                        to: candidate.dashboard_path(),
                        class: "{class}",
                        "{candidate.icon()} {candidate.display_name()}"
                    }
                }
            }
        }
    }
}
