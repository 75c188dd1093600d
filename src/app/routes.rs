use dioxus::prelude::*;

use crate::app::components::Toast;
use crate::app::layouts::{AppNavbar, Sidebar};
use crate::app::pages::{Dashboard, Home, ModuleSettingsPage, Section};
use crate::config::ClientConfig;
use crate::domain::models::Role;
use crate::shared::hooks::{save_sidebar_collapsed, use_module_settings, use_sidebar_collapsed};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    // Landing page - role selection
    #[route("/")]
    Home {},

    // Declared before the catch-all so it wins for managers
    #[route("/:role/settings/modules")]
    ModuleSettingsPage { role: String },

    #[route("/:role/dashboard")]
    Dashboard { role: String },

    // Every other menu entry
    #[route("/:..segments")]
    Section { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("CRM console initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    let config = use_hook(ClientConfig::default);
    let settings = use_module_settings(config.company_id);
    use_context_provider(|| settings);

    let mut collapsed = use_sidebar_collapsed();
    let pathname = use_route::<Route>().to_string();
    let role = Role::from_pathname(&pathname);

    rsx! {
        document::Link {
            rel: "stylesheet",
            href: BUNDLE_CSS
        },
        div { class: "c-layout",
            AppNavbar {
                role,
                collapsed: collapsed(),
                on_toggle_collapse: move |_| {
                    let next = !collapsed();
                    collapsed.set(next);
                    save_sidebar_collapsed(next);
                },
            }

            div { class: "c-layout__body",
                // Only dashboard areas get a role menu
                if let Some(role) = role {
                    Sidebar { role, pathname: pathname.clone(), collapsed: collapsed() }
                }

                main { class: "c-layout__main",
                    Outlet::<Route> {}
                }
            }

            Toast { message: settings.toast }
        }
    }
}
