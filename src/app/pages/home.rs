use dioxus::prelude::*;

use crate::app::components::NavCard;
use crate::domain::models::Role;

/// Landing page - pick the dashboard to open
#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "c-page c-home",
            h1 { class: "c-page__title", "Choose a dashboard" }
            p { class: "c-page__subtitle",
                "Each role gets its own menu. Client and employee menus follow the company's module settings."
            }
            div { class: "c-page__grid",
                for role in Role::ALL {
                    NavCard {
                        key: "{role.slug()}",
                        icon: role.icon().to_string(),
                        title: role.display_name().to_string(),
                        description: role_summary(role).to_string(),
                        to: role.dashboard_path(),
                    }
                }
            }
        }
    }
}

fn role_summary(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin => "Companies, packages and platform billing",
        Role::Admin => "Run the company and choose which modules are enabled",
        Role::Employee => "Daily work and HR, limited to enabled modules",
        Role::Client => "Projects, finance and support, limited to enabled modules",
    }
}
