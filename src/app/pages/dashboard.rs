use dioxus::prelude::*;

use crate::app::components::{ErrorMessage, LoadingText, NavCard};
use crate::domain::models::{MenuItem, Role};
use crate::navigation::{filter_menu, module_settings_path, registry};
use crate::shared::hooks::ModuleSettingsHandle;
use crate::shared::state::LoadStatus;

#[component]
pub fn Dashboard(role: String) -> Element {
    let settings = use_context::<ModuleSettingsHandle>();

    let Ok(role) = role.parse::<Role>() else {
        return rsx! {
            ErrorMessage { message: format!("Unknown dashboard \"{}\"", role) }
        };
    };

    let status = settings.store.read().status().clone();
    let visibility = settings.visibility_for(role);
    let dashboard_path = role.dashboard_path();
    let settings_path = module_settings_path(role);

    // Everything in the role's visible menu except the dashboard itself
    let shortcuts: Vec<MenuItem> = filter_menu(registry(role), visibility.as_ref())
        .into_iter()
        .filter(|item| !item.is_divider() && item.path != dashboard_path)
        .collect();

    rsx! {
        div { class: "c-page c-dashboard",
            h1 { class: "c-page__title", "{role.icon()} {role.display_name()}" }

            if role.audience().is_some() {
                {match status {
                    LoadStatus::Idle | LoadStatus::Loading => rsx! {
                        LoadingText { message: "Loading module settings...".to_string() }
                    },
                    LoadStatus::Fallback(error) => rsx! {
                        ErrorMessage {
                            message: format!("Module settings unavailable, showing every module ({})", error),
                            on_retry: move |_| settings.reload(),
                        }
                    },
                    LoadStatus::Ready => rsx! {},
                }}
            }

            div { class: "c-page__grid",
                for item in shortcuts {
                    NavCard {
                        key: "{item.path}",
                        icon: item.icon.clone(),
                        title: item.label.clone().unwrap_or_default(),
                        description: shortcut_summary(&item),
                        to: item.path.clone(),
                    }
                }
                if let Some(to) = settings_path {
                    NavCard {
                        icon: "🧩".to_string(),
                        title: "Module settings".to_string(),
                        description: "Choose which modules clients and employees see".to_string(),
                        to,
                        featured: true,
                    }
                }
            }
        }
    }
}

fn shortcut_summary(item: &MenuItem) -> String {
    match item.children().len() {
        0 => item.section.clone().unwrap_or_else(|| "Open".to_string()),
        1 => "1 page".to_string(),
        n => format!("{} pages", n),
    }
}
