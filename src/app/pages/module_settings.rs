use dioxus::prelude::*;

use crate::app::components::{ErrorMessage, LoadingText, ModuleToggle};
use crate::domain::models::{MenuAudience, Role};
use crate::navigation::{module_label, registry};
use crate::shared::hooks::ModuleSettingsHandle;
use crate::shared::state::LoadStatus;

/// One row per module key: (key, label, enabled)
type ModuleRow = (String, String, bool);

/// Role editing module settings from the area named by `slug`
fn settings_actor(slug: &str) -> Option<Role> {
    slug.parse::<Role>().ok().filter(Role::can_manage_modules)
}

/// Manager page listing every module key of both audiences
#[component]
pub fn ModuleSettingsPage(role: String) -> Element {
    let settings = use_context::<ModuleSettingsHandle>();

    let Some(actor) = settings_actor(&role) else {
        return rsx! {
            ErrorMessage { message: format!("\"{}\" cannot manage module settings", role) }
        };
    };

    let (status, company_id, groups) = {
        let store = settings.store.read();
        let snapshot = store.snapshot();
        let groups: Vec<(MenuAudience, Vec<ModuleRow>)> = MenuAudience::ALL
            .iter()
            .map(|audience| {
                let menus = snapshot.menus(*audience);
                let rows = audience
                    .known_keys()
                    .iter()
                    .map(|key| {
                        let label = module_label(registry(audience.role()), key)
                            .unwrap_or_else(|| key.trim_start_matches("module_").to_string());
                        (key.to_string(), label, menus.is_enabled(key))
                    })
                    .collect();
                (*audience, rows)
            })
            .collect();
        (store.status().clone(), store.company_id(), groups)
    };

    let busy = matches!(status, LoadStatus::Idle | LoadStatus::Loading);
    let company = company_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());

    rsx! {
        div { class: "c-page c-module-settings",
            h1 { class: "c-page__title", "🧩 Module settings" }
            p { class: "c-page__subtitle",
                "Company #{company}. Disabled modules disappear from client and employee menus."
            }

            {match status {
                LoadStatus::Idle | LoadStatus::Loading => rsx! {
                    LoadingText { message: "Loading module settings...".to_string() }
                },
                LoadStatus::Fallback(error) => rsx! {
                    ErrorMessage {
                        message: format!("Could not load saved settings ({}). Showing defaults.", error),
                        on_retry: move |_| settings.reload(),
                    }
                },
                LoadStatus::Ready => rsx! {},
            }}

            for (audience, rows) in groups {
                section {
                    key: "{audience.display_name()}",
                    class: "c-module-settings__group",
                    h2 { class: "c-module-settings__heading", "{audience.display_name()}" }
                    div { class: "c-module-settings__list",
                        for (key, label, enabled) in rows {
                            ModuleToggle {
                                key: "{key}",
                                label,
                                module_key: key.clone(),
                                enabled,
                                disabled: busy,
                                on_change: move |(key, next): (String, bool)| {
                                    settings.set_module(actor, audience, key, next)
                                },
                            }
                        }
                    }
                }
            }

            div { class: "c-module-settings__actions",
                button {
                    class: "c-button c-button--danger",
                    disabled: busy,
                    onclick: move |_| settings.reset(actor),
                    "Reset to defaults"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_comes_from_the_route_area() {
        assert_eq!(settings_actor("admin"), Some(Role::Admin));
        assert_eq!(settings_actor("super-admin"), Some(Role::SuperAdmin));
        assert_eq!(settings_actor("client"), None);
        assert_eq!(settings_actor("employee"), None);
        assert_eq!(settings_actor("billing"), None);
    }
}
