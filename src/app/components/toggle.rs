use dioxus::prelude::*;

/// On/off switch for one module key
#[component]
pub fn ModuleToggle(
    label: String,
    module_key: String,
    enabled: bool,
    #[props(default = false)] disabled: bool,
    on_change: EventHandler<(String, bool)>,
) -> Element {
    let changed_key = module_key.clone();
    let toggle_class = if enabled { "c-toggle c-toggle--on" } else { "c-toggle" };

    rsx! {
        label { class: "{toggle_class}",
            input {
                r#type: "checkbox",
                class: "c-toggle__input",
                checked: enabled,
                disabled,
                onchange: move |_| on_change.call((changed_key.clone(), !enabled)),
            }
            span { class: "c-toggle__track",
                span { class: "c-toggle__thumb" }
            }
            span { class: "c-toggle__label", "{label}" }
            code { class: "c-toggle__key", "{module_key}" }
        }
    }
}
