use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
const TOAST_DISMISS_MS: u32 = 4_000;

// Reusable Loading Component (BEM: c-loading)
#[component]
pub fn LoadingText(message: String) -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
            p { class: "c-loading__text", "{message}" }
        }
    }
}

// Reusable Error Message Component (BEM: c-error)
#[component]
pub fn ErrorMessage(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "c-error",
            span { class: "c-error__icon", "⚠️" }
            p { class: "c-error__text", "{message}" }
            if let Some(handler) = on_retry {
                button {
                    class: "c-button c-button--secondary",
                    onclick: move |_| handler.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// Transient error banner; clears itself after a few seconds in the browser
#[component]
pub fn Toast(message: Signal<Option<String>>) -> Element {
    let mut message = message;

    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(shown) = message() {
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
                    // A newer message keeps its own timer
                    if message.peek().as_deref() == Some(shown.as_str()) {
                        message.set(None);
                    }
                });
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = message.read();
    });

    let Some(text) = message() else {
        return rsx! {};
    };

    rsx! {
        div { class: "c-toast", role: "alert",
            span { class: "c-toast__text", "{text}" }
            button {
                class: "c-toast__close",
                aria_label: "Dismiss",
                onclick: move |_| message.set(None),
                "✕"
            }
        }
    }
}
