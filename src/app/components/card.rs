use dioxus::prelude::*;

/// Clickable card linking to another page of the console
#[component]
pub fn NavCard(
    icon: String,
    title: String,
    description: Option<String>,
    to: String,
    featured: Option<bool>,
) -> Element {
    let featured_class = if featured.unwrap_or(false) { "c-card--featured" } else { "" };

    rsx! {
        Link {
            to,
            class: "c-card-link",
            div {
                class: "c-card {featured_class}",
                div {
                    class: "c-card__header",
                    span { class: "c-card__icon", "{icon}" }
                    h3 { class: "c-card__title", "{title}" }
                }
                if let Some(description) = description {
                    p { class: "c-card__body", "{description}" }
                }
            }
        }
    }
}
