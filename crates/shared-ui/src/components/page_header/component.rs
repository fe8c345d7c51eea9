use dioxus::prelude::*;

/// Page title row with an optional subtitle and trailing actions.
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] on_back: Option<EventHandler<MouseEvent>>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div { class: "page-heading",
                if let Some(back) = on_back {
                    button {
                        class: "page-back",
                        r#type: "button",
                        "aria-label": "Back",
                        onclick: move |evt| back.call(evt),
                        "←"
                    }
                }
                div {
                    h1 { class: "page-title", "{title}" }
                    if let Some(sub) = subtitle {
                        p { class: "page-subtitle", "{sub}" }
                    }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}
