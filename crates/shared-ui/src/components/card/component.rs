use dioxus::prelude::*;

/// Card container. Pass `onclick` to make the whole card a pick target,
/// as the selector screens do.
#[component]
pub fn Card(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let clickable = onclick.is_some();
    let base = vec![Attribute::new(
        "class",
        if clickable { "card clickable" } else { "card" },
        None,
        false,
    )];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            role: if clickable { "button" } else { "region" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn CardHeader(children: Element) -> Element {
    rsx! {
        div { class: "card-header", {children} }
    }
}

#[component]
pub fn CardTitle(children: Element) -> Element {
    rsx! {
        h3 { class: "card-title", {children} }
    }
}

#[component]
pub fn CardDescription(children: Element) -> Element {
    rsx! {
        p { class: "card-description", {children} }
    }
}

#[component]
pub fn CardContent(children: Element) -> Element {
    rsx! {
        div { class: "card-content", {children} }
    }
}

#[component]
pub fn CardFooter(children: Element) -> Element {
    rsx! {
        div { class: "card-footer", {children} }
    }
}

/// Dashboard figure: a label over one large value.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        Card { class: "stat-card",
            CardContent {
                p { class: "stat-label", "{label}" }
                p { class: "stat-value", "{value}" }
                if let Some(hint) = hint {
                    p { class: "stat-hint", "{hint}" }
                }
            }
        }
    }
}

/// Responsive grid for cards.
#[component]
pub fn CardGrid(children: Element) -> Element {
    rsx! {
        div { class: "card-grid", {children} }
    }
}
