use dioxus::prelude::*;

/// Loading placeholder with a pulse animation.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![Attribute::new("class", "skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

/// A stack of placeholder rows, shown while a list loads.
#[component]
pub fn SkeletonList(#[props(default = 5)] rows: usize) -> Element {
    rsx! {
        div { class: "skeleton-list", "aria-busy": "true",
            for i in 0..rows {
                Skeleton { key: "{i}", class: "skeleton-row" }
            }
        }
    }
}
