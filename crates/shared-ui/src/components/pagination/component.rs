use dioxus::prelude::*;
use shared_types::PaginationMeta;

use crate::components::button::{Button, ButtonVariant};

/// Page-number pagination driven by backend metadata. Writes the new
/// 1-based page into `page`.
#[component]
pub fn Pagination(meta: PaginationMeta, page: Signal<i64>) -> Element {
    if meta.total_pages <= 1 {
        return rsx! {};
    }
    let current = meta.page;
    let total_pages = meta.total_pages;
    let total = meta.total;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination", "aria-label": "Pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: !meta.has_prev,
                onclick: move |_| page.set((current - 1).max(1)),
                "Previous"
            }
            span { class: "pagination-info",
                "Page {current} of {total_pages} ({total} total)"
            }
            Button {
                variant: ButtonVariant::Outline,
                disabled: !meta.has_next,
                onclick: move |_| page.set((current + 1).min(total_pages)),
                "Next"
            }
        }
    }
}
