use dioxus::prelude::*;
use shared_types::path_to_page;

use crate::routes::Route;

/// Multi-segment paths the router does not know resolve to the default page,
/// same as unknown single-segment ids.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    let target = path_to_page(&path);
    tracing::debug!(%path, %target, "unknown route, showing default page");

    use_effect(move || {
        navigator().replace(Route::Home {});
    });

    rsx! {
        div { class: "not-found-page",
            p { class: "text-muted", "Redirecting..." }
        }
    }
}
