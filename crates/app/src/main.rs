use api::ApiClient;
use dioxus::prelude::*;

mod config;
mod format_helpers;
mod list;
mod routes;
mod session;

use routes::Route;
use session::{AuthState, OrgState, SelectionStore};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let config = config::load();
    if let Err(e) = dioxus::logger::init(config::log_level(&config.logging.level)) {
        eprintln!("logger already initialised: {e}");
    }
    if let Some(warning) = config::startup_warning() {
        tracing::warn!(%warning, "config.toml could not be parsed; using defaults");
    }
    tracing::info!(base_url = %config.api.base_url, "starting LMS client");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = config::get();

    use_context_provider(|| ApiClient::from_settings(&config.api));
    use_context_provider(|| config.features.clone());
    use_context_provider(AuthState::new);
    use_context_provider(SelectionStore::new);
    use_context_provider(OrgState::new);
    use_context_provider(|| {
        shared_ui::ThemeState::new(shared_ui::Appearance::from_key(
            &api::storage::get_item(shared_ui::APPEARANCE_KEY).unwrap_or_default(),
        ))
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ThemeSeed {}
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
