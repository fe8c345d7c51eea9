use dioxus::prelude::*;
use shared_ui::{
    Appearance, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Choice, ChoiceGroup, PageHeader, ThemeState, ALL_APPEARANCES,
};

use crate::config;
use crate::routes::Route;
use crate::session::{sign_out, use_api, use_auth, use_org, use_selection};

#[component]
pub fn Profile() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();
    let org = use_org();

    let Some(user) = auth.current_user.read().clone() else {
        return rsx! {};
    };

    rsx! {
        PageHeader { title: "Profile" }
        Card {
            CardHeader {
                CardTitle { "{user.name}" }
                CardDescription { "{user.email}" }
            }
            CardContent {
                dl { class: "profile-grid",
                    dt { "Role" }
                    dd { Badge { variant: BadgeVariant::Secondary, "{user.role.display_name()}" } }
                    dt { "Institutes" }
                    dd {
                        if user.institutes.is_empty() {
                            span { class: "text-muted", "None" }
                        }
                        for institute in user.institutes.iter() {
                            Badge { key: "{institute.id}", variant: BadgeVariant::Outline, "{institute.name}" }
                        }
                    }
                    dt { "Current selection" }
                    dd { "{store.selection().breadcrumb()}" }
                    dt { "Server" }
                    dd { span { class: "text-muted", "{config::get().api.base_url}" } }
                }
            }
        }
        div { class: "form-actions",
            Button {
                variant: ButtonVariant::Destructive,
                onclick: move |_| {
                    sign_out(&api, auth, store, org);
                    navigator().replace(Route::Login {});
                },
                "Sign out"
            }
        }
    }
}

#[component]
pub fn AppearanceSettings() -> Element {
    let mut theme: ThemeState = use_context();
    let current = theme.appearance.read().as_str().to_string();
    let options: Vec<Choice> = ALL_APPEARANCES
        .iter()
        .map(|a| Choice::new(a.as_str(), a.display_name()))
        .collect();

    rsx! {
        PageHeader {
            title: "Appearance",
            subtitle: Some("System follows your device's light or dark setting.".to_string()),
        }
        ChoiceGroup {
            label: "Colour scheme",
            options,
            value: current,
            onchange: move |key: String| {
                let appearance = Appearance::from_key(&key);
                tracing::info!(appearance = appearance.as_str(), "appearance changed");
                theme.set(appearance);
            },
        }
    }
}
