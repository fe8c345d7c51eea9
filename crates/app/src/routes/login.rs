use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{AppError, LoginRequest};
use shared_ui::{Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input};
use validator::Validate;

use crate::routes::Route;
use crate::session::{use_api, use_auth, use_selection};

/// Email/password sign-in. The session role comes from the login response
/// and stays fixed until sign-out.
#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut store = use_selection();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    // Redirect to the dashboard if already authenticated
    if auth.is_authenticated() {
        navigator().replace(Route::Home {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let request = LoginRequest {
            email: email().trim().to_string(),
            password: password(),
        };
        if let Err(errors) = request.validate() {
            field_errors.set(AppError::from_validation(&errors).field_errors);
            return;
        }
        field_errors.set(HashMap::new());
        error_msg.set(None);
        loading.set(true);

        let api = api.clone();
        spawn(async move {
            match api.login(&request.email, &request.password).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, role = %user.role, "signed in");
                    store.start(user.role);
                    auth.set_user(user);
                    navigator().replace(Route::Home {});
                }
                Err(e) => {
                    tracing::warn!(kind = %e.kind, "sign-in failed");
                    if e.field_errors.is_empty() {
                        error_msg.set(Some(e.friendly_message()));
                    } else {
                        field_errors.set(e.field_errors);
                    }
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your credentials to access your account" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }
                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Input {
                                label: "Email",
                                input_type: "email",
                                placeholder: "you@school.edu",
                                value: email(),
                                error: field_errors.read().get("email").cloned(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Password",
                                input_type: "password",
                                value: password(),
                                error: field_errors.read().get("password").cloned(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        Button {
                            submit: true,
                            loading: loading(),
                            loading_label: "Signing in...",
                            "Sign In"
                        }
                    }
                }
            }
        }
    }
}
