use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Tone of an inline notice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NoticeTone {
    #[default]
    Info,
    Warning,
    Error,
}

impl NoticeTone {
    fn class(&self) -> &'static str {
        match self {
            NoticeTone::Info => "info",
            NoticeTone::Warning => "warning",
            NoticeTone::Error => "error",
        }
    }
}

/// Inline message box.
#[component]
pub fn Notice(
    #[props(default)] tone: NoticeTone,
    title: String,
    #[props(default)] message: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "notice", "data-tone": tone.class(), role: "status",
            p { class: "notice-title", "{title}" }
            if let Some(msg) = message {
                p { class: "notice-message", "{msg}" }
            }
            {children}
        }
    }
}

/// Shown when a list loaded successfully but has no rows.
#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        Notice { title: message }
    }
}

/// Failed load with a Retry button.
#[component]
pub fn ErrorNotice(message: String, on_retry: EventHandler<MouseEvent>) -> Element {
    rsx! {
        Notice {
            tone: NoticeTone::Error,
            title: "Could not load data",
            message: Some(message),
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |evt| on_retry.call(evt),
                "Retry"
            }
        }
    }
}

/// Rendered in place of staff-only actions for roles that lack them.
#[component]
pub fn AccessDenied(#[props(default)] message: Option<String>) -> Element {
    rsx! {
        Notice {
            tone: NoticeTone::Warning,
            title: "Access denied",
            message: message.or_else(|| Some("Your role does not allow this action.".to_string())),
        }
    }
}
