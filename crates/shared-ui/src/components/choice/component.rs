use dioxus::prelude::*;

/// One option of a [`ChoiceGroup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Row of mutually exclusive toggle buttons, e.g. present/absent/late.
#[component]
pub fn ChoiceGroup(
    options: Vec<Choice>,
    value: String,
    onchange: EventHandler<String>,
    #[props(default)] label: String,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "choice-group", role: "radiogroup", "aria-label": "{label}",
            for opt in options {
                {
                    let selected = opt.value == value;
                    let v = opt.value.clone();
                    rsx! {
                        button {
                            key: "{opt.value}",
                            r#type: "button",
                            class: "choice",
                            role: "radio",
                            "aria-checked": if selected { "true" } else { "false" },
                            "data-selected": if selected { "true" } else { "false" },
                            disabled: disabled,
                            onclick: move |_| onchange.call(v.clone()),
                            "{opt.label}"
                        }
                    }
                }
            }
        }
    }
}
