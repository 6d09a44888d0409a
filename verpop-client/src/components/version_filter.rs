use dioxus::prelude::*;

use super::{Button, ButtonVariant};

/// Semver range input, applied on Enter or with the button.
#[component]
pub fn VersionFilter(value: String, on_apply: EventHandler<String>) -> Element {
    let mut draft = use_signal(|| value.clone());

    // Follow outside changes such as "Clear filter"
    use_effect(use_reactive!(|value| draft.set(value)));

    rsx! {
        div { class: "flex gap-3 items-center",
            input {
                r#type: "text",
                class: "flex-1 px-4 py-2 bg-gray-800 border border-gray-700 rounded-lg text-gray-100 placeholder-gray-500 focus:outline-none focus:border-blue-500",
                placeholder: "Filter by version range, e.g. ^18.0.0 or >=1.2.0 <2.0.0",
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        on_apply.call(draft.read().clone());
                    }
                },
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| on_apply.call(draft.read().clone()),
                "Apply"
            }
        }
    }
}
