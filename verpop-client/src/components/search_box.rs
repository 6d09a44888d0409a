use dioxus::prelude::*;
use verpop::Suggestion;

use super::{Button, ButtonVariant};

/// Package name input with autocomplete.
#[component]
pub fn SearchBox(
    value: String,
    suggestions: Vec<Suggestion>,
    loading: bool,
    on_input: EventHandler<String>,
    on_submit: EventHandler<String>,
) -> Element {
    let submit_value = value.clone();

    rsx! {
        div { class: "relative w-full max-w-2xl mx-auto",
            form {
                class: "flex gap-3",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(submit_value.clone());
                },
                input {
                    r#type: "text",
                    class: "flex-1 px-4 py-3 bg-gray-800 border border-gray-700 rounded-lg text-gray-100 placeholder-gray-500 focus:outline-none focus:border-blue-500",
                    placeholder: "Search for an npm package, e.g. react",
                    value: "{value}",
                    autocomplete: "off",
                    oninput: move |evt| on_input.call(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: loading,
                    onclick: move |_| {},
                    if loading { "Searching..." } else { "Search" }
                }
            }

            if !suggestions.is_empty() {
                ul { class: "absolute z-10 mt-2 w-full bg-gray-800 border border-gray-700 rounded-lg shadow-xl overflow-hidden",
                    for suggestion in suggestions {
                        li {
                            key: "{suggestion.name}",
                            class: "px-4 py-3 hover:bg-gray-700 cursor-pointer",
                            onclick: {
                                let name = suggestion.name.clone();
                                move |_| on_submit.call(name.clone())
                            },
                            div { class: "flex justify-between",
                                span { class: "font-medium text-gray-100", "{suggestion.name}" }
                                span { class: "text-xs text-gray-500", "v{suggestion.version}" }
                            }
                            if let Some(description) = &suggestion.description {
                                p { class: "text-sm text-gray-400 truncate", "{description}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
