use dioxus::prelude::*;

use super::{Button, ButtonVariant};

#[component]
pub fn ErrorDisplay(message: String, on_clear: EventHandler<()>) -> Element {
    rsx! {
        div { class: "bg-red-900/40 border border-red-700 rounded-xl p-6 flex items-center justify-between",
            div {
                h3 { class: "text-lg font-semibold text-red-300 mb-1", "Error" }
                p { class: "text-red-200", "{message}" }
            }
            Button {
                variant: ButtonVariant::Danger,
                onclick: move |_| on_clear.call(()),
                "Clear"
            }
        }
    }
}
