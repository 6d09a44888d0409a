mod api;
mod components;
mod hooks;
mod pages;

use dioxus::prelude::*;
use dioxus_logger::tracing::{Level, info};

use pages::Home;
use verpop::config::Config;

#[component]
fn Layout() -> Element {
    rsx! {
        header { class: "bg-gray-900 border-b border-gray-800",
            div { class: "container mx-auto px-6 py-4 flex items-center justify-between",
                span { class: "text-lg font-semibold text-gray-100", "NPM Version Checker" }
                a {
                    href: "https://github.com/fossable/verpop",
                    target: "_blank",
                    class: "text-sm text-gray-400 hover:text-blue-400 transition-colors",
                    "Source"
                }
            }
        }
        main { class: "container mx-auto px-6 py-10 flex-1 flex flex-col",
            Home {}
        }
        footer { class: "text-center text-sm text-gray-500 py-6",
            "NPM Version Popularity Checker"
        }
    }
}

#[component]
pub fn App() -> Element {
    // Provide all context providers
    use_context_provider(Config::default);
    hooks::provide_url_state();

    rsx! {
        document::Link { rel: "stylesheet", href: "https://cdn.tailwindcss.com" }
        document::Link {
            rel: "stylesheet",
            href: "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap"
        }
        style { {include_str!("styles.css")} }

        div { class: "bg-gradient-to-br from-gray-900 to-gray-800 min-h-screen text-white flex flex-col",
            Layout {}
        }
    }
}

pub fn launch() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    info!("Starting verpop client");
    dioxus::launch(App);
}
