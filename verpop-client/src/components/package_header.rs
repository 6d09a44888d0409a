use dioxus::prelude::*;
use std::rc::Rc;
use verpop::{PackageSnapshot, format_count};

#[component]
pub fn PackageHeader(
    snapshot: Rc<PackageSnapshot>,
    filtered_total: u64,
    filter_active: bool,
    version_count: usize,
    version_filter: String,
    on_clear_filter: EventHandler<()>,
) -> Element {
    let heading = if filter_active { "Filtered" } else { "Total" };
    let npm_url = snapshot.npm_url();

    rsx! {
        div { class: "bg-gray-800 rounded-xl p-6 border border-gray-700",
            div { class: "flex justify-between items-start mb-3",
                div {
                    h2 { class: "text-2xl font-bold text-gray-100", "{snapshot.name}" }
                    if let Some(description) = &snapshot.description {
                        p { class: "text-gray-400 mt-1", "{description}" }
                    }
                }
                a {
                    href: "{npm_url}",
                    target: "_blank",
                    class: "text-sm text-blue-400 hover:text-blue-300 transition-colors",
                    "View on npm"
                }
            }

            div { class: "flex items-center gap-4 mt-4",
                div {
                    p { class: "text-sm text-gray-500", "{heading} Downloads (Last Week)" }
                    p { class: "text-3xl font-bold text-gray-100 tabular-nums",
                        "{format_count(filtered_total)}"
                    }
                }
                span { class: "px-3 py-1 bg-gray-700 text-gray-300 rounded-full text-xs font-medium",
                    "{version_count} versions"
                }
                if filter_active {
                    span { class: "px-3 py-1 bg-blue-900 text-blue-300 rounded-full text-xs font-medium",
                        "{version_filter}"
                    }
                    button {
                        class: "text-sm text-gray-400 hover:text-red-400 transition-colors",
                        onclick: move |_| on_clear_filter.call(()),
                        "Clear filter"
                    }
                }
            }
        }
    }
}
