use dioxus::prelude::*;
use verpop::table::{PAGE_SIZE_OPTIONS, SortDirection, SortField, page_window};
use verpop::url_state::TableState;
use verpop::{AggregatedVersionRecord, format_count, sort_and_page};

#[component]
pub fn VersionsTable(
    records: Vec<AggregatedVersionRecord>,
    table: TableState,
    on_sort: EventHandler<SortField>,
    on_page: EventHandler<usize>,
    on_page_size: EventHandler<usize>,
) -> Element {
    let page = sort_and_page(
        &records,
        table.field,
        table.direction,
        table.page,
        table.page_size,
    );
    let total_pages = page.total_pages;
    let current = table.page;

    rsx! {
        div { class: "bg-gray-800 rounded-xl border border-gray-700 overflow-hidden",
            table { class: "w-full text-left",
                thead { class: "bg-gray-900 text-gray-400 text-sm",
                    tr {
                        for field in SortField::ALL {
                            th {
                                key: "{field}",
                                class: "px-4 py-3 cursor-pointer select-none hover:text-gray-200",
                                onclick: move |_| on_sort.call(field),
                                "{field.title()}"
                                if field == table.field {
                                    span { class: "ml-1",
                                        if table.direction == SortDirection::Asc { "▲" } else { "▼" }
                                    }
                                }
                            }
                        }
                    }
                }
                tbody {
                    if page.items.is_empty() {
                        tr {
                            td { class: "px-4 py-6 text-center text-gray-500", colspan: "4",
                                "No versions to show"
                            }
                        }
                    }
                    for record in page.items {
                        tr { key: "{record.version}", class: "border-t border-gray-700 hover:bg-gray-700/50",
                            td { class: "px-4 py-2 font-mono text-gray-100", "{record.version}" }
                            td { class: "px-4 py-2 text-gray-400",
                                {record.published_at.map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "Unknown".to_string())}
                            }
                            td { class: "px-4 py-2 text-gray-100 tabular-nums", "{format_count(record.downloads)}" }
                            td { class: "px-4 py-2 text-gray-100 tabular-nums", "{record.percentage:.2}%" }
                        }
                    }
                }
            }

            div { class: "flex items-center justify-between px-4 py-3 border-t border-gray-700 text-sm",
                div { class: "flex items-center gap-2 text-gray-400",
                    "Rows per page"
                    select {
                        class: "bg-gray-900 border border-gray-700 rounded px-2 py-1 text-gray-100",
                        value: "{table.page_size}",
                        onchange: move |evt| {
                            match evt.value().parse::<usize>() {
                                Ok(size) => on_page_size.call(size),
                                Err(e) => tracing::warn!("Invalid page size {:?}: {}", evt.value(), e),
                            }
                        },
                        for size in PAGE_SIZE_OPTIONS {
                            option { key: "{size}", value: "{size}", selected: size == table.page_size, "{size}" }
                        }
                    }
                    span { "{page.total_items} versions" }
                }

                div { class: "flex items-center gap-1",
                    button {
                        class: "px-3 py-1 rounded text-gray-300 hover:bg-gray-700 disabled:opacity-40",
                        disabled: current <= 1,
                        onclick: move |_| on_page.call(current.saturating_sub(1).max(1)),
                        "Previous"
                    }
                    for (i, number) in page_window(current, total_pages).into_iter().enumerate() {
                        if number == 0 {
                            span { key: "gap-{i}", class: "px-2 text-gray-500", "…" }
                        } else {
                            button {
                                key: "page-{number}",
                                class: if number == current { "px-3 py-1 rounded bg-blue-600 text-white" } else { "px-3 py-1 rounded text-gray-300 hover:bg-gray-700" },
                                onclick: move |_| on_page.call(number),
                                "{number}"
                            }
                        }
                    }
                    button {
                        class: "px-3 py-1 rounded text-gray-300 hover:bg-gray-700 disabled:opacity-40",
                        disabled: current >= total_pages,
                        onclick: move |_| on_page.call((current + 1).min(total_pages)),
                        "Next"
                    }
                }
            }
        }
    }
}
