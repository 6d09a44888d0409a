use dioxus::prelude::*;
use verpop::config::Config;
use verpop::table::{SortDirection, SortField, clamp_page, total_pages};
use verpop::url_state::{
    DIRECTION_KEY, FILTER_KEY, PAGE_KEY, PAGE_SIZE_KEY, SEARCH_KEY, SORT_KEY, TableState,
};
use verpop::{FilterState, ParamValue, SearchLifecycle, aggregate, bucketize};

use crate::components::{
    ErrorDisplay, PackageHeader, PopularityChart, SearchBox, VersionFilter, VersionsTable,
};
use crate::hooks::{UrlState, use_package_search, use_suggestions, use_url_state};

#[component]
pub fn Home() -> Element {
    let config = use_context::<Config>();
    let mut url_state = use_url_state();
    let search = use_package_search();
    let suggestions = use_suggestions();
    let mut search_term = use_signal(|| url_state.peek().get_str(SEARCH_KEY).to_string());

    // A shared link with `q` runs its search right away
    use_effect(move || {
        let query = url_state.peek().get_str(SEARCH_KEY).trim().to_string();
        if !query.is_empty() {
            search.search(query);
        }
    });

    let filters = FilterState::from_params(url_state.read().params());
    let mut table = TableState::from_params(url_state.read().params());

    let on_submit = move |name: String| {
        suggestions.clear();
        search_term.set(name.clone());
        url_state.write().set_params([
            (SEARCH_KEY, ParamValue::from(name.trim())),
            (PAGE_KEY, ParamValue::from(1usize)),
        ]);
        search.search(name);
    };

    let on_reset = move |_: ()| {
        search.reset();
        suggestions.clear();
        search_term.set(String::new());
        url_state.write().reset();
    };

    let body = match search.state() {
        SearchLifecycle::Idle => rsx! {
            div { class: "text-center text-gray-400 mt-12",
                p { class: "text-lg", "Search for a package to see which of its versions are used the most." }
                p { class: "text-sm mt-2", "Download counts cover the last week." }
            }
        },
        SearchLifecycle::Loading => rsx! {
            div { class: "flex justify-center mt-12",
                div { class: "animate-spin rounded-full h-12 w-12 border-b-2 border-blue-500" }
            }
        },
        SearchLifecycle::Error(message) => rsx! {
            div { class: "mt-8",
                ErrorDisplay { message, on_clear: on_reset }
            }
        },
        SearchLifecycle::Success(snapshot) => {
            let aggregation = aggregate(
                &snapshot.versions,
                snapshot.total_downloads,
                &filters.version_filter,
            );
            let slices = bucketize(&aggregation.records, config.max_slices);
            table.page = clamp_page(table.page, total_pages(aggregation.len(), table.page_size));

            rsx! {
                div { class: "space-y-6 mt-8",
                    PackageHeader {
                        snapshot: snapshot.clone(),
                        filtered_total: aggregation.filtered_total,
                        filter_active: aggregation.filter_active,
                        version_count: aggregation.len(),
                        version_filter: filters.version_filter.clone(),
                        on_clear_filter: move |_| apply_filter(url_state, ""),
                    }
                    VersionFilter {
                        value: filters.version_filter.clone(),
                        on_apply: move |filter: String| apply_filter(url_state, &filter),
                    }
                    div { class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                        div { class: "lg:col-span-2",
                            VersionsTable {
                                records: aggregation.records.clone(),
                                table,
                                on_sort: move |field: SortField| {
                                    let direction = if field == table.field {
                                        table.direction.toggle()
                                    } else {
                                        SortDirection::Desc
                                    };
                                    url_state.write().set_params([
                                        (SORT_KEY, ParamValue::from(field.as_str())),
                                        (DIRECTION_KEY, ParamValue::from(direction.as_str())),
                                        (PAGE_KEY, ParamValue::from(1usize)),
                                    ]);
                                },
                                on_page: move |page: usize| url_state.write().set_param(PAGE_KEY, page),
                                on_page_size: move |size: usize| {
                                    url_state.write().set_params([
                                        (PAGE_SIZE_KEY, ParamValue::from(size)),
                                        (PAGE_KEY, ParamValue::from(1usize)),
                                    ]);
                                },
                            }
                        }
                        PopularityChart { slices }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "flex flex-col",
            h1 { class: "text-4xl font-bold text-center mb-8 bg-gradient-to-r from-blue-400 to-purple-500 bg-clip-text text-transparent",
                "NPM Version Popularity"
            }
            SearchBox {
                value: search_term.read().clone(),
                suggestions: suggestions.items(),
                loading: matches!(search.state(), SearchLifecycle::Loading),
                on_input: move |value: String| {
                    search_term.set(value.clone());
                    suggestions.update(&value);
                },
                on_submit,
            }
            {body}
        }
    }
}

fn apply_filter(mut url_state: UrlState, filter: &str) {
    url_state.write().set_params([
        (FILTER_KEY, ParamValue::from(filter.trim())),
        (PAGE_KEY, ParamValue::from(1usize)),
    ]);
}
