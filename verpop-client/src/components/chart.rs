use dioxus::prelude::*;
use std::f64::consts::PI;
use verpop::ChartSlice;
use verpop::chart::slice_color;

const RADIUS: f64 = 100.0;

/// SVG path for the wedge between two fractions of a full turn, starting
/// at twelve o'clock and running clockwise around a circle centred on the
/// origin.
fn wedge_path(start: f64, end: f64, radius: f64) -> String {
    let point = |fraction: f64| {
        let angle = fraction * 2.0 * PI - PI / 2.0;
        (radius * angle.cos(), radius * angle.sin())
    };
    let (x1, y1) = point(start);
    let (x2, y2) = point(end);
    let large_arc = if end - start > 0.5 { 1 } else { 0 };

    format!(
        "M 0 0 L {:.3} {:.3} A {} {} 0 {} 1 {:.3} {:.3} Z",
        x1, y1, radius, radius, large_arc, x2, y2
    )
}

/// Start and end fractions for each slice, by share of the summed values.
fn wedge_bounds(slices: &[ChartSlice]) -> Vec<(f64, f64)> {
    let total: u64 = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    slices
        .iter()
        .map(|slice| {
            let end = start + slice.value as f64 / total as f64;
            let bounds = (start, end);
            start = end;
            bounds
        })
        .collect()
}

/// Pie chart of the most downloaded versions.
#[component]
pub fn PopularityChart(slices: Vec<ChartSlice>) -> Element {
    let bounds = wedge_bounds(&slices);

    rsx! {
        div { class: "bg-gray-800 rounded-xl p-6 border border-gray-700",
            h3 { class: "text-lg font-semibold text-gray-100 mb-4", "Version Distribution" }

            if bounds.is_empty() {
                p { class: "text-gray-500", "No downloads to chart" }
            } else {
                div { class: "flex flex-col md:flex-row items-center gap-6",
                    svg {
                        view_box: "-105 -105 210 210",
                        width: "220",
                        height: "220",
                        for (i, (start, end)) in bounds.iter().copied().enumerate() {
                            if end - start >= 1.0 {
                                circle { key: "{i}", class: "pie-slice", cx: "0", cy: "0", r: "{RADIUS}", fill: slice_color(i) }
                            } else if end > start {
                                path { key: "{i}", class: "pie-slice", d: wedge_path(start, end, RADIUS), fill: slice_color(i) }
                            }
                        }
                    }

                    ul { class: "space-y-1 text-sm",
                        for (i, slice) in slices.iter().enumerate() {
                            li { key: "{slice.label}", class: "flex items-center gap-2",
                                span {
                                    class: "inline-block w-3 h-3 rounded-sm",
                                    style: "background-color: {slice_color(i)}",
                                }
                                span { class: if slice.is_others() { "text-gray-400 italic" } else { "text-gray-200 font-mono" },
                                    "{slice.label}"
                                }
                                span { class: "text-gray-500 tabular-nums", "{slice.percentage:.2}%" }
                            }
                        }
                    }
                }
            }
        }
    }
}
