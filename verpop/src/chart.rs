use serde::{Deserialize, Serialize};

use crate::{AggregatedVersionRecord, round2};

pub const DEFAULT_MAX_SLICES: usize = 9;

pub const OTHERS_LABEL: &str = "Others";

// indigo, violet, purple, pink, rose, orange, yellow, green, teal, cyan
const COLORS: [&str; 10] = [
    "#6366f1", "#8b5cf6", "#a855f7", "#ec4899", "#f43f5e", "#f97316", "#eab308", "#22c55e",
    "#14b8a6", "#06b6d4",
];

/// One wedge of the version distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: u64,
    pub percentage: f64,
}

impl ChartSlice {
    pub fn is_others(&self) -> bool {
        self.label == OTHERS_LABEL
    }
}

/// Group records into at most `max_slices` individual slices plus one
/// trailing "Others" slice holding the rest.
pub fn bucketize(records: &[AggregatedVersionRecord], max_slices: usize) -> Vec<ChartSlice> {
    let mut sorted: Vec<&AggregatedVersionRecord> = records.iter().collect();
    // sort_by is stable, so ties keep their input order
    sorted.sort_by(|a, b| b.downloads.cmp(&a.downloads));

    let to_slice = |r: &&AggregatedVersionRecord| ChartSlice {
        label: r.version.clone(),
        value: r.downloads,
        percentage: r.percentage,
    };

    if sorted.len() <= max_slices {
        return sorted.iter().map(to_slice).collect();
    }

    let (top, rest) = sorted.split_at(max_slices);
    let mut slices: Vec<ChartSlice> = top.iter().map(to_slice).collect();
    slices.push(ChartSlice {
        label: OTHERS_LABEL.to_string(),
        value: rest.iter().map(|r| r.downloads).sum(),
        percentage: round2(rest.iter().map(|r| r.percentage).sum()),
    });

    slices
}

/// Fill colour for the slice at `index`, cycling through the palette.
pub fn slice_color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}
