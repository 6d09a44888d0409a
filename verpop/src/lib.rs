// Pure pipeline over version data (wasm-compatible, always built)
pub mod aggregate;
pub mod chart;
pub mod semver_range;
pub mod table;

// State that the presentation layer drives
pub mod search;
pub mod url_state;

pub mod config;
pub mod error;
pub mod registry;

// Native registry client
#[cfg(feature = "registry")]
pub mod client;

pub use aggregate::{Aggregation, aggregate};
pub use chart::{ChartSlice, bucketize};
pub use error::{FetchError, RangeError, SearchError};
pub use registry::{RegistryClient, SuggestionClient};
pub use search::{SearchController, SearchLifecycle};
pub use semver_range::satisfies;
pub use table::{Page, SortDirection, SortField, sort_and_page};
pub use url_state::{FilterState, ParamValue, SearchUrlState};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published version of a package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionRecord {
    pub version: String,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub downloads: u64,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, downloads: u64) -> Self {
        Self {
            version: version.into(),
            published_at: None,
            downloads,
        }
    }

    pub fn with_published_at(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }
}

/// A version record annotated with its share of the (filtered) total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedVersionRecord {
    pub version: String,
    pub published_at: Option<DateTime<Utc>>,
    pub downloads: u64,
    pub percentage: f64,
}

impl AggregatedVersionRecord {
    pub fn from_record(record: &VersionRecord, percentage: f64) -> Self {
        Self {
            version: record.version.clone(),
            published_at: record.published_at,
            downloads: record.downloads,
            percentage,
        }
    }
}

/// The merged result of one completed package search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub versions: Vec<VersionRecord>,
    pub total_downloads: u64,
}

impl PackageSnapshot {
    /// Link to the package page on npmjs.com
    pub fn npm_url(&self) -> String {
        format!("https://www.npmjs.com/package/{}", self.name)
    }
}

/// An autocomplete entry for the search box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub score: f64,
}

/// Round to two decimal places, the precision shown for every percentage.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Group digits in thousands, e.g. 1234567 -> 1,234,567
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_npm_url_keeps_scope() {
        let snapshot = PackageSnapshot {
            name: "@types/node".to_string(),
            description: None,
            versions: Vec::new(),
            total_downloads: 0,
        };
        assert_eq!(snapshot.npm_url(), "https://www.npmjs.com/package/@types/node");
    }
}
