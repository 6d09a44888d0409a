use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::AggregatedVersionRecord;
use crate::semver_range::parse_version;

pub const DEFAULT_PAGE_SIZE: usize = 15;

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 15, 20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Version,
    #[default]
    Date,
    Downloads,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Version,
        SortField::Date,
        SortField::Downloads,
        SortField::Percentage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Version => "version",
            SortField::Date => "date",
            SortField::Downloads => "downloads",
            SortField::Percentage => "percentage",
        }
    }

    /// Column heading in the versions table
    pub fn title(&self) -> &'static str {
        match self {
            SortField::Version => "Version",
            SortField::Date => "Release Date",
            SortField::Downloads => "Downloads",
            SortField::Percentage => "Percent",
        }
    }
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "version" => Ok(SortField::Version),
            "date" => Ok(SortField::Date),
            "downloads" => Ok(SortField::Downloads),
            "percentage" => Ok(SortField::Percentage),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// One page of the versions table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub items: Vec<AggregatedVersionRecord>,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Sort records by `field` and return the 1-indexed `page`.
///
/// Pages outside `1..=total_pages` come back empty; callers are expected to
/// clamp with [`clamp_page`] first.
pub fn sort_and_page(
    records: &[AggregatedVersionRecord],
    field: SortField,
    direction: SortDirection,
    page: usize,
    page_size: usize,
) -> Page {
    let total_items = records.len();
    let total_pages = total_pages(total_items, page_size);

    let mut sorted: Vec<&AggregatedVersionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b, field),
        SortDirection::Desc => compare(b, a, field),
    });

    let items = if page == 0 || page_size == 0 {
        Vec::new()
    } else {
        sorted
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect()
    };

    Page {
        items,
        total_pages,
        total_items,
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Bring a requested page back into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers for the pagination control, `0` standing for an ellipsis.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let mut pages = Vec::new();

    if total <= 7 {
        pages.extend(1..=total);
        return pages;
    }

    pages.push(1);
    if current > 3 {
        pages.push(0);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    pages.extend(start..=end);

    if current + 2 < total {
        pages.push(0);
    }
    pages.push(total);

    pages
}

fn compare(a: &AggregatedVersionRecord, b: &AggregatedVersionRecord, field: SortField) -> Ordering {
    match field {
        // None (missing or unparseable date) orders before any timestamp
        SortField::Date => a.published_at.cmp(&b.published_at),
        SortField::Version => compare_versions(&a.version, &b.version),
        SortField::Downloads => a.downloads.cmp(&b.downloads),
        SortField::Percentage => a.percentage.total_cmp(&b.percentage),
    }
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(version: &str, day: Option<u32>, downloads: u64, percentage: f64) -> AggregatedVersionRecord {
        AggregatedVersionRecord {
            version: version.to_string(),
            published_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
            downloads,
            percentage,
        }
    }

    fn records() -> Vec<AggregatedVersionRecord> {
        vec![
            record("1.10.0", Some(3), 30, 30.0),
            record("1.2.0", Some(1), 10, 10.0),
            record("garbage", None, 20, 20.0),
            record("1.9.0", Some(2), 40, 40.0),
        ]
    }

    fn versions(page: &Page) -> Vec<&str> {
        page.items.iter().map(|r| r.version.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let page = sort_and_page(&records(), SortField::Date, SortDirection::Asc, 1, 10);
        assert_eq!(versions(&page), ["garbage", "1.2.0", "1.9.0", "1.10.0"]);

        let page = sort_and_page(&records(), SortField::Date, SortDirection::Desc, 1, 10);
        assert_eq!(versions(&page), ["1.10.0", "1.9.0", "1.2.0", "garbage"]);
    }

    #[test]
    fn test_sort_by_version_is_semver_aware() {
        let page = sort_and_page(&records(), SortField::Version, SortDirection::Asc, 1, 10);
        assert_eq!(versions(&page), ["garbage", "1.2.0", "1.9.0", "1.10.0"]);
    }

    #[test]
    fn test_sort_by_downloads_and_percentage() {
        let page = sort_and_page(&records(), SortField::Downloads, SortDirection::Desc, 1, 10);
        assert_eq!(versions(&page), ["1.9.0", "1.10.0", "garbage", "1.2.0"]);

        let page = sort_and_page(&records(), SortField::Percentage, SortDirection::Asc, 1, 10);
        assert_eq!(versions(&page), ["1.2.0", "garbage", "1.10.0", "1.9.0"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let tied = vec![
            record("a", None, 5, 50.0),
            record("b", None, 5, 50.0),
            record("c", None, 5, 50.0),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let page = sort_and_page(&tied, SortField::Downloads, direction, 1, 10);
            assert_eq!(versions(&page), ["a", "b", "c"]);
        }
    }

    #[test]
    fn test_pagination() {
        let page = sort_and_page(&records(), SortField::Downloads, SortDirection::Asc, 2, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_items, 4);
        assert_eq!(versions(&page), ["1.9.0"]);
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let page = sort_and_page(&records(), SortField::Date, SortDirection::Desc, 5, 3);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);

        let page = sort_and_page(&records(), SortField::Date, SortDirection::Desc, 0, 3);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_empty_input_has_one_page() {
        let page = sort_and_page(&[], SortField::Date, SortDirection::Desc, 1, 15);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_size() {
        let page = sort_and_page(&records(), SortField::Date, SortDirection::Desc, 1, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(1, 10), vec![1, 2, 0, 10]);
        assert_eq!(page_window(5, 10), vec![1, 0, 4, 5, 6, 0, 10]);
        assert_eq!(page_window(10, 10), vec![1, 0, 9, 10]);
    }

    #[test]
    fn test_parse_sort_params() {
        assert_eq!("Downloads".parse::<SortField>(), Ok(SortField::Downloads));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("size".parse::<SortField>().is_err());
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert_eq!(SortField::Percentage.to_string(), "percentage");
    }
}
