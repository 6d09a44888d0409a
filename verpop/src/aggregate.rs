use serde::{Deserialize, Serialize};

use crate::semver_range::VersionRange;
use crate::{AggregatedVersionRecord, VersionRecord, round2};

/// Versions left after filtering, with their shares of the filtered total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Aggregation {
    pub records: Vec<AggregatedVersionRecord>,
    /// Sum of `downloads` over `records`
    pub filtered_total: u64,
    /// True when a non-empty, valid range was applied
    pub filter_active: bool,
}

impl Aggregation {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop versions without downloads, apply the range filter and compute each
/// remaining version's percentage.
///
/// Without a filter, percentages are relative to `total_downloads`. With one,
/// they are relative to the downloads of the versions that passed. A filter
/// that does not parse as a range is ignored.
pub fn aggregate(versions: &[VersionRecord], total_downloads: u64, filter: &str) -> Aggregation {
    let with_downloads = versions.iter().filter(|v| v.downloads > 0);
    let filter = filter.trim();

    if filter.is_empty() {
        return unfiltered(with_downloads, total_downloads);
    }

    let range = match VersionRange::parse(filter) {
        Ok(range) => range,
        Err(e) => {
            tracing::warn!("Ignoring version filter: {}", e);
            return unfiltered(with_downloads, total_downloads);
        }
    };

    let kept: Vec<&VersionRecord> = with_downloads
        .filter(|v| range.matches_str(&v.version))
        .collect();
    let filtered_total: u64 = kept.iter().map(|v| v.downloads).sum();

    Aggregation {
        records: kept
            .into_iter()
            .map(|v| AggregatedVersionRecord::from_record(v, percentage(v.downloads, filtered_total)))
            .collect(),
        filtered_total,
        filter_active: true,
    }
}

fn unfiltered<'a>(
    versions: impl Iterator<Item = &'a VersionRecord>,
    total_downloads: u64,
) -> Aggregation {
    let records: Vec<AggregatedVersionRecord> = versions
        .map(|v| AggregatedVersionRecord::from_record(v, percentage(v.downloads, total_downloads)))
        .collect();
    let filtered_total = records.iter().map(|r| r.downloads).sum();

    Aggregation {
        records,
        filtered_total,
        filter_active: false,
    }
}

fn percentage(downloads: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(downloads as f64 / total as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<VersionRecord> {
        vec![
            VersionRecord::new("1.0.0", 50),
            VersionRecord::new("2.0.0", 150),
            VersionRecord::new("2.1.0", 0),
        ]
    }

    #[test]
    fn test_filter_recomputes_percentages() {
        let result = aggregate(&scenario(), 200, "^2.0.0");

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].version, "2.0.0");
        assert_eq!(result.records[0].percentage, 100.0);
        assert_eq!(result.filtered_total, 150);
        assert!(result.filter_active);
    }

    #[test]
    fn test_no_filter_uses_package_total() {
        let result = aggregate(&scenario(), 200, "");

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].version, "1.0.0");
        assert_eq!(result.records[0].percentage, 25.0);
        assert_eq!(result.records[1].version, "2.0.0");
        assert_eq!(result.records[1].percentage, 75.0);
        assert_eq!(result.filtered_total, 200);
        assert!(!result.filter_active);
    }

    #[test]
    fn test_whitespace_filter_is_empty() {
        assert_eq!(aggregate(&scenario(), 200, ""), aggregate(&scenario(), 200, "   "));
    }

    #[test]
    fn test_filter_is_trimmed() {
        assert_eq!(
            aggregate(&scenario(), 200, "  ^2.0.0\t"),
            aggregate(&scenario(), 200, "^2.0.0")
        );
    }

    #[test]
    fn test_all_zero_downloads() {
        let versions = vec![VersionRecord::new("1.0.0", 0), VersionRecord::new("1.1.0", 0)];

        for filter in ["", "^1.0.0", "bogus range !"] {
            let result = aggregate(&versions, 0, filter);
            assert!(result.records.is_empty());
            assert_eq!(result.filtered_total, 0);
        }
    }

    #[test]
    fn test_unfiltered_percentages_sum_to_100() {
        let versions: Vec<VersionRecord> = (1..=7)
            .map(|i| VersionRecord::new(format!("1.{}.0", i), 1000 + i * 37))
            .collect();
        let total = versions.iter().map(|v| v.downloads).sum();

        let result = aggregate(&versions, total, "");
        let sum: f64 = result.records.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 0.1, "sum was {}", sum);
    }

    #[test]
    fn test_filter_without_matches() {
        let result = aggregate(&scenario(), 200, "^9.0.0");

        assert!(result.is_empty());
        assert_eq!(result.filtered_total, 0);
        assert!(result.filter_active);
    }

    #[test]
    fn test_invalid_filter_falls_back_to_unfiltered() {
        let result = aggregate(&scenario(), 200, ">=>=");

        assert_eq!(result, aggregate(&scenario(), 200, ""));
        assert!(!result.filter_active);
    }

    #[test]
    fn test_invalid_versions_survive_filtering() {
        let versions = vec![
            VersionRecord::new("1.0.0", 10),
            VersionRecord::new("latest-ish", 30),
        ];

        let result = aggregate(&versions, 40, "^2.0.0");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].version, "latest-ish");
        assert_eq!(result.records[0].percentage, 100.0);
    }

    #[test]
    fn test_zero_total_yields_zero_percentages() {
        let versions = vec![VersionRecord::new("1.0.0", 10)];

        let result = aggregate(&versions, 0, "");
        assert_eq!(result.records[0].percentage, 0.0);
        assert_eq!(result.filtered_total, 10);
    }

    #[test]
    fn test_input_order_preserved() {
        let versions = vec![
            VersionRecord::new("3.0.0", 1),
            VersionRecord::new("1.0.0", 5),
            VersionRecord::new("2.0.0", 3),
        ];

        let result = aggregate(&versions, 9, "*");
        let order: Vec<&str> = result.records.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(order, ["3.0.0", "1.0.0", "2.0.0"]);
    }
}
