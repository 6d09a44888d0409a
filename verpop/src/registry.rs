//! npm registry documents and the clients that fetch them.
//!
//! Package metadata and download counts come from two separate endpoints;
//! [`merge`] joins them into a single [`PackageSnapshot`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;
use url::form_urlencoded;

use crate::error::FetchError;
use crate::{PackageSnapshot, Suggestion, VersionRecord};

/// Fetches everything needed to show one package.
#[async_trait(?Send)]
pub trait RegistryClient {
    async fn fetch_package_info(&self, name: &str) -> Result<PackageSnapshot, FetchError>;
}

/// Fetches autocomplete entries for a partial package name.
#[async_trait(?Send)]
pub trait SuggestionClient {
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// The parts of a registry packument (`GET /<name>`) this app reads.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub versions: BTreeMap<String, IgnoredAny>,
    /// Publish time per version, plus `created` and `modified`
    #[serde(default)]
    pub time: BTreeMap<String, serde_json::Value>,
}

/// Per-version download counts (`GET /versions/<name>/last-week`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionDownloads {
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub downloads: BTreeMap<String, u64>,
}

/// Join registry metadata with download counts.
///
/// Every version in the packument yields one record; versions missing from
/// the download stats get 0. Records are ordered newest first with unknown
/// publish dates last.
pub fn merge(requested_name: &str, doc: RegistryDocument, downloads: &VersionDownloads) -> PackageSnapshot {
    let mut versions: Vec<VersionRecord> = doc
        .versions
        .keys()
        .map(|version| {
            let published_at = doc
                .time
                .get(version)
                .and_then(|t| t.as_str())
                .and_then(parse_timestamp);

            VersionRecord {
                version: version.clone(),
                published_at,
                downloads: downloads.downloads.get(version).copied().unwrap_or(0),
            }
        })
        .collect();

    versions.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let total_downloads = versions.iter().map(|v| v.downloads).sum();
    let name = if doc.name.is_empty() {
        requested_name.to_string()
    } else {
        doc.name
    };

    PackageSnapshot {
        name,
        description: doc.description.filter(|d| !d.trim().is_empty()),
        versions,
        total_downloads,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// Encode a package name for use as one URL path segment. Scoped names keep
/// their `@` but have the slash escaped.
pub fn encode_package_name(name: &str) -> String {
    form_urlencoded::byte_serialize(name.trim().as_bytes())
        .collect::<String>()
        .replace("%40", "@")
}

pub fn package_url(registry_url: &str, name: &str) -> String {
    format!("{}/{}", registry_url.trim_end_matches('/'), encode_package_name(name))
}

pub fn downloads_url(downloads_api_url: &str, name: &str) -> String {
    format!(
        "{}/versions/{}/last-week",
        downloads_api_url.trim_end_matches('/'),
        encode_package_name(name)
    )
}

pub fn suggestions_url(suggestions_api_url: &str, query: &str, size: usize) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query.trim())
        .append_pair("size", &size.to_string())
        .finish();
    format!("{}?{}", suggestions_api_url, query)
}

/// Suggestions are only looked up for queries of two or more characters.
pub fn should_suggest(query: &str) -> bool {
    query.trim().chars().count() >= 2
}

#[derive(Debug, Deserialize)]
struct NpmsSuggestion {
    package: NpmsPackage,
    score: NpmsScore,
}

#[derive(Debug, Deserialize)]
struct NpmsPackage {
    name: String,
    #[serde(default)]
    version: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NpmsScore {
    #[serde(rename = "final")]
    final_score: f64,
}

/// Parse the body of the npms.io suggestions endpoint.
pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>, FetchError> {
    let raw: Vec<NpmsSuggestion> = serde_json::from_str(body)
        .map_err(|e| FetchError::new(format!("Invalid suggestions response: {}", e)))?;

    Ok(raw
        .into_iter()
        .map(|s| Suggestion {
            name: s.package.name,
            version: s.package.version,
            description: s.package.description,
            score: s.score.final_score,
        })
        .collect())
}
