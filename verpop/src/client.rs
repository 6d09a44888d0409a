use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::FetchError;
use crate::registry::{self, RegistryClient, RegistryDocument, SuggestionClient, VersionDownloads};
use crate::{PackageSnapshot, Suggestion};

/// Registry and download-stats client backed by reqwest.
#[derive(Clone)]
pub struct NpmRegistry {
    client: Client,
    config: Config,
}

impl NpmRegistry {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent("verpop").build()?;
        Ok(Self::new(client, Config::default()))
    }

    /// GET `url` as JSON. `Ok(None)` means the server answered 404.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, reqwest::Error> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.error_for_status()?.json().await?;
        Ok(Some(body))
    }
}

#[async_trait(?Send)]
impl RegistryClient for NpmRegistry {
    async fn fetch_package_info(&self, name: &str) -> Result<PackageSnapshot, FetchError> {
        let doc_url = registry::package_url(&self.config.registry_url, name);
        let doc: RegistryDocument = match self.get_json(&doc_url).await {
            Ok(Some(doc)) => doc,
            Ok(None) => return Err(FetchError::not_found(name)),
            Err(e) => {
                tracing::error!("Error fetching package info for {}: {}", name, e);
                return Err(FetchError::for_package(name));
            }
        };

        let downloads_url = registry::downloads_url(&self.config.downloads_url, name);
        let downloads: VersionDownloads = match self.get_json(&downloads_url).await {
            Ok(Some(downloads)) => downloads,
            // Packages without any downloads yet have no stats
            Ok(None) => VersionDownloads::default(),
            Err(e) => {
                tracing::error!("Error fetching download counts for {}: {}", name, e);
                return Err(FetchError::for_package(name));
            }
        };

        Ok(registry::merge(name, doc, &downloads))
    }
}

#[async_trait(?Send)]
impl SuggestionClient for NpmRegistry {
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        if !registry::should_suggest(query) {
            return Ok(Vec::new());
        }

        let url = registry::suggestions_url(
            &self.config.suggestions_url,
            query,
            self.config.suggestion_limit,
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::new(format!("Failed to fetch suggestions: {}", e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(format!("Failed to read suggestions: {}", e)))?;

        registry::parse_suggestions(&body)
    }
}
