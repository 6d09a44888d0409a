use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use verpop::config::Config;
use verpop::error::FetchError;
use verpop::registry::{self, RegistryClient, RegistryDocument, SuggestionClient, VersionDownloads};
use verpop::{PackageSnapshot, Suggestion};

type Result<T> = std::result::Result<T, String>;

/// Registry client running on the browser's fetch API.
#[derive(Clone, PartialEq)]
pub struct BrowserRegistry {
    config: Config,
}

impl BrowserRegistry {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn get(&self, url: &str) -> Result<Option<gloo_net::http::Response>> {
        tracing::debug!("GET {}", url);
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| format!("Request error: {}", e))?;

        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }
        Ok(Some(response))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let Some(response) = self.get(url).await? else {
            return Ok(None);
        };
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| format!("Deserialization error: {}", e))
    }
}

#[async_trait(?Send)]
impl RegistryClient for BrowserRegistry {
    async fn fetch_package_info(&self, name: &str) -> std::result::Result<PackageSnapshot, FetchError> {
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
            Ok(downloads) => downloads.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Error fetching download counts for {}: {}", name, e);
                return Err(FetchError::for_package(name));
            }
        };

        Ok(registry::merge(name, doc, &downloads))
    }
}

#[async_trait(?Send)]
impl SuggestionClient for BrowserRegistry {
    async fn fetch_suggestions(&self, query: &str) -> std::result::Result<Vec<Suggestion>, FetchError> {
        if !registry::should_suggest(query) {
            return Ok(Vec::new());
        }

        let url = registry::suggestions_url(
            &self.config.suggestions_url,
            query,
            self.config.suggestion_limit,
        );
        let Some(response) = self
            .get(&url)
            .await
            .map_err(|e| FetchError::new(format!("Failed to fetch suggestions: {}", e)))?
        else {
            return Ok(Vec::new());
        };
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(format!("Failed to read suggestions: {}", e)))?;

        registry::parse_suggestions(&body)
    }
}
