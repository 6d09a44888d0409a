use std::env;

use crate::chart::DEFAULT_MAX_SLICES;
use crate::table::DEFAULT_PAGE_SIZE;

pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const NPM_DOWNLOADS_API_URL: &str = "https://api.npmjs.org";
pub const NPMS_SUGGESTIONS_URL: &str = "https://api.npms.io/v2/search/suggestions";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub registry_url: String,
    pub downloads_url: String,
    pub suggestions_url: String,
    pub suggestion_limit: usize,
    pub page_size: usize,
    pub max_slices: usize,
    pub debounce_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: NPM_REGISTRY_URL.to_string(),
            downloads_url: NPM_DOWNLOADS_API_URL.to_string(),
            suggestions_url: NPMS_SUGGESTIONS_URL.to_string(),
            suggestion_limit: 10,
            page_size: DEFAULT_PAGE_SIZE,
            max_slices: DEFAULT_MAX_SLICES,
            debounce_ms: 300,
        }
    }
}

impl Config {
    /// Defaults overridden by `VERPOP_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };

        Self {
            registry_url: lookup("VERPOP_REGISTRY_URL").unwrap_or(defaults.registry_url),
            downloads_url: lookup("VERPOP_DOWNLOADS_URL").unwrap_or(defaults.downloads_url),
            suggestions_url: lookup("VERPOP_SUGGESTIONS_URL").unwrap_or(defaults.suggestions_url),
            suggestion_limit: number("VERPOP_SUGGESTION_LIMIT", defaults.suggestion_limit),
            page_size: number("VERPOP_PAGE_SIZE", defaults.page_size),
            max_slices: number("VERPOP_MAX_SLICES", defaults.max_slices),
            debounce_ms: defaults.debounce_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("VERPOP_REGISTRY_URL", "http://localhost:4873"),
            ("VERPOP_PAGE_SIZE", "50"),
            ("VERPOP_MAX_SLICES", "lots"),
            ("VERPOP_SUGGESTION_LIMIT", "0"),
        ]);

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.registry_url, "http://localhost:4873");
        assert_eq!(config.downloads_url, NPM_DOWNLOADS_API_URL);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_slices, DEFAULT_MAX_SLICES);
        assert_eq!(config.suggestion_limit, 10);
    }
}
