//! Two-way binding between view parameters and the page's query string.
//!
//! Only parameters that differ from their defaults are written to the URL, so
//! a fresh search produces a short link and defaults never need to be spelled
//! out when sharing one.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;
use std::rc::Rc;
use url::form_urlencoded;

use crate::table::{DEFAULT_PAGE_SIZE, SortDirection, SortField};

pub const SEARCH_KEY: &str = "q";
pub const FILTER_KEY: &str = "filter";
pub const SORT_KEY: &str = "sort";
pub const DIRECTION_KEY: &str = "dir";
pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "size";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Num(f64),
    Str(String),
}

pub type ParamMap = BTreeMap<String, ParamValue>;

impl ParamValue {
    /// Read `raw` as the same kind of value as `self`.
    fn coerce(&self, raw: &str) -> Option<ParamValue> {
        match self {
            ParamValue::Str(_) => Some(ParamValue::Str(raw.to_string())),
            ParamValue::Bool(_) => Some(ParamValue::Bool(raw == "true")),
            ParamValue::Num(_) => raw.trim().parse().ok().map(ParamValue::Num),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            ParamValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Num(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Num(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Num(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Access to the address bar.
pub trait UrlLocation {
    /// The query string including its leading `?`, or empty
    fn search(&self) -> String;
    fn pathname(&self) -> String;
    fn replace_state(&self, url: &str);
    fn push_state(&self, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Replace,
    Push,
}

/// Parameter state mirrored into a [`UrlLocation`].
pub struct SearchUrlState<L: UrlLocation> {
    location: L,
    defaults: ParamMap,
    params: ParamMap,
    history: HistoryMode,
}

impl<L: UrlLocation> SearchUrlState<L> {
    /// Read the current query string over `defaults`.
    pub fn load(location: L, defaults: ParamMap, history: HistoryMode) -> Self {
        let query = parse_query(&location.search());
        let mut params = defaults.clone();

        for (key, default) in &defaults {
            let Some(raw) = query.get(key.as_str()) else {
                continue;
            };
            match default.coerce(raw) {
                Some(value) => {
                    params.insert(key.clone(), value);
                }
                None => {
                    tracing::debug!("Ignoring URL parameter {}={:?}, keeping default", key, raw);
                }
            }
        }

        Self {
            location,
            defaults,
            params,
            history,
        }
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn defaults(&self) -> &ParamMap {
        &self.defaults
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(ParamValue::as_str).unwrap_or_default()
    }

    pub fn get_num(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_num)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(ParamValue::as_bool).unwrap_or(false)
    }

    /// Whether any parameter differs from its default.
    pub fn has_params(&self) -> bool {
        self.params.iter().any(|(k, v)| self.defaults.get(k) != Some(v))
    }

    pub fn set_param(&mut self, key: &str, value: impl Into<ParamValue>) {
        if self.store(key, value.into()) {
            self.write_url();
        }
    }

    /// Update several parameters with a single URL write.
    pub fn set_params<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut changed = false;
        for (key, value) in values {
            changed |= self.store(key.as_ref(), value.into());
        }
        if changed {
            self.write_url();
        }
    }

    pub fn reset(&mut self) {
        self.params = self.defaults.clone();
        self.write_url();
    }

    /// The query string (without `?`) for the current parameters.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            if self.defaults.get(key) != Some(value) {
                query.append_pair(key, &value.to_string());
            }
        }
        query.finish()
    }

    /// Store `value` as the same kind of value as the key's default, so that
    /// what is held in memory is exactly what a reload reads back.
    fn store(&mut self, key: &str, value: ParamValue) -> bool {
        let Some(default) = self.defaults.get(key) else {
            tracing::warn!("Ignoring unknown URL parameter {}", key);
            return false;
        };

        let value = if mem::discriminant(default) == mem::discriminant(&value) {
            value
        } else {
            match default.coerce(&value.to_string()) {
                Some(coerced) => coerced,
                None => {
                    tracing::warn!("Ignoring URL parameter {}={}, expected a value like {}", key, value, default);
                    return false;
                }
            }
        };

        self.params.insert(key.to_string(), value);
        true
    }

    fn write_url(&self) {
        let query = self.query_string();
        let path = self.location.pathname();
        let url = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };

        tracing::debug!("Updating URL to {}", url);
        match self.history {
            HistoryMode::Replace => self.location.replace_state(&url),
            HistoryMode::Push => self.location.push_state(&url),
        }
    }
}

/// Split a query string into decoded pairs; the first occurrence of a key wins.
pub fn parse_query(search: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();

    for (key, value) in form_urlencoded::parse(search.trim_start_matches('?').as_bytes()) {
        pairs
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    pairs
}

/// An in-memory address bar, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    inner: Rc<RefCell<MemoryUrl>>,
}

#[derive(Debug, Default)]
struct MemoryUrl {
    pathname: String,
    search: String,
    history: Vec<String>,
}

impl MemoryLocation {
    /// Start at `url`, e.g. `/?q=react&filter=%5E18`.
    pub fn new(url: &str) -> Self {
        let location = Self::default();
        location.navigate(url);
        location
    }

    fn navigate(&self, url: &str) {
        let (pathname, query) = url.split_once('?').unwrap_or((url, ""));
        let mut inner = self.inner.borrow_mut();
        inner.pathname = if pathname.is_empty() { "/".to_string() } else { pathname.to_string() };
        inner.search = if query.is_empty() { String::new() } else { format!("?{}", query) };
    }

    pub fn href(&self) -> String {
        let inner = self.inner.borrow();
        format!("{}{}", inner.pathname, inner.search)
    }

    /// Number of entries added with `push_state`.
    pub fn history_len(&self) -> usize {
        self.inner.borrow().history.len()
    }
}

impl UrlLocation for MemoryLocation {
    fn search(&self) -> String {
        self.inner.borrow().search.clone()
    }

    fn pathname(&self) -> String {
        self.inner.borrow().pathname.clone()
    }

    fn replace_state(&self, url: &str) {
        self.navigate(url);
    }

    fn push_state(&self, url: &str) {
        let previous = self.href();
        self.inner.borrow_mut().history.push(previous);
        self.navigate(url);
    }
}

/// Search and filter inputs shared by the search box and the results view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub version_filter: String,
}

impl FilterState {
    pub fn from_params(params: &ParamMap) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .and_then(ParamValue::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            search_term: text(SEARCH_KEY),
            version_filter: text(FILTER_KEY),
        }
    }
}

/// Sorting and paging of the versions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    pub field: SortField,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            field: SortField::default(),
            direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    pub fn from_params(params: &ParamMap) -> Self {
        let defaults = Self::default();
        let text = |key: &str| params.get(key).and_then(ParamValue::as_str).unwrap_or_default();
        let count = |key: &str, default: usize| {
            params
                .get(key)
                .and_then(ParamValue::as_num)
                .filter(|n| n.is_finite() && *n >= 1.0)
                .map(|n| n as usize)
                .unwrap_or(default)
        };

        Self {
            field: text(SORT_KEY).parse().unwrap_or(defaults.field),
            direction: text(DIRECTION_KEY).parse().unwrap_or(defaults.direction),
            page: count(PAGE_KEY, defaults.page),
            page_size: count(PAGE_SIZE_KEY, defaults.page_size),
        }
    }
}

/// Defaults for every parameter the app keeps in the URL.
pub fn default_params() -> ParamMap {
    let table = TableState::default();
    BTreeMap::from([
        (SEARCH_KEY.to_string(), ParamValue::from("")),
        (FILTER_KEY.to_string(), ParamValue::from("")),
        (SORT_KEY.to_string(), ParamValue::from(table.field.as_str())),
        (DIRECTION_KEY.to_string(), ParamValue::from(table.direction.as_str())),
        (PAGE_KEY.to_string(), ParamValue::from(table.page)),
        (PAGE_SIZE_KEY.to_string(), ParamValue::from(table.page_size)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(url: &str) -> SearchUrlState<MemoryLocation> {
        SearchUrlState::load(MemoryLocation::new(url), default_params(), HistoryMode::Replace)
    }

    #[test]
    fn test_load_without_query_uses_defaults() {
        let state = load("/");
        assert_eq!(state.params(), &default_params());
        assert!(!state.has_params());
    }

    #[test]
    fn test_load_coerces_by_default_type() {
        let state = load("/?q=react&filter=%5E18.0.0&page=3&size=oops&unknown=1");

        assert_eq!(state.get_str(SEARCH_KEY), "react");
        assert_eq!(state.get_str(FILTER_KEY), "^18.0.0");
        assert_eq!(state.get_num(PAGE_KEY), Some(3.0));
        // Not a number: the default stays
        assert_eq!(state.get_num(PAGE_SIZE_KEY), Some(15.0));
        assert!(state.get("unknown").is_none());
        assert!(state.has_params());
    }

    #[test]
    fn test_load_bool_params() {
        let mut defaults = default_params();
        defaults.insert("compact".to_string(), ParamValue::Bool(false));

        let state = SearchUrlState::load(
            MemoryLocation::new("/?compact=true"),
            defaults.clone(),
            HistoryMode::Replace,
        );
        assert!(state.get_bool("compact"));

        let state = SearchUrlState::load(MemoryLocation::new("/?compact=yes"), defaults, HistoryMode::Replace);
        assert!(!state.get_bool("compact"));
    }

    #[test]
    fn test_filter_round_trip() {
        let mut state = load("/");
        state.set_param(FILTER_KEY, "^2.0.0");

        let reloaded = SearchUrlState::load(state.location().clone(), default_params(), HistoryMode::Replace);
        assert_eq!(reloaded.get_str(FILTER_KEY), "^2.0.0");
        assert_eq!(reloaded.params(), state.params());
    }

    #[test]
    fn test_default_values_are_omitted() {
        let mut state = load("/?filter=%5E1");
        state.set_param(FILTER_KEY, "");

        assert_eq!(state.location().href(), "/");
        assert!(!parse_query(&state.location().search()).contains_key(FILTER_KEY));
    }

    #[test]
    fn test_round_trip_mixed_params() {
        let mut state = load("/app");
        state.set_params([
            (SEARCH_KEY, ParamValue::from("@types/node")),
            (FILTER_KEY, ParamValue::from(">=1.0.0 <2.0.0")),
            (PAGE_KEY, ParamValue::from(4usize)),
            (SORT_KEY, ParamValue::from("date")),
        ]);

        let href = state.location().href();
        assert!(href.starts_with("/app?"));
        // `sort=date` is the default
        assert!(!href.contains("sort="));

        let reloaded = SearchUrlState::load(state.location().clone(), default_params(), HistoryMode::Replace);
        assert_eq!(reloaded.params(), state.params());
        assert_eq!(
            FilterState::from_params(reloaded.params()),
            FilterState {
                search_term: "@types/node".to_string(),
                version_filter: ">=1.0.0 <2.0.0".to_string(),
            }
        );
        assert_eq!(TableState::from_params(reloaded.params()).page, 4);
    }

    #[test]
    fn test_reset_strips_params() {
        let mut state = load("/?q=lodash&dir=asc");
        state.reset();

        assert_eq!(state.location().href(), "/");
        assert_eq!(state.params(), &default_params());
    }

    #[test]
    fn test_unknown_keys_are_not_written() {
        let mut state = load("/");
        state.set_param("token", "secret");

        assert_eq!(state.location().href(), "/");
        assert!(state.get("token").is_none());
    }

    #[test]
    fn test_set_param_keeps_default_type() {
        let mut state = load("/?page=2");

        state.set_param(PAGE_KEY, "abc");
        assert_eq!(state.get_num(PAGE_KEY), Some(2.0));
        assert_eq!(state.location().href(), "/?page=2");

        state.set_param(PAGE_KEY, "3");
        assert_eq!(state.get(PAGE_KEY), Some(&ParamValue::Num(3.0)));

        state.set_param(SEARCH_KEY, 42usize);
        assert_eq!(state.get(SEARCH_KEY), Some(&ParamValue::from("42")));

        let reloaded = SearchUrlState::load(state.location().clone(), default_params(), HistoryMode::Replace);
        assert_eq!(reloaded.params(), state.params());
    }

    #[test]
    fn test_push_mode_adds_history() {
        let location = MemoryLocation::new("/");
        let mut state = SearchUrlState::load(location.clone(), default_params(), HistoryMode::Push);
        state.set_param(SEARCH_KEY, "react");
        state.set_param(SEARCH_KEY, "vue");

        assert_eq!(location.history_len(), 2);
        assert_eq!(location.href(), "/?q=vue");

        let mut replacing = SearchUrlState::load(location.clone(), default_params(), HistoryMode::Replace);
        replacing.set_param(SEARCH_KEY, "svelte");
        assert_eq!(location.history_len(), 2);
    }

    #[test]
    fn test_parse_query_decoding() {
        let pairs = parse_query("?q=hello+world&filter=%3E%3D1.0.0&q=second&flag");
        assert_eq!(pairs["q"], "hello world");
        assert_eq!(pairs["filter"], ">=1.0.0");
        assert_eq!(pairs["flag"], "");
    }

    #[test]
    fn test_table_state_from_params() {
        let state = load("/?sort=downloads&dir=asc&size=50&page=0");
        let table = TableState::from_params(state.params());

        assert_eq!(table.field, SortField::Downloads);
        assert_eq!(table.direction, SortDirection::Asc);
        assert_eq!(table.page_size, 50);
        // Page 0 is not a valid page
        assert_eq!(table.page, 1);
    }

    #[test]
    fn test_num_display_has_no_trailing_zero() {
        assert_eq!(ParamValue::from(15usize).to_string(), "15");
        assert_eq!(ParamValue::Num(1.5).to_string(), "1.5");
    }
}
