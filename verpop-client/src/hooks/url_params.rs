use dioxus::prelude::*;
use verpop::url_state::{HistoryMode, SearchUrlState, UrlLocation, default_params};
use wasm_bindgen::JsValue;

/// The browser address bar.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl BrowserLocation {
    fn update(&self, url: &str, push: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            tracing::warn!("No history available, URL not updated");
            return;
        };

        let result = if push {
            history.push_state_with_url(&JsValue::NULL, "", Some(url))
        } else {
            history.replace_state_with_url(&JsValue::NULL, "", Some(url))
        };
        if let Err(e) = result {
            tracing::warn!("Failed to update URL to {}: {:?}", url, e);
        }
    }
}

impl UrlLocation for BrowserLocation {
    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn pathname(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn replace_state(&self, url: &str) {
        self.update(url, false);
    }

    fn push_state(&self, url: &str) {
        self.update(url, true);
    }
}

pub type UrlState = Signal<SearchUrlState<BrowserLocation>>;

/// Load the URL parameters once and share them with the whole app.
pub fn provide_url_state() -> UrlState {
    use_context_provider(|| {
        Signal::new(SearchUrlState::load(
            BrowserLocation,
            default_params(),
            HistoryMode::Replace,
        ))
    })
}

pub fn use_url_state() -> UrlState {
    use_context::<UrlState>()
}
