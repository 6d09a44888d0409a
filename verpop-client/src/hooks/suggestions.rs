use dioxus::prelude::*;
use std::time::Duration;
use verpop::config::Config;
use verpop::registry::{SuggestionClient, should_suggest};
use verpop::Suggestion;

use super::debounce::{Debouncer, use_debouncer};
use crate::api::BrowserRegistry;

/// Debounced autocomplete for the search box.
#[derive(Clone, Copy)]
pub struct Suggestions {
    items: Signal<Vec<Suggestion>>,
    registry: CopyValue<BrowserRegistry>,
    debouncer: Debouncer,
}

impl Suggestions {
    pub fn items(&self) -> Vec<Suggestion> {
        self.items.read().clone()
    }

    pub fn update(&self, query: &str) {
        let mut items = self.items;
        if !should_suggest(query) {
            self.debouncer.cancel();
            items.set(Vec::new());
            return;
        }

        let query = query.trim().to_string();
        let registry = self.registry.read().clone();
        self.debouncer.schedule(async move {
            match registry.fetch_suggestions(&query).await {
                Ok(found) => items.set(found),
                Err(e) => {
                    // Autocomplete is best effort
                    tracing::warn!("Error fetching suggestions for {}: {}", query, e);
                    items.set(Vec::new());
                }
            }
        });
    }

    pub fn clear(&self) {
        let mut items = self.items;
        self.debouncer.cancel();
        items.set(Vec::new());
    }
}

pub fn use_suggestions() -> Suggestions {
    let config = use_context::<Config>();
    let items = use_signal(Vec::new);
    let debouncer = use_debouncer(Duration::from_millis(u64::from(config.debounce_ms)));
    let registry = use_hook(move || CopyValue::new(BrowserRegistry::new(config)));

    Suggestions {
        items,
        registry,
        debouncer,
    }
}
