use dioxus::prelude::*;
use verpop::config::Config;
use verpop::{SearchController, SearchLifecycle};

use crate::api::BrowserRegistry;

/// A [`SearchController`] whose state changes re-render the component.
#[derive(Clone, Copy)]
pub struct PackageSearch {
    controller: CopyValue<SearchController<BrowserRegistry>>,
    state: Signal<SearchLifecycle>,
}

impl PackageSearch {
    pub fn state(&self) -> SearchLifecycle {
        self.state.read().clone()
    }

    pub fn search(&self, name: String) {
        let controller = self.controller.read().clone();
        spawn(async move {
            if let Err(e) = controller.search(&name).await {
                tracing::debug!("Search for {:?} ended with: {}", name, e);
            }
        });
    }

    pub fn reset(&self) {
        self.controller.read().reset();
    }
}

pub fn use_package_search() -> PackageSearch {
    let config = use_context::<Config>();
    let state = use_signal(SearchLifecycle::default);

    let controller = use_hook(move || {
        let controller = SearchController::new(BrowserRegistry::new(config))
            .with_listener(move |lifecycle: &SearchLifecycle| {
                let mut state = state;
                state.set(lifecycle.clone());
            });
        CopyValue::new(controller)
    });

    PackageSearch { controller, state }
}
