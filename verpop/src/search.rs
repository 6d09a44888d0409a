use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::PackageSnapshot;
use crate::error::SearchError;
use crate::registry::RegistryClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchLifecycle {
    #[default]
    Idle,
    Loading,
    Success(Rc<PackageSnapshot>),
    Error(String),
}

type Listener = Rc<dyn Fn(&SearchLifecycle)>;

/// Drives one search at a time through [`SearchLifecycle`].
///
/// Searches are not cancelled when a new one starts. Each one writes its
/// outcome when it settles, so the last to finish is what stays displayed.
pub struct SearchController<C> {
    client: Rc<C>,
    state: Rc<RefCell<SearchLifecycle>>,
    has_searched: Rc<Cell<bool>>,
    listener: Option<Listener>,
}

impl<C> Clone for SearchController<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: self.state.clone(),
            has_searched: self.has_searched.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<C: RegistryClient> SearchController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Rc::new(client),
            state: Rc::new(RefCell::new(SearchLifecycle::Idle)),
            has_searched: Rc::new(Cell::new(false)),
            listener: None,
        }
    }

    /// Call `listener` after every state change.
    pub fn with_listener(mut self, listener: impl Fn(&SearchLifecycle) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn state(&self) -> SearchLifecycle {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<Rc<PackageSnapshot>> {
        match &*self.state.borrow() {
            SearchLifecycle::Success(snapshot) => Some(snapshot.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &*self.state.borrow() {
            SearchLifecycle::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), SearchLifecycle::Loading)
    }

    /// Whether a search was attempted since the last reset.
    pub fn has_searched(&self) -> bool {
        self.has_searched.get()
    }

    pub async fn search(&self, name: &str) -> Result<Rc<PackageSnapshot>, SearchError> {
        self.has_searched.set(true);

        let name = name.trim();
        if name.is_empty() {
            let err = SearchError::EmptyQuery;
            self.set_state(SearchLifecycle::Error(err.to_string()));
            return Err(err);
        }

        self.set_state(SearchLifecycle::Loading);
        tracing::info!("Fetching package info for {}", name);

        match self.client.fetch_package_info(name).await {
            Ok(snapshot) => {
                tracing::info!(
                    "Loaded {} with {} versions",
                    snapshot.name,
                    snapshot.versions.len()
                );
                let snapshot = Rc::new(snapshot);
                self.set_state(SearchLifecycle::Success(snapshot.clone()));
                Ok(snapshot)
            }
            Err(e) => {
                let err = SearchError::from(e);
                tracing::error!("Search for {} failed: {}", name, err);
                self.set_state(SearchLifecycle::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn reset(&self) {
        self.has_searched.set(false);
        self.set_state(SearchLifecycle::Idle);
    }

    fn set_state(&self, state: SearchLifecycle) {
        *self.state.borrow_mut() = state;
        if let Some(listener) = &self.listener {
            listener(&self.state.borrow());
        }
    }
}
