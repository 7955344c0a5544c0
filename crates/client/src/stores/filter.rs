//! Filter screen store.
//!
//! Facet lists are built from the full catalog on demand. The working
//! selection lives only in this store's state; `Apply` hands it to the
//! catalog screen as an effect and nothing is persisted.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::catalog::{self, Facets, FilterSelection, SortOrder};
use crate::error::display_message;
use crate::remote::ProductSource;

/// Filter screen state.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Full facet lists, before any facet search narrowing.
    pub facets: Facets,
    pub brand_query: String,
    pub model_query: String,
    pub selected_sort: Option<SortOrder>,
    pub selected_brands: BTreeSet<String>,
    pub selected_models: BTreeSet<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FilterState {
    /// Brand facets narrowed by the current brand search query.
    #[must_use]
    pub fn visible_brands(&self) -> Vec<String> {
        catalog::search_facet(&self.facets.brands, &self.brand_query)
    }

    /// Model facets narrowed by the current model search query.
    #[must_use]
    pub fn visible_models(&self) -> Vec<String> {
        catalog::search_facet(&self.facets.models, &self.model_query)
    }

    /// The working selection as an applicable value.
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            sort: self.selected_sort,
            brands: self.selected_brands.clone(),
            models: self.selected_models.clone(),
        }
    }
}

/// Filter screen events.
#[derive(Debug, Clone)]
pub enum FilterEvent {
    /// Fetch the catalog and build the facet lists.
    Load,
    SearchBrands(String),
    SearchModels(String),
    SelectSort(SortOrder),
    ToggleBrand { name: String, selected: bool },
    ToggleModel { name: String, selected: bool },
    /// Hand the working selection to the catalog screen.
    Apply,
}

/// One-shot filter effects.
#[derive(Debug, Clone)]
pub enum FilterEffect {
    Applied(FilterSelection),
}

/// Store for the filter screen.
pub struct FilterStore {
    state: Arc<watch::Sender<FilterState>>,
    effects: mpsc::UnboundedSender<FilterEffect>,
    source: Arc<dyn ProductSource>,
}

impl FilterStore {
    /// Create the store and its effect stream.
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>) -> (Self, mpsc::UnboundedReceiver<FilterEffect>) {
        let (state, _) = watch::channel(FilterState::default());
        let (effects, effects_rx) = mpsc::unbounded_channel();

        (
            Self {
                state: Arc::new(state),
                effects,
                source,
            },
            effects_rx,
        )
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: FilterEvent) {
        match event {
            FilterEvent::Load => self.load_facets().await,
            FilterEvent::SearchBrands(query) => {
                self.state.send_modify(|state| state.brand_query = query);
            }
            FilterEvent::SearchModels(query) => {
                self.state.send_modify(|state| state.model_query = query);
            }
            FilterEvent::SelectSort(order) => {
                self.state
                    .send_modify(|state| state.selected_sort = Some(order));
            }
            FilterEvent::ToggleBrand { name, selected } => {
                self.state.send_modify(|state| {
                    if selected {
                        state.selected_brands.insert(name);
                    } else {
                        state.selected_brands.remove(&name);
                    }
                });
            }
            FilterEvent::ToggleModel { name, selected } => {
                self.state.send_modify(|state| {
                    if selected {
                        state.selected_models.insert(name);
                    } else {
                        state.selected_models.remove(&name);
                    }
                });
            }
            FilterEvent::Apply => {
                let selection = self.state.borrow().selection();
                let _ = self.effects.send(FilterEffect::Applied(selection));
            }
        }
    }

    async fn load_facets(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.source.fetch_products().await {
            Ok(products) => {
                let facets = catalog::facets(&products);
                self.state.send_modify(|state| {
                    state.facets = facets;
                    state.is_loading = false;
                });
            }
            Err(e) => self.state.send_modify(|state| {
                state.is_loading = false;
                state.error = Some(display_message(&e));
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::remote::RemoteError;
    use async_trait::async_trait;
    use bazaar_core::{Price, ProductId};

    struct StaticSource(Vec<Product>);

    #[async_trait]
    impl ProductSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
            Ok(self.0.clone())
        }
    }

    fn product(id: &str, brand: &str, model: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new("1"),
            description: String::new(),
            model: model.to_owned(),
            brand: brand.to_owned(),
            created_at: String::new(),
        }
    }

    fn store() -> (FilterStore, mpsc::UnboundedReceiver<FilterEffect>) {
        FilterStore::new(Arc::new(StaticSource(vec![
            product("1", "Aston", "A1"),
            product("2", "Bentley", "B2"),
            product("3", "Aston", "A2"),
        ])))
    }

    #[tokio::test]
    async fn test_load_builds_facets() {
        let (store, _effects) = store();

        store.handle(FilterEvent::Load).await;

        let state = store.state();
        assert_eq!(state.facets.brands, ["Aston", "Bentley"]);
        assert_eq!(state.facets.models, ["A1", "A2", "B2"]);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_facet_search_narrows_visible_lists() {
        let (store, _effects) = store();
        store.handle(FilterEvent::Load).await;

        store
            .handle(FilterEvent::SearchBrands("ast".to_owned()))
            .await;
        store.handle(FilterEvent::SearchModels("a".to_owned())).await;

        let state = store.state();
        assert_eq!(state.visible_brands(), ["Aston"]);
        assert_eq!(state.visible_models(), ["A1", "A2"]);
        // The full facet lists are untouched.
        assert_eq!(state.facets.brands.len(), 2);
    }

    #[tokio::test]
    async fn test_toggles_and_apply_emit_selection() {
        let (store, mut effects) = store();
        store.handle(FilterEvent::Load).await;

        store
            .handle(FilterEvent::SelectSort(SortOrder::PriceLowToHigh))
            .await;
        store
            .handle(FilterEvent::ToggleBrand {
                name: "Aston".to_owned(),
                selected: true,
            })
            .await;
        store
            .handle(FilterEvent::ToggleBrand {
                name: "Bentley".to_owned(),
                selected: true,
            })
            .await;
        store
            .handle(FilterEvent::ToggleBrand {
                name: "Bentley".to_owned(),
                selected: false,
            })
            .await;
        store.handle(FilterEvent::Apply).await;

        match effects.recv().await {
            Some(FilterEffect::Applied(selection)) => {
                assert_eq!(selection.sort, Some(SortOrder::PriceLowToHigh));
                assert!(selection.brands.contains("Aston"));
                assert!(!selection.brands.contains("Bentley"));
                assert!(selection.models.is_empty());
            }
            None => panic!("expected an applied selection"),
        }
    }
}
