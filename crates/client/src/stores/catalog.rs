//! Catalog (home) screen store.
//!
//! Owns the paged, searchable product listing and the locally computed
//! filtered view. Applying a filter fetches the whole catalog, materializes
//! the filtered/sorted list, and replaces the paged listing; clearing the
//! filter restores the previously loaded pages untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use bazaar_core::ProductId;

use crate::catalog::{self, FilterSelection};
use crate::db::{CartRepository, FavoriteRepository};
use crate::error::display_message;
use crate::models::Product;
use crate::paging::{PAGE_SIZE, PREFETCH_DISTANCE, ProductPagingSource};
use crate::remote::ProductSource;

/// Catalog screen state.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Accumulated pages of the unfiltered (possibly searched) listing.
    pub products: Vec<Product>,
    /// Key of the next page, `None` once the listing is exhausted.
    pub next_key: Option<u32>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Favorite flag per product id, kept fresh by the favorites observer.
    pub favorite_states: HashMap<ProductId, bool>,
    pub search_query: String,
    /// Fully materialized filtered/sorted list; replaces the paged listing
    /// while `is_filtered` is set.
    pub filtered_products: Vec<Product>,
    pub is_filtered: bool,
}

impl CatalogState {
    /// The list the UI should render right now.
    #[must_use]
    pub fn visible(&self) -> &[Product] {
        if self.is_filtered {
            &self.filtered_products
        } else {
            &self.products
        }
    }

    /// Whether a bind at `index` is close enough to the end of the loaded
    /// list that the next page should be requested.
    #[must_use]
    pub fn should_load_more(&self, index: usize) -> bool {
        !self.is_filtered
            && self.next_key.is_some()
            && index + PREFETCH_DISTANCE >= self.products.len()
    }

    /// Favorite flag for a product, defaulting to false.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorite_states.get(product_id).copied().unwrap_or(false)
    }
}

/// Catalog screen events.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// Reload the unfiltered first page.
    Refresh,
    /// Reload with the current search query after an error.
    Retry,
    Search(String),
    ClearSearch,
    LoadNextPage,
    ApplyFilters(FilterSelection),
    ClearFilters,
    ProductClick(Product),
    AddToCart(Product),
    ToggleFavorite(Product),
}

/// One-shot catalog effects.
#[derive(Debug, Clone)]
pub enum CatalogEffect {
    NavigateToDetail(Box<Product>),
    ShowMessage(String),
    ShowError(String),
}

/// Store for the catalog screen.
pub struct CatalogStore {
    state: Arc<watch::Sender<CatalogState>>,
    effects: mpsc::UnboundedSender<CatalogEffect>,
    source: Arc<dyn ProductSource>,
    favorites: FavoriteRepository,
    cart: CartRepository,
}

impl CatalogStore {
    /// Create the store and its effect stream, and start the favorites
    /// observer.
    #[must_use]
    pub fn new(
        source: Arc<dyn ProductSource>,
        favorites: FavoriteRepository,
        cart: CartRepository,
    ) -> (Self, mpsc::UnboundedReceiver<CatalogEffect>) {
        let (state, _) = watch::channel(CatalogState::default());
        let state = Arc::new(state);
        let (effects, effects_rx) = mpsc::unbounded_channel();

        let store = Self {
            state,
            effects,
            source,
            favorites,
            cart,
        };
        store.spawn_favorites_observer();

        (store, effects_rx)
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: CatalogEvent) {
        match event {
            CatalogEvent::Refresh => self.load_products(None).await,
            CatalogEvent::Retry => {
                let query = {
                    let state = self.state.borrow();
                    (!state.search_query.is_empty()).then(|| state.search_query.clone())
                };
                self.load_products(query).await;
            }
            CatalogEvent::Search(query) => {
                let query = (!query.trim().is_empty()).then_some(query);
                self.load_products(query).await;
            }
            CatalogEvent::ClearSearch => self.load_products(None).await,
            CatalogEvent::LoadNextPage => self.load_next_page().await,
            CatalogEvent::ApplyFilters(selection) => self.apply_filters(selection).await,
            CatalogEvent::ClearFilters => {
                self.state.send_modify(|state| {
                    state.filtered_products.clear();
                    state.is_filtered = false;
                });
            }
            CatalogEvent::ProductClick(product) => {
                let _ = self
                    .effects
                    .send(CatalogEffect::NavigateToDetail(Box::new(product)));
            }
            CatalogEvent::AddToCart(product) => self.add_to_cart(product).await,
            CatalogEvent::ToggleFavorite(product) => self.toggle_favorite(product).await,
        }
    }

    async fn load_products(&self, query: Option<String>) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let paging = ProductPagingSource::new(Arc::clone(&self.source), query.clone());
        match paging.load(None, PAGE_SIZE).await {
            Ok(page) => self.state.send_modify(|state| {
                state.products = page.items;
                state.next_key = page.next_key;
                state.is_loading = false;
                state.error = None;
                state.search_query = query.unwrap_or_default();
                state.filtered_products.clear();
                state.is_filtered = false;
            }),
            Err(e) => self.state.send_modify(|state| {
                state.is_loading = false;
                state.error = Some(display_message(&e));
            }),
        }
    }

    async fn load_next_page(&self) {
        let (next_key, query) = {
            let state = self.state.borrow();
            if state.is_filtered || state.is_loading {
                return;
            }
            let Some(next_key) = state.next_key else {
                return;
            };
            let query = (!state.search_query.is_empty()).then(|| state.search_query.clone());
            (next_key, query)
        };

        self.state.send_modify(|state| state.is_loading = true);

        let paging = ProductPagingSource::new(Arc::clone(&self.source), query);
        match paging.load(Some(next_key), PAGE_SIZE).await {
            Ok(page) => self.state.send_modify(|state| {
                state.products.extend(page.items);
                state.next_key = page.next_key;
                state.is_loading = false;
            }),
            Err(e) => self.state.send_modify(|state| {
                state.is_loading = false;
                state.error = Some(display_message(&e));
            }),
        }
    }

    async fn apply_filters(&self, selection: FilterSelection) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.source.fetch_products().await {
            Ok(products) => {
                let filtered = catalog::apply(&products, &selection);
                self.state.send_modify(|state| {
                    state.filtered_products = filtered;
                    state.is_filtered = true;
                    state.is_loading = false;
                });
            }
            Err(e) => self.state.send_modify(|state| {
                state.is_loading = false;
                state.error = Some(display_message(&e));
            }),
        }
    }

    async fn add_to_cart(&self, product: Product) {
        match self.cart.add(&product).await {
            Ok(_) => {
                let _ = self.effects.send(CatalogEffect::ShowMessage(format!(
                    "{} added to cart",
                    product.name
                )));
            }
            Err(e) => {
                let _ = self
                    .effects
                    .send(CatalogEffect::ShowError(display_message(&e)));
            }
        }
    }

    // A single snapshot read decides the direction of the toggle; observing
    // the live favorite stream here would re-run the toggle on every
    // subsequent emission.
    async fn toggle_favorite(&self, product: Product) {
        let result = match self.favorites.is_favorite(&product.id).await {
            Ok(true) => self.favorites.remove(&product.id).await.map(|()| false),
            Ok(false) => self.favorites.add(&product).await.map(|_| true),
            Err(e) => Err(e),
        };

        match result {
            Ok(is_favorite) => self.state.send_modify(|state| {
                state.favorite_states.insert(product.id.clone(), is_favorite);
            }),
            Err(e) => self.state.send_modify(|state| {
                state.error = Some(display_message(&e));
            }),
        }
    }

    fn spawn_favorites_observer(&self) {
        let state = Arc::clone(&self.state);
        let favorites = self.favorites.clone();

        tokio::spawn(async move {
            let mut changes = favorites.subscribe();
            loop {
                match favorites.all().await {
                    Ok(marks) => {
                        let flags: HashMap<ProductId, bool> = marks
                            .into_iter()
                            .map(|mark| (mark.product_id, true))
                            .collect();
                        state.send_modify(|state| state.favorite_states = flags);
                    }
                    Err(e) => warn!(error = %e, "failed to load favorite states"),
                }

                if changes.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}
