//! Product detail screen store.
//!
//! Holds a single product; the favorite flag tracks the favorites table via
//! an observer so a toggle from another screen is reflected here.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::db::{CartRepository, FavoriteRepository};
use crate::error::display_message;
use crate::models::Product;

/// Product detail screen state.
#[derive(Debug, Clone)]
pub struct ProductDetailState {
    pub product: Product,
    pub is_favorite: bool,
    pub error: Option<String>,
}

/// Product detail screen events.
#[derive(Debug, Clone)]
pub enum ProductDetailEvent {
    ToggleFavorite,
    AddToCart,
}

/// One-shot product detail effects.
#[derive(Debug, Clone)]
pub enum ProductDetailEffect {
    ShowMessage(String),
    ShowError(String),
}

/// Store for the product detail screen.
pub struct ProductDetailStore {
    state: Arc<watch::Sender<ProductDetailState>>,
    effects: mpsc::UnboundedSender<ProductDetailEffect>,
    favorites: FavoriteRepository,
    cart: CartRepository,
}

impl ProductDetailStore {
    /// Create the store for one product and start the favorite observer.
    #[must_use]
    pub fn new(
        product: Product,
        favorites: FavoriteRepository,
        cart: CartRepository,
    ) -> (Self, mpsc::UnboundedReceiver<ProductDetailEffect>) {
        let (state, _) = watch::channel(ProductDetailState {
            product,
            is_favorite: false,
            error: None,
        });
        let state = Arc::new(state);
        let (effects, effects_rx) = mpsc::unbounded_channel();

        let store = Self {
            state,
            effects,
            favorites,
            cart,
        };
        store.spawn_favorite_observer();

        (store, effects_rx)
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProductDetailState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> ProductDetailState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: ProductDetailEvent) {
        match event {
            ProductDetailEvent::ToggleFavorite => self.toggle_favorite().await,
            ProductDetailEvent::AddToCart => self.add_to_cart().await,
        }
    }

    // Snapshot read, then write; the observer brings the flag up to date.
    async fn toggle_favorite(&self) {
        let product = self.state.borrow().product.clone();

        let result = match self.favorites.is_favorite(&product.id).await {
            Ok(true) => self.favorites.remove(&product.id).await.map(|()| false),
            Ok(false) => self.favorites.add(&product).await.map(|_| true),
            Err(e) => Err(e),
        };

        match result {
            Ok(is_favorite) => {
                self.state
                    .send_modify(|state| state.is_favorite = is_favorite);
            }
            Err(e) => self.state.send_modify(|state| {
                state.error = Some(display_message(&e));
            }),
        }
    }

    async fn add_to_cart(&self) {
        let product = self.state.borrow().product.clone();

        match self.cart.add(&product).await {
            Ok(_) => {
                let _ = self.effects.send(ProductDetailEffect::ShowMessage(format!(
                    "{} added to cart",
                    product.name
                )));
            }
            Err(e) => {
                let _ = self
                    .effects
                    .send(ProductDetailEffect::ShowError(display_message(&e)));
            }
        }
    }

    fn spawn_favorite_observer(&self) {
        let state = Arc::clone(&self.state);
        let favorites = self.favorites.clone();
        let product_id = self.state.borrow().product.id.clone();

        tokio::spawn(async move {
            let mut changes = favorites.subscribe();
            loop {
                match favorites.is_favorite(&product_id).await {
                    Ok(is_favorite) => {
                        state.send_modify(|state| state.is_favorite = is_favorite);
                    }
                    Err(e) => warn!(error = %e, "failed to load favorite flag"),
                }

                if changes.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}
