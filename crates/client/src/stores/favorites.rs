//! Favorites screen store.
//!
//! Purely reactive over the favorites table, like the cart screen: writes
//! from any screen show up without an explicit refresh.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use bazaar_core::ProductId;

use crate::db::FavoriteRepository;
use crate::error::display_message;
use crate::models::FavoriteMark;

/// Favorites screen state.
#[derive(Debug, Clone)]
pub struct FavoritesState {
    pub favorites: Vec<FavoriteMark>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            // Loading until the observer's first query lands.
            is_loading: true,
            error: None,
        }
    }
}

/// Favorites screen events.
#[derive(Debug, Clone)]
pub enum FavoritesEvent {
    Remove(ProductId),
    ClearError,
}

/// One-shot favorites effects.
#[derive(Debug, Clone)]
pub enum FavoritesEffect {
    Removed(ProductId),
}

/// Store for the favorites screen.
pub struct FavoritesStore {
    state: Arc<watch::Sender<FavoritesState>>,
    effects: mpsc::UnboundedSender<FavoritesEffect>,
    favorites: FavoriteRepository,
}

impl FavoritesStore {
    /// Create the store and its effect stream, and start the favorites
    /// observer.
    #[must_use]
    pub fn new(
        favorites: FavoriteRepository,
    ) -> (Self, mpsc::UnboundedReceiver<FavoritesEffect>) {
        let (state, _) = watch::channel(FavoritesState::default());
        let state = Arc::new(state);
        let (effects, effects_rx) = mpsc::unbounded_channel();

        let store = Self {
            state,
            effects,
            favorites,
        };
        store.spawn_favorites_observer();

        (store, effects_rx)
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FavoritesState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> FavoritesState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: FavoritesEvent) {
        match event {
            FavoritesEvent::Remove(product_id) => match self.favorites.remove(&product_id).await {
                Ok(()) => {
                    let _ = self.effects.send(FavoritesEffect::Removed(product_id));
                }
                Err(e) => self.state.send_modify(|state| {
                    state.error = Some(display_message(&e));
                }),
            },
            FavoritesEvent::ClearError => {
                self.state.send_modify(|state| state.error = None);
            }
        }
    }

    fn spawn_favorites_observer(&self) {
        let state = Arc::clone(&self.state);
        let favorites = self.favorites.clone();

        tokio::spawn(async move {
            let mut changes = favorites.subscribe();
            loop {
                match favorites.all().await {
                    Ok(marks) => state.send_modify(|state| {
                        state.favorites = marks;
                        state.is_loading = false;
                        state.error = None;
                    }),
                    Err(e) => {
                        warn!(error = %e, "failed to load favorites");
                        state.send_modify(|state| {
                            state.is_loading = false;
                            state.error = Some(display_message(&e));
                        });
                    }
                }

                if changes.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::Product;
    use bazaar_core::Price;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: String::new(),
            price: Price::new("10"),
            description: String::new(),
            model: String::new(),
            brand: String::new(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_observer_reflects_external_writes() {
        let db = Database::in_memory().await.unwrap();
        let (store, _effects) = FavoritesStore::new(db.favorites());

        db.favorites().add(&product("1")).await.unwrap();

        let mut rx = store.subscribe();
        let state = rx
            .wait_for(|state| state.favorites.len() == 1)
            .await
            .unwrap()
            .clone();
        assert_eq!(state.favorites[0].product_id.as_str(), "1");
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_remove_emits_effect_and_empties_list() {
        let db = Database::in_memory().await.unwrap();
        let p = product("1");
        db.favorites().add(&p).await.unwrap();
        let (store, mut effects) = FavoritesStore::new(db.favorites());

        store.handle(FavoritesEvent::Remove(p.id.clone())).await;

        assert!(matches!(
            effects.recv().await,
            Some(FavoritesEffect::Removed(id)) if id == p.id
        ));
        let mut rx = store.subscribe();
        rx.wait_for(|state| state.favorites.is_empty())
            .await
            .unwrap();
    }
}
