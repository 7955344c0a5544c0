//! Cart screen store.
//!
//! The cart screen is purely reactive: the observer re-queries lines, count,
//! and total on every cart table change, so writes from any screen show up
//! here without an explicit refresh.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use bazaar_core::{OrderNumber, ProductId};

use crate::db::CartRepository;
use crate::error::display_message;
use crate::models::CartLine;

/// Cart screen state.
#[derive(Debug, Clone)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub item_count: i64,
    pub total_amount: f64,
    pub is_loading: bool,
    pub error: Option<String>,
    pub order_placed: bool,
    pub order_number: Option<OrderNumber>,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            total_amount: 0.0,
            // Loading until the observer's first query lands.
            is_loading: true,
            error: None,
            order_placed: false,
            order_number: None,
        }
    }
}

/// Cart screen events.
#[derive(Debug, Clone)]
pub enum CartEvent {
    UpdateQuantity {
        product_id: ProductId,
        quantity: i64,
    },
    Remove(ProductId),
    Clear,
    PlaceOrder,
    /// Acknowledge the order confirmation so re-observing the state does not
    /// replay it.
    ResetOrderPlaced,
}

/// One-shot cart effects.
#[derive(Debug, Clone)]
pub enum CartEffect {
    OrderPlaced(OrderNumber),
    ShowError(String),
}

/// Store for the cart screen.
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
    effects: mpsc::UnboundedSender<CartEffect>,
    cart: CartRepository,
}

impl CartStore {
    /// Create the store and its effect stream, and start the cart observer.
    #[must_use]
    pub fn new(cart: CartRepository) -> (Self, mpsc::UnboundedReceiver<CartEffect>) {
        let (state, _) = watch::channel(CartState::default());
        let state = Arc::new(state);
        let (effects, effects_rx) = mpsc::unbounded_channel();

        let store = Self {
            state,
            effects,
            cart,
        };
        store.spawn_cart_observer();

        (store, effects_rx)
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: CartEvent) {
        match event {
            CartEvent::UpdateQuantity {
                product_id,
                quantity,
            } => {
                self.report(self.cart.update_quantity(&product_id, quantity).await)
                    .await;
            }
            CartEvent::Remove(product_id) => {
                self.report(self.cart.remove(&product_id).await).await;
            }
            CartEvent::Clear => {
                self.report(self.cart.clear().await).await;
            }
            CartEvent::PlaceOrder => self.place_order().await,
            CartEvent::ResetOrderPlaced => self.state.send_modify(|state| {
                state.order_placed = false;
                state.order_number = None;
            }),
        }
    }

    async fn report(&self, result: Result<(), crate::db::RepositoryError>) {
        if let Err(e) = result {
            self.state.send_modify(|state| {
                state.error = Some(display_message(&e));
            });
        }
    }

    async fn place_order(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.cart.place_order().await {
            Ok(order_number) => {
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.order_placed = true;
                    state.order_number = Some(order_number.clone());
                });
                let _ = self.effects.send(CartEffect::OrderPlaced(order_number));
            }
            Err(e) => {
                let message = display_message(&e);
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = Some(message.clone());
                });
                let _ = self.effects.send(CartEffect::ShowError(message));
            }
        }
    }

    fn spawn_cart_observer(&self) {
        let state = Arc::clone(&self.state);
        let cart = self.cart.clone();

        tokio::spawn(async move {
            let mut changes = cart.subscribe();
            loop {
                let loaded = async {
                    let lines = cart.all().await?;
                    let count = cart.count().await?;
                    let total = cart.total_amount().await?;
                    Ok::<_, crate::db::RepositoryError>((lines, count, total))
                }
                .await;

                match loaded {
                    Ok((lines, count, total)) => state.send_modify(|state| {
                        state.lines = lines;
                        state.item_count = count;
                        state.total_amount = total;
                        state.is_loading = false;
                        state.error = None;
                    }),
                    Err(e) => {
                        warn!(error = %e, "failed to load cart");
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
