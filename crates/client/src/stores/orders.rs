//! Order history screen store.
//!
//! Reactive over the orders table; placing an order from the cart screen
//! shows up here without an explicit refresh.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use bazaar_core::OrderId;

use crate::db::OrderRepository;
use crate::error::display_message;
use crate::models::Order;

/// Order history screen state.
#[derive(Debug, Clone)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for OrdersState {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            // Loading until the observer's first query lands.
            is_loading: true,
            error: None,
        }
    }
}

/// Order history screen events.
#[derive(Debug, Clone)]
pub enum OrdersEvent {
    /// Re-query outside the change stream, e.g. pull-to-refresh.
    Refresh,
    ViewOrder(OrderId),
    DeleteOrder(OrderId),
}

/// One-shot order history effects.
#[derive(Debug, Clone)]
pub enum OrdersEffect {
    NavigateToOrder(Box<Order>),
    OrderDeleted(OrderId),
    ShowError(String),
}

/// Store for the order history screen.
pub struct OrdersStore {
    state: Arc<watch::Sender<OrdersState>>,
    effects: mpsc::UnboundedSender<OrdersEffect>,
    orders: OrderRepository,
}

impl OrdersStore {
    /// Create the store and its effect stream, and start the orders observer.
    #[must_use]
    pub fn new(orders: OrderRepository) -> (Self, mpsc::UnboundedReceiver<OrdersEffect>) {
        let (state, _) = watch::channel(OrdersState::default());
        let state = Arc::new(state);
        let (effects, effects_rx) = mpsc::unbounded_channel();

        let store = Self {
            state,
            effects,
            orders,
        };
        store.spawn_orders_observer();

        (store, effects_rx)
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OrdersState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> OrdersState {
        self.state.borrow().clone()
    }

    /// Apply one event.
    pub async fn handle(&self, event: OrdersEvent) {
        match event {
            OrdersEvent::Refresh => self.refresh().await,
            OrdersEvent::ViewOrder(id) => match self.orders.get(&id).await {
                Ok(Some(order)) => {
                    let _ = self
                        .effects
                        .send(OrdersEffect::NavigateToOrder(Box::new(order)));
                }
                Ok(None) => {
                    let _ = self
                        .effects
                        .send(OrdersEffect::ShowError(format!("Order {id} not found")));
                }
                Err(e) => {
                    let _ = self
                        .effects
                        .send(OrdersEffect::ShowError(display_message(&e)));
                }
            },
            OrdersEvent::DeleteOrder(id) => match self.orders.delete(&id).await {
                Ok(()) => {
                    let _ = self.effects.send(OrdersEffect::OrderDeleted(id));
                }
                Err(e) => {
                    let _ = self
                        .effects
                        .send(OrdersEffect::ShowError(display_message(&e)));
                }
            },
        }
    }

    async fn refresh(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.orders.all().await {
            Ok(orders) => self.state.send_modify(|state| {
                state.orders = orders;
                state.is_loading = false;
            }),
            Err(e) => self.state.send_modify(|state| {
                state.is_loading = false;
                state.error = Some(display_message(&e));
            }),
        }
    }

    fn spawn_orders_observer(&self) {
        let state = Arc::clone(&self.state);
        let orders = self.orders.clone();

        tokio::spawn(async move {
            let mut changes = orders.subscribe();
            loop {
                match orders.all().await {
                    Ok(list) => state.send_modify(|state| {
                        state.orders = list;
                        state.is_loading = false;
                        state.error = None;
                    }),
                    Err(e) => {
                        warn!(error = %e, "failed to load orders");
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
