//! View-state stores, one per screen.
//!
//! Each store owns a single state value exposed to the UI as a read-only
//! `watch` channel, plus a one-shot effect channel (`mpsc`) for
//! navigation/toast-style signals that must not be replayed when the state
//! is re-observed. Incoming events are closed enums; state updates go
//! through `watch::Sender::send_modify`, an atomic read-modify-write.
//!
//! Every repository or remote error is caught at the store boundary and
//! converted into either a state-level error string or an effect-level
//! error signal; nothing propagates to the UI as a panic or raw error.
//!
//! Stores spawn observer tasks that follow the repositories' table change
//! streams and re-query on every change. The tasks end when the store (and
//! with it the state channel) is dropped.

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod orders;
pub mod product_detail;

pub use cart::{CartEffect, CartEvent, CartState, CartStore};
pub use catalog::{CatalogEffect, CatalogEvent, CatalogState, CatalogStore};
pub use favorites::{FavoritesEffect, FavoritesEvent, FavoritesState, FavoritesStore};
pub use filter::{FilterEffect, FilterEvent, FilterState, FilterStore};
pub use orders::{OrdersEffect, OrdersEvent, OrdersState, OrdersStore};
pub use product_detail::{
    ProductDetailEffect, ProductDetailEvent, ProductDetailState, ProductDetailStore,
};
