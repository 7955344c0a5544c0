//! Domain models for the catalog, cart, orders, and favorites.

pub mod cart;
pub mod favorite;
pub mod order;
pub mod product;

pub use cart::CartLine;
pub use favorite::FavoriteMark;
pub use order::Order;
pub use product::Product;
