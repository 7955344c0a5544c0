//! Bazaar client library.
//!
//! The product catalog view-state pipeline: a remote product source, local
//! SQLite persistence for cart/orders/favorites, a pagination adapter over
//! the unpaginated catalog endpoint, a client-side filter/sort engine, and
//! one view-state store per screen.
//!
//! # Architecture
//!
//! ```text
//! UI event -> store -> repository -> SQLite / HTTP
//!                ^                        |
//!                +--- change streams <----+
//! ```
//!
//! Stores own a `watch`-backed state channel (retained, replayable) and an
//! `mpsc`-backed effect channel (one-shot, at-most-once per subscriber).
//! Repository errors never cross a store boundary; they are converted into
//! state-level error strings or effect-level error signals.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod paging;
pub mod remote;
pub mod state;
pub mod stores;
