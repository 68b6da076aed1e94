//! GoMarket Cart - Client-side shopping cart state container.
//!
//! This crate holds the set of products a user has added to their cart,
//! keeps that set consistent across add/increment/decrement operations, and
//! persists it to a durable key-value store so it survives restarts.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the authoritative in-memory [`CartSnapshot`]. It
//!   loads its initial state from the durable store exactly once, applies
//!   every mutation atomically against the latest in-memory snapshot, and
//!   hands the newly computed snapshot to a single-writer persistence queue.
//! - [`CartAccessor`] is a weak consumption handle for presentation
//!   components. Every call fails with [`ContextUnavailable`] once the store
//!   it was created from has been dropped.
//! - [`DurableStore`] is the storage seam: an opaque async get/set-by-key
//!   text store. [`MemoryStore`] backs tests and ephemeral sessions;
//!   [`FileStore`] backs real installs with a JSON file on disk.
//!
//! # Persistence contract
//!
//! Writes are best-effort and eventually consistent: once all in-flight
//! writes settle (see [`CartStore::flush`]), the persisted value equals the
//! serialization of the most recently computed in-memory snapshot. The store
//! never computes totals, validates prices, or enforces inventory limits.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use gomarket_cart::{CartStore, MemoryStore};
//! use gomarket_core::{Price, Product, ProductId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let storage = Arc::new(MemoryStore::new());
//! let store = CartStore::load(storage).await;
//!
//! let cart = store.accessor();
//! cart.add_to_cart(Product {
//!     id: ProductId::new("p1"),
//!     title: "Widget".to_owned(),
//!     image_url: "https://cdn.gomarket.test/p1.png".to_owned(),
//!     price: Price::from_major(10),
//! })
//! .unwrap();
//!
//! assert_eq!(cart.products().unwrap().len(), 1);
//! store.flush().await;
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accessor;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use accessor::CartAccessor;
pub use error::ContextUnavailable;
pub use snapshot::CartSnapshot;
pub use storage::{DurableStore, FileStore, MemoryStore, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
