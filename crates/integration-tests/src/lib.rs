//! Shared helpers for GoMarket cart integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use gomarket_cart::{DurableStore, MemoryStore, StorageError};
use gomarket_core::{Price, Product, ProductId};

/// Build a product descriptor with deterministic display attributes.
#[must_use]
pub fn product(id: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.gomarket.test/{id}.png"),
        price: Price::from_cents(1099),
    }
}

/// A durable store whose first `failures` writes are rejected.
///
/// Used to exercise the write-retry path and the "in-memory state stays
/// authoritative" contract.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failures: AtomicU32,
}

impl FlakyStore {
    /// Create a store that rejects the next `failures` writes.
    #[must_use]
    pub fn failing_next(failures: u32) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl DurableStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let remaining = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if remaining {
            return Err(StorageError::Backend("injected write failure".to_owned()));
        }

        self.inner.set(key, value).await
    }
}
