//! Weak consumption handle over an active cart store.

use std::sync::Weak;

use gomarket_core::{Product, ProductId};

use crate::error::ContextUnavailable;
use crate::snapshot::CartSnapshot;
use crate::store::CartStore;

/// A narrow handle exposing the cart operations to presentation components.
///
/// Holds the store weakly: an accessor never keeps a cart alive, and every
/// operation fails with [`ContextUnavailable`] once the owning
/// [`CartStore`] has been dropped. Whether that absence is fatal is the
/// caller's decision.
#[derive(Clone)]
pub struct CartAccessor {
    store: Weak<CartStore>,
}

impl CartAccessor {
    pub(crate) fn new(store: Weak<CartStore>) -> Self {
        Self { store }
    }

    /// The current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ContextUnavailable`] if the store is no longer alive.
    pub fn products(&self) -> Result<CartSnapshot, ContextUnavailable> {
        Ok(self.store()?.products())
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ContextUnavailable`] if the store is no longer alive.
    pub fn add_to_cart(&self, product: Product) -> Result<(), ContextUnavailable> {
        self.store()?.add_to_cart(product);
        Ok(())
    }

    /// Increase the quantity of the line item matching `id` by one.
    ///
    /// # Errors
    ///
    /// Returns [`ContextUnavailable`] if the store is no longer alive.
    pub fn increment(&self, id: &ProductId) -> Result<(), ContextUnavailable> {
        self.store()?.increment(id);
        Ok(())
    }

    /// Decrease the quantity of the line item matching `id` by one.
    ///
    /// # Errors
    ///
    /// Returns [`ContextUnavailable`] if the store is no longer alive.
    pub fn decrement(&self, id: &ProductId) -> Result<(), ContextUnavailable> {
        self.store()?.decrement(id);
        Ok(())
    }

    fn store(&self) -> Result<std::sync::Arc<CartStore>, ContextUnavailable> {
        self.store.upgrade().ok_or(ContextUnavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use gomarket_core::Price;

    use crate::storage::MemoryStore;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            image_url: format!("https://cdn.gomarket.test/{id}.png"),
            price: Price::from_major(10),
        }
    }

    #[tokio::test]
    async fn test_accessor_forwards_to_live_store() {
        let store = CartStore::load(Arc::new(MemoryStore::new())).await;
        let cart = store.accessor();

        cart.add_to_cart(product("p1")).unwrap();
        cart.increment(&ProductId::new("p1")).unwrap();

        let snapshot = cart.products().unwrap();
        assert_eq!(snapshot.get(&ProductId::new("p1")).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_accessor_fails_after_store_is_dropped() {
        let store = CartStore::load(Arc::new(MemoryStore::new())).await;
        let cart = store.accessor();
        drop(store);

        assert_eq!(cart.products(), Err(ContextUnavailable));
        assert_eq!(cart.add_to_cart(product("p1")), Err(ContextUnavailable));
        assert_eq!(
            cart.increment(&ProductId::new("p1")),
            Err(ContextUnavailable)
        );
        assert_eq!(
            cart.decrement(&ProductId::new("p1")),
            Err(ContextUnavailable)
        );
    }

    #[tokio::test]
    async fn test_accessor_does_not_keep_store_alive() {
        let store = CartStore::load(Arc::new(MemoryStore::new())).await;
        let cart = store.accessor();
        let _second = cart.clone();
        drop(store);

        assert_eq!(cart.products(), Err(ContextUnavailable));
    }
}
