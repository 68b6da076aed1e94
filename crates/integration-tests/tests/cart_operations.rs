//! End-to-end cart operations through the accessor, including the persisted
//! encoding shape and convergence under rapid mutation.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use gomarket_cart::{
    CART_STORAGE_KEY, CartSnapshot, CartStore, ContextUnavailable, DurableStore, MemoryStore,
};
use gomarket_core::ProductId;
use gomarket_integration_tests::product;

#[tokio::test]
async fn accessor_roundtrip() {
    let store = CartStore::load(Arc::new(MemoryStore::new())).await;
    let cart = store.accessor();

    cart.add_to_cart(product("p1")).unwrap();
    cart.add_to_cart(product("p2")).unwrap();
    cart.add_to_cart(product("p1")).unwrap();
    cart.decrement(&ProductId::new("p2")).unwrap();

    let snapshot = cart.products().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&ProductId::new("p1")).unwrap().quantity, 2);

    drop(store);
    assert_eq!(cart.products(), Err(ContextUnavailable));
}

#[tokio::test]
async fn persisted_encoding_is_a_json_array_of_items() {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::load(Arc::clone(&storage) as Arc<dyn DurableStore>).await;

    store.add_to_cart(product("p1"));
    store.flush().await;

    let raw = storage.get(CART_STORAGE_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    let item = items.first().unwrap();
    assert_eq!(item.get("id").and_then(|v| v.as_str()), Some("p1"));
    assert_eq!(item.get("quantity").unwrap(), 1);
    assert!(item.get("title").is_some());
    assert!(item.get("image_url").is_some());
    assert!(item.get("price").is_some());
}

#[tokio::test]
async fn rapid_mutations_converge_through_accessor() {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::load(Arc::clone(&storage) as Arc<dyn DurableStore>).await;
    let cart = store.accessor();
    let p1 = ProductId::new("p1");

    // Back-to-back calls with no awaits in between: the classic stale-read
    // hazard. Each mutation must still observe the previous one.
    for _ in 0..100 {
        cart.add_to_cart(product("p1")).unwrap();
    }
    for _ in 0..40 {
        cart.decrement(&p1).unwrap();
    }
    store.flush().await;

    let snapshot = store.products();
    assert_eq!(snapshot.get(&p1).unwrap().quantity, 60);

    let raw = storage.get(CART_STORAGE_KEY).await.unwrap().unwrap();
    let persisted: CartSnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, snapshot);
}

#[tokio::test]
async fn fresh_store_starts_from_persisted_state_of_previous_one() {
    let storage = Arc::new(MemoryStore::new());

    {
        let store = CartStore::load(Arc::clone(&storage) as Arc<dyn DurableStore>).await;
        store.add_to_cart(product("p1"));
        store.flush().await;
    }

    let store = CartStore::load(Arc::clone(&storage) as Arc<dyn DurableStore>).await;
    let snapshot = store.products();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&ProductId::new("p1")).unwrap().quantity, 1);
}
