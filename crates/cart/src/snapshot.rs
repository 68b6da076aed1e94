//! The cart snapshot and its pure mutation algebra.
//!
//! A [`CartSnapshot`] is an ordered sequence of line items; insertion order
//! is the order in which distinct products were first added and stays stable
//! for the lifetime of a store. All mutations are pure: they take the current
//! snapshot by reference and return the next one, which makes the invariants
//! directly testable without any storage in play.
//!
//! Invariants upheld by every mutation:
//! - at most one line item per product ID
//! - every retained line item has `quantity >= 1`

use gomarket_core::{LineItem, Product, ProductId};
use serde::{Deserialize, Serialize};

/// The complete set of cart line items at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    items: Vec<LineItem>,
}

impl CartSnapshot {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line items, in first-added order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Merge-on-add: if the product is already in the cart its quantity goes
    /// up by one, otherwise a new line item with quantity 1 is appended.
    #[must_use]
    pub fn add(&self, product: Product) -> Self {
        if self.get(&product.id).is_some() {
            self.increment(&product.id)
        } else {
            let mut items = self.items.clone();
            items.push(LineItem::first(product));
            Self { items }
        }
    }

    /// Increase the quantity of the line item matching `id` by one.
    ///
    /// An `id` not present in the cart is a no-op, not an error.
    #[must_use]
    pub fn increment(&self, id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == *id {
                    LineItem {
                        quantity: item.quantity + 1,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Self { items }
    }

    /// Decrease the quantity of the line item matching `id` by one, removing
    /// it entirely when the quantity reaches zero.
    ///
    /// Items not matching `id` are never removed regardless of their own
    /// quantity. An absent `id` is a no-op.
    #[must_use]
    pub fn decrement(&self, id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .cloned()
            .filter_map(|mut item| {
                if item.id == *id {
                    item.quantity = item.quantity.saturating_sub(1);
                    (item.quantity > 0).then_some(item)
                } else {
                    Some(item)
                }
            })
            .collect();

        Self { items }
    }
}

impl From<Vec<LineItem>> for CartSnapshot {
    fn from(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
