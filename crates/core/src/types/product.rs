//! Product descriptor and cart line item types.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as advertised by the catalog.
///
/// Carries no quantity - adding a `Product` to the cart implies "one unit".
/// All fields besides [`ProductId`] are opaque display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL of the product image.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

/// One product's presence in the cart: a descriptor plus a unit count.
///
/// A retained line item always has `quantity >= 1`; a line item whose
/// quantity would reach zero is removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL of the product image.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Count of units in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// The first unit of a product entering the cart.
    #[must_use]
    pub fn first(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}
