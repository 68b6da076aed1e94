//! Newtype ID for type-safe product references.
//!
//! Product IDs come from the catalog as opaque strings. Wrapping them in a
//! newtype prevents accidentally mixing them up with other string-typed
//! fields such as titles or image URLs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stable, unique product identifier.
///
/// This is the mapping key for cart merge operations: at most one line item
/// per `ProductId` exists in a cart at any time.
///
/// ## Examples
///
/// ```
/// use gomarket_core::ProductId;
///
/// let id = ProductId::new("prod-42");
/// assert_eq!(id.as_str(), "prod-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
