//! GoMarket Core - Shared domain types.
//!
//! This crate provides the types shared between the cart state container and
//! its consumers:
//! - `cart` - The cart store and its persistence layer
//! - presentation components that render cart contents
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! code. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   product descriptor and cart line item types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
