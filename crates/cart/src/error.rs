//! Error types for the cart consumption boundary.

use thiserror::Error;

/// The consumption API was used outside an active store's lifetime.
///
/// This is a programming-contract violation: the consumer must keep the
/// [`CartStore`](crate::CartStore) alive for as long as it holds accessors.
/// It is not a recoverable runtime condition, so callers typically propagate
/// it rather than handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart accessed outside an active CartStore lifetime")]
pub struct ContextUnavailable;
