//! Order book and simulator error types

use crate::types::OrderId;
use thiserror::Error;

/// Errors surfaced by the book, the matching engine and the simulator
/// driver. Every fallible public operation returns `Result<T, OrderBookError>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBookError {
    /// Non-positive quantity at submission.
    #[error("invalid quantity: must be positive")]
    InvalidQuantity,

    /// Non-positive price on a LIMIT order, or a price below the configured
    /// minimum tick.
    #[error("invalid price: must be positive and at or above the minimum tick")]
    InvalidPrice,

    /// `order_id` already known — pending, resting, or previously accepted.
    #[error("duplicate order id: {0}")]
    DuplicateOrderId(OrderId),

    /// `cancel_order` for an id that is neither pending nor resting.
    #[error("unknown order id: {0}")]
    UnknownOrder(OrderId),

    /// Negative `delta` passed to `advance_time`.
    #[error("invalid time delta: must be non-negative")]
    InvalidTimeDelta,
}
