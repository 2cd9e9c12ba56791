/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Order lifecycle events and the append-only logs that record them.

use crate::types::{OrderId, OrderType, Price, Quantity, Side, TraderId, Timestamp};
use serde::Serialize;
use serde_json::{Value, json};

/// The lifecycle state an [`OrderEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// Passed validation at the matching engine's entry point.
    Accepted,
    /// Failed validation; never reaches the book.
    Rejected,
    /// Matched against part, but not all, of its quantity.
    PartiallyFilled,
    /// Fully matched.
    Filled,
    /// Removed from the book (or the pending queue) before being fully
    /// matched.
    Cancelled,
    /// A limit order's residual was placed on the book.
    Rested,
}

impl EventKind {
    fn as_str(self) -> &'static str {
        match self {
            EventKind::Accepted => "ACCEPTED",
            EventKind::Rejected => "REJECTED",
            EventKind::PartiallyFilled => "PARTIALLY_FILLED",
            EventKind::Filled => "FILLED",
            EventKind::Cancelled => "CANCELLED",
            EventKind::Rested => "RESTED",
        }
    }
}

/// A single transition in an order's lifecycle. Every submission, match,
/// rest and cancellation appends one of these.
#[derive(Debug, Clone, Serialize)]
pub struct OrderEvent {
    /// Monotonically increasing identifier for this event.
    pub event_id: u64,
    /// Simulated time at which the event was recorded.
    pub timestamp: Timestamp,
    /// The lifecycle transition this event records.
    pub event_kind: EventKind,
    /// The order this event concerns.
    pub order_id: OrderId,
    /// The order's owner, when known.
    pub trader_id: Option<TraderId>,
    /// The order's side, when known.
    pub side: Option<Side>,
    /// LIMIT or MARKET, when known.
    pub order_type: Option<OrderType>,
    /// The order's price, for LIMIT orders.
    pub price: Option<Price>,
    /// The quantity this event concerns — the remaining size at the time of
    /// the event, not the originally submitted size.
    pub quantity: Option<Quantity>,
    /// Free-text detail, used for `REJECTED` events to name which
    /// validation failed.
    pub reason: Option<&'static str>,
}

impl OrderEvent {
    /// A key/value projection with the stable field names spec'd for the
    /// external interface.
    pub fn to_dict(&self) -> Value {
        json!({
            "event_id": self.event_id,
            "timestamp": self.timestamp,
            "event_kind": self.event_kind.as_str(),
            "order_id": self.order_id.0,
            "trader_id": self.trader_id.map(|t| t.0),
            "side": self.side.map(|s| s.to_string()),
            "quantity": self.quantity.map(|q| q.units()),
            "price": self.price.map(|p| p.ticks()),
            "reason": self.reason,
        })
    }
}

/// An append-only, monotonically-id'd sequence of [`OrderEvent`]s. Never
/// mutated, never reordered once appended.
#[derive(Debug, Clone, Default)]
pub struct OrderEventLog {
    events: Vec<OrderEvent>,
}

impl OrderEventLog {
    /// An empty log.
    pub fn new() -> Self {
        OrderEventLog { events: Vec::new() }
    }

    /// Appends an event. Callers are responsible for assigning strictly
    /// increasing `event_id`s and non-decreasing timestamps.
    pub fn push(&mut self, event: OrderEvent) {
        self.events.push(event);
    }

    /// A read-only view over every event recorded so far, in order.
    pub fn as_slice(&self) -> &[OrderEvent] {
        &self.events
    }
}

/// An append-only, monotonically-id'd sequence of [`super::trade::TradeRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    trades: Vec<super::trade::TradeRecord>,
}

impl TradeLog {
    /// An empty log.
    pub fn new() -> Self {
        TradeLog { trades: Vec::new() }
    }

    /// Appends a trade record.
    pub fn push(&mut self, trade: super::trade::TradeRecord) {
        self.trades.push(trade);
    }

    /// A read-only view over every trade recorded so far, in order.
    pub fn as_slice(&self) -> &[super::trade::TradeRecord] {
        &self.trades
    }
}
