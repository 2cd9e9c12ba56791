/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Read-only projections of book state: a coarse [`Snapshot`], top-of-book
//! [`Level1Data`], and a depth-limited [`Level2Data`] ladder.

use crate::types::{Price, Quantity, Timestamp};
use serde::Serialize;
use serde_json::{Value, json};

/// A coarse view of book state: best quotes, midpoint, and total depth on
/// each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Simulated time the snapshot was taken at.
    pub timestamp: Timestamp,
    /// Highest resting buy price, or `Price::ZERO` if the bid side is empty.
    pub best_bid: Price,
    /// Lowest resting sell price, or `Price::ZERO` if the ask side is empty.
    pub best_ask: Price,
    /// `(best_bid + best_ask) / 2`, or `Price::ZERO` if either side is empty.
    pub mid_price: Price,
    /// Aggregate resting quantity across every bid level.
    pub bid_depth: Quantity,
    /// Aggregate resting quantity across every ask level.
    pub ask_depth: Quantity,
}

impl Snapshot {
    /// A key/value projection with the stable field names spec'd for the
    /// external interface.
    pub fn to_dict(&self) -> Value {
        json!({
            "timestamp": self.timestamp,
            "best_bid": self.best_bid.ticks(),
            "best_ask": self.best_ask.ticks(),
            "mid_price": self.mid_price.ticks(),
            "bid_depth": self.bid_depth.units(),
            "ask_depth": self.ask_depth.units(),
        })
    }
}

/// Aggregate quantities at the top of book only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level1Data {
    /// Simulated time this view was taken at.
    pub timestamp: Timestamp,
    /// Highest resting buy price, or `Price::ZERO` if the bid side is empty.
    pub best_bid_price: Price,
    /// Aggregate quantity resting at `best_bid_price`.
    pub best_bid_quantity: Quantity,
    /// Lowest resting sell price, or `Price::ZERO` if the ask side is empty.
    pub best_ask_price: Price,
    /// Aggregate quantity resting at `best_ask_price`.
    pub best_ask_quantity: Quantity,
}

impl Level1Data {
    /// A key/value projection with the stable field names spec'd for the
    /// external interface.
    pub fn to_dict(&self) -> Value {
        json!({
            "timestamp": self.timestamp,
            "best_bid_price": self.best_bid_price.ticks(),
            "best_bid_quantity": self.best_bid_quantity.units(),
            "best_ask_price": self.best_ask_price.ticks(),
            "best_ask_quantity": self.best_ask_quantity.units(),
        })
    }
}

/// An ordered ladder of `(price, aggregate_quantity)` from best outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level2Data {
    /// Simulated time this view was taken at.
    pub timestamp: Timestamp,
    /// Bid levels, best (highest price) first.
    pub bid_ladder: Vec<(Price, Quantity)>,
    /// Ask levels, best (lowest price) first.
    pub ask_ladder: Vec<(Price, Quantity)>,
}

impl Level2Data {
    /// A key/value projection with the stable field names spec'd for the
    /// external interface.
    pub fn to_dict(&self) -> Value {
        let ladder = |levels: &[(Price, Quantity)]| -> Value {
            Value::Array(
                levels
                    .iter()
                    .map(|(price, qty)| json!({"price": price.ticks(), "quantity": qty.units()}))
                    .collect(),
            )
        };
        json!({
            "timestamp": self.timestamp,
            "bid_ladder": ladder(&self.bid_ladder),
            "ask_ladder": ladder(&self.ask_ladder),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_to_dict_uses_tick_integers() {
        let snap = Snapshot {
            timestamp: 5,
            best_bid: Price::new(99),
            best_ask: Price::new(101),
            mid_price: Price::new(100),
            bid_depth: Quantity::new(40),
            ask_depth: Quantity::new(60),
        };
        let dict = snap.to_dict();
        assert_eq!(dict["best_bid"], 99);
        assert_eq!(dict["mid_price"], 100);
        assert_eq!(dict["ask_depth"], 60);
    }

    #[test]
    fn level2_ladder_orders_best_outward() {
        let l2 = Level2Data {
            timestamp: 0,
            bid_ladder: vec![(Price::new(101), Quantity::new(5)), (Price::new(100), Quantity::new(10))],
            ask_ladder: vec![(Price::new(102), Quantity::new(5))],
        };
        let dict = l2.to_dict();
        assert_eq!(dict["bid_ladder"][0]["price"], 101);
        assert_eq!(dict["ask_ladder"][0]["price"], 102);
    }
}
