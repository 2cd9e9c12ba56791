/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Core scalar and identifier types shared across the order book, the
//! matching engine and the simulator driver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// A resting or incoming buy order.
    Buy,
    /// A resting or incoming sell order.
    Sell,
}

impl Side {
    /// The side that an order on `self` would need to cross to trade against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The two order kinds this engine accepts. No stop, iceberg, IOC, FOK or
/// post-only variants are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests on the book at a specified price if not immediately filled.
    Limit,
    /// Matches immediately against the best available liquidity; never rests.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// A fixed-precision monetary value, represented internally as an integer
/// number of ticks so price equality and ordering are exact — no floating
/// point comparisons anywhere on the matching path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// The smallest positive price the book will accept by default.
    pub const MIN: Price = Price(1);

    /// Zero is used as the sentinel "undefined" price (e.g. a one-sided
    /// `mid_price`). It is never a valid order price.
    pub const ZERO: Price = Price(0);

    /// Wraps a raw tick count. Does not validate positivity; submission-time
    /// validation happens in the matching engine so it can emit a `REJECTED`
    /// event rather than panic.
    pub fn new(ticks: i64) -> Self {
        Price(ticks)
    }

    /// The raw integer tick count.
    pub fn ticks(self) -> i64 {
        self.0
    }

    /// Whether this price is strictly positive.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Exact-arithmetic midpoint of two prices, truncating toward zero when
    /// the sum is odd. Both operands are assumed positive; callers treat a
    /// `Price::ZERO` result from an empty side as "undefined" per spec.
    pub fn midpoint(bid: Price, ask: Price) -> Price {
        Price((bid.0 + ask.0) / 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positive integer count of units. Zero quantity is invalid at
/// submission; residual quantity reaching zero deletes the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u64);

impl Quantity {
    /// The zero quantity, used as a sentinel for "no remaining size".
    pub const ZERO: Quantity = Quantity(0);

    /// Wraps a raw unit count.
    pub fn new(units: u64) -> Self {
        Quantity(units)
    }

    /// The raw unit count.
    pub fn units(self) -> u64 {
        self.0
    }

    /// Whether this quantity is strictly positive.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Saturating subtraction; used when decrementing a resting order by a
    /// fill size that is always bounds-checked to be `<=` the remaining
    /// quantity, so saturation is a defensive floor rather than a real path.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_sub(other.0))
    }

    /// Saturating addition, used to maintain a level's cached aggregate.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(other.0))
    }

    /// The smaller of the two quantities — the size of a single fill.
    pub fn min(self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an order over the lifetime of a simulation. Assigned by the
/// submitter, not by the engine; must be unique across the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for the agent that owns an order. The engine never
/// inspects this value beyond carrying it through to logs and trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TraderId(pub u64);

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing tiebreaker assigned to a resting order at
/// acceptance time. Gives time priority among orders resting at the same
/// price: the order with the smaller `Sequence` is matched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sequence(pub u64);

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated wall-clock time. An opaque monotonic integer; the simulator is
/// the only component permitted to advance it.
pub type Timestamp = i64;
