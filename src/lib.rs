//! # Deterministic Limit Order Book Matching Engine
//!
//! A discrete-event limit-order-book matching engine built for agent-based
//! market simulators. It maintains a two-sided book of resting limit
//! orders, matches incoming limit and market orders against it under strict
//! price–time priority, and exposes deterministic snapshots of book state
//! together with chronological logs of every order event and trade
//! execution.
//!
//! ## Key Features
//!
//! - **Strict price–time priority**: better price always wins; at equal
//!   price, the order with the smaller [`types::Sequence`] — the earlier
//!   acceptance — is matched first.
//! - **Exact-arithmetic prices**: [`types::Price`] is an integer tick count,
//!   never a float, so level lookup and mid-price computation are exact.
//! - **Deterministic replay**: the [`Simulator`] drains orders submitted
//!   within a tick using a seeded `ChaCha8Rng`, never a thread-local or
//!   re-seeded generator — identical `(start_time, seed)` and identical
//!   externally submitted orders always produce byte-identical logs.
//! - **Append-only logs**: every order lifecycle transition and every trade
//!   is recorded in order, with strictly increasing ids and non-decreasing
//!   timestamps, and never mutated once written.
//!
//! ## Non-goals
//!
//! No stop, iceberg, IOC, FOK or post-only order types; a single
//! instrument; no fee model; no margin, position or P&L tracking; no
//! network or persistence layer; no self-trade prevention — agents may
//! enforce their own.
//!
//! ## Status
//!
//! This crate is the matching core only. Agent strategies, randomness
//! policies for agents, the host driver that configures and runs a
//! simulation, and persistence of logs are external collaborators, out of
//! scope here.

pub mod orderbook;
pub mod pending;
pub mod prelude;
pub mod simulator;
pub mod types;

pub use orderbook::{
    ConsumeOutcome, EventKind, Level1Data, Level2Data, OrderBookError, OrderEvent, OrderEventLog,
    PriceLevel, RestingOrder, Snapshot, TradeLog, TradeRecord,
};
pub use pending::{PendingLimitOrder, PendingMarketOrder, PendingOrder, PendingQueue};
pub use simulator::{Simulator, UNBOUNDED_DEPTH};
pub use types::{OrderId, OrderType, Price, Quantity, Sequence, Side, Timestamp, TraderId};
