//! The resting-order book and its matching/queueing subsystem: price
//! levels, the two-sided book, the matching engine, trades, events and
//! snapshot projections.

pub mod book;
pub mod error;
pub mod event;
pub mod matching;
pub mod price_level;
pub mod snapshot;
pub mod trade;

pub use book::{ConsumeOutcome, OrderBook};
pub use error::OrderBookError;
pub use event::{EventKind, OrderEvent, OrderEventLog, TradeLog};
pub use matching::{EngineState, MatchOutcome, process_order};
pub use price_level::{PriceLevel, RestingOrder};
pub use snapshot::{Level1Data, Level2Data, Snapshot};
pub use trade::TradeRecord;
