/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Prelude module that re-exports the commonly used types and traits.
//!
//! This provides a convenient way to import the essential pieces of the
//! crate with a single `use` statement:
//!
//! ```rust
//! use agentbook_sim::prelude::*;
//! ```

// Scalar and identifier types
pub use crate::types::{OrderId, OrderType, Price, Quantity, Sequence, Side, Timestamp, TraderId};

// The simulator driver
pub use crate::simulator::{Simulator, UNBOUNDED_DEPTH};

// Pending-order shapes and the drain queue
pub use crate::pending::{PendingLimitOrder, PendingMarketOrder, PendingOrder, PendingQueue};

// Book, matching and error types
pub use crate::orderbook::{OrderBook, OrderBookError, RestingOrder};

// Event and trade logs
pub use crate::orderbook::{EventKind, OrderEvent, TradeRecord};

// Snapshot projections
pub use crate::orderbook::{Level1Data, Level2Data, Snapshot};
