/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Trade records produced by the matching engine.

use crate::types::{OrderId, Price, Quantity, Side, TraderId, Timestamp};
use serde::Serialize;
use serde_json::{Value, json};

/// A single execution between a taker and a maker. Trade price is always the
/// maker's resting price, never the taker's price; trade quantity is always
/// the fill size, not either party's remaining quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRecord {
    /// Monotonically increasing identifier for this trade.
    pub trade_id: u64,
    /// Simulated time at which the trade executed.
    pub timestamp: Timestamp,
    /// The maker's resting price.
    pub price: Price,
    /// The size of this fill.
    pub quantity: Quantity,
    /// The incoming order that consumed liquidity.
    pub taker_order_id: OrderId,
    /// The resting order that supplied liquidity.
    pub maker_order_id: OrderId,
    /// Owner of the taker order.
    pub taker_trader_id: TraderId,
    /// Owner of the maker order.
    pub maker_trader_id: TraderId,
    /// The side of the incoming (taker) order.
    pub taker_side: Side,
}

impl TradeRecord {
    /// A key/value projection with the stable field names spec'd for the
    /// external interface.
    pub fn to_dict(&self) -> Value {
        json!({
            "trade_id": self.trade_id,
            "timestamp": self.timestamp,
            "price": self.price.ticks(),
            "quantity": self.quantity.units(),
            "taker_order_id": self.taker_order_id.0,
            "maker_order_id": self.maker_order_id.0,
            "taker_trader_id": self.taker_trader_id.0,
            "maker_trader_id": self.maker_trader_id.0,
            "taker_side": self.taker_side.to_string(),
        })
    }
}
