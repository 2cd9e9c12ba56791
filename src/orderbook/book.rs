/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Two ordered maps (bid side, ask side) from price to level queue, with
//! best-quote access and an order-id index.

use super::error::OrderBookError;
use super::price_level::{Handle, PriceLevel, RestingOrder};
use crate::types::{OrderId, Price, Quantity, Sequence, Side, TraderId};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// The result of consuming liquidity from the front of the best level on one
/// side of the book.
#[derive(Debug, Clone)]
pub struct ConsumeOutcome {
    /// The maker order that supplied the liquidity.
    pub maker_order_id: OrderId,
    /// The maker's owner.
    pub maker_trader_id: TraderId,
    /// The price the fill executed at — always the maker's resting price.
    pub price: Price,
    /// The size of this fill.
    pub filled_qty: Quantity,
    /// Whether the maker order was fully consumed (and so removed from the
    /// book) by this fill.
    pub maker_fully_filled: bool,
    /// The maker's remaining quantity after this fill — zero when
    /// `maker_fully_filled` is true.
    pub maker_remaining_after: Quantity,
    /// Whether consuming this fill emptied the level, removing it from the
    /// side book.
    pub level_exhausted: bool,
}

/// The order book: bid and ask sides, each an ordered map from price to
/// [`PriceLevel`], plus an index from `order_id` to its resting location.
///
/// The index stores a [`Handle`] alongside the side and price, so cancelling
/// an order costs one hash lookup plus one `O(log levels)` descent to the
/// price level plus one `O(1)` unlink within it — never a scan of the
/// level's resting orders.
#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: BTreeMap<Price, PriceLevel>,
    asks: BTreeMap<Price, PriceLevel>,
    order_index: HashMap<OrderId, (Side, Price, Handle)>,
    min_price: Price,
}

impl OrderBook {
    /// An empty book. `min_price` is the smallest price accepted for a
    /// resting limit order; prices below it are rejected by the matching
    /// engine before they ever reach `insert_resting`.
    pub fn new(min_price: Price) -> Self {
        OrderBook {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::new(),
            min_price,
        }
    }

    /// The configured minimum tick.
    pub fn min_price(&self) -> Price {
        self.min_price
    }

    fn side_map(&self, side: Side) -> &BTreeMap<Price, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_map_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// The best (price, level) pair on `side`: highest price for BUY, lowest
    /// for SELL.
    pub fn best(&self, side: Side) -> Option<(Price, &PriceLevel)> {
        match side {
            Side::Buy => self.bids.iter().next_back().map(|(p, l)| (*p, l)),
            Side::Sell => self.asks.iter().next().map(|(p, l)| (*p, l)),
        }
    }

    /// The highest resting buy price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// The lowest resting sell price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Exact-arithmetic midpoint of the best bid and ask. `Price::ZERO` when
    /// either side is empty — callers must treat zero as "undefined".
    pub fn mid_price(&self) -> Price {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Price::midpoint(bid, ask),
            _ => Price::ZERO,
        }
    }

    /// Aggregate resting quantity across every level on `side`.
    pub fn total_depth(&self, side: Side) -> Quantity {
        self.side_map(side)
            .values()
            .fold(Quantity::ZERO, |acc, level| acc.saturating_add(level.aggregate()))
    }

    /// Whether `order_id` currently resides in the order index (i.e. is
    /// resting on the book).
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Inserts a limit order at its price level, creating the level if
    /// absent. `sequence` is assigned by the caller (the simulator owns the
    /// monotonic counter) so the book stays free of global mutable state.
    pub fn insert_resting(
        &mut self,
        order_id: OrderId,
        trader_id: TraderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        sequence: Sequence,
    ) {
        let resting = RestingOrder {
            order_id,
            trader_id,
            side,
            price,
            remaining_quantity: quantity,
            sequence,
        };
        trace!(%order_id, %side, %price, %quantity, %sequence, "resting order inserted");
        let handle = self.side_map_mut(side).entry(price).or_default().append(resting);
        self.order_index.insert(order_id, (side, price, handle));
    }

    /// Locates `order_id` via the order index, unlinks it from its level by
    /// handle in O(1), deletes the level if now empty, and drops the index
    /// entry. Fails with [`OrderBookError::UnknownOrder`] if the id is not
    /// currently resting.
    pub fn cancel(&mut self, order_id: OrderId) -> Result<RestingOrder, OrderBookError> {
        let (side, price, handle) = self
            .order_index
            .remove(&order_id)
            .ok_or(OrderBookError::UnknownOrder(order_id))?;

        let side_map = self.side_map_mut(side);
        let level = side_map.get_mut(&price).expect("order index out of sync with side book");
        let order = level
            .remove(handle)
            .expect("order index pointed at a level that no longer holds this order");
        if level.is_empty() {
            side_map.remove(&price);
        }
        trace!(%order_id, %side, %price, "resting order cancelled");
        Ok(order)
    }

    /// Decrements the front order of the best level on `side` by up to
    /// `max_qty`. Pops the order if it reaches zero; removes the level from
    /// the side book if it empties. Returns `None` if `side` has no resting
    /// liquidity.
    pub fn consume_front(&mut self, side: Side, max_qty: Quantity) -> Option<ConsumeOutcome> {
        let side_map = self.side_map_mut(side);
        let (&price, _) = match side {
            Side::Buy => side_map.iter().next_back()?,
            Side::Sell => side_map.iter().next()?,
        };
        let level = side_map.get_mut(&price)?;
        let front_remaining = level.peek_front()?.remaining_quantity;
        let fill = front_remaining.min(max_qty);

        let (consumed, maker_fully_filled) = level.consume_front(fill)?;
        let level_exhausted = level.is_empty();
        if level_exhausted {
            side_map.remove(&price);
        }
        if maker_fully_filled {
            self.order_index.remove(&consumed.order_id);
        }

        trace!(
            order_id = %consumed.order_id,
            %side,
            %price,
            %fill,
            maker_fully_filled,
            level_exhausted,
            "front order consumed"
        );

        Some(ConsumeOutcome {
            maker_order_id: consumed.order_id,
            maker_trader_id: consumed.trader_id,
            price,
            filled_qty: fill,
            maker_fully_filled,
            maker_remaining_after: consumed.remaining_quantity,
            level_exhausted,
        })
    }

    /// Number of orders currently indexed as resting, across both sides.
    /// Equal to the sum of each level's order count whenever the book's
    /// invariants hold.
    pub fn resting_order_count(&self) -> usize {
        self.order_index.len()
    }

    /// Whether every level currently present on either side holds at least
    /// one order. Side maps must never retain an empty level.
    pub fn all_levels_nonempty(&self) -> bool {
        self.bids.values().all(|l| !l.is_empty()) && self.asks.values().all(|l| !l.is_empty())
    }

    /// An outward-from-best ladder of `(price, aggregate_quantity)` for
    /// `side`, up to `depth` levels.
    pub fn ladder(&self, side: Side, depth: usize) -> Vec<(Price, Quantity)> {
        match side {
            Side::Buy => self
                .bids
                .iter()
                .rev()
                .take(depth)
                .map(|(p, l)| (*p, l.aggregate()))
                .collect(),
            Side::Sell => self
                .asks
                .iter()
                .take(depth)
                .map(|(p, l)| (*p, l.aggregate()))
                .collect(),
        }
    }
}
