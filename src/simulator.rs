/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! The driver that advances simulated time, drains pending orders in a
//! seeded random permutation each tick, and exposes snapshots and query
//! interfaces over the resulting book and logs.

use crate::orderbook::event::{EventKind, OrderEvent, OrderEventLog, TradeLog};
use crate::orderbook::matching::{self, EngineState};
use crate::orderbook::snapshot::{Level1Data, Level2Data, Snapshot};
use crate::orderbook::trade::TradeRecord;
use crate::orderbook::{OrderBook, OrderBookError};
use crate::pending::{PendingLimitOrder, PendingMarketOrder, PendingOrder, PendingQueue};
use crate::types::{OrderId, OrderType, Price, Quantity, Side, Timestamp, TraderId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Pass to [`Simulator::get_current_level2_data`] to request the entire
/// ladder rather than a bounded number of levels.
pub const UNBOUNDED_DEPTH: usize = usize::MAX;

/// The discrete-event driver: owns the book, the pending queue, both logs,
/// the seeded PRNG and the id counters. All operations run on a single
/// logical thread of control; there is no internal locking.
pub struct Simulator {
    current_time: Timestamp,
    seed: u64,
    rng: ChaCha8Rng,
    book: OrderBook,
    pending: PendingQueue,
    order_log: OrderEventLog,
    trade_log: TradeLog,
    next_sequence: u64,
    next_trade_id: u64,
    next_event_id: u64,
    known_order_ids: HashSet<OrderId>,
}

impl Simulator {
    /// A fresh simulator at `start_time`, seeded with `seed`. The PRNG is
    /// seeded exactly once, here, and never reseeded — determinism depends
    /// on this.
    pub fn new(start_time: Timestamp, seed: u64) -> Self {
        debug!(start_time, seed, "simulator created");
        Simulator {
            current_time: start_time,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            book: OrderBook::new(Price::MIN),
            pending: PendingQueue::new(),
            order_log: OrderEventLog::new(),
            trade_log: TradeLog::new(),
            next_sequence: 0,
            next_trade_id: 0,
            next_event_id: 0,
            known_order_ids: HashSet::new(),
        }
    }

    /// A fresh simulator at `start_time` using `min_price` as the
    /// minimum accepted tick instead of [`Price::MIN`].
    pub fn with_min_price(start_time: Timestamp, seed: u64, min_price: Price) -> Self {
        let mut sim = Simulator::new(start_time, seed);
        sim.book = OrderBook::new(min_price);
        sim
    }

    /// The seed this simulator was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Queues a limit order. Validation and disposition happen when the
    /// queue is next drained by [`Self::submit_pending_orders`] — placing
    /// an order has no side effects on the book.
    pub fn place_limit_order(
        &mut self,
        order_id: OrderId,
        trader_id: TraderId,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) {
        trace!(%order_id, %trader_id, %side, %quantity, %price, "limit order queued");
        self.pending.push(PendingOrder::Limit(PendingLimitOrder {
            order_id,
            trader_id,
            side,
            price,
            quantity,
        }));
    }

    /// Queues a market order. Validation and disposition happen at the next
    /// drain.
    pub fn place_market_order(&mut self, order_id: OrderId, trader_id: TraderId, side: Side, quantity: Quantity) {
        trace!(%order_id, %trader_id, %side, %quantity, "market order queued");
        self.pending.push(PendingOrder::Market(PendingMarketOrder {
            order_id,
            trader_id,
            side,
            quantity,
        }));
    }

    /// Cancels `order_id` immediately — synchronously, not via the pending
    /// queue's drain. Removes a resting order from the book, or a still-
    /// pending order from the queue. Fails with
    /// [`OrderBookError::UnknownOrder`] if neither holds the id.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<(), OrderBookError> {
        if self.book.contains(order_id) {
            let cancelled = self.book.cancel(order_id)?;
            self.push_event(
                EventKind::Cancelled,
                order_id,
                Some(cancelled.trader_id),
                Some(cancelled.side),
                Some(OrderType::Limit),
                Some(cancelled.price),
                Some(cancelled.remaining_quantity),
                None,
            );
            return Ok(());
        }

        if let Some(order) = self.pending.remove(order_id) {
            self.push_event(
                EventKind::Cancelled,
                order_id,
                Some(order.trader_id()),
                Some(order.side()),
                Some(order.order_type()),
                order.price(),
                Some(order.quantity()),
                None,
            );
            return Ok(());
        }

        Err(OrderBookError::UnknownOrder(order_id))
    }

    /// Drains the pending queue in a permutation drawn from the simulator's
    /// seeded PRNG, then feeds each order to the matching engine in that
    /// order. Relative order across successive calls is preserved — later
    /// calls see the state left by earlier ones.
    pub fn submit_pending_orders(&mut self) {
        let drained = self.pending.drain_shuffled(&mut self.rng);
        trace!(count = drained.len(), time = self.current_time, "draining pending orders");

        for order in drained {
            let mut state = EngineState {
                next_sequence: &mut self.next_sequence,
                next_trade_id: &mut self.next_trade_id,
                next_event_id: &mut self.next_event_id,
                known_order_ids: &mut self.known_order_ids,
            };
            let outcome = matching::process_order(&mut self.book, order, self.current_time, self.book.min_price(), &mut state);
            for trade in outcome.trades {
                self.trade_log.push(trade);
            }
            for event in outcome.events {
                self.order_log.push(event);
            }
        }
    }

    /// Advances simulated time by `delta`. Fails with
    /// [`OrderBookError::InvalidTimeDelta`] if `delta` is negative.
    pub fn advance_time(&mut self, delta: i64) -> Result<(), OrderBookError> {
        if delta < 0 {
            return Err(OrderBookError::InvalidTimeDelta);
        }
        self.current_time += delta;
        Ok(())
    }

    /// The simulator's current simulated time.
    pub fn get_current_time(&self) -> Timestamp {
        self.current_time
    }

    /// A coarse snapshot of book state at the current time.
    pub fn get_current_snapshot(&self) -> Snapshot {
        Snapshot {
            timestamp: self.current_time,
            best_bid: self.book.best_bid().unwrap_or(Price::ZERO),
            best_ask: self.book.best_ask().unwrap_or(Price::ZERO),
            mid_price: self.book.mid_price(),
            bid_depth: self.book.total_depth(Side::Buy),
            ask_depth: self.book.total_depth(Side::Sell),
        }
    }

    /// Top-of-book aggregate quantities at the current time.
    pub fn get_current_level1_data(&self) -> Level1Data {
        let (best_bid_price, best_bid_quantity) = self
            .book
            .best(Side::Buy)
            .map(|(p, l)| (p, l.aggregate()))
            .unwrap_or((Price::ZERO, Quantity::ZERO));
        let (best_ask_price, best_ask_quantity) = self
            .book
            .best(Side::Sell)
            .map(|(p, l)| (p, l.aggregate()))
            .unwrap_or((Price::ZERO, Quantity::ZERO));

        Level1Data {
            timestamp: self.current_time,
            best_bid_price,
            best_bid_quantity,
            best_ask_price,
            best_ask_quantity,
        }
    }

    /// A depth-limited ladder on both sides, from best outward. Pass
    /// [`UNBOUNDED_DEPTH`] for the entire book.
    pub fn get_current_level2_data(&self, depth: usize) -> Level2Data {
        Level2Data {
            timestamp: self.current_time,
            bid_ladder: self.book.ladder(Side::Buy, depth),
            ask_ladder: self.book.ladder(Side::Sell, depth),
        }
    }

    /// A read-only view over every order event recorded so far, in order.
    pub fn get_order_logs(&self) -> &[OrderEvent] {
        self.order_log.as_slice()
    }

    /// A read-only view over every trade recorded so far, in order.
    pub fn get_trade_logs(&self) -> &[TradeRecord] {
        self.trade_log.as_slice()
    }

    #[allow(clippy::too_many_arguments)]
    fn push_event(
        &mut self,
        kind: EventKind,
        order_id: OrderId,
        trader_id: Option<TraderId>,
        side: Option<Side>,
        order_type: Option<OrderType>,
        price: Option<Price>,
        quantity: Option<Quantity>,
        reason: Option<&'static str>,
    ) {
        let event_id = self.next_event_id;
        self.next_event_id += 1;
        self.order_log.push(OrderEvent {
            event_id,
            timestamp: self.current_time,
            event_kind: kind,
            order_id,
            trader_id,
            side,
            order_type,
            price,
            quantity,
            reason,
        });
    }
}
