/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! The matching engine: crosses a drained pending order against the
//! opposite side of the book under price–time priority, producing trades
//! and lifecycle events.

use super::book::OrderBook;
use super::event::{EventKind, OrderEvent};
use super::trade::TradeRecord;
use crate::pending::PendingOrder;
use crate::types::{OrderId, OrderType, Price, Quantity, Sequence, Side, Timestamp};
use std::collections::HashSet;
use tracing::{debug, trace};

/// The counters and the lifetime duplicate-id set that the simulator owns
/// and threads through every call to [`process_order`].
pub struct EngineState<'a> {
    /// Next value to assign as a resting order's time-priority tiebreaker.
    pub next_sequence: &'a mut u64,
    /// Next value to assign as a trade's identifier.
    pub next_trade_id: &'a mut u64,
    /// Next value to assign as an event's identifier.
    pub next_event_id: &'a mut u64,
    /// Every `order_id` ever accepted (pending or resting), over the
    /// lifetime of the simulation — rejected ids are not recorded here, so
    /// a rejected id may be resubmitted.
    pub known_order_ids: &'a mut HashSet<OrderId>,
}

/// Trades and events produced by processing one drained order.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Executions produced while crossing the book.
    pub trades: Vec<TradeRecord>,
    /// Lifecycle transitions recorded while processing this order.
    pub events: Vec<OrderEvent>,
}

impl MatchOutcome {
    fn event(&mut self, state: &mut EngineState, timestamp: Timestamp, kind: EventKind, order_id: OrderId) -> &mut OrderEvent {
        let event_id = *state.next_event_id;
        *state.next_event_id += 1;
        self.events.push(OrderEvent {
            event_id,
            timestamp,
            event_kind: kind,
            order_id,
            trader_id: None,
            side: None,
            order_type: None,
            price: None,
            quantity: None,
            reason: None,
        });
        self.events.last_mut().expect("just pushed")
    }
}

fn crosses(order: &PendingOrder, opposite_best: Price) -> bool {
    match order {
        PendingOrder::Market(_) => true,
        PendingOrder::Limit(limit) => match limit.side {
            Side::Buy => limit.price >= opposite_best,
            Side::Sell => limit.price <= opposite_best,
        },
    }
}

/// Validates a drained order, emitting `REJECTED` and returning early on
/// failure. Returns `true` if the order passed validation and was recorded
/// as `ACCEPTED`.
fn validate_and_accept(
    order: &PendingOrder,
    timestamp: Timestamp,
    min_price: Price,
    state: &mut EngineState,
    outcome: &mut MatchOutcome,
) -> bool {
    let reason = if !order.quantity().is_positive() {
        Some("INVALID_QUANTITY")
    } else if let Some(price) = order.price() {
        if !price.is_positive() || price < min_price {
            Some("INVALID_PRICE")
        } else {
            None
        }
    } else {
        None
    };

    let reason = reason.or_else(|| {
        if state.known_order_ids.contains(&order.order_id()) {
            Some("DUPLICATE_ORDER_ID")
        } else {
            None
        }
    });

    if let Some(reason) = reason {
        debug!(order_id = %order.order_id(), reason, "order rejected");
        let event = outcome.event(state, timestamp, EventKind::Rejected, order.order_id());
        event.trader_id = Some(order.trader_id());
        event.side = Some(order.side());
        event.order_type = Some(order.order_type());
        event.price = order.price();
        event.quantity = Some(order.quantity());
        event.reason = Some(reason);
        return false;
    }

    state.known_order_ids.insert(order.order_id());
    let event = outcome.event(state, timestamp, EventKind::Accepted, order.order_id());
    event.trader_id = Some(order.trader_id());
    event.side = Some(order.side());
    event.order_type = Some(order.order_type());
    event.price = order.price();
    event.quantity = Some(order.quantity());
    true
}

/// Crosses `order` against the book and applies its post-matching
/// disposition. Validation failures never reach the book and are all-or-
/// nothing: a rejected order leaves the book unchanged.
pub fn process_order(
    book: &mut OrderBook,
    order: PendingOrder,
    timestamp: Timestamp,
    min_price: Price,
    state: &mut EngineState,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    if !validate_and_accept(&order, timestamp, min_price, state, &mut outcome) {
        return outcome;
    }

    let original_qty = order.quantity();
    let mut remaining = original_qty;
    let opposite = order.side().opposite();

    while remaining.is_positive() {
        let Some(opposite_best) = book.best(opposite).map(|(price, _)| price) else {
            break;
        };
        if !crosses(&order, opposite_best) {
            break;
        }

        let Some(consumed) = book.consume_front(opposite, remaining) else {
            break;
        };

        remaining = remaining.saturating_sub(consumed.filled_qty);

        let trade_id = *state.next_trade_id;
        *state.next_trade_id += 1;
        outcome.trades.push(TradeRecord {
            trade_id,
            timestamp,
            price: consumed.price,
            quantity: consumed.filled_qty,
            taker_order_id: order.order_id(),
            maker_order_id: consumed.maker_order_id,
            taker_trader_id: order.trader_id(),
            maker_trader_id: consumed.maker_trader_id,
            taker_side: order.side(),
        });

        trace!(
            trade_id,
            taker = %order.order_id(),
            maker = %consumed.maker_order_id,
            price = %consumed.price,
            qty = %consumed.filled_qty,
            "trade executed"
        );

        let maker_remaining = consumed.maker_remaining_after;
        let maker_kind = if consumed.maker_fully_filled { EventKind::Filled } else { EventKind::PartiallyFilled };
        let maker_event = outcome.event(state, timestamp, maker_kind, consumed.maker_order_id);
        maker_event.trader_id = Some(consumed.maker_trader_id);
        maker_event.side = Some(opposite);
        maker_event.price = Some(consumed.price);
        maker_event.quantity = Some(maker_remaining);
    }

    let filled_qty = original_qty.saturating_sub(remaining);
    let progressed = filled_qty.is_positive();

    if remaining == Quantity::ZERO {
        let event = outcome.event(state, timestamp, EventKind::Filled, order.order_id());
        event.trader_id = Some(order.trader_id());
        event.side = Some(order.side());
        event.order_type = Some(order.order_type());
        event.quantity = Some(Quantity::ZERO);
        return outcome;
    }

    if progressed {
        let event = outcome.event(state, timestamp, EventKind::PartiallyFilled, order.order_id());
        event.trader_id = Some(order.trader_id());
        event.side = Some(order.side());
        event.order_type = Some(order.order_type());
        event.quantity = Some(remaining);
    }

    match order.order_type() {
        OrderType::Limit => {
            let price = order.price().expect("limit order always carries a price");
            let sequence = Sequence(*state.next_sequence);
            *state.next_sequence += 1;
            book.insert_resting(order.order_id(), order.trader_id(), order.side(), price, remaining, sequence);

            let event = outcome.event(state, timestamp, EventKind::Rested, order.order_id());
            event.trader_id = Some(order.trader_id());
            event.side = Some(order.side());
            event.order_type = Some(OrderType::Limit);
            event.price = Some(price);
            event.quantity = Some(remaining);
        }
        OrderType::Market => {
            // Market order residuals never rest; the remainder is dropped
            // with an implicit cancellation.
            let event = outcome.event(state, timestamp, EventKind::Cancelled, order.order_id());
            event.trader_id = Some(order.trader_id());
            event.side = Some(order.side());
            event.order_type = Some(OrderType::Market);
            event.quantity = Some(remaining);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::{PendingLimitOrder, PendingMarketOrder};
    use crate::types::TraderId;

    fn engine_state<'a>(
        next_sequence: &'a mut u64,
        next_trade_id: &'a mut u64,
        next_event_id: &'a mut u64,
        known: &'a mut HashSet<OrderId>,
    ) -> EngineState<'a> {
        EngineState {
            next_sequence,
            next_trade_id,
            next_event_id,
            known_order_ids: known,
        }
    }

    #[test]
    fn simple_cross_fills_both_sides_exactly() {
        let mut book = OrderBook::new(Price::MIN);
        let (mut seq, mut trade_id, mut event_id) = (0u64, 0u64, 0u64);
        let mut known = HashSet::new();
        let mut state = engine_state(&mut seq, &mut trade_id, &mut event_id, &mut known);

        let buy = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(1),
            trader_id: TraderId(1),
            side: Side::Buy,
            price: Price::new(100),
            quantity: Quantity::new(10),
        });
        process_order(&mut book, buy, 0, Price::MIN, &mut state);

        let sell = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(2),
            trader_id: TraderId(2),
            side: Side::Sell,
            price: Price::new(100),
            quantity: Quantity::new(10),
        });
        let outcome = process_order(&mut book, sell, 1, Price::MIN, &mut state);

        assert_eq!(outcome.trades.len(), 1);
        let trade = &outcome.trades[0];
        assert_eq!(trade.price, Price::new(100));
        assert_eq!(trade.quantity, Quantity::new(10));
        assert_eq!(trade.maker_order_id, OrderId(1));
        assert_eq!(trade.taker_order_id, OrderId(2));
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn partial_fill_rests_residual() {
        let mut book = OrderBook::new(Price::MIN);
        let (mut seq, mut trade_id, mut event_id) = (0u64, 0u64, 0u64);
        let mut known = HashSet::new();
        let mut state = engine_state(&mut seq, &mut trade_id, &mut event_id, &mut known);

        let sell = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(2),
            trader_id: TraderId(2),
            side: Side::Sell,
            price: Price::new(100),
            quantity: Quantity::new(5),
        });
        process_order(&mut book, sell, 0, Price::MIN, &mut state);

        let buy = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(3),
            trader_id: TraderId(3),
            side: Side::Buy,
            price: Price::new(100),
            quantity: Quantity::new(8),
        });
        let outcome = process_order(&mut book, buy, 1, Price::MIN, &mut state);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].quantity, Quantity::new(5));
        assert!(book.best_ask().is_none());
        let (price, level) = book.best(Side::Buy).unwrap();
        assert_eq!(price, Price::new(100));
        assert_eq!(level.peek_front().unwrap().remaining_quantity, Quantity::new(3));
    }

    #[test]
    fn market_sweep_consumes_multiple_levels() {
        let mut book = OrderBook::new(Price::MIN);
        let (mut seq, mut trade_id, mut event_id) = (0u64, 0u64, 0u64);
        let mut known = HashSet::new();
        let mut state = engine_state(&mut seq, &mut trade_id, &mut event_id, &mut known);

        for (id, price, qty) in [(1u64, 100i64, 3u64), (2, 101, 4), (3, 102, 10)] {
            let sell = PendingOrder::Limit(PendingLimitOrder {
                order_id: OrderId(id),
                trader_id: TraderId(id),
                side: Side::Sell,
                price: Price::new(price),
                quantity: Quantity::new(qty),
            });
            process_order(&mut book, sell, 0, Price::MIN, &mut state);
        }

        let market_buy = PendingOrder::Market(PendingMarketOrder {
            order_id: OrderId(9),
            trader_id: TraderId(9),
            side: Side::Buy,
            quantity: Quantity::new(10),
        });
        let outcome = process_order(&mut book, market_buy, 1, Price::MIN, &mut state);

        let qtys: Vec<_> = outcome.trades.iter().map(|t| t.quantity.units()).collect();
        assert_eq!(qtys, vec![3, 4, 3]);
        let (price, level) = book.best(Side::Sell).unwrap();
        assert_eq!(price, Price::new(102));
        assert_eq!(level.peek_front().unwrap().remaining_quantity, Quantity::new(7));
    }

    #[test]
    fn market_order_with_insufficient_liquidity_drops_residual() {
        let mut book = OrderBook::new(Price::MIN);
        let (mut seq, mut trade_id, mut event_id) = (0u64, 0u64, 0u64);
        let mut known = HashSet::new();
        let mut state = engine_state(&mut seq, &mut trade_id, &mut event_id, &mut known);

        let sell = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(1),
            trader_id: TraderId(1),
            side: Side::Sell,
            price: Price::new(100),
            quantity: Quantity::new(2),
        });
        process_order(&mut book, sell, 0, Price::MIN, &mut state);

        let market_buy = PendingOrder::Market(PendingMarketOrder {
            order_id: OrderId(7),
            trader_id: TraderId(7),
            side: Side::Buy,
            quantity: Quantity::new(5),
        });
        let outcome = process_order(&mut book, market_buy, 1, Price::MIN, &mut state);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].quantity, Quantity::new(2));
        assert!(book.best_ask().is_none());
        assert!(!book.contains(OrderId(7)));
        let kinds: Vec<_> = outcome.events.iter().map(|e| e.event_kind).collect();
        assert!(kinds.contains(&EventKind::PartiallyFilled));
        assert_eq!(*kinds.last().unwrap(), EventKind::Cancelled);
    }

    #[test]
    fn duplicate_order_id_is_rejected() {
        let mut book = OrderBook::new(Price::MIN);
        let (mut seq, mut trade_id, mut event_id) = (0u64, 0u64, 0u64);
        let mut known = HashSet::new();
        let mut state = engine_state(&mut seq, &mut trade_id, &mut event_id, &mut known);

        let first = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(1),
            trader_id: TraderId(1),
            side: Side::Buy,
            price: Price::new(100),
            quantity: Quantity::new(1),
        });
        process_order(&mut book, first, 0, Price::MIN, &mut state);

        let dup = PendingOrder::Limit(PendingLimitOrder {
            order_id: OrderId(1),
            trader_id: TraderId(2),
            side: Side::Buy,
            price: Price::new(100),
            quantity: Quantity::new(1),
        });
        let outcome = process_order(&mut book, dup, 1, Price::MIN, &mut state);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].event_kind, EventKind::Rejected);
        assert_eq!(outcome.events[0].reason, Some("DUPLICATE_ORDER_ID"));
    }
}
