/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Orders submitted during a tick, held until the next
//! `submit_pending_orders` drains them in a seeded random permutation.

use crate::types::{OrderId, OrderType, Price, Quantity, Side, TraderId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// A limit order waiting to be drained into the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLimitOrder {
    /// Identifier assigned by the submitter.
    pub order_id: OrderId,
    /// Opaque owner identity.
    pub trader_id: TraderId,
    /// Buy or sell.
    pub side: Side,
    /// The limit price.
    pub price: Price,
    /// The order quantity.
    pub quantity: Quantity,
}

/// A market order waiting to be drained into the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMarketOrder {
    /// Identifier assigned by the submitter.
    pub order_id: OrderId,
    /// Opaque owner identity.
    pub trader_id: TraderId,
    /// Buy or sell.
    pub side: Side,
    /// The order quantity.
    pub quantity: Quantity,
}

/// LIMIT and MARKET orders share a submission and drain path but differ in
/// matching termination; expressed as a tagged variant rather than
/// inheritance, with one matching procedure parameterized on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOrder {
    /// A resting-eligible order.
    Limit(PendingLimitOrder),
    /// An immediate-or-drop order.
    Market(PendingMarketOrder),
}

impl PendingOrder {
    /// The submitter-assigned identifier, common to both variants.
    pub fn order_id(&self) -> OrderId {
        match self {
            PendingOrder::Limit(o) => o.order_id,
            PendingOrder::Market(o) => o.order_id,
        }
    }

    /// The owner identity, common to both variants.
    pub fn trader_id(&self) -> TraderId {
        match self {
            PendingOrder::Limit(o) => o.trader_id,
            PendingOrder::Market(o) => o.trader_id,
        }
    }

    /// The side, common to both variants.
    pub fn side(&self) -> Side {
        match self {
            PendingOrder::Limit(o) => o.side,
            PendingOrder::Market(o) => o.side,
        }
    }

    /// The submitted quantity, common to both variants.
    pub fn quantity(&self) -> Quantity {
        match self {
            PendingOrder::Limit(o) => o.quantity,
            PendingOrder::Market(o) => o.quantity,
        }
    }

    /// `Some(price)` for a limit order, `None` for a market order.
    pub fn price(&self) -> Option<Price> {
        match self {
            PendingOrder::Limit(o) => Some(o.price),
            PendingOrder::Market(_) => None,
        }
    }

    /// The order's kind.
    pub fn order_type(&self) -> OrderType {
        match self {
            PendingOrder::Limit(_) => OrderType::Limit,
            PendingOrder::Market(_) => OrderType::Market,
        }
    }
}

/// Holds orders submitted between two `submit_pending_orders` calls.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    orders: Vec<PendingOrder>,
}

impl PendingQueue {
    /// An empty queue.
    pub fn new() -> Self {
        PendingQueue { orders: Vec::new() }
    }

    /// Appends an order submitted this tick.
    pub fn push(&mut self, order: PendingOrder) {
        self.orders.push(order);
    }

    /// Removes a pending (not yet drained) order by id, for administrative
    /// cancellation. Returns `None` if the id is not currently queued.
    pub fn remove(&mut self, order_id: OrderId) -> Option<PendingOrder> {
        let position = self.orders.iter().position(|o| o.order_id() == order_id)?;
        Some(self.orders.remove(position))
    }

    /// Whether `order_id` is currently queued.
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.orders.iter().any(|o| o.order_id() == order_id)
    }

    /// Draws a uniformly random permutation of the queue using the caller's
    /// seeded PRNG, then empties the queue. Determinism requires `rng` be
    /// owned by the simulator and never re-seeded per call.
    pub fn drain_shuffled(&mut self, rng: &mut ChaCha8Rng) -> Vec<PendingOrder> {
        let mut drained = std::mem::take(&mut self.orders);
        drained.shuffle(rng);
        drained
    }

    /// Number of orders currently queued.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the queue holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn drain_shuffled_empties_the_queue() {
        let mut q = PendingQueue::new();
        q.push(PendingOrder::Market(PendingMarketOrder {
            order_id: OrderId(1),
            trader_id: TraderId(1),
            side: Side::Buy,
            quantity: Quantity::new(1),
        }));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let drained = q.drain_shuffled(&mut rng);
        assert_eq!(drained.len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn same_seed_yields_same_permutation() {
        let make_queue = || {
            let mut q = PendingQueue::new();
            for i in 1..=6 {
                q.push(PendingOrder::Market(PendingMarketOrder {
                    order_id: OrderId(i),
                    trader_id: TraderId(1),
                    side: Side::Buy,
                    quantity: Quantity::new(1),
                }));
            }
            q
        };

        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let order_a: Vec<_> = make_queue().drain_shuffled(&mut rng_a).iter().map(|o| o.order_id()).collect();
        let order_b: Vec<_> = make_queue().drain_shuffled(&mut rng_b).iter().map(|o| o.order_id()).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn remove_drops_pending_order_without_draining() {
        let mut q = PendingQueue::new();
        q.push(PendingOrder::Market(PendingMarketOrder {
            order_id: OrderId(1),
            trader_id: TraderId(1),
            side: Side::Buy,
            quantity: Quantity::new(1),
        }));
        assert!(q.contains(OrderId(1)));
        let removed = q.remove(OrderId(1)).unwrap();
        assert_eq!(removed.order_id(), OrderId(1));
        assert!(q.is_empty());
        assert!(q.remove(OrderId(1)).is_none());
    }
}
