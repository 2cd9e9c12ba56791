/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! FIFO queue of resting orders at a single price, with a cached aggregate
//! quantity.
//!
//! The queue is an intrusive doubly linked list threaded through a slab of
//! slots: `append` hands back a [`Handle`] into the slab, and `remove(handle)`
//! unlinks that slot directly rather than scanning for it. A free list lets
//! vacated slots be reused instead of growing the slab without bound.

use crate::types::{OrderId, Price, Quantity, Sequence, Side, TraderId};
use serde::Serialize;

/// A limit order that has been accepted and placed in a level queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestingOrder {
    /// Identifier assigned by the submitter.
    pub order_id: OrderId,
    /// Opaque owner identity.
    pub trader_id: TraderId,
    /// Buy or sell.
    pub side: Side,
    /// The price this order rests at.
    pub price: Price,
    /// Quantity not yet matched.
    pub remaining_quantity: Quantity,
    /// Time-priority tiebreaker, assigned once at acceptance.
    pub sequence: Sequence,
}

/// A handle into a [`PriceLevel`]'s slab, returned by `append` and consumed
/// by `remove`. Carries a generation tag alongside the slot index so a stale
/// handle into a freed-and-reused slot is rejected rather than silently
/// removing an unrelated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Handle(usize, u64);

#[derive(Debug, Clone)]
struct Slot {
    order: RestingOrder,
    prev: Option<usize>,
    next: Option<usize>,
    generation: u64,
}

/// FIFO of live orders at one price, with aggregate volume.
///
/// Invariant: `aggregate_quantity` always equals the sum of
/// `remaining_quantity` over the contained orders. An empty level must be
/// removed from its side book by the caller — `PriceLevel` itself never
/// reaches into the side map.
///
/// Internally an arena (`slots`) holds one slot per live order plus any
/// vacated slots awaiting reuse (tracked in `free`); `head`/`tail` and each
/// slot's `prev`/`next` thread the arrival order through it. `append` is
/// O(1) amortized, and `remove(handle)` is O(1) — it unlinks the named slot
/// directly, with no scan of the queue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceLevel {
    slots: Vec<Option<Slot>>,
    /// Generation to assign the next time each index is (re)occupied; bumped
    /// whenever that slot is freed so a stale `Handle` into it is detected.
    next_generation: Vec<u64>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    count: usize,
    aggregate_quantity: Quantity,
}

impl PriceLevel {
    /// An empty level.
    pub fn new() -> Self {
        PriceLevel::default()
    }

    /// Appends an order to the back of the queue, preserving arrival order,
    /// and returns a handle for O(1) removal later.
    pub fn append(&mut self, order: RestingOrder) -> Handle {
        self.aggregate_quantity = self.aggregate_quantity.saturating_add(order.remaining_quantity);

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(None);
                self.next_generation.push(0);
                self.slots.len() - 1
            }
        };
        let generation = self.next_generation[index];
        let slot = Slot { order, prev: self.tail, next: None, generation };
        self.slots[index] = Some(slot);

        if let Some(tail) = self.tail {
            self.slots[tail].as_mut().expect("tail slot must be occupied").next = Some(index);
        } else {
            self.head = Some(index);
        }
        self.tail = Some(index);
        self.count += 1;
        Handle(index, generation)
    }

    /// The oldest resting order, if any.
    pub fn peek_front(&self) -> Option<&RestingOrder> {
        let index = self.head?;
        self.slots[index].as_ref().map(|slot| &slot.order)
    }

    /// A mutable reference to the oldest resting order, if any.
    pub fn peek_front_mut(&mut self) -> Option<&mut RestingOrder> {
        let index = self.head?;
        self.slots[index].as_mut().map(|slot| &mut slot.order)
    }

    /// Removes and returns the oldest resting order, if any.
    pub fn pop_front(&mut self) -> Option<RestingOrder> {
        let index = self.head?;
        self.unlink(index)
    }

    /// Removes the order named by `handle`, wherever it sits in the queue,
    /// in O(1) by unlinking its slot directly. Fails if the handle's slot has
    /// since been freed and reused for a different order. Reserved for
    /// cancellations — the matcher only ever consumes from the front via
    /// `consume_front`.
    pub fn remove(&mut self, handle: Handle) -> Option<RestingOrder> {
        let Handle(index, generation) = handle;
        if self.slots.get(index)?.as_ref()?.generation != generation {
            return None;
        }
        self.unlink(index)
    }

    fn unlink(&mut self, index: usize) -> Option<RestingOrder> {
        let slot = self.slots.get_mut(index)?.take()?;
        match slot.prev {
            Some(prev) => self.slots[prev].as_mut().expect("prev slot must be occupied").next = slot.next,
            None => self.head = slot.next,
        }
        match slot.next {
            Some(next) => self.slots[next].as_mut().expect("next slot must be occupied").prev = slot.prev,
            None => self.tail = slot.prev,
        }
        self.free.push(index);
        self.next_generation[index] = self.next_generation[index].wrapping_add(1);
        self.count -= 1;
        self.aggregate_quantity = self.aggregate_quantity.saturating_sub(slot.order.remaining_quantity);
        Some(slot.order)
    }

    /// The cached aggregate quantity across all orders in this level.
    pub fn aggregate(&self) -> Quantity {
        self.aggregate_quantity
    }

    /// Whether the level holds no orders.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of resting orders in this level.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Reduces the front order's remaining quantity by `fill`, dropping it
    /// from the queue if it reaches zero. Returns the consumed order's
    /// identity plus whether it was fully consumed.
    pub fn consume_front(&mut self, fill: Quantity) -> Option<(RestingOrder, bool)> {
        let index = self.head?;
        let remaining = {
            let slot = self.slots[index].as_mut()?;
            let remaining = slot.order.remaining_quantity.saturating_sub(fill);
            slot.order.remaining_quantity = remaining;
            remaining
        };
        self.aggregate_quantity = self.aggregate_quantity.saturating_sub(fill);

        if remaining == Quantity::ZERO {
            let order = self.unlink(index)?;
            Some((order, true))
        } else {
            let order = self.slots[index].as_ref()?.order.clone();
            Some((order, false))
        }
    }
}
