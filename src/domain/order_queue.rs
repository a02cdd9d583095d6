// ============================================================================
// Priority Order Queue
// One per book side; surfaces the resting order with the highest priority
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Order, Quantity};

/// Which price a queue surfaces first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceOrdering {
    /// Numerically largest price first
    HighestFirst,
    /// Numerically smallest price first
    LowestFirst,
}

impl PriceOrdering {
    /// Compare two prices so that `Greater` means "pops earlier"
    #[inline]
    fn compare(self, a: Decimal, b: Decimal) -> Ordering {
        match self {
            PriceOrdering::HighestFirst => a.cmp(&b),
            PriceOrdering::LowestFirst => b.cmp(&a),
        }
    }
}

/// An order owned by a queue, tagged with its arrival sequence.
///
/// Popping hands out the tag with the order so a partially filled remainder
/// can be put back with its original time priority.
#[derive(Debug, Clone, PartialEq)]
pub struct RestingOrder {
    pub order: Order,
    sequence: u64,
}

impl RestingOrder {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn into_order(self) -> Order {
        self.order
    }
}

#[derive(Debug)]
struct QueueEntry {
    ordering: PriceOrdering,
    /// Priority key captured at insertion
    price: Decimal,
    resting: RestingOrder,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering
            .compare(self.price, other.price)
            // Earlier arrival wins on equal price
            .then_with(|| other.resting.sequence.cmp(&self.resting.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap of resting orders under a fixed price ordering
#[derive(Debug)]
pub struct OrderQueue {
    ordering: PriceOrdering,
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl OrderQueue {
    pub fn new(ordering: PriceOrdering) -> Self {
        Self {
            ordering,
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn ordering(&self) -> PriceOrdering {
        self.ordering
    }

    /// Add a new resting order behind everything already queued at its price.
    /// Returns the arrival sequence assigned to it.
    pub fn insert(&mut self, order: Order) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.push(RestingOrder { order, sequence });
        sequence
    }

    /// Put back an order previously handed out by [`pop_best`](Self::pop_best)
    pub fn reinsert(&mut self, resting: RestingOrder) {
        self.push(resting);
    }

    /// Remove and return the highest-priority order
    pub fn pop_best(&mut self) -> Option<RestingOrder> {
        self.heap.pop().map(|entry| entry.resting)
    }

    pub fn peek_best(&self) -> Option<&Order> {
        self.heap.peek().map(|entry| &entry.resting.order)
    }

    pub fn best_price(&self) -> Option<Decimal> {
        self.heap.peek().map(|entry| entry.price)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.heap.iter().map(|entry| entry.resting.order.quantity).sum()
    }

    /// Resting orders in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.heap.iter().map(|entry| &entry.resting.order)
    }

    /// Aggregated (price, quantity) levels in pop order, at most `num_levels`
    pub fn get_depth(&self, num_levels: usize) -> Vec<(Decimal, Quantity)> {
        let mut entries: Vec<&QueueEntry> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));

        let mut levels: Vec<(Decimal, Quantity)> = Vec::new();
        for entry in entries {
            match levels.last_mut() {
                Some((price, quantity)) if *price == entry.price => {
                    *quantity += entry.resting.order.quantity;
                },
                _ => {
                    if levels.len() == num_levels {
                        break;
                    }
                    levels.push((entry.price, entry.resting.order.quantity));
                },
            }
        }
        levels
    }

    fn push(&mut self, resting: RestingOrder) {
        self.heap.push(QueueEntry {
            ordering: self.ordering,
            price: resting.order.price,
            resting,
        });
    }
}
