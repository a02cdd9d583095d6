// ============================================================================
// Order Book Domain Model
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Order, OrderQueue, PriceOrdering, Quantity, Side};

// ============================================================================
// Order Book
// ============================================================================

/// The two resting queues of a single instrument
#[derive(Debug)]
pub struct OrderBook {
    /// Resting buy orders, best (highest) bid first
    bids: OrderQueue,
    /// Resting sell orders in the configured ask ordering
    asks: OrderQueue,
}

impl OrderBook {
    pub fn new(ask_ordering: PriceOrdering) -> Self {
        Self {
            bids: OrderQueue::new(PriceOrdering::HighestFirst),
            asks: OrderQueue::new(ask_ordering),
        }
    }

    pub fn bids(&self) -> &OrderQueue {
        &self.bids
    }

    pub fn asks(&self) -> &OrderQueue {
        &self.asks
    }

    pub fn side(&self, side: Side) -> &OrderQueue {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut OrderQueue {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Queue an order takes liquidity from
    pub fn counter_side_mut(&mut self, side: Side) -> &mut OrderQueue {
        self.side_mut(side.opposite())
    }

    /// `(own side, counter side)` borrowed together
    pub fn sides_mut(&mut self, own: Side) -> (&mut OrderQueue, &mut OrderQueue) {
        match own {
            Side::Buy => (&mut self.bids, &mut self.asks),
            Side::Sell => (&mut self.asks, &mut self.bids),
        }
    }

    /// Add an order as resting liquidity on its own side
    pub fn add_order(&mut self, order: Order) -> u64 {
        self.side_mut(order.side).insert(order)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn resting_orders(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: self.bids.get_depth(depth),
            asks: self.asks.get_depth(depth),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(PriceOrdering::HighestFirst)
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable view of the book, levels listed in pop order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Bid levels (price, quantity)
    pub bids: Vec<(Decimal, Quantity)>,
    /// Ask levels (price, quantity)
    pub asks: Vec<(Decimal, Quantity)>,
}

impl OrderBookSnapshot {
    /// Price of the bid that would be popped next
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    /// Price of the ask that would be popped next
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    pub fn total_bid_quantity(&self) -> Quantity {
        self.bids.iter().map(|(_, qty)| qty).sum()
    }

    pub fn total_ask_quantity(&self) -> Quantity {
        self.asks.iter().map(|(_, qty)| qty).sum()
    }
}
