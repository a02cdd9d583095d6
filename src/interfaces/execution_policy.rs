// ============================================================================
// Execution Policy Interface
// Defines the contract for the per-order-kind execution strategies
// ============================================================================

use crate::domain::{Fill, Ledger, Order, OrderBook, OrderState, Quantity, Side};
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// Outcome of running one incoming order through a policy
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Trades in execution order
    pub fills: SmallVec<[Fill; 4]>,
    /// Final lifecycle state of the incoming order
    pub state: OrderState,
    /// Quantity of the incoming order left resting on the book
    pub rested: Quantity,
    /// Quantity of the incoming order dropped without trading
    pub unfilled: Quantity,
}

impl Execution {
    /// Nothing traded and nothing rests
    pub fn discarded(unfilled: Quantity) -> Self {
        Self {
            fills: SmallVec::new(),
            state: OrderState::Discarded,
            rested: 0,
            unfilled,
        }
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.fills.iter().map(|fill| fill.quantity).sum()
    }

    pub fn traded(&self) -> bool {
        !self.fills.is_empty()
    }
}

/// Strategy pattern interface for execution policies
/// Implementations: Market, Limit, ImmediateOrCancel, FillOrKill
pub trait ExecutionPolicy: Send + Sync {
    /// Run an incoming order against the book, settling every trade in the
    /// ledger as soon as the policy commits to it.
    ///
    /// # Arguments
    /// * `order` - The new order; its quantity is consumed by the policy
    /// * `book` - Both resting queues
    /// * `ledger` - Accounts to settle trades into
    fn execute(&self, order: Order, book: &mut OrderBook, ledger: &mut Ledger) -> Execution;

    /// Get the policy name for logging
    fn name(&self) -> &str;

    /// Check whether an incoming price bound reaches a resting price.
    /// A buy reaches asks priced at or below its bound, a sell reaches bids
    /// priced at or above it.
    fn crosses(&self, side: Side, bound: Decimal, resting_price: Decimal) -> bool {
        match side {
            Side::Buy => bound >= resting_price,
            Side::Sell => bound <= resting_price,
        }
    }
}
