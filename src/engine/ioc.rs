// ============================================================================
// Immediate-Or-Cancel Execution Policy
// ============================================================================

use crate::domain::{Ledger, Order, OrderBook, OrderState, OrderStateTransition};
use crate::interfaces::{Execution, ExecutionPolicy};
use smallvec::SmallVec;

use super::settlement::{advance, after_fill, execute_against};

/// IOC order policy
///
/// One pop-and-test against the counter side's best order. A match trades
/// `min(requested, resting)` and any resting remainder goes back; a miss
/// restores the popped order. Whatever the IOC order did not fill is dropped.
pub struct ImmediateOrCancelPolicy;

impl ImmediateOrCancelPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImmediateOrCancelPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionPolicy for ImmediateOrCancelPolicy {
    fn execute(&self, mut order: Order, book: &mut OrderBook, ledger: &mut Ledger) -> Execution {
        let mut fills = SmallVec::new();
        let mut state = OrderState::New;
        let counter = book.counter_side_mut(order.side);

        if let Some(mut best) = counter.pop_best() {
            if self.crosses(order.side, order.price, best.order.price) {
                let quantity = order.quantity.min(best.order.quantity);
                match execute_against(&mut order, &mut best, quantity, ledger) {
                    Ok(fill) => {
                        fills.push(fill);
                        state = after_fill(state, order.quantity);
                    },
                    Err(err) => {
                        tracing::warn!(order_id = order.id, %err, "settlement refused");
                    },
                }

                if best.order.quantity > 0 {
                    counter.reinsert(best);
                }
            } else {
                counter.reinsert(best);
            }
        }

        if order.quantity > 0 {
            state = advance(state, OrderStateTransition::Discard);
        }

        Execution {
            fills,
            state,
            rested: 0,
            unfilled: order.quantity,
        }
    }

    fn name(&self) -> &str {
        "ImmediateOrCancel"
    }
}
