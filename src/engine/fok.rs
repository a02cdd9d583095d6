// ============================================================================
// Fill-Or-Kill Execution Policy
// ============================================================================

use crate::domain::{FokSurplus, Ledger, Order, OrderBook, OrderState, OrderStateTransition};
use crate::interfaces::{Execution, ExecutionPolicy};
use smallvec::SmallVec;

use super::settlement::{advance, execute_against};

/// FOK order policy
///
/// One pop-and-test against the counter side's best order, which must both
/// cross the price and hold at least the full requested quantity. On success
/// the whole quantity trades at the resting price in a single fill. Otherwise
/// the popped order is restored and the FOK order is killed.
///
/// With [`FokSurplus::Discard`] the consumed resting order leaves the book
/// even if it held more than was requested.
pub struct FillOrKillPolicy {
    surplus: FokSurplus,
}

impl FillOrKillPolicy {
    pub fn new(surplus: FokSurplus) -> Self {
        Self { surplus }
    }
}

impl Default for FillOrKillPolicy {
    fn default() -> Self {
        Self::new(FokSurplus::Discard)
    }
}

impl ExecutionPolicy for FillOrKillPolicy {
    fn execute(&self, mut order: Order, book: &mut OrderBook, ledger: &mut Ledger) -> Execution {
        let requested = order.quantity;
        let counter = book.counter_side_mut(order.side);

        let Some(mut best) = counter.pop_best() else {
            return Execution::discarded(requested);
        };

        let fillable = self.crosses(order.side, order.price, best.order.price)
            && best.order.quantity >= requested;

        if !fillable {
            counter.reinsert(best);
            return Execution::discarded(requested);
        }

        let fill = match execute_against(&mut order, &mut best, requested, ledger) {
            Ok(fill) => fill,
            Err(err) => {
                tracing::warn!(order_id = order.id, %err, "settlement refused, killing order");
                counter.reinsert(best);
                return Execution::discarded(requested);
            },
        };

        let mut fills = SmallVec::new();
        fills.push(fill);

        match self.surplus {
            FokSurplus::Discard => {
                if best.order.quantity > 0 {
                    tracing::debug!(
                        maker = best.order.id,
                        surplus = best.order.quantity,
                        "resting surplus consumed by FOK fill"
                    );
                }
            },
            FokSurplus::Retain => {
                if best.order.quantity > 0 {
                    counter.reinsert(best);
                }
            },
        }

        Execution {
            fills,
            state: advance(OrderState::New, OrderStateTransition::Fill),
            rested: 0,
            unfilled: 0,
        }
    }

    fn name(&self) -> &str {
        "FillOrKill"
    }
}
