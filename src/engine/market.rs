// ============================================================================
// Market Execution Policy
// Walks the opposite side from the best level, bounded by the order price
// ============================================================================

use crate::domain::{Ledger, Order, OrderBook, OrderState, OrderStateTransition};
use crate::interfaces::{Execution, ExecutionPolicy};
use smallvec::SmallVec;

use super::settlement::{advance, after_fill, execute_against};

/// Market order policy
///
/// Pops the counter side's best order while quantity remains. Each level that
/// the price bound reaches trades `min(remaining, resting)`; the first level it
/// does not reach is put back and the walk stops, even if a deeper level would
/// have matched. Unfilled quantity never rests.
///
/// # Example
/// ```text
/// Bids:  12 @ 5 (A), 10 @ 5 (B)
///
/// Incoming: Market sell 8, bound 11
/// Result: 5 @ 12 with A; B fails the bound, 3 cancelled
/// ```
pub struct MarketPolicy;

impl MarketPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarketPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionPolicy for MarketPolicy {
    fn execute(&self, mut order: Order, book: &mut OrderBook, ledger: &mut Ledger) -> Execution {
        let mut fills = SmallVec::new();
        let mut state = OrderState::New;
        let counter = book.counter_side_mut(order.side);

        while order.quantity > 0 {
            let Some(mut best) = counter.pop_best() else {
                break;
            };

            if !self.crosses(order.side, order.price, best.order.price) {
                counter.reinsert(best);
                break;
            }

            let quantity = order.quantity.min(best.order.quantity);
            match execute_against(&mut order, &mut best, quantity, ledger) {
                Ok(fill) => fills.push(fill),
                Err(err) => {
                    tracing::warn!(order_id = order.id, %err, "settlement refused, ending walk");
                    counter.reinsert(best);
                    break;
                },
            }
            state = after_fill(state, order.quantity);

            if best.order.quantity > 0 {
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
        "Market"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceOrdering, Side};
    use rust_decimal::Decimal;

    fn book_with_bids(bids: &[(i64, u64)]) -> OrderBook {
        let mut book = OrderBook::default();
        for (i, (price, qty)) in bids.iter().enumerate() {
            let id = i as i64 + 1;
            book.add_order(Order::limit(id, id, Side::Buy, Decimal::from(*price), *qty));
        }
        book
    }

    #[test]
    fn test_market_sell_hits_best_bid_first() {
        let mut book = book_with_bids(&[(10, 5), (12, 5)]);
        let mut ledger = Ledger::new();

        let sell = Order::market(9, 99, Side::Sell, Decimal::from(10), 5);
        let execution = MarketPolicy::new().execute(sell, &mut book, &mut ledger);

        assert_eq!(execution.fills.len(), 1);
        assert_eq!(execution.fills[0].price, Decimal::from(12));
        assert_eq!(execution.fills[0].maker_order_id, 2);
        assert_eq!(execution.state, OrderState::Filled);
        assert_eq!(book.bids().len(), 1);
    }

    #[test]
    fn test_market_walks_levels_and_stops_at_bound() {
        let mut book = book_with_bids(&[(12, 5), (11, 5), (10, 5)]);
        let mut ledger = Ledger::new();

        let sell = Order::market(9, 99, Side::Sell, Decimal::from(11), 20);
        let execution = MarketPolicy::new().execute(sell, &mut book, &mut ledger);

        assert_eq!(execution.filled_quantity(), 10);
        assert_eq!(execution.unfilled, 10);
        assert_eq!(execution.rested, 0);
        assert_eq!(execution.state, OrderState::Discarded);

        // The level at 10 fails the bound and is restored untouched
        assert_eq!(book.bids().len(), 1);
        assert_eq!(book.bids().best_price(), Some(Decimal::from(10)));
        assert!(book.asks().is_empty());

        let seller = ledger.get(99).unwrap();
        assert_eq!(seller.position, -10);
        assert_eq!(seller.balance, Decimal::from(115));
    }

    #[test]
    fn test_market_partial_consumption_reinserts_resting() {
        let mut book = OrderBook::new(PriceOrdering::LowestFirst);
        book.add_order(Order::limit(1, 1, Side::Sell, Decimal::from(10), 50));
        let mut ledger = Ledger::new();

        let buy = Order::market(2, 2, Side::Buy, Decimal::from(10), 20);
        let execution = MarketPolicy::new().execute(buy, &mut book, &mut ledger);

        assert_eq!(execution.state, OrderState::Filled);
        assert_eq!(book.asks().total_quantity(), 30);
        assert_eq!(ledger.get(2).unwrap().balance, Decimal::from(-200));
    }

    #[test]
    fn test_market_against_empty_book() {
        let mut book = OrderBook::default();
        let mut ledger = Ledger::new();

        let buy = Order::market(1, 1, Side::Buy, Decimal::from(10), 20);
        let execution = MarketPolicy::new().execute(buy, &mut book, &mut ledger);

        assert!(!execution.traded());
        assert_eq!(execution.unfilled, 20);
        assert!(book.is_empty());
        assert!(ledger.is_empty());
    }
}
