// ============================================================================
// Limit Execution Policy
// Rests the order, then trades the top of both sides while the book crosses
// ============================================================================

use crate::domain::{Ledger, Order, OrderBook, OrderState, OrderStateTransition, Side};
use crate::interfaces::{Execution, ExecutionPolicy};
use smallvec::SmallVec;

use super::settlement::{advance, after_fill, execute_against};

/// Limit order policy
///
/// The incoming order joins its own side first. Then the best order of each
/// side is popped and compared: while the bid price is at or above the ask
/// price, `min(bid, ask)` trades at the price of the counter-side order and
/// any partially filled order goes back. The first uncrossed pair is restored
/// and the loop ends.
///
/// The popped own-side order is whatever the queue surfaces, so a better
/// resting order on the same side trades before the incoming one. Such fills
/// are still reported in the execution.
///
/// # Example
/// ```text
/// Asks:  10 @ 60 (A)
///
/// Incoming: Limit buy 100 @ 10
/// Result: 60 @ 10 with A, 40 rests as a bid at 10
/// ```
pub struct LimitPolicy;

impl LimitPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionPolicy for LimitPolicy {
    fn execute(&self, order: Order, book: &mut OrderBook, ledger: &mut Ledger) -> Execution {
        let own_side = order.side;
        let mut rested = order.quantity;
        let (own, counter) = book.sides_mut(own_side);

        let incoming_seq = own.insert(order);
        let mut fills = SmallVec::new();
        let mut state = OrderState::New;

        loop {
            let Some(mut own_best) = own.pop_best() else {
                break;
            };
            let Some(mut counter_best) = counter.pop_best() else {
                own.reinsert(own_best);
                break;
            };

            let (bid_price, ask_price) = match own_side {
                Side::Buy => (own_best.order.price, counter_best.order.price),
                Side::Sell => (counter_best.order.price, own_best.order.price),
            };

            if bid_price < ask_price {
                own.reinsert(own_best);
                counter.reinsert(counter_best);
                break;
            }

            let quantity = own_best.order.quantity.min(counter_best.order.quantity);
            match execute_against(&mut own_best.order, &mut counter_best, quantity, ledger) {
                Ok(fill) => fills.push(fill),
                Err(err) => {
                    tracing::warn!(order_id = own_best.order.id, %err, "settlement refused, book left crossed");
                    own.reinsert(own_best);
                    counter.reinsert(counter_best);
                    break;
                },
            }

            if own_best.sequence() == incoming_seq {
                rested = own_best.order.quantity;
                state = after_fill(state, rested);
            }

            if own_best.order.quantity > 0 {
                own.reinsert(own_best);
            }
            if counter_best.order.quantity > 0 {
                counter.reinsert(counter_best);
            }
        }

        if state == OrderState::New {
            state = advance(state, OrderStateTransition::Rest);
        }

        Execution {
            fills,
            state,
            rested,
            unfilled: 0,
        }
    }

    fn name(&self) -> &str {
        "Limit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceOrdering;
    use rust_decimal::Decimal;

    #[test]
    fn test_partial_fill_leaves_remainder_resting() {
        let mut book = OrderBook::default();
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(10), 60));

        let buy = Order::limit(2, 1, Side::Buy, Decimal::from(10), 100);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert_eq!(execution.fills.len(), 1);
        assert_eq!(execution.fills[0].quantity, 60);
        assert_eq!(execution.state, OrderState::PartiallyFilled);
        assert_eq!(execution.rested, 40);

        assert!(book.asks().is_empty());
        assert_eq!(book.bids().len(), 1);
        assert_eq!(book.bids().peek_best().map(|o| (o.id, o.quantity)), Some((2, 40)));
    }

    #[test]
    fn test_uncrossed_order_rests() {
        let mut book = OrderBook::default();
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(11), 10));

        let buy = Order::limit(2, 1, Side::Buy, Decimal::from(10), 5);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert!(!execution.traded());
        assert_eq!(execution.state, OrderState::Resting);
        assert_eq!(execution.rested, 5);
        assert_eq!(book.resting_orders(), 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_sell_trades_at_resting_bid_price() {
        let mut book = OrderBook::default();
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 1, Side::Buy, Decimal::from(12), 10));

        let sell = Order::limit(2, 2, Side::Sell, Decimal::from(10), 10);
        let execution = LimitPolicy::new().execute(sell, &mut book, &mut ledger);

        assert_eq!(execution.state, OrderState::Filled);
        assert_eq!(execution.rested, 0);
        assert_eq!(execution.fills[0].price, Decimal::from(12));
        assert_eq!(ledger.get(2).unwrap().balance, Decimal::from(120));
        assert_eq!(ledger.get(1).unwrap().position, 10);
        assert!(book.is_empty());
    }

    #[test]
    fn test_sweeps_several_counter_orders() {
        let mut book = OrderBook::new(PriceOrdering::LowestFirst);
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(10), 30));
        book.add_order(Order::limit(2, 3, Side::Sell, Decimal::from(11), 30));
        book.add_order(Order::limit(3, 4, Side::Sell, Decimal::from(12), 30));

        let buy = Order::limit(4, 1, Side::Buy, Decimal::from(11), 100);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert_eq!(execution.fills.len(), 2);
        assert_eq!(execution.filled_quantity(), 60);
        assert_eq!(execution.rested, 40);
        assert_eq!(ledger.get(1).unwrap().balance, Decimal::from(-630));
        assert_eq!(book.asks().best_price(), Some(Decimal::from(12)));
    }

    #[test]
    fn test_highest_first_asks_hide_cheaper_liquidity() {
        let mut book = OrderBook::new(PriceOrdering::HighestFirst);
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(10), 5));
        book.add_order(Order::limit(2, 3, Side::Sell, Decimal::from(12), 5));

        // The ask at 12 surfaces first and stops the loop
        let buy = Order::limit(3, 1, Side::Buy, Decimal::from(11), 5);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert!(!execution.traded());
        assert_eq!(book.asks().len(), 2);
        assert_eq!(book.bids().len(), 1);
    }

    #[test]
    fn test_older_own_side_order_trades_after_incoming() {
        // Highest-first asks leave the book crossed: the 12 ask hides the 10 ask
        // from the resting bid at 11
        let mut book = OrderBook::new(PriceOrdering::HighestFirst);
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(10), 5));
        book.add_order(Order::limit(2, 3, Side::Sell, Decimal::from(12), 5));
        book.add_order(Order::limit(3, 4, Side::Buy, Decimal::from(11), 5));

        let buy = Order::limit(4, 1, Side::Buy, Decimal::from(12), 5);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert_eq!(execution.fills.len(), 2);

        let first = &execution.fills[0];
        assert_eq!(
            (first.taker_order_id, first.maker_order_id, first.price),
            (4, 2, Decimal::from(12))
        );
        assert_eq!((first.buyer, first.seller), (1, 3));

        // Once the 12 ask is gone the resting bid meets the 10 ask at the ask price
        let second = &execution.fills[1];
        assert_eq!(
            (second.taker_order_id, second.maker_order_id, second.price),
            (3, 1, Decimal::from(10))
        );
        assert_eq!((second.buyer, second.seller), (4, 2));

        assert_eq!(execution.state, OrderState::Filled);
        assert_eq!(execution.rested, 0);
        assert!(book.is_empty());

        let resting_bidder = ledger.get(4).unwrap();
        assert_eq!(resting_bidder.balance, Decimal::from(-50));
        assert_eq!(resting_bidder.position, 5);
        assert_eq!(resting_bidder.turnover, Decimal::from(50));
    }

    #[test]
    fn test_incoming_rests_whole_while_older_orders_trade() {
        // A crossed book, as left behind when a highest-first ask hid cheaper asks
        let mut book = OrderBook::new(PriceOrdering::HighestFirst);
        let mut ledger = Ledger::new();
        book.add_order(Order::limit(1, 2, Side::Sell, Decimal::from(10), 5));
        book.add_order(Order::limit(2, 4, Side::Buy, Decimal::from(11), 5));

        // Incoming bid at 9 ranks below the resting 11 bid, which takes the ask
        let buy = Order::limit(3, 1, Side::Buy, Decimal::from(9), 5);
        let execution = LimitPolicy::new().execute(buy, &mut book, &mut ledger);

        assert_eq!(execution.fills.len(), 1);
        assert_eq!(execution.fills[0].taker_order_id, 2);
        assert_eq!(execution.fills[0].price, Decimal::from(10));
        assert_eq!(execution.state, OrderState::Resting);
        assert_eq!(execution.rested, 5);
        assert_eq!(book.bids().peek_best().map(|o| (o.id, o.quantity)), Some((3, 5)));
        assert!(book.asks().is_empty());
        assert!(ledger.get(1).is_none());
        assert_eq!(ledger.get(4).unwrap().position, 5);
    }
}
