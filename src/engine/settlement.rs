// ============================================================================
// Trade Settlement
// Shared by every policy once it commits to a match
// ============================================================================

use crate::domain::{
    Fill, Ledger, Order, OrderState, OrderStateTransition, Quantity, RestingOrder, Side,
};
use crate::error::Result;

/// Execute `quantity` between the popped own-side order and a resting
/// counter-side order at the resting order's price. Both orders shrink and the
/// ledger is settled once. When the ledger refuses the trade neither order
/// changes.
pub(crate) fn execute_against(
    incoming: &mut Order,
    resting: &mut RestingOrder,
    quantity: Quantity,
    ledger: &mut Ledger,
) -> Result<Fill> {
    let price = resting.order.price;
    let (buyer, seller) = match incoming.side {
        Side::Buy => (incoming.account_id, resting.order.account_id),
        Side::Sell => (resting.order.account_id, incoming.account_id),
    };

    let notional = ledger.settle(buyer, seller, quantity, price)?;

    incoming.reduce(quantity);
    resting.order.reduce(quantity);

    tracing::debug!(
        taker = incoming.id,
        maker = resting.order.id,
        %price,
        quantity,
        %notional,
        "fill"
    );

    Ok(Fill::new(
        incoming.id,
        resting.order.id,
        buyer,
        seller,
        incoming.side,
        price,
        quantity,
    ))
}

/// Step the incoming order's lifecycle after a fill
pub(crate) fn after_fill(state: OrderState, remaining: Quantity) -> OrderState {
    if remaining == 0 {
        advance(state, OrderStateTransition::Fill)
    } else {
        advance(state, OrderStateTransition::PartialFill)
    }
}

pub(crate) fn advance(state: OrderState, via: OrderStateTransition) -> OrderState {
    match state.transition(via) {
        Ok(next) => next,
        Err(err) => {
            tracing::error!(%err, "order lifecycle violated");
            state
        },
    }
}
