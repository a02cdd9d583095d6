// ============================================================================
// Fill Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, OrderId, Quantity, Side};

/// One executed trade between an incoming order and a resting order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Unique fill identifier
    pub id: Uuid,

    /// Own-side order of the match. This is the incoming order, except when a
    /// limit order surfaces a better resting order on its own side, which then
    /// trades in its place.
    pub taker_order_id: OrderId,

    /// Counter-side order that was resting on the book
    pub maker_order_id: OrderId,

    pub buyer: AccountId,
    pub seller: AccountId,

    /// Side of the taker order
    pub taker_side: Side,

    /// Execution price (always the resting order's price)
    pub price: Decimal,

    /// Executed quantity
    pub quantity: Quantity,

    /// Fill timestamp
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        buyer: AccountId,
        seller: AccountId,
        taker_side: Side,
        price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            taker_order_id,
            maker_order_id,
            buyer,
            seller,
            taker_side,
            price,
            quantity,
            timestamp: Utc::now(),
        }
    }

    /// Price times quantity
    pub fn notional_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
