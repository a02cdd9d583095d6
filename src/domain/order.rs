// ============================================================================
// Order Domain Model
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Value Objects
// ============================================================================

/// External correlation id carried through from the input batch
pub type OrderId = i64;

/// External account key
pub type AccountId = i64;

/// Order and trade quantity (whole lots)
pub type Quantity = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire encoding: `0` is a buy, any other value is a sell
    pub fn from_wire(dir: i64) -> Self {
        if dir == 0 {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Execution policy requested by the order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Walk the opposite side from the best level, bounded by the order price
    Market,
    /// Rest on the book and match while the book is crossed
    Limit,
    /// Immediate Or Cancel - one match attempt, remainder discarded
    ImmediateOrCancel,
    /// Fill Or Kill - whole quantity against one resting order or nothing
    FillOrKill,
    /// Any other kind string; ignored by the engine
    Unrecognized(String),
}

impl OrderKind {
    /// Map the wire name onto a kind. Matching is exact after trimming.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "market" => OrderKind::Market,
            "limit" => OrderKind::Limit,
            "ioc" => OrderKind::ImmediateOrCancel,
            "fok" => OrderKind::FillOrKill,
            other => OrderKind::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderKind::Market => "market",
            OrderKind::Limit => "limit",
            OrderKind::ImmediateOrCancel => "ioc",
            OrderKind::FillOrKill => "fok",
            OrderKind::Unrecognized(raw) => raw,
        }
    }
}

/// An empty, unrecognized kind; what a missing `type` column parses to
impl Default for OrderKind {
    fn default() -> Self {
        OrderKind::Unrecognized(String::new())
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order State Machine
// ============================================================================

pub mod state {
    use crate::error::{Error, Result};
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Lifecycle of a single order:
    /// `New -> (Resting | PartiallyFilled)* -> Filled | Discarded`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum OrderState {
        New,
        /// On the book with its full original quantity
        Resting,
        /// Some quantity traded; the rest may be on the book
        PartiallyFilled,
        Filled,
        /// Cancelled, killed, or ignored with quantity left over
        Discarded,
    }

    impl OrderState {
        pub fn is_terminal(&self) -> bool {
            matches!(self, OrderState::Filled | OrderState::Discarded)
        }
    }

    impl fmt::Display for OrderState {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OrderStateTransition {
        Rest,
        PartialFill,
        Fill,
        Discard,
    }

    impl fmt::Display for OrderStateTransition {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    impl OrderState {
        pub fn transition(&self, transition: OrderStateTransition) -> Result<OrderState> {
            match (self, transition) {
                (OrderState::New, OrderStateTransition::Rest) => Ok(OrderState::Resting),
                (OrderState::New, OrderStateTransition::PartialFill) => {
                    Ok(OrderState::PartiallyFilled)
                },
                (OrderState::New, OrderStateTransition::Fill) => Ok(OrderState::Filled),
                (OrderState::New, OrderStateTransition::Discard) => Ok(OrderState::Discarded),

                (OrderState::Resting, OrderStateTransition::PartialFill) => {
                    Ok(OrderState::PartiallyFilled)
                },
                (OrderState::Resting, OrderStateTransition::Fill) => Ok(OrderState::Filled),

                (OrderState::PartiallyFilled, OrderStateTransition::PartialFill) => {
                    Ok(OrderState::PartiallyFilled)
                },
                (OrderState::PartiallyFilled, OrderStateTransition::Fill) => {
                    Ok(OrderState::Filled)
                },
                (OrderState::PartiallyFilled, OrderStateTransition::Discard) => {
                    Ok(OrderState::Discarded)
                },

                _ => Err(Error::InvalidTransition {
                    from: self.to_string(),
                    via: transition.to_string(),
                }),
            }
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// An instruction to trade. `quantity` shrinks as partial fills occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    pub account_id: AccountId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(
        id: OrderId,
        kind: OrderKind,
        account_id: AccountId,
        side: Side,
        price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            kind,
            account_id,
            side,
            price,
            quantity,
        }
    }

    pub fn limit(id: OrderId, account_id: AccountId, side: Side, price: Decimal, quantity: Quantity) -> Self {
        Self::new(id, OrderKind::Limit, account_id, side, price, quantity)
    }

    pub fn market(id: OrderId, account_id: AccountId, side: Side, price: Decimal, quantity: Quantity) -> Self {
        Self::new(id, OrderKind::Market, account_id, side, price, quantity)
    }

    pub fn ioc(id: OrderId, account_id: AccountId, side: Side, price: Decimal, quantity: Quantity) -> Self {
        Self::new(id, OrderKind::ImmediateOrCancel, account_id, side, price, quantity)
    }

    pub fn fok(id: OrderId, account_id: AccountId, side: Side, price: Decimal, quantity: Quantity) -> Self {
        Self::new(id, OrderKind::FillOrKill, account_id, side, price, quantity)
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    /// Shrink by a traded amount, saturating at zero
    pub fn reduce(&mut self, traded: Quantity) {
        self.quantity = self.quantity.saturating_sub(traded);
    }
}
