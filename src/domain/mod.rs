// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod account;
pub mod config;
pub mod fill;
pub mod order;
pub mod order_book;
pub mod order_queue;

pub use account::{Account, Ledger};
pub use config::{EngineConfig, FokSurplus};
pub use fill::Fill;
pub use order::{AccountId, Order, OrderId, OrderKind, Quantity, Side};
pub use order_book::{OrderBook, OrderBookSnapshot};
pub use order_queue::{OrderQueue, PriceOrdering, RestingOrder};

// Re-export state machine
pub use order::state::{OrderState, OrderStateTransition};
