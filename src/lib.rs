// ============================================================================
// Batch Matching Engine Library
// Single-book order matching with per-account settlement
// ============================================================================

//! # Batch Matching Engine
//!
//! Matches a batch of orders against one two-sided book and settles every
//! trade into a per-account ledger.
//!
//! ## Features
//!
//! - **Four execution policies**: market, limit, immediate-or-cancel and fill-or-kill
//! - **Price/time priority queues** backed by a binary heap
//! - **Exact decimal settlement** of balance, position, turnover and volume
//! - **Event stream** for audit and debugging through pluggable handlers
//! - **CSV in, CSV out** with lenient or strict field parsing
//!
//! ## Example
//!
//! ```rust
//! use batch_matching_engine::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let ledger = process_batch(vec![
//!     Order::limit(1, 100, Side::Buy, Decimal::from(10), 100),
//!     Order::limit(2, 200, Side::Sell, Decimal::from(10), 100),
//! ]);
//!
//! let buyer = ledger.get(100).unwrap();
//! assert_eq!(buyer.balance, Decimal::from(-1000));
//! assert_eq!(buyer.position, 100);
//! ```

pub mod cli;
pub mod csv_io;
pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::csv_io::{read_orders, write_results, CsvOptions, ParseMode};
    pub use crate::domain::order::state::{OrderState, OrderStateTransition};
    pub use crate::domain::{
        Account, AccountId, EngineConfig, Fill, FokSurplus, Ledger, Order, OrderBook,
        OrderBookSnapshot, OrderId, OrderKind, PriceOrdering, Quantity, Side,
    };
    pub use crate::engine::{
        create_from_config, process_batch, FillOrKillPolicy, ImmediateOrCancelPolicy,
        LimitPolicy, MarketPolicy, MatchingEngine, MatchingEngineBuilder,
    };
    pub use crate::error::Error;
    pub use crate::interfaces::{
        EventHandler, Execution, ExecutionPolicy, LoggingEventHandler, NoOpEventHandler,
        OrderEvent, RecordingEventHandler,
    };
}
