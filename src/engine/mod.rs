// ============================================================================
// Engine Module
// Contains the execution policies and the batch driver
// ============================================================================

mod fok;
mod ioc;
mod limit;
mod market;
mod matching_engine;
mod settlement;

pub mod factory;

pub use factory::{create_from_config, MatchingEngineBuilder, PolicySet};
pub use fok::FillOrKillPolicy;
pub use ioc::ImmediateOrCancelPolicy;
pub use limit::LimitPolicy;
pub use market::MarketPolicy;
pub use matching_engine::{process_batch, EngineStats, MatchingEngine, MAX_ORDER_QUANTITY};
