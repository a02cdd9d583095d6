// ============================================================================
// Engine Factory
// Creates matching engines and their policy sets from configuration
// ============================================================================

use crate::domain::{EngineConfig, FokSurplus, OrderKind, PriceOrdering};
use crate::engine::{
    FillOrKillPolicy, ImmediateOrCancelPolicy, LimitPolicy, MarketPolicy, MatchingEngine,
};
use crate::interfaces::{EventHandler, ExecutionPolicy, NoOpEventHandler};
use std::sync::Arc;

// ============================================================================
// Policy Set
// ============================================================================

/// One execution policy per supported order kind
pub struct PolicySet {
    market: Box<dyn ExecutionPolicy>,
    limit: Box<dyn ExecutionPolicy>,
    ioc: Box<dyn ExecutionPolicy>,
    fok: Box<dyn ExecutionPolicy>,
}

impl PolicySet {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            market: Box::new(MarketPolicy::new()),
            limit: Box::new(LimitPolicy::new()),
            ioc: Box::new(ImmediateOrCancelPolicy::new()),
            fok: Box::new(FillOrKillPolicy::new(config.fok_surplus)),
        }
    }

    /// Policy for an order kind; `None` for kinds the engine ignores
    pub fn get(&self, kind: &OrderKind) -> Option<&dyn ExecutionPolicy> {
        match kind {
            OrderKind::Market => Some(self.market.as_ref()),
            OrderKind::Limit => Some(self.limit.as_ref()),
            OrderKind::ImmediateOrCancel => Some(self.ioc.as_ref()),
            OrderKind::FillOrKill => Some(self.fok.as_ref()),
            OrderKind::Unrecognized(_) => None,
        }
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a matching engine from configuration
///
/// # Example
/// ```
/// use batch_matching_engine::prelude::*;
/// use std::sync::Arc;
///
/// let engine = create_from_config(EngineConfig::conventional(), Arc::new(NoOpEventHandler));
/// assert!(engine.book().is_empty());
/// ```
pub fn create_from_config(
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
) -> MatchingEngine {
    let policies = PolicySet::from_config(&config);
    MatchingEngine::new(config, policies, event_handler)
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating matching engines with fluent API
///
/// # Example
/// ```
/// use batch_matching_engine::prelude::*;
/// use std::sync::Arc;
///
/// let engine = MatchingEngineBuilder::new()
///     .conventional_asks()
///     .retain_fok_surplus()
///     .event_handler(Arc::new(LoggingEventHandler))
///     .build();
/// assert_eq!(engine.config(), &EngineConfig::conventional());
/// ```
pub struct MatchingEngineBuilder {
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
}

impl MatchingEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::reference(),
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Ask queue surfaces the lowest ask first
    pub fn conventional_asks(mut self) -> Self {
        self.config.ask_priority = PriceOrdering::LowestFirst;
        self
    }

    /// Ask queue surfaces the highest ask first (reference behaviour)
    pub fn highest_ask_first(mut self) -> Self {
        self.config.ask_priority = PriceOrdering::HighestFirst;
        self
    }

    pub fn retain_fok_surplus(mut self) -> Self {
        self.config.fok_surplus = FokSurplus::Retain;
        self
    }

    pub fn discard_fok_surplus(mut self) -> Self {
        self.config.fok_surplus = FokSurplus::Discard;
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    pub fn build(self) -> MatchingEngine {
        create_from_config(self.config, self.event_handler)
    }
}

impl Default for MatchingEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
