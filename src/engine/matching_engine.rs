// ============================================================================
// Matching Engine
// Drives a batch of orders through the execution policies
// ============================================================================

use crate::domain::{
    EngineConfig, Ledger, Order, OrderBook, OrderBookSnapshot, OrderKind, OrderState, Quantity,
};
use crate::engine::factory::PolicySet;
use crate::interfaces::{EventHandler, NoOpEventHandler, OrderEvent};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest quantity that still fits a signed position
pub const MAX_ORDER_QUANTITY: Quantity = i64::MAX as Quantity;

/// Counters for one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub orders_processed: u64,
    pub fills: u64,
    pub ignored: u64,
    pub rejected: u64,
}

/// Single-threaded matching engine owning one book and one ledger
pub struct MatchingEngine {
    config: EngineConfig,

    /// Bid and ask queues
    book: OrderBook,

    /// Settlement state for every account seen so far
    ledger: Ledger,

    /// One policy per order kind
    policies: PolicySet,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,

    stats: EngineStats,
}

impl MatchingEngine {
    /// Create a new matching engine
    pub fn new(
        config: EngineConfig,
        policies: PolicySet,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            book: OrderBook::new(config.ask_priority),
            ledger: Ledger::new(),
            policies,
            event_handler,
            stats: EngineStats::default(),
            config,
        }
    }

    /// Reference configuration, events discarded
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        let policies = PolicySet::from_config(&config);
        Self::new(config, policies, Arc::new(NoOpEventHandler))
    }

    /// Process one order against the current book state
    pub fn process_order(&mut self, order: Order) -> Vec<OrderEvent> {
        let mut events = vec![OrderEvent::OrderReceived {
            order_id: order.id,
            timestamp: Utc::now(),
        }];

        self.stats.orders_processed += 1;
        self.ledger.touch(order.account_id);

        let Some(policy) = self.policies.get(&order.kind) else {
            tracing::debug!(order_id = order.id, kind = %order.kind, "ignoring order of unknown kind");
            self.stats.ignored += 1;
            events.push(OrderEvent::OrderIgnored {
                order_id: order.id,
                kind: order.kind.to_string(),
                timestamp: Utc::now(),
            });
            self.event_handler.on_events(events.clone());
            return events;
        };

        if let Err(reason) = Self::validate_order(&order) {
            tracing::warn!(order_id = order.id, %reason, "order rejected");
            self.stats.rejected += 1;
            events.push(OrderEvent::OrderRejected {
                order_id: order.id,
                reason,
                timestamp: Utc::now(),
            });
            self.event_handler.on_events(events.clone());
            return events;
        }

        let order_id = order.id;
        let price = order.price;
        let requested = order.quantity;
        let is_fok = order.kind == OrderKind::FillOrKill;

        tracing::debug!(order_id, policy = policy.name(), side = ?order.side, %price, requested, "routing order");

        let execution = policy.execute(order, &mut self.book, &mut self.ledger);

        self.stats.fills += execution.fills.len() as u64;
        for fill in execution.fills {
            events.push(OrderEvent::OrderMatched {
                fill,
                timestamp: Utc::now(),
            });
        }

        match execution.state {
            OrderState::Filled => events.push(OrderEvent::OrderFilled {
                order_id,
                total_filled: requested,
                timestamp: Utc::now(),
            }),
            OrderState::Resting | OrderState::PartiallyFilled if execution.rested > 0 => {
                events.push(OrderEvent::OrderRested {
                    order_id,
                    price,
                    quantity: execution.rested,
                    timestamp: Utc::now(),
                })
            },
            OrderState::Discarded if is_fok => events.push(OrderEvent::OrderKilled {
                order_id,
                timestamp: Utc::now(),
            }),
            OrderState::Discarded => events.push(OrderEvent::OrderCancelled {
                order_id,
                unfilled: execution.unfilled,
                timestamp: Utc::now(),
            }),
            _ => {},
        }

        self.event_handler.on_events(events.clone());
        events
    }

    /// Process every order exactly once, in input order
    pub fn process_batch<I>(&mut self, orders: I) -> &Ledger
    where
        I: IntoIterator<Item = Order>,
    {
        for order in orders {
            self.process_order(order);
        }

        tracing::info!(
            orders = self.stats.orders_processed,
            fills = self.stats.fills,
            ignored = self.stats.ignored,
            rejected = self.stats.rejected,
            accounts = self.ledger.len(),
            resting = self.book.resting_orders(),
            "batch processed"
        );

        &self.ledger
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Get order book snapshot
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        self.book.snapshot(depth)
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn validate_order(order: &Order) -> Result<(), String> {
        if order.quantity == 0 {
            return Err("Quantity must be positive".to_string());
        }

        if order.quantity > MAX_ORDER_QUANTITY {
            return Err(format!("Quantity exceeds {}", MAX_ORDER_QUANTITY));
        }

        // Trades happen at resting prices and never exceed a resting order's
        // quantity, so bounding every order's own notional bounds every fill
        if order.price.checked_mul(Decimal::from(order.quantity)).is_none() {
            return Err("Notional value out of range".to_string());
        }

        Ok(())
    }
}

/// Run a batch through a fresh engine with the reference configuration
pub fn process_batch<I>(orders: I) -> Ledger
where
    I: IntoIterator<Item = Order>,
{
    let mut engine = MatchingEngine::with_defaults();
    engine.process_batch(orders);
    engine.into_ledger()
}
