// ============================================================================
// Event Handler Interface
// Defines the contract for observing order and fill events
// ============================================================================

use crate::domain::{Fill, OrderId, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Events emitted by the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    /// Order taken from the batch
    OrderReceived {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },

    /// Order failed validation and had no effect
    OrderRejected {
        order_id: OrderId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Order kind not handled by any policy
    OrderIgnored {
        order_id: OrderId,
        kind: String,
        timestamp: DateTime<Utc>,
    },

    /// Trade executed
    OrderMatched {
        fill: Fill,
        timestamp: DateTime<Utc>,
    },

    /// Order (or its remainder) left on the book
    OrderRested {
        order_id: OrderId,
        price: Decimal,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Incoming order fully filled
    OrderFilled {
        order_id: OrderId,
        total_filled: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Unfilled market/IOC quantity dropped
    OrderCancelled {
        order_id: OrderId,
        unfilled: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// FOK order could not be filled in full
    OrderKilled {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing matching engine events
/// Implementations can handle logging, auditing, test capture, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an order event
    fn on_event(&self, event: OrderEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<OrderEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: OrderEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        tracing::debug!("Matching engine event: {:?}", event);
    }
}

/// Keeps every event in memory
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<OrderEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the recorder empty
    pub fn drain(&self) -> Vec<OrderEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Fills seen so far, in execution order
    pub fn fills(&self) -> Vec<Fill> {
        let events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events
            .iter()
            .filter_map(|event| match event {
                OrderEvent::OrderMatched { fill, .. } => Some(fill.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
