// ============================================================================
// Engine Configuration
// Book ordering and execution options for a batch run
// ============================================================================

use serde::{Deserialize, Serialize};

use super::PriceOrdering;

// ============================================================================
// FOK Surplus Handling
// ============================================================================

/// What happens to the unused part of a resting order consumed by a FOK fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FokSurplus {
    /// The resting order leaves the book entirely, surplus included
    Discard,
    /// The surplus goes back on the book with its original priority
    Retain,
}

// ============================================================================
// Complete Engine Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pop order of the ask queue. Bids are always highest first.
    pub ask_priority: PriceOrdering,

    /// Disposal of the resting order after a successful FOK
    pub fok_surplus: FokSurplus,
}

impl EngineConfig {
    pub fn new(ask_priority: PriceOrdering, fok_surplus: FokSurplus) -> Self {
        Self {
            ask_priority,
            fok_surplus,
        }
    }

    /// Builder method: Set ask queue ordering
    pub fn with_ask_priority(mut self, ordering: PriceOrdering) -> Self {
        self.ask_priority = ordering;
        self
    }

    /// Builder method: Set FOK surplus handling
    pub fn with_fok_surplus(mut self, surplus: FokSurplus) -> Self {
        self.fok_surplus = surplus;
        self
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EngineConfig {
    /// Reference behaviour
    /// - Ask queue surfaces the most expensive ask first
    /// - FOK fills consume the whole resting order
    pub fn reference() -> Self {
        Self::new(PriceOrdering::HighestFirst, FokSurplus::Discard)
    }

    /// Conventional exchange behaviour
    /// - Best (lowest) ask first
    /// - FOK surplus stays on the book
    pub fn conventional() -> Self {
        Self::new(PriceOrdering::LowestFirst, FokSurplus::Retain)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::reference()
    }
}
