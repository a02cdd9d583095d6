// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod execution_policy;

pub use event_handler::{
    EventHandler, LoggingEventHandler, NoOpEventHandler, OrderEvent, RecordingEventHandler,
};
pub use execution_policy::{Execution, ExecutionPolicy};
