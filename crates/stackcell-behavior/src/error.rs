//! Error types for stackcell-behavior

use stackcell_core::VariantId;
use thiserror::Error;

/// Result type for registry setup
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a behavior registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Variants at or above the reserved floor cannot carry behaviors
    #[error("{0} is reserved and cannot carry behaviors")]
    ReservedVariant(VariantId),
}

/// A behavior handler failed while processing an event
///
/// Faults never leave the dispatcher: the chain stops, the fault is logged
/// and the event is reported as unhandled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerFault {
    message: String,
}

impl HandlerFault {
    /// Create a fault with a diagnostic message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of a fallible behavior hook
pub type HookResult<T> = std::result::Result<T, HandlerFault>;

// Faults are carried out of handlers running on any dispatch thread.
fn _assert_send_sync<T: Send + Sync>() {}
fn _errors_are_send_sync() {
    _assert_send_sync::<Error>();
    _assert_send_sync::<HandlerFault>();
}
