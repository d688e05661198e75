//! Error types for stackcell-core

use crate::KindId;
use thiserror::Error;

/// Core error type
///
/// Only raised while setting up a catalog. Resource operations never return
/// errors; see [`Refusal`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown unit kind: {0}")]
    UnknownKind(KindId),

    #[error("Duplicate unit kind: {0}")]
    DuplicateKind(KindId),

    #[error("Duplicate container swap entry: {0}")]
    DuplicateSwapEntry(String),

    #[error("Invalid stats for {kind}: {reason}")]
    InvalidStats { kind: KindId, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Why a resource operation turned into a no-op
///
/// Refusals are diagnostics, not errors: the operation still returns its
/// zero/`false`/`None` value. Exceeding capacity is never a refusal, the
/// amount is clamped instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    #[error("kind has no stats for this resource")]
    MissingStats,

    #[error("tier {offered} is below the required tier {required}")]
    InvalidTier { required: i32, offered: i32 },

    #[error("quantity {0} is not a single unit")]
    InvalidQuantity(u32),

    #[error("fluid {incoming} does not mix with stored {stored}")]
    IncompatibleResourceKind { stored: String, incoming: String },

    #[error("energy mode {0} does not allow this transfer")]
    ModeForbids(i64),

    #[error("unit cannot provide energy")]
    NotProvider,
}

impl Refusal {
    /// Log the refusal at trace level
    pub(crate) fn report(self, operation: &'static str) {
        tracing::trace!(operation, reason = %self, "resource operation refused");
    }
}
