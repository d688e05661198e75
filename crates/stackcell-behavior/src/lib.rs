//! Stackcell Behavior - Variant-scoped interaction handlers
//!
//! Units dispatch interaction events (clicks, uses, dispensing, ticks,
//! tooltips, projectile lookups) to an ordered chain of [`ItemBehavior`]
//! handlers selected by the unit's current variant.
//!
//! ## Lifecycle
//!
//! ```text
//! BehaviorRegistryBuilder ──freeze()──► BehaviorRegistry ──► Dispatcher
//!      (setup, mutable)                 (read-only, shared)   (+ Catalog)
//! ```
//!
//! ## Dispatch rules
//!
//! - Short-circuit events stop at the first handler returning `true`
//! - Projectile and dispense lookups return the first result found
//! - Usability requires every handler to agree
//! - Ticks fan out to every handler
//! - Tooltips are a left fold over the chain
//!
//! Click and use events run the whole chain inside one failure boundary: a
//! [`HandlerFault`] stops the chain, is logged, and the event counts as
//! unhandled. Effects of earlier handlers are kept.

mod context;
mod dispatcher;
mod error;
mod handler;
mod registry;

pub use context::{
    Actor, BlockHit, BlockPos, DispenseSource, EntityRef, Interaction, InteractionEvent,
    Projectile, ProjectileOrigin, ProjectileTag, Side, TickContext,
};
pub use dispatcher::Dispatcher;
pub use error::{Error, HandlerFault, HookResult, Result};
pub use handler::ItemBehavior;
pub use registry::{BehaviorRegistry, BehaviorRegistryBuilder, RESERVED_VARIANT_FLOOR};
