//! Stackcell Core - Per-unit resource engine
//!
//! Every stackable unit can carry two independent resources:
//! - An electrical charge with tiered, saturating charge/discharge semantics
//!   (`EnergyResource`)
//! - A fluid content with bounded accumulation or discrete container swaps
//!   (`FluidResource`)
//!
//! Resource descriptors (`ElectricStats`, `FluidStats`) live on the unit's
//! kind and never change. Per-instance state lives in `UnitState` and is
//! only mutated through the resource views handed out by a `Catalog`.
//!
//! ## Boundary policy
//!
//! Resource operations never fail loudly. Out-of-range requests are clamped,
//! refused transfers return zero (or `false`/`None`), and the reason is
//! reported through `tracing` at trace level as a [`Refusal`]. This lets
//! callers check with `simulate = true` before committing.

mod catalog;
mod config;
pub mod energy;
mod equipment;
mod error;
pub mod fluid;
mod identity;
mod state;
pub mod stats;
pub mod tooltip;

pub use catalog::{Catalog, StateObserver, UnitKind, SINGLE_STACK_VARIANT};
pub use config::EngineConfig;
pub use energy::{EnergyResource, EnergyView};
pub use equipment::{Consumer, EnergySource, EquippedUnit};
pub use error::{Error, Refusal, Result};
pub use fluid::{ContainerSwapTable, DrainTarget, FluidResource, SwapEntry, SwapTable};
pub use identity::{FluidId, KindId, UnitKey, VariantId};
pub use state::{FluidStack, Unit, UnitState};
pub use stats::{ElectricStats, EnergyMode, FluidStats, CHARGE_SENTINEL, UNLIMITED_TIER};
