//! Fluid resource
//!
//! Two ways for a unit to hold fluid:
//! - Discrete containers listed in a [`ContainerSwapTable`]: filling or
//!   draining replaces the unit's identity (empty cell ⇄ water cell) and no
//!   partial state exists.
//! - Bounded accumulators with `FluidStats`: the content is persisted on the
//!   unit and grows or shrinks by any amount up to capacity.
//!
//! The swap table is always consulted first since it is more specific.

use crate::catalog::StateObserver;
use crate::{Error, FluidId, FluidStack, FluidStats, Refusal, Result, Unit, UnitKey};
use indexmap::IndexMap;

/// Result of looking up a filled container in the swap table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainTarget {
    /// Identity after draining; `None` means the container is used up
    pub empty: Option<UnitKey>,
    /// Full content of the filled container
    pub fluid: FluidStack,
}

/// Lookup between empty and filled discrete containers
pub trait ContainerSwapTable {
    /// Filled identity and the amount it takes, for an empty container and a fluid
    fn lookup_fill_target(&self, empty: &UnitKey, fluid: &FluidId) -> Option<(UnitKey, u64)>;

    /// Empty identity and content of a filled container
    fn lookup_drain_target(&self, filled: &UnitKey) -> Option<DrainTarget>;
}

/// One filled container of the swap table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwapEntry {
    pub filled: UnitKey,
    #[serde(default)]
    pub empty: Option<UnitKey>,
    pub fluid: FluidStack,
}

/// In-memory container-swap table
#[derive(Debug, Clone, Default)]
pub struct SwapTable {
    by_filled: IndexMap<UnitKey, SwapEntry>,
    by_empty: IndexMap<(UnitKey, FluidId), UnitKey>,
}

impl SwapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filled container, its empty counterpart and its content
    pub fn insert(&mut self, filled: UnitKey, empty: Option<UnitKey>, fluid: FluidStack) -> Result<()> {
        self.insert_entry(SwapEntry {
            filled,
            empty,
            fluid,
        })
    }

    /// Register a swap entry
    pub fn insert_entry(&mut self, entry: SwapEntry) -> Result<()> {
        if self.by_filled.contains_key(&entry.filled) {
            return Err(Error::DuplicateSwapEntry(entry.filled.to_string()));
        }
        if let Some(empty) = &entry.empty {
            let key = (empty.clone(), entry.fluid.fluid.clone());
            if self.by_empty.contains_key(&key) {
                return Err(Error::DuplicateSwapEntry(format!("{} + {}", empty, entry.fluid.fluid)));
            }
            self.by_empty.insert(key, entry.filled.clone());
        }
        self.by_filled.insert(entry.filled.clone(), entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_filled.is_empty()
    }
}

impl ContainerSwapTable for SwapTable {
    fn lookup_fill_target(&self, empty: &UnitKey, fluid: &FluidId) -> Option<(UnitKey, u64)> {
        let filled = self.by_empty.get(&(empty.clone(), fluid.clone()))?;
        let entry = self.by_filled.get(filled)?;
        Some((filled.clone(), entry.fluid.amount))
    }

    fn lookup_drain_target(&self, filled: &UnitKey) -> Option<DrainTarget> {
        self.by_filled.get(filled).map(|entry| DrainTarget {
            empty: entry.empty.clone(),
            fluid: entry.fluid.clone(),
        })
    }
}

/// Fluid operations over a single unit
pub struct FluidResource<'a> {
    unit: &'a mut Unit,
    stats: Option<&'a FluidStats>,
    swaps: &'a dyn ContainerSwapTable,
    observer: Option<&'a dyn StateObserver>,
}

impl<'a> FluidResource<'a> {
    pub(crate) fn new(
        unit: &'a mut Unit,
        stats: Option<&'a FluidStats>,
        swaps: &'a dyn ContainerSwapTable,
    ) -> Self {
        Self {
            unit,
            stats,
            swaps,
            observer: None,
        }
    }

    /// Notify `observer` whenever the persisted content is rewritten
    pub fn observed_by(mut self, observer: &'a dyn StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn unit(&self) -> &Unit {
        &*self.unit
    }

    /// Accumulator capacity, 0 for swap-only or non-fluid kinds
    pub fn capacity(&self) -> u64 {
        self.stats.map_or(0, FluidStats::usable_capacity)
    }

    /// Current content
    ///
    /// Kinds without a positive capacity derive it from the swap table.
    pub fn content(&self) -> Option<FluidStack> {
        if self.capacity() == 0 {
            return self
                .swaps
                .lookup_drain_target(&self.unit.key())
                .map(|target| target.fluid);
        }
        self.unit.state.fluid().cloned()
    }

    /// Offer `incoming`; returns the amount accepted
    ///
    /// With `commit == false` nothing is changed.
    pub fn fill(&mut self, incoming: &FluidStack, commit: bool) -> u64 {
        if !self.unit.is_single() {
            Refusal::InvalidQuantity(self.unit.quantity).report("fill");
            return 0;
        }

        if let Some((filled, amount)) = self.swaps.lookup_fill_target(&self.unit.key(), &incoming.fluid) {
            if incoming.amount >= amount {
                if commit {
                    tracing::debug!(from = %self.unit.key(), to = %filled, fluid = %incoming.fluid, "filled container by swap");
                    self.unit.set_key(filled);
                }
                return amount;
            }
        }

        let capacity = self.capacity();
        if capacity == 0 {
            Refusal::MissingStats.report("fill");
            return 0;
        }
        if incoming.amount == 0 {
            return 0;
        }

        let (stored, accepted) = match self.unit.state.fluid() {
            None => (0, incoming.amount.min(capacity)),
            Some(current) if !current.is_same_fluid(incoming) => {
                Refusal::IncompatibleResourceKind {
                    stored: current.fluid.to_string(),
                    incoming: incoming.fluid.to_string(),
                }
                .report("fill");
                return 0;
            }
            Some(current) => (
                current.amount,
                incoming.amount.min(capacity.saturating_sub(current.amount)),
            ),
        };

        if commit && accepted > 0 {
            self.write_content(Some(incoming.with_amount(stored + accepted)));
        }
        accepted
    }

    /// Take up to `max_amount`; returns what was drained
    ///
    /// A swap-table container only drains whole: when `max_amount` covers
    /// its full content it turns into its empty counterpart (or is used up).
    pub fn drain(&mut self, max_amount: u64, commit: bool) -> Option<FluidStack> {
        if !self.unit.is_single() {
            Refusal::InvalidQuantity(self.unit.quantity).report("drain");
            return None;
        }

        if let Some(target) = self.swaps.lookup_drain_target(&self.unit.key()) {
            if max_amount >= target.fluid.amount {
                if commit {
                    match target.empty {
                        Some(empty) => {
                            tracing::debug!(from = %self.unit.key(), to = %empty, "drained container by swap");
                            self.unit.set_key(empty);
                        }
                        None => {
                            tracing::debug!(from = %self.unit.key(), "drained container used up");
                            self.unit.quantity = 0;
                        }
                    }
                }
                return Some(target.fluid);
            }
        }

        if self.capacity() == 0 {
            return None;
        }
        let current = self.unit.state.fluid()?.clone();
        let drained = max_amount.min(current.amount);
        if drained == 0 {
            return None;
        }
        if commit {
            self.write_content(Some(current.with_amount(current.amount - drained)));
        }
        Some(current.with_amount(drained))
    }

    /// Overwrite the persisted content; empty stacks clear it
    ///
    /// The amount is clamped to the capacity. Stacks and kinds without an
    /// accumulator are refused.
    pub fn set_content(&mut self, content: Option<FluidStack>) -> bool {
        if !self.unit.is_single() {
            Refusal::InvalidQuantity(self.unit.quantity).report("set_content");
            return false;
        }
        let capacity = self.capacity();
        if capacity == 0 {
            Refusal::MissingStats.report("set_content");
            return false;
        }
        self.write_content(content.map(|stack| stack.with_amount(stack.amount.min(capacity))));
        true
    }

    fn write_content(&mut self, content: Option<FluidStack>) {
        self.unit.state.set_fluid(content);
        if let Some(observer) = self.observer {
            observer.state_changed(&*self.unit);
        }
    }
}
