//! Kind catalog
//!
//! The catalog owns the immutable per-kind templates and the container-swap
//! table, and hands out resource views over unit instances.

use crate::energy::{EnergyResource, EnergyView};
use crate::fluid::{ContainerSwapTable, FluidResource, SwapTable};
use crate::{
    ElectricStats, EngineConfig, Error, FluidStats, KindId, Result, Unit, VariantId,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Variant whose units never stack, regardless of resources
pub const SINGLE_STACK_VARIANT: VariantId = VariantId::new(32763);

/// Hook run after a resource operation changed a unit's persisted state
///
/// Used to re-evaluate usability of the unit once its charge or fluid
/// content moved.
pub trait StateObserver {
    fn state_changed(&self, unit: &Unit);
}

/// The immutable template shared by all units of a kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitKind {
    /// Kind identifier
    pub id: KindId,
    /// Display name, shown as the first description line
    #[serde(default)]
    pub name: Option<String>,
    /// Electric descriptor, if the kind stores energy
    #[serde(default)]
    pub electric: Option<ElectricStats>,
    /// Fluid descriptor, if the kind holds fluid
    #[serde(default)]
    pub fluid: Option<FluidStats>,
    /// Variant a unit switches to once it holds charge (None keeps the current one)
    #[serde(default)]
    pub charged_variant: Option<VariantId>,
    /// Variant a unit switches to once drained (None keeps the current one)
    #[serde(default)]
    pub empty_variant: Option<VariantId>,
}

impl UnitKind {
    /// Create a kind with no resources
    pub fn new(id: impl Into<KindId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            electric: None,
            fluid: None,
            charged_variant: None,
            empty_variant: None,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an electric descriptor
    pub fn with_electric(mut self, stats: ElectricStats) -> Self {
        self.electric = Some(stats);
        self
    }

    /// Attach a fluid descriptor
    pub fn with_fluid(mut self, stats: FluidStats) -> Self {
        self.fluid = Some(stats);
        self
    }

    /// Set the charged and empty sub-state variants
    pub fn with_charge_variants(
        mut self,
        charged: impl Into<VariantId>,
        empty: impl Into<VariantId>,
    ) -> Self {
        self.charged_variant = Some(charged.into());
        self.empty_variant = Some(empty.into());
        self
    }

    /// Check every descriptor on the kind
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidStats {
            kind: self.id.clone(),
            reason,
        };
        if let Some(stats) = &self.electric {
            stats.validate().map_err(invalid)?;
        }
        if let Some(stats) = &self.fluid {
            stats.validate().map_err(invalid)?;
        }
        Ok(())
    }
}

/// Registry of unit kinds plus the container-swap table
#[derive(Clone)]
pub struct Catalog {
    kinds: IndexMap<KindId, UnitKind>,
    swaps: Arc<dyn ContainerSwapTable + Send + Sync>,
    config: EngineConfig,
}

impl Catalog {
    /// Create an empty catalog with default config and no swap entries
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
            swaps: Arc::new(SwapTable::new()),
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine config
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the container-swap table
    pub fn with_swap_table(mut self, table: impl ContainerSwapTable + Send + Sync + 'static) -> Self {
        self.swaps = Arc::new(table);
        self
    }

    /// Register a kind; stats are fixed from here on
    pub fn register_kind(&mut self, kind: UnitKind) -> Result<()> {
        if self.kinds.contains_key(&kind.id) {
            return Err(Error::DuplicateKind(kind.id));
        }
        kind.validate()?;
        tracing::debug!(kind = %kind.id, electric = kind.electric.is_some(), fluid = kind.fluid.is_some(), "registered unit kind");
        self.kinds.insert(kind.id.clone(), kind);
        Ok(())
    }

    /// Look up a kind
    pub fn kind(&self, id: &KindId) -> Option<&UnitKind> {
        self.kinds.get(id)
    }

    /// Look up a kind, failing when it is unknown
    pub fn require_kind(&self, id: &KindId) -> Result<&UnitKind> {
        self.kinds.get(id).ok_or_else(|| Error::UnknownKind(id.clone()))
    }

    /// All registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &UnitKind> {
        self.kinds.values()
    }

    /// Electric stats of a unit's kind
    pub fn electric_stats(&self, unit: &Unit) -> Option<&ElectricStats> {
        self.kind(&unit.kind).and_then(|k| k.electric.as_ref())
    }

    /// Fluid stats of a unit's kind
    pub fn fluid_stats(&self, unit: &Unit) -> Option<&FluidStats> {
        self.kind(&unit.kind).and_then(|k| k.fluid.as_ref())
    }

    pub fn swap_table(&self) -> &dyn ContainerSwapTable {
        self.swaps.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only energy queries for a unit
    pub fn energy_view<'a>(&'a self, unit: &'a Unit) -> EnergyView<'a> {
        EnergyView::new(unit, self.electric_stats(unit))
    }

    /// Energy operations on a unit
    pub fn energy<'a>(&'a self, unit: &'a mut Unit) -> EnergyResource<'a> {
        let kind = self.kinds.get(&unit.kind);
        EnergyResource::new(unit, kind, &self.config)
    }

    /// Fluid operations on a unit
    pub fn fluid<'a>(&'a self, unit: &'a mut Unit) -> FluidResource<'a> {
        let stats = self.kinds.get(&unit.kind).and_then(|k| k.fluid.as_ref());
        FluidResource::new(unit, stats, self.swaps.as_ref())
    }

    /// Maximum stack size for a unit in its current state
    ///
    /// Charged stores never stack. Fluid kinds use their own limit.
    pub fn stack_limit(&self, unit: &Unit) -> u32 {
        if let Some(stats) = self.electric_stats(unit) {
            if stats.mode.is_store() && self.energy_view(unit).real_charge() > 0 {
                return 1;
            }
        }
        if let Some(stats) = self.fluid_stats(unit) {
            return u32::try_from(stats.max_stack_size.max(0)).unwrap_or(u32::MAX);
        }
        if unit.variant == SINGLE_STACK_VARIANT {
            return 1;
        }
        self.config.default_stack_limit()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("kinds", &self.kinds)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
