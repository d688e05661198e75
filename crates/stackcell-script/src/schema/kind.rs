//! Unit kind definition schema

use serde::{Deserialize, Serialize};
use stackcell_core::{ElectricStats, FluidStats, KindId, UnitKind, VariantId};

/// Definition of a unit kind (e.g., battery, drill, fluid cell)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindDef {
    /// Unique identifier for this kind
    pub id: KindId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Electric stats; omit for kinds without charge
    #[serde(default)]
    pub electric: Option<ElectricStats>,
    /// Fluid stats; omit for kinds without a fluid tank
    #[serde(default)]
    pub fluid: Option<FluidStats>,
    /// Variant shown while charged
    #[serde(default)]
    pub charged_variant: Option<VariantId>,
    /// Variant shown while empty
    #[serde(default)]
    pub empty_variant: Option<VariantId>,
}

impl KindDef {
    /// Convert into the catalog's kind template
    pub fn to_kind(&self) -> UnitKind {
        UnitKind {
            id: self.id.clone(),
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            electric: self.electric,
            fluid: self.fluid,
            charged_variant: self.charged_variant,
            empty_variant: self.empty_variant,
        }
    }
}
