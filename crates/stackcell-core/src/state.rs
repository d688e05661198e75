//! Unit instances and their persisted resource state

use crate::{FluidId, KindId, UnitKey, VariantId};
use serde::{Deserialize, Serialize};

/// An amount of a single fluid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidStack {
    pub fluid: FluidId,
    pub amount: u64,
}

impl FluidStack {
    /// Create a new fluid stack
    pub fn new(fluid: impl Into<FluidId>, amount: u64) -> Self {
        Self {
            fluid: fluid.into(),
            amount,
        }
    }

    /// Same fluid, different amount
    pub fn with_amount(&self, amount: u64) -> Self {
        Self {
            fluid: self.fluid.clone(),
            amount,
        }
    }

    /// Check whether two stacks hold the same fluid (amounts ignored)
    pub fn is_same_fluid(&self, other: &FluidStack) -> bool {
        self.fluid == other.fluid
    }
}

/// Persisted resource state of a unit
///
/// Charge and fluid content are separate typed fields; an absent field is
/// the same as a zero one and is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    charge: Option<u64>,
    fluid: Option<FluidStack>,
}

impl UnitState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored charge level, 0 when absent
    pub fn charge_level(&self) -> u64 {
        self.charge.unwrap_or(0)
    }

    /// Whether a charge level is stored
    pub fn has_charge(&self) -> bool {
        self.charge.is_some()
    }

    /// Store a charge level; zero clears it
    pub fn set_charge_level(&mut self, level: u64) {
        self.charge = (level > 0).then_some(level);
    }

    /// Remove the stored charge
    pub fn clear_charge(&mut self) {
        self.charge = None;
    }

    /// Stored fluid content
    pub fn fluid(&self) -> Option<&FluidStack> {
        self.fluid.as_ref()
    }

    /// Store fluid content; empty stacks are dropped
    pub fn set_fluid(&mut self, fluid: Option<FluidStack>) {
        self.fluid = fluid.filter(|stack| stack.amount > 0);
    }

    /// Whether nothing is stored at all
    pub fn is_empty(&self) -> bool {
        self.charge.is_none() && self.fluid.is_none()
    }
}

/// A resource-bearing stack of units of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// The kind of this unit (selects its stats)
    pub kind: KindId,
    /// The current variant (selects sub-state and behavior chain)
    pub variant: VariantId,
    /// Stack size
    pub quantity: u32,
    /// Persisted resource state
    pub state: UnitState,
}

impl Unit {
    /// Create a single unit with empty state
    pub fn new(kind: impl Into<KindId>, variant: impl Into<VariantId>) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.into(),
            quantity: 1,
            state: UnitState::new(),
        }
    }

    /// Set the stack size
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Create a single unit from its key
    pub fn from_key(key: UnitKey) -> Self {
        Self::new(key.kind, key.variant)
    }

    /// Kind plus variant
    pub fn key(&self) -> UnitKey {
        UnitKey {
            kind: self.kind.clone(),
            variant: self.variant,
        }
    }

    /// Replace kind and variant, keeping quantity and state
    pub fn set_key(&mut self, key: UnitKey) {
        self.kind = key.kind;
        self.variant = key.variant;
    }

    /// Resource mutation is only allowed on single units
    pub fn is_single(&self) -> bool {
        self.quantity == 1
    }

    /// Whether the stack has been used up
    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }

    /// Remove units from the stack, stopping at zero
    pub fn shrink(&mut self, count: u32) {
        self.quantity = self.quantity.saturating_sub(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_not_stored() {
        let mut state = UnitState::new();
        state.set_charge_level(0);
        assert!(!state.has_charge());

        state.set_fluid(Some(FluidStack::new("water", 0)));
        assert!(state.fluid().is_none());
        assert!(state.is_empty());

        state.set_charge_level(40);
        assert_eq!(state.charge_level(), 40);
        state.clear_charge();
        assert_eq!(state.charge_level(), 0);
    }

    #[test]
    fn test_unit_key_roundtrip() {
        let mut unit = Unit::new("cell", 1u16).with_quantity(3);
        assert!(!unit.is_single());

        unit.set_key(UnitKey::new("cell", 7u16));
        assert_eq!(unit.variant, VariantId::new(7));
        assert_eq!(unit.quantity, 3);

        unit.shrink(5);
        assert!(unit.is_depleted());
    }

    #[test]
    fn test_state_survives_serialization() {
        let mut unit = Unit::new("lapotron", 2u16);
        unit.state.set_charge_level(123_456);
        unit.state.set_fluid(Some(FluidStack::new("coolant", 250)));

        let bytes = bincode::serialize(&unit).unwrap();
        let restored: Unit = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, unit);
    }
}
