//! Container swap definition schema

use serde::{Deserialize, Serialize};
use stackcell_core::{FluidId, FluidStack, SwapEntry, UnitKey};

/// A filled discrete container and the container it empties into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDef {
    /// Identity of the filled container
    pub filled: UnitKey,
    /// Identity once drained; omit for containers used up by draining
    #[serde(default)]
    pub empty: Option<UnitKey>,
    /// Fluid held by the filled container
    pub fluid: FluidId,
    /// Amount held by the filled container
    pub amount: u64,
}

impl SwapDef {
    /// Convert into a swap table entry
    pub fn to_entry(&self) -> SwapEntry {
        SwapEntry {
            filled: self.filled.clone(),
            empty: self.empty.clone(),
            fluid: FluidStack::new(self.fluid.clone(), self.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_def_ron() {
        let ron_str = r#"
        (
            filled: (kind: "cell", variant: 1),
            empty: Some((kind: "cell", variant: 0)),
            fluid: "water",
            amount: 1000,
        )
        "#;

        let def: SwapDef = ron::from_str(ron_str).unwrap();
        let entry = def.to_entry();
        assert_eq!(entry.filled, UnitKey::new("cell", 1u16));
        assert_eq!(entry.empty, Some(UnitKey::new("cell", 0u16)));
        assert_eq!(entry.fluid, FluidStack::new("water", 1000));
    }
}
