//! Identity types for unit kinds, variants and fluids

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a unit kind (the immutable template shared by many units)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(pub String);

impl KindId {
    /// Create a new kind ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KindId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for KindId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Sub-identifier of a unit
///
/// Selects both the visual/logical sub-state of a unit and the behavior
/// chain its events dispatch to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VariantId(pub u16);

impl VariantId {
    /// Create a new variant ID
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw variant value
    pub fn raw(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant:{}", self.0)
    }
}

impl From<u16> for VariantId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// Identifier of a fluid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FluidId(pub String);

impl FluidId {
    /// Create a new fluid ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FluidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FluidId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Full identity of a unit: its kind plus its variant
///
/// This is the key of the container-swap table, since "empty cell" and
/// "water cell" are usually the same kind with different variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    pub kind: KindId,
    pub variant: VariantId,
}

impl UnitKey {
    /// Create a new unit key
    pub fn new(kind: impl Into<KindId>, variant: impl Into<VariantId>) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.variant.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id() {
        let id = KindId::new("battery");
        assert_eq!(id.as_str(), "battery");
        assert_eq!(format!("{}", id), "battery");
    }

    #[test]
    fn test_variant_id() {
        let id = VariantId::new(32000);
        assert_eq!(id.raw(), 32000);
        assert_eq!(format!("{}", id), "variant:32000");
    }

    #[test]
    fn test_unit_key_display() {
        let key = UnitKey::new("cell", 3u16);
        assert_eq!(format!("{}", key), "cell@3");
    }
}
