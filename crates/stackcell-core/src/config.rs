//! Engine Configuration - Tolerances and defaults
//!
//! Loaded from RON by `stackcell-script`, or built in code. Setters clamp
//! out-of-range values instead of rejecting them.

use serde::{Deserialize, Serialize};

/// Default float tolerance of `EnergyResource::use_energy`
pub const DEFAULT_USE_TOLERANCE: f64 = 1e-7;

/// Default stack limit for units without resource-specific limits
pub const DEFAULT_STACK_LIMIT: u32 = 64;

/// Configuration shared by every resource view of a catalog
///
/// # Example
///
/// ```
/// use stackcell_core::EngineConfig;
///
/// let config = EngineConfig::default().with_stack_limit(0);
/// assert_eq!(config.default_stack_limit(), 1);
/// assert!(config.recharge_from_equipment());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How close a discharge must come to the requested amount for
    /// `use_energy` to report success
    use_tolerance: f64,
    /// Whether `use_energy` pulls charge from the consumer's equipped sources
    recharge_from_equipment: bool,
    /// Stack limit of units with no resource-specific limit
    default_stack_limit: u32,
}

impl EngineConfig {
    /// Set the use tolerance
    ///
    /// Negative or non-finite values fall back to the default.
    pub fn with_use_tolerance(mut self, tolerance: f64) -> Self {
        self.set_use_tolerance(tolerance);
        self
    }

    /// Enable or disable recharging from equipped sources
    pub fn with_equipment_recharge(mut self, enabled: bool) -> Self {
        self.recharge_from_equipment = enabled;
        self
    }

    /// Set the default stack limit, clamped to at least 1
    pub fn with_stack_limit(mut self, limit: u32) -> Self {
        self.default_stack_limit = limit.max(1);
        self
    }

    /// Set the use tolerance in place
    pub fn set_use_tolerance(&mut self, tolerance: f64) {
        self.use_tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            DEFAULT_USE_TOLERANCE
        };
    }

    /// Re-apply the setter clamps (for deserialized values)
    pub fn validated(self) -> Self {
        let recharge = self.recharge_from_equipment;
        Self::default()
            .with_use_tolerance(self.use_tolerance)
            .with_equipment_recharge(recharge)
            .with_stack_limit(self.default_stack_limit)
    }

    pub fn use_tolerance(&self) -> f64 {
        self.use_tolerance
    }

    pub fn recharge_from_equipment(&self) -> bool {
        self.recharge_from_equipment
    }

    pub fn default_stack_limit(&self) -> u32 {
        self.default_stack_limit
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_tolerance: DEFAULT_USE_TOLERANCE,
            recharge_from_equipment: true,
            default_stack_limit: DEFAULT_STACK_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.use_tolerance(), 1e-7);
        assert!(config.recharge_from_equipment());
        assert_eq!(config.default_stack_limit(), 64);
    }

    #[test]
    fn test_tolerance_clamped() {
        let config = EngineConfig::default().with_use_tolerance(-1.0);
        assert_eq!(config.use_tolerance(), DEFAULT_USE_TOLERANCE);

        let config = EngineConfig::default().with_use_tolerance(f64::NAN);
        assert_eq!(config.use_tolerance(), DEFAULT_USE_TOLERANCE);

        let config = EngineConfig::default().with_use_tolerance(0.5);
        assert_eq!(config.use_tolerance(), 0.5);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: EngineConfig = ron::from_str("(default_stack_limit: 0)").unwrap();
        assert_eq!(config.default_stack_limit(), 0);
        let config = config.validated();
        assert_eq!(config.default_stack_limit(), 1);
        assert_eq!(config.use_tolerance(), DEFAULT_USE_TOLERANCE);
    }
}
