//! Per-kind resource descriptors
//!
//! Stats are attached to a unit's kind, not to the instance, and are
//! immutable once the kind has been registered.

use serde::{Deserialize, Serialize};

/// Charge request that lets charge-only and other restricted stores accept energy
pub const CHARGE_SENTINEL: i64 = i32::MAX as i64;

/// Tier used by internal transfers that bypass tier gating
pub const UNLIMITED_TIER: i32 = i32::MAX;

/// Nominal voltage of each tier, lowest first
pub const TIER_VOLTAGES: [i64; 15] = [
    8,
    32,
    128,
    512,
    2_048,
    8_192,
    32_768,
    131_072,
    524_288,
    2_097_152,
    8_388_608,
    33_554_432,
    134_217_728,
    536_870_912,
    i32::MAX as i64 - 7,
];

/// Voltage of a tier, clamped into the known tier range
pub fn tier_voltage(tier: i32) -> i64 {
    let index = tier.clamp(0, TIER_VOLTAGES.len() as i32 - 1) as usize;
    TIER_VOLTAGES[index]
}

/// How an electric kind stores and yields energy
///
/// Serialized as the raw signed code: a positive value is a fixed yield,
/// `-1`, `-2` and `-3` select the store flavours below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum EnergyMode {
    /// Single-use consumable: each discharge consumes one unit for this yield
    Fixed(i64),
    /// Standard rechargeable and dischargeable store
    Rechargeable,
    /// Only chargeable through the sentinel request; shows an empty sub-state
    ChargeOnly,
    /// Unlimited (creative) source, only valid on single-unit stacks
    Unlimited,
    /// Any other non-positive code
    Other(i64),
}

impl EnergyMode {
    /// The raw signed code
    pub fn raw(self) -> i64 {
        match self {
            EnergyMode::Fixed(v) | EnergyMode::Other(v) => v,
            EnergyMode::Rechargeable => -1,
            EnergyMode::ChargeOnly => -2,
            EnergyMode::Unlimited => -3,
        }
    }

    /// The fixed yield of a single-use consumable
    pub fn fixed_yield(self) -> Option<i64> {
        match self {
            EnergyMode::Fixed(v) if v > 0 => Some(v),
            _ => None,
        }
    }

    /// Whether the mode keeps a stored charge level
    pub fn is_store(self) -> bool {
        matches!(
            self,
            EnergyMode::Rechargeable | EnergyMode::ChargeOnly | EnergyMode::Unlimited
        )
    }
}

impl From<i64> for EnergyMode {
    fn from(code: i64) -> Self {
        match code {
            v if v > 0 => EnergyMode::Fixed(v),
            -1 => EnergyMode::Rechargeable,
            -2 => EnergyMode::ChargeOnly,
            -3 => EnergyMode::Unlimited,
            v => EnergyMode::Other(v),
        }
    }
}

impl From<EnergyMode> for i64 {
    fn from(mode: EnergyMode) -> Self {
        mode.raw()
    }
}

/// Electrical descriptor of a unit kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectricStats {
    /// Nominal capacity; a negative sign flags the restricted-set variant
    pub capacity: i64,
    /// Largest amount moved by a single limited transfer
    pub transfer_limit: i64,
    /// Lowest tier allowed to charge or discharge this kind
    pub min_tier: i32,
    /// Storage flavour
    pub mode: EnergyMode,
}

impl ElectricStats {
    /// Create a new electric descriptor
    pub fn new(capacity: i64, transfer_limit: i64, min_tier: i32, mode: impl Into<EnergyMode>) -> Self {
        Self {
            capacity,
            transfer_limit,
            min_tier,
            mode: mode.into(),
        }
    }

    /// Absolute capacity
    pub fn max_charge(&self) -> i64 {
        self.capacity.saturating_abs()
    }

    /// Whether this is the restricted-set variant (negative capacity)
    pub fn is_restricted(&self) -> bool {
        self.capacity < 0
    }

    /// Highest level `set_charge` may store
    ///
    /// The restricted-set variant never settles above half its nominal capacity.
    pub fn charge_ceiling(&self) -> i64 {
        if self.is_restricted() {
            self.max_charge() / 2
        } else {
            self.max_charge()
        }
    }

    /// Transfer limit as reported to other energy networks
    pub fn reported_transfer_limit(&self) -> i64 {
        self.transfer_limit.max(self.mode.raw())
    }

    /// Check that the descriptor is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.transfer_limit < 0 {
            return Err(format!("negative transfer limit {}", self.transfer_limit));
        }
        Ok(())
    }
}

/// Fluid container descriptor of a unit kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidStats {
    /// Maximum stored amount; zero or less means "swap-table only"
    pub capacity: i64,
    /// Stack size limit for units of this kind
    pub max_stack_size: i64,
}

impl FluidStats {
    /// Create a new fluid descriptor
    pub fn new(capacity: i64, max_stack_size: i64) -> Self {
        Self {
            capacity,
            max_stack_size,
        }
    }

    /// Capacity clamped to a usable amount
    pub fn usable_capacity(&self) -> u64 {
        self.capacity.max(0) as u64
    }

    /// Check that the descriptor is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity > 0 && self.max_stack_size <= 0 {
            return Err(format!(
                "fluid capacity {} with stack size {}",
                self.capacity, self.max_stack_size
            ));
        }
        Ok(())
    }
}
