//! Equipped energy sources
//!
//! A consumer (usually whoever holds the unit) may wear other energy-capable
//! units. `EnergyResource::use_energy` draws from them to top up the unit it
//! is spending from.

use crate::{Catalog, Unit};

/// An equipped slot that can hand out energy
pub trait EnergySource {
    /// Tier of the source; it only feeds units of this tier or below
    fn tier(&self) -> i32;

    /// Whether the source may be drained at all
    fn can_provide_energy(&self) -> bool;

    /// Remove up to `amount`; returns the amount actually removed
    fn discharge(&mut self, amount: i64, tier: i32, ignore_limit: bool, simulate: bool) -> i64;
}

/// Whoever a unit's energy is spent on behalf of
pub trait Consumer {
    /// Creative-like consumers never pay for energy use
    fn has_unlimited_supply(&self) -> bool {
        false
    }

    /// Equipment recharge only runs on the authoritative side
    fn is_authoritative(&self) -> bool {
        true
    }

    /// Energy-capable slots currently equipped, in slot order
    fn equipped_sources(&mut self) -> Vec<&mut dyn EnergySource> {
        Vec::new()
    }

    /// Called once after equipment recharge moved energy
    fn inventory_changed(&mut self) {}
}

/// A unit of this catalog worn as an energy source
///
/// Discharges as a battery: only units that can provide energy give any.
pub struct EquippedUnit<'a> {
    catalog: &'a Catalog,
    unit: &'a mut Unit,
}

impl<'a> EquippedUnit<'a> {
    pub fn new(catalog: &'a Catalog, unit: &'a mut Unit) -> Self {
        Self { catalog, unit }
    }

    pub fn unit(&self) -> &Unit {
        &*self.unit
    }

    /// Charge the source can still hand out
    pub fn charge(&self) -> i64 {
        self.catalog.energy_view(&*self.unit).real_charge()
    }
}

impl EnergySource for EquippedUnit<'_> {
    fn tier(&self) -> i32 {
        self.catalog.energy_view(&*self.unit).tier()
    }

    fn can_provide_energy(&self) -> bool {
        self.catalog.energy_view(&*self.unit).can_provide_energy()
    }

    fn discharge(&mut self, amount: i64, tier: i32, ignore_limit: bool, simulate: bool) -> i64 {
        self.catalog
            .energy(&mut *self.unit)
            .discharge(amount, tier, ignore_limit, true, simulate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElectricStats, UnitKind, CHARGE_SENTINEL};

    struct Wearer<'a> {
        armor: Vec<EquippedUnit<'a>>,
    }

    impl Consumer for Wearer<'_> {
        fn equipped_sources(&mut self) -> Vec<&mut dyn EnergySource> {
            self.armor
                .iter_mut()
                .map(|slot| slot as &mut dyn EnergySource)
                .collect()
        }
    }

    #[test]
    fn test_worn_battery_recharges_tool() {
        let mut catalog = Catalog::new();
        catalog
            .register_kind(UnitKind::new("drill").with_electric(ElectricStats::new(10_000, 128, 1, -1)))
            .unwrap();
        catalog
            .register_kind(UnitKind::new("pack").with_electric(ElectricStats::new(100_000, 512, 2, -2)))
            .unwrap();
        catalog
            .register_kind(UnitKind::new("spare").with_electric(ElectricStats::new(100_000, 512, 2, -1)))
            .unwrap();

        let mut pack = Unit::new("pack", 0u16);
        assert_eq!(
            catalog.energy(&mut pack).charge(CHARGE_SENTINEL, 2, true, false),
            100_000
        );
        // Rechargeable stores are not battery-like sources
        let mut spare = Unit::new("spare", 0u16);
        catalog.energy(&mut spare).set_charge(50_000);

        let mut drill = Unit::new("drill", 0u16);
        {
            let mut wearer = Wearer {
                armor: vec![
                    EquippedUnit::new(&catalog, &mut spare),
                    EquippedUnit::new(&catalog, &mut pack),
                ],
            };
            catalog.energy(&mut drill).charge_from_equipment(&mut wearer);
            assert_eq!(wearer.armor[1].charge(), 90_000);
        }

        assert_eq!(drill.state.charge_level(), 10_000);
        assert_eq!(pack.state.charge_level(), 90_000);
        assert_eq!(spare.state.charge_level(), 50_000);
    }

    #[test]
    fn test_non_authoritative_consumer_skips_recharge() {
        struct Remote;
        impl Consumer for Remote {
            fn is_authoritative(&self) -> bool {
                false
            }
        }

        let mut catalog = Catalog::new();
        catalog
            .register_kind(UnitKind::new("drill").with_electric(ElectricStats::new(10_000, 128, 1, -1)))
            .unwrap();
        let mut drill = Unit::new("drill", 0u16);
        catalog.energy(&mut drill).charge_from_equipment(&mut Remote);
        assert!(!drill.state.has_charge());
    }
}
