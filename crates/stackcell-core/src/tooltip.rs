//! Base description lines of a unit's resources
//!
//! Behavior handlers append to or rewrite these lines; this module only
//! renders what the kind's stats and the unit's state say.

use crate::stats::tier_voltage;
use crate::{Catalog, EnergyMode, Unit};

/// Description lines for `unit`: display name, energy, then fluid
pub fn resource_lines(catalog: &Catalog, unit: &Unit) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(name) = catalog.kind(&unit.kind).and_then(|kind| kind.name.as_ref()) {
        lines.push(name.clone());
    }

    if let Some(stats) = catalog.electric_stats(unit) {
        let view = catalog.energy_view(unit);
        match stats.mode.fixed_yield() {
            Some(value) => lines.push(format!(
                "Stored energy: {} EU (tier {})",
                value,
                stats.min_tier.max(0)
            )),
            None if stats.mode == EnergyMode::ChargeOnly && view.real_charge() <= 0 => {
                lines.push("Empty".to_string())
            }
            None => lines.push(format!(
                "{} / {} EU at {} V",
                view.real_charge(),
                stats.max_charge(),
                tier_voltage(stats.min_tier)
            )),
        }
    }

    if let Some(stats) = catalog.fluid_stats(unit) {
        if stats.capacity > 0 {
            match unit.state.fluid() {
                Some(content) => {
                    lines.push(content.fluid.to_string());
                    lines.push(format!("{} / {} L", content.amount, stats.capacity));
                }
                None => {
                    lines.push("No fluid".to_string());
                    lines.push(format!("0 / {} L", stats.capacity));
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElectricStats, FluidStack, FluidStats, UnitKind};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .register_kind(UnitKind::new("battery").with_electric(ElectricStats::new(100_000, 128, 2, -1)))
            .unwrap();
        catalog
            .register_kind(UnitKind::new("crystal").with_electric(ElectricStats::new(-50_000, 512, 20, -2)))
            .unwrap();
        catalog
            .register_kind(UnitKind::new("fuel_rod").with_electric(ElectricStats::new(0, 0, -1, 4000)))
            .unwrap();
        catalog
            .register_kind(UnitKind::new("tank").with_fluid(FluidStats::new(8000, 1)))
            .unwrap();
        catalog
            .register_kind(
                UnitKind::new("canister")
                    .with_name("Steam Canister")
                    .with_fluid(FluidStats::new(1000, 1)),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_charge_line_uses_tier_voltage() {
        let catalog = catalog();
        let mut battery = Unit::new("battery", 0u16);
        catalog.energy(&mut battery).set_charge(2_500);

        assert_eq!(resource_lines(&catalog, &battery), vec!["2500 / 100000 EU at 128 V"]);
    }

    #[test]
    fn test_charge_only_empty_and_clamped_voltage() {
        let catalog = catalog();
        let mut crystal = Unit::new("crystal", 0u16);
        assert_eq!(resource_lines(&catalog, &crystal), vec!["Empty"]);

        crystal.state.set_charge_level(10);
        assert_eq!(
            resource_lines(&catalog, &crystal),
            vec!["10 / 50000 EU at 2147483640 V"]
        );
    }

    #[test]
    fn test_fixed_yield_line() {
        let catalog = catalog();
        assert_eq!(
            resource_lines(&catalog, &Unit::new("fuel_rod", 0u16)),
            vec!["Stored energy: 4000 EU (tier 0)"]
        );
    }

    #[test]
    fn test_fluid_lines() {
        let catalog = catalog();
        let mut tank = Unit::new("tank", 0u16);
        assert_eq!(resource_lines(&catalog, &tank), vec!["No fluid", "0 / 8000 L"]);

        tank.state.set_fluid(Some(FluidStack::new("steam", 1200)));
        assert_eq!(resource_lines(&catalog, &tank), vec!["steam", "1200 / 8000 L"]);
        assert!(resource_lines(&catalog, &Unit::new("rock", 0u16)).is_empty());
    }

    #[test]
    fn test_display_name_leads() {
        let catalog = catalog();
        assert_eq!(
            resource_lines(&catalog, &Unit::new("canister", 0u16)),
            vec!["Steam Canister", "No fluid", "0 / 1000 L"]
        );
    }
}
